//! Region and district lookup handlers.
//!
//! ```text
//! GET /api/v1/regions
//! GET /api/v1/regions/{region}/districts
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::regions::{districts_for, is_known_region, regions};
use crate::inbound::http::ApiResult;

/// Every selectable region, in display order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegionsResponse {
    #[schema(example = json!(["Arusha", "Dar es Salaam"]))]
    pub regions: Vec<String>,
}

/// District options offered once a region is selected.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistrictsResponse {
    #[schema(example = "Dar es Salaam")]
    pub region: String,
    #[schema(example = json!(["Ilala", "Kinondoni", "Temeke", "Ubungo", "Kigamboni"]))]
    pub districts: Vec<String>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

/// List the regions a school may be located in.
#[utoipa::path(
    get,
    path = "/api/v1/regions",
    responses((status = 200, description = "Known regions", body = RegionsResponse)),
    tags = ["regions"],
    operation_id = "listRegions"
)]
#[get("/regions")]
pub async fn list_regions() -> web::Json<RegionsResponse> {
    web::Json(RegionsResponse {
        regions: owned(regions()),
    })
}

/// District options for `region`.
///
/// Regions without a district map offer the four placeholder districts.
#[utoipa::path(
    get,
    path = "/api/v1/regions/{region}/districts",
    params(("region" = String, Path, description = "Region name, e.g. `Dar es Salaam`")),
    responses(
        (status = 200, description = "District options", body = DistrictsResponse),
        (status = 404, description = "Unknown region", body = Error)
    ),
    tags = ["regions"],
    operation_id = "listDistricts"
)]
#[get("/regions/{region}/districts")]
pub async fn list_districts(path: web::Path<String>) -> ApiResult<web::Json<DistrictsResponse>> {
    let region = path.into_inner();
    if !is_known_region(&region) {
        return Err(Error::not_found(format!("unknown region `{region}`"))
            .with_details(json!({ "field": "region", "code": "invalid_choice" })));
    }
    Ok(web::Json(DistrictsResponse {
        districts: owned(districts_for(&region)),
        region,
    }))
}
