//! School lookup handlers.
//!
//! ```text
//! GET /api/v1/schools/subdomain-availability?name=Mwenge%20Secondary
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::Error;
use crate::domain::ports::SubdomainAvailability;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Query string for [`subdomain_availability`].
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// Candidate school name.
    pub name: String,
}

/// Report the subdomain a school name would receive and whether it is taken.
///
/// Informational only: registration does not reject duplicate names.
#[utoipa::path(
    get,
    path = "/api/v1/schools/subdomain-availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Subdomain lookup", body = SubdomainAvailability),
        (status = 400, description = "Blank name", body = Error),
        (status = 503, description = "School store unavailable", body = Error)
    ),
    tags = ["schools"],
    operation_id = "checkSubdomainAvailability"
)]
#[get("/schools/subdomain-availability")]
pub async fn subdomain_availability(
    state: web::Data<HttpState>,
    query: web::Query<AvailabilityQuery>,
) -> ApiResult<web::Json<SubdomainAvailability>> {
    let availability = state.availability.check(&query.name).await?;
    Ok(web::Json(availability))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{FixtureSchoolRegistrationCommand, MockSubdomainAvailabilityQuery};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    async fn lookup(state: HttpState, uri: &str) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::scope("/api/v1").service(subdomain_availability)),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn reports_the_derived_subdomain() {
        let (status, body) = lookup(
            HttpState::fixtures(),
            "/api/v1/schools/subdomain-availability?name=Mwenge%20Secondary%20School",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["subdomain"], "mwengesecondaryschool");
        assert_eq!(body["available"], true);
        assert_eq!(body["existingSchools"], 0);
    }

    #[rstest]
    #[actix_web::test]
    async fn query_errors_are_mapped() {
        let mut query = MockSubdomainAvailabilityQuery::new();
        query
            .expect_check()
            .times(1)
            .return_once(|_| Err(Error::invalid_request("school name must not be blank")));
        let state = HttpState::new(Arc::new(FixtureSchoolRegistrationCommand), Arc::new(query));

        let (status, body) =
            lookup(state, "/api/v1/schools/subdomain-availability?name=%20").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "school name must not be blank");
    }
}
