//! Final registration submission handler.
//!
//! ```text
//! POST /api/v1/registrations
//! ```

use actix_web::{HttpResponse, post, web};
use tracing::info;

use crate::domain::Error;
use crate::domain::RegistrationReceipt;
use crate::domain::ports::RegisterSchoolRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Validate the form and run the ordered registration writes.
///
/// On success the receipt carries the success notice and the redirect to the
/// login view. Failures carry the failed step and a localized notice in the
/// error details.
#[utoipa::path(
    post,
    path = "/api/v1/registrations",
    request_body = RegisterSchoolRequest,
    responses(
        (status = 201, description = "School registered", body = RegistrationReceipt),
        (status = 400, description = "Invalid fields or rejected values", body = Error),
        (status = 409, description = "Duplicate submission or existing account", body = Error),
        (status = 503, description = "Registration backend unavailable", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "registerSchool"
)]
#[post("/registrations")]
pub async fn register_school(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterSchoolRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    info!(wizard_id = %request.wizard_id, "registration submitted");
    let receipt = state.registrations.register(request).await?;
    Ok(HttpResponse::Created().json(receipt))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{
        FixtureSubdomainAvailabilityQuery, MockSchoolRegistrationCommand,
    };
    use crate::domain::{Locale, Notice, Redirect, SchoolId, Subdomain};
    use crate::test_support::valid_form;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn submit(state: HttpState, body: Value) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::scope("/api/v1").service(register_school)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/v1/registrations")
            .set_json(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    fn request_body() -> Value {
        json!({
            "wizardId": "7a1c9a42-52f1-4a8e-9a6d-0f3c0f0c2b11",
            "form": valid_form(),
        })
    }

    #[rstest]
    #[actix_web::test]
    async fn success_returns_the_receipt() {
        let (status, body) = submit(HttpState::fixtures(), request_body()).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["subdomain"], "mwengesecondaryschool");
        assert_eq!(body["notice"]["kind"], "success");
        assert_eq!(body["redirect"], json!({ "path": "/login", "afterMs": 2000 }));
    }

    #[rstest]
    #[actix_web::test]
    async fn step_failures_surface_with_their_notice() {
        let mut command = MockSchoolRegistrationCommand::new();
        command.expect_register().times(1).return_once(|_| {
            Err(
                Error::service_unavailable("Failed to save school location: timed out")
                    .with_details(json!({ "step": "location", "orphaned": [] })),
            )
        });
        let state = HttpState::new(
            Arc::new(command),
            Arc::new(FixtureSubdomainAvailabilityQuery),
        );

        let (status, body) = submit(state, request_body()).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body["message"],
            "Failed to save school location: timed out"
        );
        assert_eq!(body["details"]["step"], "location");
    }

    #[rstest]
    #[actix_web::test]
    async fn locale_is_forwarded_to_the_command() {
        let mut command = MockSchoolRegistrationCommand::new();
        command
            .expect_register()
            .withf(|request| request.locale == Some(Locale::Sw))
            .times(1)
            .returning(|request| {
                let subdomain = Subdomain::derive(&request.form.school_name);
                Ok(RegistrationReceipt {
                    school_id: SchoolId::random(),
                    notice: Notice::registered(Locale::Sw, &subdomain),
                    subdomain,
                    redirect: Redirect::to_login(2_000),
                })
            });
        let state = HttpState::new(
            Arc::new(command),
            Arc::new(FixtureSubdomainAvailabilityQuery),
        );
        let mut body = request_body();
        body["locale"] = json!("sw");

        let (status, response) = submit(state, body).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response["notice"]["locale"], "sw");
    }
}
