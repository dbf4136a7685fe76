//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers the registration wizard,
//! submission, lookup and health endpoints together with the payload schemas
//! they reference.
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::ports::{RegisterSchoolRequest, SubdomainAvailability};
use crate::domain::{
    Error, ErrorCode, FieldError, FieldErrors, FormField, Locale, Notice, NoticeKind, Redirect,
    RegistrationForm, RegistrationReceipt, RegistrationStep, WizardCommand, WizardStatus,
    WizardStep,
};
use crate::inbound::http::regions::{DistrictsResponse, RegionsResponse};
use crate::inbound::http::wizard::{WizardRequestBody, WizardResponseBody};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shule registration API",
        description = "HTTP interface for school registration, region lookups and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::regions::list_regions,
        crate::inbound::http::regions::list_districts,
        crate::inbound::http::wizard::apply_wizard_command,
        crate::inbound::http::registrations::register_school,
        crate::inbound::http::schools::subdomain_availability,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        FieldError,
        FieldErrors,
        FormField,
        Locale,
        Notice,
        NoticeKind,
        Redirect,
        RegistrationForm,
        RegistrationReceipt,
        RegistrationStep,
        RegisterSchoolRequest,
        SubdomainAvailability,
        WizardCommand,
        WizardStatus,
        WizardStep,
        WizardRequestBody,
        WizardResponseBody,
        RegionsResponse,
        DistrictsResponse,
    )),
    tags(
        (name = "registrations", description = "Registration wizard and final submission"),
        (name = "regions", description = "Region and district lookups"),
        (name = "schools", description = "School lookups"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
