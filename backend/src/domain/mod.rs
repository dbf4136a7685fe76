//! Domain primitives, the registration wizard and the write sequencer.
//!
//! Purpose: define strongly typed registration values, the rules that gate
//! the wizard, and the services that drive the ports. Raw form text enters
//! through [`RegistrationForm`]; everything past validation works on the
//! typed values in [`SchoolRegistration`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - `transition`: the wizard state machine.
//! - `validate_*` / `build_registration`: the validation schema.
//! - `SchoolRegistrationService`: ordered multi-table writes.

pub mod administrator;
pub mod contact;
pub mod error;
pub mod ids;
pub mod location;
pub mod notice;
pub mod ports;
pub mod regions;
pub mod registration;
pub mod registration_form;
pub mod school;
pub mod submission_guard;
pub mod subdomain_availability_service;
pub mod trace_id;
pub mod validation;
pub mod wizard;

pub use self::administrator::{
    HeadmasterDetails, NewAdminAccount, Password, Role, RoleGrant, PASSWORD_MIN,
};
pub use self::contact::{EmailAddress, PersonName, PhoneNumber};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{AccountId, AdministratorId, LocationId, RoleGrantId, SchoolId};
pub use self::location::{District, LocationDetails, PlaceName, Region};
pub use self::notice::{Locale, Notice, NoticeKind, UnsupportedLocale};
pub use self::registration::{
    CompensationPolicy, CompletedWrite, FailureCause, Redirect, RegistrationFailure,
    RegistrationOptions, RegistrationReceipt, RegistrationStep, SchoolRegistration,
    SchoolRegistrationService, UnknownCompensationPolicy,
};
pub use self::registration_form::{FormField, RegistrationForm};
pub use self::school::{
    NewSchool, RegistrationNumber, School, SchoolDescription, SchoolName, SchoolType, Subdomain,
};
pub use self::submission_guard::{SubmissionGuard, SubmissionTicket};
pub use self::subdomain_availability_service::SubdomainAvailabilityService;
pub use self::trace_id::TraceId;
pub use self::validation::{
    FieldError, FieldErrors, FieldValidationError, build_registration, validate_field,
    validate_form, validate_step,
};
pub use self::wizard::{
    WizardCommand, WizardOutcome, WizardState, WizardStatus, WizardStep, WizardTransitionError,
    transition, verify_position,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use shule::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such school"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
