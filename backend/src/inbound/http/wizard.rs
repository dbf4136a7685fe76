//! Wizard transition handler.
//!
//! ```text
//! POST /api/v1/registrations/wizard
//! ```
//!
//! The server holds no wizard state: the client posts its current step, the
//! form values captured so far and one command, and receives the next state.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    Error, FieldErrors, RegistrationForm, WizardCommand, WizardOutcome, WizardState,
    WizardStatus, WizardStep, WizardTransitionError, transition, verify_position,
};
use crate::inbound::http::ApiResult;

/// Current wizard position plus the command to apply.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WizardRequestBody {
    #[serde(default)]
    pub step: WizardStep,
    #[serde(default)]
    pub form: RegistrationForm,
    pub command: WizardCommand,
}

/// Wizard state after the command.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WizardResponseBody {
    pub step: WizardStep,
    pub status: WizardStatus,
    pub form: RegistrationForm,
    /// Field errors of the step that blocked; empty otherwise.
    pub errors: FieldErrors,
    /// District options after a region selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district_options: Option<Vec<String>>,
}

impl From<WizardOutcome> for WizardResponseBody {
    fn from(outcome: WizardOutcome) -> Self {
        Self {
            step: outcome.state.step,
            status: outcome.status,
            form: outcome.state.form,
            errors: outcome.errors,
            district_options: outcome
                .district_options
                .map(|options| options.iter().map(|d| (*d).to_owned()).collect()),
        }
    }
}

fn map_transition_error(error: WizardTransitionError) -> Error {
    let details = match error {
        WizardTransitionError::NoPreviousStep { current } => json!({ "step": current }),
        WizardTransitionError::ForwardRevisit { current, requested } => {
            json!({ "step": current, "requested": requested })
        }
    };
    Error::invalid_request(error.to_string()).with_details(details)
}

/// Apply one wizard command.
///
/// A blocked `next` is a successful response with `status = blocked` and the
/// field errors of the current step. A claimed step whose earlier steps do
/// not validate is answered the same way, positioned at the earliest invalid
/// step, and the command is not applied.
#[utoipa::path(
    post,
    path = "/api/v1/registrations/wizard",
    request_body = WizardRequestBody,
    responses(
        (status = 200, description = "Command applied", body = WizardResponseBody),
        (status = 400, description = "Command not allowed from this step", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "applyWizardCommand"
)]
#[post("/registrations/wizard")]
pub async fn apply_wizard_command(
    payload: web::Json<WizardRequestBody>,
) -> ApiResult<web::Json<WizardResponseBody>> {
    let WizardRequestBody {
        step,
        form,
        command,
    } = payload.into_inner();
    let outcome = match verify_position(WizardState { step, form }) {
        Ok(state) => transition(state, command).map_err(map_transition_error)?,
        Err(blocked) => {
            debug!(
                claimed = %step,
                earliest_invalid = %blocked.state.step,
                "wizard position rejected"
            );
            blocked
        }
    };
    Ok(web::Json(outcome.into()))
}
