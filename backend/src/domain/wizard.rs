//! Multi-step registration wizard.
//!
//! The wizard is an explicit state (current step plus form values) and a pure
//! [`transition`] function. Moving forward is gated by validation of the
//! current step; moving back never validates. Field errors are returned as
//! part of the outcome because a blocked step is an ordinary result, not a
//! failure of the transition itself.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::registration_form::RegistrationForm;
use super::regions;
use super::validation::{FieldErrors, validate_step};

/// One page of the wizard, in traversal order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Basic,
    Location,
    Additional,
    AdminAccount,
}

impl WizardStep {
    /// Steps in traversal order.
    pub const ALL: [Self; 4] = [
        Self::Basic,
        Self::Location,
        Self::Additional,
        Self::AdminAccount,
    ];

    /// Step after this one, if any.
    #[must_use]
    pub fn following(self) -> Option<Self> {
        match self {
            Self::Basic => Some(Self::Location),
            Self::Location => Some(Self::Additional),
            Self::Additional => Some(Self::AdminAccount),
            Self::AdminAccount => None,
        }
    }

    /// Step before this one, if any.
    #[must_use]
    pub fn preceding(self) -> Option<Self> {
        match self {
            Self::Basic => None,
            Self::Location => Some(Self::Basic),
            Self::Additional => Some(Self::Location),
            Self::AdminAccount => Some(Self::Additional),
        }
    }

    /// Stable tag used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Location => "location",
            Self::Additional => "additional",
            Self::AdminAccount => "admin_account",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current wizard position and the values captured so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub step: WizardStep,
    pub form: RegistrationForm,
}

/// User intent applied to a [`WizardState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardCommand {
    /// Validate the current step and advance when it passes.
    Next,
    /// Return to the previous step.
    Back,
    /// Jump to an earlier (or the current) step.
    Revisit { step: WizardStep },
    /// Choose a region; the district is cleared.
    SelectRegion { region: String },
}

/// How a command left the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WizardStatus {
    /// The current step passed validation and the wizard moved on.
    Advanced,
    /// The current step has invalid fields; the step did not change.
    Blocked,
    /// The wizard moved without validation.
    Moved,
    /// The last step is valid and the form can be submitted.
    ReadyToSubmit,
    /// A region was chosen and the district reset.
    RegionSelected,
}

/// Result of applying a [`WizardCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardOutcome {
    pub state: WizardState,
    pub status: WizardStatus,
    /// Errors for the step that blocked; empty otherwise.
    pub errors: FieldErrors,
    /// District options after a region selection.
    pub district_options: Option<&'static [&'static str]>,
}

impl WizardOutcome {
    fn new(state: WizardState, status: WizardStatus) -> Self {
        Self {
            state,
            status,
            errors: FieldErrors::default(),
            district_options: None,
        }
    }
}

/// A command that cannot be applied to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WizardTransitionError {
    /// `back` was issued on the first step.
    #[error("there is no step before {current}")]
    NoPreviousStep { current: WizardStep },
    /// `revisit` targeted a step after the current one.
    #[error("cannot skip forward from {current} to {requested}")]
    ForwardRevisit {
        current: WizardStep,
        requested: WizardStep,
    },
}

/// Apply `command` to `state`.
///
/// # Examples
/// ```
/// use shule::domain::{WizardCommand, WizardState, WizardStatus, WizardStep, transition};
///
/// let outcome = transition(WizardState::default(), WizardCommand::Next).unwrap();
/// assert_eq!(outcome.status, WizardStatus::Blocked);
/// assert_eq!(outcome.state.step, WizardStep::Basic);
/// ```
pub fn transition(
    state: WizardState,
    command: WizardCommand,
) -> Result<WizardOutcome, WizardTransitionError> {
    match command {
        WizardCommand::Next => Ok(advance(state)),
        WizardCommand::Back => {
            let current = state.step;
            let previous = current
                .preceding()
                .ok_or(WizardTransitionError::NoPreviousStep { current })?;
            Ok(WizardOutcome::new(
                WizardState {
                    step: previous,
                    ..state
                },
                WizardStatus::Moved,
            ))
        }
        WizardCommand::Revisit { step } => {
            if step > state.step {
                return Err(WizardTransitionError::ForwardRevisit {
                    current: state.step,
                    requested: step,
                });
            }
            Ok(WizardOutcome::new(
                WizardState { step, ..state },
                WizardStatus::Moved,
            ))
        }
        WizardCommand::SelectRegion { region } => Ok(select_region(state, region)),
    }
}

/// Confirm that every step before `state.step` validates.
///
/// The server keeps no wizard state, so a claimed position is only honoured
/// when the steps before it pass. Otherwise the earliest failing step is
/// returned as a blocked outcome carrying its field errors.
///
/// # Errors
/// Returns the blocked [`WizardOutcome`] for the earliest invalid step.
///
/// # Examples
/// ```
/// use shule::domain::{RegistrationForm, WizardState, WizardStatus, WizardStep, verify_position};
///
/// let state = WizardState { step: WizardStep::Additional, form: RegistrationForm::default() };
/// let blocked = verify_position(state).unwrap_err();
/// assert_eq!(blocked.status, WizardStatus::Blocked);
/// assert_eq!(blocked.state.step, WizardStep::Basic);
/// ```
pub fn verify_position(state: WizardState) -> Result<WizardState, WizardOutcome> {
    let earliest_invalid = WizardStep::ALL
        .into_iter()
        .take_while(|step| *step < state.step)
        .map(|step| (step, validate_step(&state.form, step)))
        .find(|(_, errors)| !errors.is_empty());
    match earliest_invalid {
        None => Ok(state),
        Some((step, errors)) => Err(WizardOutcome {
            errors,
            ..WizardOutcome::new(WizardState { step, ..state }, WizardStatus::Blocked)
        }),
    }
}

fn advance(state: WizardState) -> WizardOutcome {
    let errors = validate_step(&state.form, state.step);
    if !errors.is_empty() {
        return WizardOutcome {
            errors,
            ..WizardOutcome::new(state, WizardStatus::Blocked)
        };
    }
    match state.step.following() {
        Some(step) => WizardOutcome::new(WizardState { step, ..state }, WizardStatus::Advanced),
        None => WizardOutcome::new(state, WizardStatus::ReadyToSubmit),
    }
}

fn select_region(mut state: WizardState, region: String) -> WizardOutcome {
    let options = regions::districts_for(&region);
    state.form.region = region;
    state.form.district.clear();
    WizardOutcome {
        district_options: Some(options),
        ..WizardOutcome::new(state, WizardStatus::RegionSelected)
    }
}

#[cfg(test)]
#[path = "wizard_tests.rs"]
mod tests;
