//! Tests for wizard transitions.

use super::*;
use crate::domain::FormField;
use crate::test_support::valid_form;
use rstest::{fixture, rstest};

#[fixture]
fn ready_form() -> RegistrationForm {
    valid_form()
}

fn at(step: WizardStep, form: RegistrationForm) -> WizardState {
    WizardState { step, form }
}

#[rstest]
fn next_advances_through_every_step(ready_form: RegistrationForm) {
    let mut state = at(WizardStep::Basic, ready_form);
    for expected in [
        WizardStep::Location,
        WizardStep::Additional,
        WizardStep::AdminAccount,
    ] {
        let outcome = transition(state, WizardCommand::Next).expect("valid transition");
        assert_eq!(outcome.status, WizardStatus::Advanced);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.state.step, expected);
        state = outcome.state;
    }
}

#[rstest]
fn next_on_last_step_reports_ready(ready_form: RegistrationForm) {
    let outcome = transition(at(WizardStep::AdminAccount, ready_form), WizardCommand::Next)
        .expect("valid transition");
    assert_eq!(outcome.status, WizardStatus::ReadyToSubmit);
    assert_eq!(outcome.state.step, WizardStep::AdminAccount);
}

#[rstest]
fn short_registration_number_blocks_basic_step(mut ready_form: RegistrationForm) {
    ready_form.registration_number = "S123".into();
    let outcome =
        transition(at(WizardStep::Basic, ready_form), WizardCommand::Next).expect("transition");

    assert_eq!(outcome.status, WizardStatus::Blocked);
    assert_eq!(outcome.state.step, WizardStep::Basic);
    assert_eq!(outcome.errors.len(), 1);
    let error = outcome
        .errors
        .get(FormField::RegistrationNumber)
        .expect("registration number error");
    assert_eq!(
        error.message,
        "Registration number must be at least 5 characters"
    );
}

#[rstest]
fn blocked_step_only_reports_its_own_fields() {
    let outcome = transition(WizardState::default(), WizardCommand::Next).expect("transition");
    assert_eq!(outcome.errors.len(), 5);
    assert!(
        outcome
            .errors
            .iter()
            .all(|error| error.field.step() == WizardStep::Basic)
    );
}

#[rstest]
fn mismatched_confirmation_blocks_last_step(mut ready_form: RegistrationForm) {
    ready_form.confirm_password = "something-else".into();
    let outcome = transition(at(WizardStep::AdminAccount, ready_form), WizardCommand::Next)
        .expect("transition");
    assert_eq!(outcome.status, WizardStatus::Blocked);
    assert!(outcome.errors.get(FormField::ConfirmPassword).is_some());
}

#[rstest]
#[case(WizardStep::Location, WizardStep::Basic)]
#[case(WizardStep::AdminAccount, WizardStep::Additional)]
fn back_moves_without_validation(#[case] from: WizardStep, #[case] to: WizardStep) {
    let outcome =
        transition(at(from, RegistrationForm::default()), WizardCommand::Back).expect("back");
    assert_eq!(outcome.status, WizardStatus::Moved);
    assert_eq!(outcome.state.step, to);
    assert!(outcome.errors.is_empty());
}

#[rstest]
fn back_on_first_step_is_rejected() {
    let error = transition(WizardState::default(), WizardCommand::Back).expect_err("no step");
    assert_eq!(
        error,
        WizardTransitionError::NoPreviousStep {
            current: WizardStep::Basic
        }
    );
}

#[rstest]
#[case(WizardStep::Basic)]
#[case(WizardStep::Additional)]
fn revisit_reaches_earlier_steps(#[case] target: WizardStep) {
    let outcome = transition(
        at(WizardStep::Additional, RegistrationForm::default()),
        WizardCommand::Revisit { step: target },
    )
    .expect("revisit");
    assert_eq!(outcome.state.step, target);
}

#[rstest]
fn revisit_cannot_skip_forward(ready_form: RegistrationForm) {
    let error = transition(
        at(WizardStep::Basic, ready_form),
        WizardCommand::Revisit {
            step: WizardStep::AdminAccount,
        },
    )
    .expect_err("forward jump");
    assert_eq!(
        error,
        WizardTransitionError::ForwardRevisit {
            current: WizardStep::Basic,
            requested: WizardStep::AdminAccount,
        }
    );
}

#[rstest]
#[case("Arusha", crate::domain::regions::districts_for("Arusha"))]
#[case("Katavi", crate::domain::regions::FALLBACK_DISTRICTS.as_slice())]
fn selecting_a_region_clears_the_district(
    ready_form: RegistrationForm,
    #[case] region: &str,
    #[case] expected: &[&str],
) {
    let outcome = transition(
        at(WizardStep::Location, ready_form),
        WizardCommand::SelectRegion {
            region: region.to_owned(),
        },
    )
    .expect("select region");

    assert_eq!(outcome.status, WizardStatus::RegionSelected);
    assert_eq!(outcome.state.form.region, region);
    assert!(outcome.state.form.district.is_empty());
    assert_eq!(outcome.district_options, Some(expected));
}

#[rstest]
fn reselecting_the_same_region_still_clears_the_district(ready_form: RegistrationForm) {
    let region = ready_form.region.clone();
    let outcome = transition(
        at(WizardStep::Location, ready_form),
        WizardCommand::SelectRegion { region },
    )
    .expect("select region");
    assert!(outcome.state.form.district.is_empty());
}

#[rstest]
fn commands_deserialise_from_tagged_json() {
    let command: WizardCommand =
        serde_json::from_str(r#"{"type":"revisit","step":"admin_account"}"#).expect("command");
    assert_eq!(
        command,
        WizardCommand::Revisit {
            step: WizardStep::AdminAccount
        }
    );
}

#[rstest]
#[case(WizardStep::Basic)]
#[case(WizardStep::AdminAccount)]
fn valid_earlier_steps_keep_the_claimed_position(
    ready_form: RegistrationForm,
    #[case] claimed: WizardStep,
) {
    let state = verify_position(at(claimed, ready_form)).expect("position holds");
    assert_eq!(state.step, claimed);
}

#[rstest]
fn claimed_position_falls_back_to_the_earliest_invalid_step(mut ready_form: RegistrationForm) {
    ready_form.street = "Rd".into();
    ready_form.headmaster_phone = "0755".into();

    let blocked = verify_position(at(WizardStep::AdminAccount, ready_form))
        .expect_err("location is invalid");

    assert_eq!(blocked.status, WizardStatus::Blocked);
    assert_eq!(blocked.state.step, WizardStep::Location);
    assert_eq!(blocked.errors.len(), 1);
    assert!(blocked.errors.get(FormField::Street).is_some());
}

#[rstest]
fn the_claimed_step_itself_is_not_checked(mut ready_form: RegistrationForm) {
    ready_form.ward = String::new();
    let state = verify_position(at(WizardStep::Location, ready_form)).expect("position holds");
    assert_eq!(state.step, WizardStep::Location);
}
