//! Behavioural tests for the registration wizard and write sequence.

use std::sync::{Arc, Mutex};

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use shule::domain::{
    CompensationPolicy, FormField, Locale, NoticeKind, RegistrationFailure, RegistrationForm,
    RegistrationOptions, RegistrationReceipt, RegistrationStep, SchoolRegistrationService,
    WizardCommand, WizardOutcome, WizardState, WizardStatus, WizardStep, build_registration,
    transition,
};
use shule::domain::regions::districts_for;
use shule::test_support::{BackendCall, ScriptedBackend, ScriptedFault, valid_form};

#[derive(Default)]
struct RegistrationWorld {
    form: RegistrationForm,
    outcome: Option<WizardOutcome>,
    backend: Arc<ScriptedBackend>,
    compensation: CompensationPolicy,
    result: Option<Result<RegistrationReceipt, RegistrationFailure>>,
}

impl RegistrationWorld {
    fn apply(&mut self, step: WizardStep, command: WizardCommand) {
        let state = WizardState {
            step,
            form: self.form.clone(),
        };
        let outcome = transition(state, command).expect("command applies");
        self.form = outcome.state.form.clone();
        self.outcome = Some(outcome);
    }

    fn submit(&mut self) {
        let registration = build_registration(&self.form).expect("form builds a registration");
        let options = RegistrationOptions {
            compensation: self.compensation,
            ..RegistrationOptions::default()
        };
        let service =
            SchoolRegistrationService::new(self.backend.clone(), self.backend.clone(), options);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        self.result = Some(runtime.block_on(service.submit(&registration, Locale::En)));
    }

    fn outcome(&self) -> &WizardOutcome {
        self.outcome.as_ref().expect("a wizard command was applied")
    }

    fn receipt(&self) -> &RegistrationReceipt {
        match self.result.as_ref().expect("the form was submitted") {
            Ok(receipt) => receipt,
            Err(failure) => panic!("registration failed: {failure}"),
        }
    }

    fn failure(&self) -> &RegistrationFailure {
        match self.result.as_ref().expect("the form was submitted") {
            Ok(receipt) => panic!("registration unexpectedly succeeded: {receipt:?}"),
            Err(failure) => failure,
        }
    }
}

#[fixture]
fn world() -> Mutex<RegistrationWorld> {
    Mutex::new(RegistrationWorld::default())
}

#[given("a valid registration form")]
fn a_valid_registration_form(world: &Mutex<RegistrationWorld>) {
    world.lock().expect("world lock").form = valid_form();
}

#[given("the registration number is {number}")]
fn the_registration_number_is(world: &Mutex<RegistrationWorld>, number: String) {
    world.lock().expect("world lock").form.registration_number = number;
}

#[given("an empty registration backend")]
fn an_empty_registration_backend(world: &Mutex<RegistrationWorld>) {
    world.lock().expect("world lock").backend = Arc::new(ScriptedBackend::new());
}

#[given("the location insert fails")]
fn the_location_insert_fails(world: &Mutex<RegistrationWorld>) {
    world.lock().expect("world lock").backend.fail(
        BackendCall::InsertLocation,
        ScriptedFault::Connection,
        "connection refused",
    );
}

#[given("partial writes are retained")]
fn partial_writes_are_retained(world: &Mutex<RegistrationWorld>) {
    world.lock().expect("world lock").compensation = CompensationPolicy::Retain;
}

#[when("the user asks for the next step")]
fn the_user_asks_for_the_next_step(world: &Mutex<RegistrationWorld>) {
    world
        .lock()
        .expect("world lock")
        .apply(WizardStep::Basic, WizardCommand::Next);
}

#[when("the user selects region {region}")]
fn the_user_selects_region(world: &Mutex<RegistrationWorld>, region: String) {
    world
        .lock()
        .expect("world lock")
        .apply(WizardStep::Location, WizardCommand::SelectRegion { region });
}

#[when("the form is submitted")]
fn the_form_is_submitted(world: &Mutex<RegistrationWorld>) {
    world.lock().expect("world lock").submit();
}

#[when("the location insert recovers")]
fn the_location_insert_recovers(world: &Mutex<RegistrationWorld>) {
    world
        .lock()
        .expect("world lock")
        .backend
        .heal(BackendCall::InsertLocation);
}

#[then("the wizard stays on the basic step")]
fn the_wizard_stays_on_the_basic_step(world: &Mutex<RegistrationWorld>) {
    let world = world.lock().expect("world lock");
    let outcome = world.outcome();
    assert_eq!(outcome.status, WizardStatus::Blocked);
    assert_eq!(outcome.state.step, WizardStep::Basic);
}

#[then("the registration number field reports an error")]
fn the_registration_number_field_reports_an_error(world: &Mutex<RegistrationWorld>) {
    let world = world.lock().expect("world lock");
    let errors = &world.outcome().errors;
    assert!(errors.get(FormField::RegistrationNumber).is_some());
    assert_eq!(errors.len(), 1, "only the short number is invalid: {errors:?}");
}

#[then("the district is empty")]
fn the_district_is_empty(world: &Mutex<RegistrationWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.outcome().status, WizardStatus::RegionSelected);
    assert!(world.form.district.is_empty());
}

#[then("the district options belong to {region}")]
fn the_district_options_belong_to(world: &Mutex<RegistrationWorld>, region: String) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.form.region, region);
    assert_eq!(world.outcome().district_options, Some(districts_for(&region)));
}

#[then("the registration succeeds")]
fn the_registration_succeeds(world: &Mutex<RegistrationWorld>) {
    let world = world.lock().expect("world lock");
    let receipt = world.receipt();
    assert_eq!(receipt.notice.kind, NoticeKind::Success);
    assert_eq!(receipt.redirect.path, "/login");
}

#[then("the writes ran in order school, location, administrator, account, role grant")]
fn the_writes_ran_in_order(world: &Mutex<RegistrationWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(
        world.backend.calls(),
        vec![
            BackendCall::InsertSchool,
            BackendCall::InsertLocation,
            BackendCall::InsertAdministrator,
            BackendCall::CreateAccount,
            BackendCall::InsertRoleGrant,
        ]
    );
}

#[then("the success notice names the subdomain {subdomain}")]
fn the_success_notice_names_the_subdomain(world: &Mutex<RegistrationWorld>, subdomain: String) {
    let world = world.lock().expect("world lock");
    let receipt = world.receipt();
    assert_eq!(receipt.subdomain.as_ref(), subdomain);
    assert_eq!(
        receipt.notice.message,
        format!("School registered successfully! Your school address is {subdomain}.")
    );
}

#[then("the registration fails at the location step")]
fn the_registration_fails_at_the_location_step(world: &Mutex<RegistrationWorld>) {
    let world = world.lock().expect("world lock");
    let failure = world.failure();
    assert_eq!(failure.step, RegistrationStep::Location);
    assert_eq!(
        failure.message,
        "Failed to save school location: connection refused"
    );
}

#[then("no administrator, account or role grant was written")]
fn no_later_writes(world: &Mutex<RegistrationWorld>) {
    let world = world.lock().expect("world lock");
    let calls = world.backend.calls();
    for call in [
        BackendCall::InsertAdministrator,
        BackendCall::CreateAccount,
        BackendCall::InsertRoleGrant,
    ] {
        assert!(!calls.contains(&call), "{call:?} should not run: {calls:?}");
    }
    let counts = world.backend.tables().counts();
    assert_eq!(counts.administrators, 0);
    assert_eq!(counts.accounts, 0);
    assert_eq!(counts.role_grants, 0);
}

#[then("{count} schools share the subdomain {subdomain}")]
fn schools_share_the_subdomain(
    world: &Mutex<RegistrationWorld>,
    count: usize,
    subdomain: String,
) {
    let world = world.lock().expect("world lock");
    let matching = world
        .backend
        .tables()
        .schools()
        .into_iter()
        .filter(|school| school.subdomain.as_ref() == subdomain)
        .count();
    assert_eq!(matching, count);
}

#[scenario(
    path = "tests/features/school_registration.feature",
    name = "Short registration number blocks the basic step"
)]
fn short_registration_number_blocks_the_basic_step(world: Mutex<RegistrationWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/school_registration.feature",
    name = "Changing region clears the district"
)]
fn changing_region_clears_the_district(world: Mutex<RegistrationWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/school_registration.feature",
    name = "A valid form creates five records in order"
)]
fn a_valid_form_creates_five_records_in_order(world: Mutex<RegistrationWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/school_registration.feature",
    name = "A location failure stops later writes"
)]
fn a_location_failure_stops_later_writes(world: Mutex<RegistrationWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/school_registration.feature",
    name = "Retained partial writes leave a duplicate on resubmission"
)]
fn retained_partial_writes_leave_a_duplicate_on_resubmission(world: Mutex<RegistrationWorld>) {
    drop(world);
}
