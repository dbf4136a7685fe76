//! Tests for the registration validation schema.

use super::*;
use crate::test_support::valid_form;
use rstest::{fixture, rstest};

#[fixture]
fn form() -> RegistrationForm {
    valid_form()
}

#[rstest]
fn valid_form_passes_every_rule(form: RegistrationForm) {
    assert!(validate_form(&form).is_empty());
    assert!(build_registration(&form).is_ok());
}

#[rstest]
#[case("S123")]
#[case("    ")]
fn short_registration_number_uses_its_message(mut form: RegistrationForm, #[case] raw: &str) {
    form.registration_number = raw.into();
    let error =
        validate_field(&form, FormField::RegistrationNumber).expect_err("number too short");
    assert_eq!(error.code, "too_short");
    assert_eq!(
        error.message,
        "Registration number must be at least 5 characters"
    );
}

#[rstest]
#[case("short", "different")]
#[case("long enough password", "long enough passw0rd")]
#[case("", "x")]
fn confirmation_must_match_regardless_of_password(
    mut form: RegistrationForm,
    #[case] password: &str,
    #[case] confirmation: &str,
) {
    form.admin_password = password.into();
    form.confirm_password = confirmation.into();
    let error = validate_field(&form, FormField::ConfirmPassword).expect_err("mismatch");
    assert_eq!(error.code, "mismatch");
    assert_eq!(error.message, "Passwords do not match");
}

#[rstest]
fn matching_short_passwords_fail_only_on_length(mut form: RegistrationForm) {
    form.admin_password = "short".into();
    form.confirm_password = "short".into();
    let errors = validate_step(&form, WizardStep::AdminAccount);
    assert_eq!(errors.len(), 1);
    assert!(errors.get(FormField::AdminPassword).is_some());
}

#[rstest]
#[case(FormField::ContactEmail)]
#[case(FormField::HeadmasterEmail)]
#[case(FormField::AdminEmail)]
fn email_fields_share_a_message(mut form: RegistrationForm, #[case] field: FormField) {
    match field {
        FormField::ContactEmail => form.contact_email = "not-an-email".into(),
        FormField::HeadmasterEmail => form.headmaster_email = "not-an-email".into(),
        _ => form.admin_email = "not-an-email".into(),
    }
    let error = validate_field(&form, field).expect_err("bad email");
    assert_eq!(error.message, "Please enter a valid email address");
}

#[rstest]
fn district_must_belong_to_selected_region(mut form: RegistrationForm) {
    form.region = "Arusha".into();
    let error = validate_field(&form, FormField::District).expect_err("wrong region");
    assert_eq!(error.code, "invalid_choice");
    assert_eq!(error.message, "Please select a district");
}

#[rstest]
fn fallback_districts_are_accepted(mut form: RegistrationForm) {
    form.region = "Rukwa".into();
    form.district = "District 3".into();
    assert!(validate_field(&form, FormField::District).is_ok());
}

#[rstest]
#[case("", true)]
#[case("2001-06-30", true)]
#[case("2001-13-01", false)]
#[case("yesterday", false)]
fn established_date_is_optional(
    mut form: RegistrationForm,
    #[case] raw: &str,
    #[case] ok: bool,
) {
    form.established_date = raw.into();
    assert_eq!(validate_field(&form, FormField::EstablishedDate).is_ok(), ok);
}

#[rstest]
fn unknown_school_type_is_rejected(mut form: RegistrationForm) {
    form.school_type = "college".into();
    let error = validate_field(&form, FormField::SchoolType).expect_err("bad type");
    assert_eq!(error.message, "Please select a valid school type");
}

#[rstest]
fn form_errors_follow_schema_order() {
    let errors = validate_form(&RegistrationForm::default());
    let fields: Vec<_> = errors.iter().map(|error| error.field).collect();
    let mut sorted = fields.clone();
    sorted.sort();
    assert_eq!(fields, sorted);
    assert_eq!(errors.first_step(), Some(WizardStep::Basic));
    assert!(errors.get(FormField::Description).is_none());
    assert!(errors.get(FormField::EstablishedDate).is_none());
    assert!(errors.get(FormField::ConfirmPassword).is_none());
}

#[rstest]
fn first_step_points_at_earliest_failure(mut form: RegistrationForm) {
    form.street = "x".into();
    form.admin_last_name = "y".into();
    let errors = validate_form(&form);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.first_step(), Some(WizardStep::Location));
}

#[rstest]
fn build_registration_reports_every_rejected_field(mut form: RegistrationForm) {
    form.school_name = "AB".into();
    form.confirm_password = "nope".into();
    let errors = build_registration(&form).expect_err("invalid form");
    assert_eq!(errors, validate_form(&form));
    assert_eq!(errors.len(), 2);
}

#[rstest]
fn build_registration_normalises_values(mut form: RegistrationForm) {
    form.school_name = "  Mwenge Secondary School ".into();
    form.description = "   ".into();
    let registration = build_registration(&form).expect("valid form");
    assert_eq!(registration.school.name.as_ref(), "Mwenge Secondary School");
    assert_eq!(
        registration.school.subdomain().as_ref(),
        "mwengesecondaryschool"
    );
    assert!(registration.school.description.is_none());
    assert_eq!(
        registration.account.password.expose(),
        form.admin_password.as_str()
    );
}

#[rstest]
fn field_errors_serialise_camel_case(mut form: RegistrationForm) {
    form.contact_phone = "123".into();
    let error = validate_field(&form, FormField::ContactPhone).expect_err("short phone");
    let value = serde_json::to_value(&error).expect("serialise");
    assert_eq!(value["field"], "contactPhone");
    assert_eq!(value["code"], "too_short");
}
