//! Declarative validation schema for the school registration form.
//!
//! Every field maps to one acceptance rule and one human-readable message.
//! Rules are the constructors of the typed domain values, so a form that
//! passes [`validate_form`] always converts into a [`SchoolRegistration`].
//! All checks are pure functions of the form; nothing here talks to the
//! external collaborator.

use serde::Serialize;
use utoipa::ToSchema;

use super::administrator::{HeadmasterDetails, NewAdminAccount, Password};
use super::contact::{EmailAddress, PersonName, PhoneNumber};
use super::location::{District, LocationDetails, PlaceName, Region};
use super::registration_form::{FormField, RegistrationForm};
use super::school::{
    NewSchool, RegistrationNumber, SchoolDescription, SchoolName, SchoolType,
    parse_established_date,
};
use super::registration::SchoolRegistration;
use super::wizard::WizardStep;

/// Reason a single field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldValidationError {
    /// Required value was missing or blank.
    #[error("value is required")]
    Required,
    /// Value was shorter than the field minimum.
    #[error("value must be at least {min} characters")]
    TooShort { min: usize },
    /// Value did not look like an email address.
    #[error("value must be an email address")]
    InvalidEmail,
    /// Value was not one of the offered choices.
    #[error("value is not one of the offered choices")]
    InvalidChoice,
    /// Value was not a `YYYY-MM-DD` calendar date.
    #[error("value must be a YYYY-MM-DD date")]
    InvalidDate,
    /// Value did not match the field it must repeat.
    #[error("value does not match")]
    Mismatch,
}

impl FieldValidationError {
    /// Stable machine-readable code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::TooShort { .. } => "too_short",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidChoice => "invalid_choice",
            Self::InvalidDate => "invalid_date",
            Self::Mismatch => "mismatch",
        }
    }
}

/// Trim `value` and require at least `min` characters.
pub(crate) fn require_min_chars(value: &str, min: usize) -> Result<String, FieldValidationError> {
    let trimmed = value.trim();
    if trimmed.chars().count() < min {
        return Err(FieldValidationError::TooShort { min });
    }
    Ok(trimmed.to_owned())
}

/// A rejected field, ready for inline display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Field the error belongs to.
    pub field: FormField,
    /// Stable machine-readable code.
    #[schema(example = "too_short")]
    pub code: &'static str,
    /// Message shown next to the field.
    #[schema(example = "Registration number must be at least 5 characters")]
    pub message: &'static str,
}

impl FieldError {
    fn new(field: FormField, reason: FieldValidationError) -> Self {
        Self {
            field,
            code: reason.code(),
            message: field.message(),
        }
    }
}

/// Field errors in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Whether no field was rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of rejected fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Error recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&FieldError> {
        self.0.iter().find(|error| error.field == field)
    }

    /// Iterate over the recorded errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Earliest wizard step that owns a rejected field.
    #[must_use]
    pub fn first_step(&self) -> Option<WizardStep> {
        self.0.iter().map(|error| error.field.step()).min()
    }

    fn record(&mut self, field: FormField, result: Result<(), FieldValidationError>) {
        if let Err(reason) = result {
            self.0.push(FieldError::new(field, reason));
        }
    }

    fn capture<T>(&mut self, field: FormField, result: Result<T, FieldValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(reason) => {
                self.0.push(FieldError::new(field, reason));
                None
            }
        }
    }
}

fn check(form: &RegistrationForm, field: FormField) -> Result<(), FieldValidationError> {
    match field {
        FormField::SchoolName => SchoolName::new(&form.school_name).map(drop),
        FormField::RegistrationNumber => {
            RegistrationNumber::new(&form.registration_number).map(drop)
        }
        FormField::SchoolType => form.school_type.parse::<SchoolType>().map(drop),
        FormField::ContactEmail => EmailAddress::new(&form.contact_email).map(drop),
        FormField::ContactPhone => PhoneNumber::new(&form.contact_phone).map(drop),
        FormField::Region => Region::new(&form.region).map(drop),
        FormField::District => District::new(&form.region, &form.district).map(drop),
        FormField::Ward => PlaceName::new(&form.ward).map(drop),
        FormField::Street => PlaceName::new(&form.street).map(drop),
        FormField::EstablishedDate => parse_established_date(&form.established_date).map(drop),
        FormField::Description => Ok(()),
        FormField::HeadmasterName => PersonName::new(&form.headmaster_name).map(drop),
        FormField::HeadmasterEmail => EmailAddress::new(&form.headmaster_email).map(drop),
        FormField::HeadmasterPhone => PhoneNumber::new(&form.headmaster_phone).map(drop),
        FormField::AdminFirstName => PersonName::new(&form.admin_first_name).map(drop),
        FormField::AdminLastName => PersonName::new(&form.admin_last_name).map(drop),
        FormField::AdminEmail => EmailAddress::new(&form.admin_email).map(drop),
        FormField::AdminPassword => Password::new(form.admin_password.as_str()).map(drop),
        FormField::ConfirmPassword => check_confirmation(form),
    }
}

fn check_confirmation(form: &RegistrationForm) -> Result<(), FieldValidationError> {
    if form.confirm_password == form.admin_password {
        Ok(())
    } else {
        Err(FieldValidationError::Mismatch)
    }
}

/// Validate one field against the current form.
///
/// # Examples
/// ```
/// use shule::domain::{FormField, RegistrationForm, validate_field};
///
/// let form = RegistrationForm {
///     registration_number: "S12".into(),
///     ..RegistrationForm::default()
/// };
/// let error = validate_field(&form, FormField::RegistrationNumber).unwrap_err();
/// assert_eq!(error.message, "Registration number must be at least 5 characters");
/// ```
pub fn validate_field(form: &RegistrationForm, field: FormField) -> Result<(), FieldError> {
    check(form, field).map_err(|reason| FieldError::new(field, reason))
}

/// Validate every field owned by `step`.
#[must_use]
pub fn validate_step(form: &RegistrationForm, step: WizardStep) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field in FormField::for_step(step) {
        errors.record(field, check(form, field));
    }
    errors
}

/// Validate the whole form.
#[must_use]
pub fn validate_form(form: &RegistrationForm) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field in FormField::ALL {
        errors.record(field, check(form, field));
    }
    errors
}

/// Convert a form into typed registration values, or report every rejected
/// field.
pub fn build_registration(form: &RegistrationForm) -> Result<SchoolRegistration, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = errors.capture(FormField::SchoolName, SchoolName::new(&form.school_name));
    let registration_number = errors.capture(
        FormField::RegistrationNumber,
        RegistrationNumber::new(&form.registration_number),
    );
    let school_type = errors.capture(FormField::SchoolType, form.school_type.parse());
    let contact_email =
        errors.capture(FormField::ContactEmail, EmailAddress::new(&form.contact_email));
    let contact_phone =
        errors.capture(FormField::ContactPhone, PhoneNumber::new(&form.contact_phone));
    let region = errors.capture(FormField::Region, Region::new(&form.region));
    let district = errors.capture(
        FormField::District,
        District::new(&form.region, &form.district),
    );
    let ward = errors.capture(FormField::Ward, PlaceName::new(&form.ward));
    let street = errors.capture(FormField::Street, PlaceName::new(&form.street));
    let established_on = errors.capture(
        FormField::EstablishedDate,
        parse_established_date(&form.established_date),
    );
    let headmaster_name =
        errors.capture(FormField::HeadmasterName, PersonName::new(&form.headmaster_name));
    let headmaster_email = errors.capture(
        FormField::HeadmasterEmail,
        EmailAddress::new(&form.headmaster_email),
    );
    let headmaster_phone = errors.capture(
        FormField::HeadmasterPhone,
        PhoneNumber::new(&form.headmaster_phone),
    );
    let first_name =
        errors.capture(FormField::AdminFirstName, PersonName::new(&form.admin_first_name));
    let last_name =
        errors.capture(FormField::AdminLastName, PersonName::new(&form.admin_last_name));
    let admin_email = errors.capture(FormField::AdminEmail, EmailAddress::new(&form.admin_email));
    let password = errors.capture(
        FormField::AdminPassword,
        Password::new(form.admin_password.as_str()),
    );
    errors.record(FormField::ConfirmPassword, check_confirmation(form));

    let (
        Some(name),
        Some(registration_number),
        Some(school_type),
        Some(contact_email),
        Some(contact_phone),
        Some(region),
        Some(district),
        Some(ward),
        Some(street),
        Some(established_on),
        Some(headmaster_name),
        Some(headmaster_email),
        Some(headmaster_phone),
        Some(first_name),
        Some(last_name),
        Some(admin_email),
        Some(password),
    ) = (
        name,
        registration_number,
        school_type,
        contact_email,
        contact_phone,
        region,
        district,
        ward,
        street,
        established_on,
        headmaster_name,
        headmaster_email,
        headmaster_phone,
        first_name,
        last_name,
        admin_email,
        password,
    )
    else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SchoolRegistration {
        school: NewSchool {
            name,
            registration_number,
            school_type,
            contact_email,
            contact_phone,
            established_on,
            description: SchoolDescription::from_optional(&form.description),
        },
        location: LocationDetails {
            region,
            district,
            ward,
            street,
        },
        headmaster: HeadmasterDetails {
            name: headmaster_name,
            email: headmaster_email,
            phone: headmaster_phone,
        },
        account: NewAdminAccount {
            first_name,
            last_name,
            email: admin_email,
            password,
        },
    })
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
