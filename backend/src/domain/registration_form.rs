//! Raw registration form state as captured by the wizard.
//!
//! Values stay plain strings until the whole form is converted by
//! [`crate::domain::build_registration`]; the wizard validates them one step
//! at a time while the user is still typing.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::wizard::WizardStep;

/// Form values for every wizard step. Missing fields deserialise as empty.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    #[schema(example = "Mwenge Secondary School")]
    pub school_name: String,
    #[schema(example = "S.4512")]
    pub registration_number: String,
    #[schema(example = "secondary")]
    pub school_type: String,
    pub contact_email: String,
    pub contact_phone: String,
    #[schema(example = "Dar es Salaam")]
    pub region: String,
    #[schema(example = "Kinondoni")]
    pub district: String,
    pub ward: String,
    pub street: String,
    #[schema(example = "1998-01-15")]
    pub established_date: String,
    pub description: String,
    pub headmaster_name: String,
    pub headmaster_email: String,
    pub headmaster_phone: String,
    pub admin_first_name: String,
    pub admin_last_name: String,
    pub admin_email: String,
    pub admin_password: String,
    pub confirm_password: String,
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("school_name", &self.school_name)
            .field("registration_number", &self.registration_number)
            .field("school_type", &self.school_type)
            .field("region", &self.region)
            .field("district", &self.district)
            .field("admin_email", &self.admin_email)
            .finish_non_exhaustive()
    }
}

/// One field of the registration form.
///
/// Declaration order is schema order: fields of earlier steps come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    SchoolName,
    RegistrationNumber,
    SchoolType,
    ContactEmail,
    ContactPhone,
    Region,
    District,
    Ward,
    Street,
    EstablishedDate,
    Description,
    HeadmasterName,
    HeadmasterEmail,
    HeadmasterPhone,
    AdminFirstName,
    AdminLastName,
    AdminEmail,
    AdminPassword,
    ConfirmPassword,
}

impl FormField {
    /// Every field in schema order.
    pub const ALL: [Self; 19] = [
        Self::SchoolName,
        Self::RegistrationNumber,
        Self::SchoolType,
        Self::ContactEmail,
        Self::ContactPhone,
        Self::Region,
        Self::District,
        Self::Ward,
        Self::Street,
        Self::EstablishedDate,
        Self::Description,
        Self::HeadmasterName,
        Self::HeadmasterEmail,
        Self::HeadmasterPhone,
        Self::AdminFirstName,
        Self::AdminLastName,
        Self::AdminEmail,
        Self::AdminPassword,
        Self::ConfirmPassword,
    ];

    /// Wizard step that owns the field.
    #[must_use]
    pub fn step(self) -> WizardStep {
        match self {
            Self::SchoolName
            | Self::RegistrationNumber
            | Self::SchoolType
            | Self::ContactEmail
            | Self::ContactPhone => WizardStep::Basic,
            Self::Region | Self::District | Self::Ward | Self::Street => WizardStep::Location,
            Self::EstablishedDate
            | Self::Description
            | Self::HeadmasterName
            | Self::HeadmasterEmail
            | Self::HeadmasterPhone => WizardStep::Additional,
            Self::AdminFirstName
            | Self::AdminLastName
            | Self::AdminEmail
            | Self::AdminPassword
            | Self::ConfirmPassword => WizardStep::AdminAccount,
        }
    }

    /// Fields owned by `step`, in schema order.
    pub fn for_step(step: WizardStep) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |field| field.step() == step)
    }

    /// Message displayed when the field is rejected.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::SchoolName => "School name must be at least 3 characters",
            Self::RegistrationNumber => "Registration number must be at least 5 characters",
            Self::SchoolType => "Please select a valid school type",
            Self::ContactEmail | Self::HeadmasterEmail | Self::AdminEmail => {
                "Please enter a valid email address"
            }
            Self::ContactPhone | Self::HeadmasterPhone => {
                "Phone number must be at least 10 characters"
            }
            Self::Region => "Please select a region",
            Self::District => "Please select a district",
            Self::Ward => "Ward must be at least 3 characters",
            Self::Street => "Street must be at least 3 characters",
            Self::EstablishedDate => "Establishment date must be a valid date (YYYY-MM-DD)",
            Self::Description => "Description is invalid",
            Self::HeadmasterName => "Headmaster name must be at least 3 characters",
            Self::AdminFirstName => "First name must be at least 3 characters",
            Self::AdminLastName => "Last name must be at least 3 characters",
            Self::AdminPassword => "Password must be at least 8 characters",
            Self::ConfirmPassword => "Passwords do not match",
        }
    }
}
