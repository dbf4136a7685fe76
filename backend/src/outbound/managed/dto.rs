//! Wire shapes for the managed data API and auth admin API.
//!
//! Rows are encoded straight from domain values and decoded into these DTOs
//! first; mapping back into domain types happens in one place so invalid
//! rows surface as a single rejected error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    EmailAddress, HeadmasterDetails, LocationDetails, NewAdminAccount, NewSchool, PhoneNumber,
    RegistrationNumber, RoleGrant, School, SchoolDescription, SchoolId, SchoolName, SchoolType,
    Subdomain,
};

#[derive(Debug, Serialize)]
pub(super) struct NewSchoolRow<'a> {
    pub(super) name: &'a str,
    pub(super) registration_number: &'a str,
    pub(super) school_type: &'static str,
    pub(super) contact_email: &'a str,
    pub(super) contact_phone: &'a str,
    pub(super) subdomain: String,
    pub(super) established_date: Option<NaiveDate>,
    pub(super) description: Option<&'a str>,
}

impl<'a> From<&'a NewSchool> for NewSchoolRow<'a> {
    fn from(school: &'a NewSchool) -> Self {
        Self {
            name: school.name.as_ref(),
            registration_number: school.registration_number.as_ref(),
            school_type: school.school_type.as_str(),
            contact_email: school.contact_email.as_ref(),
            contact_phone: school.contact_phone.as_ref(),
            subdomain: school.subdomain().to_string(),
            established_date: school.established_on,
            description: school.description.as_ref().map(AsRef::as_ref),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewLocationRow<'a> {
    pub(super) school_id: Uuid,
    pub(super) region: &'a str,
    pub(super) district: &'a str,
    pub(super) ward: &'a str,
    pub(super) street: &'a str,
}

impl<'a> NewLocationRow<'a> {
    pub(super) fn new(school_id: SchoolId, location: &'a LocationDetails) -> Self {
        Self {
            school_id: *school_id.as_uuid(),
            region: location.region.as_ref(),
            district: location.district.as_ref(),
            ward: location.ward.as_ref(),
            street: location.street.as_ref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewAdministratorRow<'a> {
    pub(super) school_id: Uuid,
    pub(super) name: &'a str,
    pub(super) email: &'a str,
    pub(super) phone: &'a str,
}

impl<'a> NewAdministratorRow<'a> {
    pub(super) fn new(school_id: SchoolId, headmaster: &'a HeadmasterDetails) -> Self {
        Self {
            school_id: *school_id.as_uuid(),
            name: headmaster.name.as_ref(),
            email: headmaster.email.as_ref(),
            phone: headmaster.phone.as_ref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewRoleGrantRow {
    pub(super) user_id: Uuid,
    pub(super) school_id: Uuid,
    pub(super) role: &'static str,
    pub(super) is_active: bool,
}

impl From<&RoleGrant> for NewRoleGrantRow {
    fn from(grant: &RoleGrant) -> Self {
        Self {
            user_id: *grant.user_id.as_uuid(),
            school_id: *grant.school_id.as_uuid(),
            role: grant.role.as_str(),
            is_active: grant.is_active,
        }
    }
}

/// Any row returned with `Prefer: return=representation`.
#[derive(Debug, Deserialize)]
pub(super) struct CreatedRowDto {
    pub(super) id: Uuid,
}

#[derive(Debug, Deserialize)]
pub(super) struct SchoolRowDto {
    pub(super) id: Uuid,
    pub(super) name: String,
    pub(super) registration_number: String,
    pub(super) school_type: String,
    pub(super) contact_email: String,
    pub(super) contact_phone: String,
    pub(super) subdomain: String,
    #[serde(default)]
    pub(super) established_date: Option<NaiveDate>,
    #[serde(default)]
    pub(super) description: Option<String>,
}

impl SchoolRowDto {
    pub(super) fn into_domain(self) -> Result<School, String> {
        let invalid = |field: &str, err: crate::domain::FieldValidationError| {
            format!("school {} has invalid {field}: {err}", self.id)
        };
        let details = NewSchool {
            name: SchoolName::new(&self.name).map_err(|err| invalid("name", err))?,
            registration_number: RegistrationNumber::new(&self.registration_number)
                .map_err(|err| invalid("registration_number", err))?,
            school_type: self
                .school_type
                .parse::<SchoolType>()
                .map_err(|err| invalid("school_type", err))?,
            contact_email: EmailAddress::new(&self.contact_email)
                .map_err(|err| invalid("contact_email", err))?,
            contact_phone: PhoneNumber::new(&self.contact_phone)
                .map_err(|err| invalid("contact_phone", err))?,
            established_on: self.established_date,
            description: self
                .description
                .as_deref()
                .and_then(SchoolDescription::from_optional),
        };
        Ok(School {
            id: SchoolId::from_uuid(self.id),
            subdomain: Subdomain::derive(&self.subdomain),
            details,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct AccountMetadata<'a> {
    pub(super) first_name: &'a str,
    pub(super) last_name: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct CreateUserRequest<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) email_confirm: bool,
    pub(super) user_metadata: AccountMetadata<'a>,
}

impl<'a> From<&'a NewAdminAccount> for CreateUserRequest<'a> {
    fn from(account: &'a NewAdminAccount) -> Self {
        Self {
            email: account.email.as_ref(),
            password: account.password.expose(),
            email_confirm: true,
            user_metadata: AccountMetadata {
                first_name: account.first_name.as_ref(),
                last_name: account.last_name.as_ref(),
            },
        }
    }
}

/// User object returned by the auth admin API.
#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: Uuid,
}

/// Error body shared by the data API (`code`, `message`) and the auth API
/// (`error_code`, `msg`).
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) code: Option<serde_json::Value>,
    #[serde(default)]
    pub(super) error_code: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default)]
    pub(super) msg: Option<String>,
}

impl ErrorBodyDto {
    pub(super) fn code(&self) -> Option<String> {
        match &self.code {
            Some(serde_json::Value::String(code)) => Some(code.clone()),
            Some(serde_json::Value::Number(code)) => Some(code.to_string()),
            _ => self.error_code.clone(),
        }
    }

    pub(super) fn has_code(&self, expected: &str) -> bool {
        self.code().as_deref() == Some(expected) || self.error_code.as_deref() == Some(expected)
    }

    pub(super) fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.msg.as_deref())
            .filter(|message| !message.trim().is_empty())
    }
}
