//! School aggregate: identity, classification and the derived subdomain.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::contact::{EmailAddress, PhoneNumber, string_newtype_conversions};
use super::ids::SchoolId;
use super::validation::{FieldValidationError, require_min_chars};

/// Minimum length for a school name.
pub const SCHOOL_NAME_MIN: usize = 3;
/// Minimum length for a registration number.
pub const REGISTRATION_NUMBER_MIN: usize = 5;

/// School name with at least [`SCHOOL_NAME_MIN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchoolName(String);

impl SchoolName {
    /// Validate and construct a school name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, FieldValidationError> {
        require_min_chars(name.as_ref(), SCHOOL_NAME_MIN).map(Self)
    }
}

/// Government registration number with at least
/// [`REGISTRATION_NUMBER_MIN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegistrationNumber(String);

impl RegistrationNumber {
    /// Validate and construct a registration number.
    pub fn new(number: impl AsRef<str>) -> Result<Self, FieldValidationError> {
        require_min_chars(number.as_ref(), REGISTRATION_NUMBER_MIN).map(Self)
    }
}

string_newtype_conversions!(SchoolName, RegistrationNumber);

/// Level of education a school offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SchoolType {
    Kindergarten,
    Primary,
    Secondary,
    Advanced,
}

impl SchoolType {
    /// Every school type in display order.
    pub const ALL: [Self; 4] = [
        Self::Kindergarten,
        Self::Primary,
        Self::Secondary,
        Self::Advanced,
    ];

    /// Stable tag stored by the collaborator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kindergarten => "kindergarten",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for SchoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchoolType {
    type Err = FieldValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(FieldValidationError::Required);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or(FieldValidationError::InvalidChoice)
    }
}

/// Address label derived from the school name.
///
/// Derivation lower-cases the name and removes every whitespace character.
/// No uniqueness is implied.
///
/// # Examples
/// ```
/// use shule::domain::{SchoolName, Subdomain};
///
/// let name = SchoolName::new("Mwenge Secondary School").unwrap();
/// assert_eq!(Subdomain::from_name(&name).as_ref(), "mwengesecondaryschool");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Subdomain(String);

impl Subdomain {
    /// Derive the subdomain for `name`.
    #[must_use]
    pub fn from_name(name: &SchoolName) -> Self {
        Self::derive(name.as_ref())
    }

    /// Derive a subdomain from unvalidated text.
    #[must_use]
    pub fn derive(raw: &str) -> Self {
        Self(
            raw.chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect(),
        )
    }
}

impl AsRef<str> for Subdomain {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Subdomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional free-text description. Blank input means no description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolDescription(String);

impl SchoolDescription {
    /// Keep trimmed, non-blank text.
    #[must_use]
    pub fn from_optional(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for SchoolDescription {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Parse an optional `YYYY-MM-DD` establishment date. Blank input is `None`.
pub fn parse_established_date(raw: &str) -> Result<Option<NaiveDate>, FieldValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FieldValidationError::InvalidDate)
}

/// School values submitted for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchool {
    pub name: SchoolName,
    pub registration_number: RegistrationNumber,
    pub school_type: SchoolType,
    pub contact_email: EmailAddress,
    pub contact_phone: PhoneNumber,
    pub established_on: Option<NaiveDate>,
    pub description: Option<SchoolDescription>,
}

impl NewSchool {
    /// Subdomain derived from the school name.
    #[must_use]
    pub fn subdomain(&self) -> Subdomain {
        Subdomain::from_name(&self.name)
    }
}

/// A school row as stored by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct School {
    pub id: SchoolId,
    pub subdomain: Subdomain,
    pub details: NewSchool,
}
