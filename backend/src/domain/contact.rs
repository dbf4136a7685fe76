//! Contact primitives shared by schools, headmasters and admin accounts.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::validation::{FieldValidationError, require_min_chars};

/// Minimum length for a person's name.
pub const PERSON_NAME_MIN: usize = 3;
/// Minimum length for a phone number.
pub const PHONE_NUMBER_MIN: usize = 10;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only: one `@`, no whitespace, a dot in the domain part.
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address that passed the shape check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an email address. Surrounding whitespace is
    /// dropped.
    pub fn new(email: impl AsRef<str>) -> Result<Self, FieldValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FieldValidationError::Required);
        }
        if !email_regex().is_match(trimmed) {
            return Err(FieldValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

/// Phone number with at least [`PHONE_NUMBER_MIN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and construct a phone number.
    pub fn new(phone: impl AsRef<str>) -> Result<Self, FieldValidationError> {
        require_min_chars(phone.as_ref(), PHONE_NUMBER_MIN).map(Self)
    }
}

/// A person's name with at least [`PERSON_NAME_MIN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Validate and construct a person name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, FieldValidationError> {
        require_min_chars(name.as_ref(), PERSON_NAME_MIN).map(Self)
    }
}

macro_rules! string_newtype_conversions {
    ($($ty:ident),* $(,)?) => {
        $(
            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl ::std::fmt::Display for $ty {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl TryFrom<String> for $ty {
                type Error = $crate::domain::validation::FieldValidationError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }
        )*
    };
}

pub(crate) use string_newtype_conversions;

string_newtype_conversions!(EmailAddress, PhoneNumber, PersonName);
