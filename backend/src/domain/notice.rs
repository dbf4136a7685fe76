//! Localized user-facing notices for registration outcomes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::school::Subdomain;

/// Display language for notices.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Sw,
}

impl Locale {
    /// BCP 47 tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Sw => "sw",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a locale tag is not supported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale `{0}` (expected `en` or `sw`)")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "sw" => Ok(Self::Sw),
            other => Err(UnsupportedLocale(other.to_owned())),
        }
    }
}

/// Whether a notice reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Message shown to the user after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub locale: Locale,
    #[schema(example = "School registered successfully! Your school address is mwenge.")]
    pub message: String,
}

impl Notice {
    /// Successful registration naming the school's subdomain.
    ///
    /// # Examples
    /// ```
    /// use shule::domain::{Locale, Notice, SchoolName, Subdomain};
    ///
    /// let name = SchoolName::new("Azania Front").unwrap();
    /// let notice = Notice::registered(Locale::Sw, &Subdomain::from_name(&name));
    /// assert!(notice.message.ends_with("azaniafront."));
    /// ```
    #[must_use]
    pub fn registered(locale: Locale, subdomain: &Subdomain) -> Self {
        let message = match locale {
            Locale::En => {
                format!("School registered successfully! Your school address is {subdomain}.")
            }
            Locale::Sw => {
                format!("Shule imesajiliwa kikamilifu! Anwani ya shule yako ni {subdomain}.")
            }
        };
        Self {
            kind: NoticeKind::Success,
            locale,
            message,
        }
    }

    /// Failed registration carrying the step message.
    #[must_use]
    pub fn failed(locale: Locale, reason: &str) -> Self {
        let message = match locale {
            Locale::En => format!("Registration failed: {reason}"),
            Locale::Sw => format!("Usajili umeshindwa: {reason}"),
        };
        Self {
            kind: NoticeKind::Error,
            locale,
            message,
        }
    }

    /// Failure without a classified cause.
    #[must_use]
    pub fn generic(locale: Locale) -> Self {
        let message = match locale {
            Locale::En => "Something went wrong. Please try again.",
            Locale::Sw => "Hitilafu imetokea. Tafadhali jaribu tena.",
        };
        Self {
            kind: NoticeKind::Error,
            locale,
            message: message.to_owned(),
        }
    }
}
