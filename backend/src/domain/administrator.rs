//! Headmaster details, the administrator login account and its role grant.
//!
//! The headmaster row describes the person running the school; the admin
//! account is the login created with the auth collaborator and linked to the
//! school through a [`RoleGrant`].

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::contact::{EmailAddress, PersonName, PhoneNumber};
use super::ids::{AccountId, SchoolId};
use super::validation::FieldValidationError;

/// Minimum password length.
pub const PASSWORD_MIN: usize = 8;

/// Administrator password.
///
/// ## Invariants
/// - At least [`PASSWORD_MIN`] characters, counted without trimming.
/// - The value is wiped from memory on drop and never printed by `Debug`.
///
/// # Examples
/// ```
/// use shule::domain::Password;
///
/// assert!(Password::new("correct horse").is_ok());
/// assert!(Password::new("short").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a password.
    pub fn new(password: &str) -> Result<Self, FieldValidationError> {
        if password.is_empty() {
            return Err(FieldValidationError::Required);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(FieldValidationError::TooShort { min: PASSWORD_MIN });
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    /// Password text for the auth collaborator.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Headmaster record written as the school administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadmasterDetails {
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
}

/// Login account requested from the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdminAccount {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password: Password,
}

impl NewAdminAccount {
    /// `first last`, as stored in the account metadata.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Role granted to an account within a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
}

impl Role {
    /// Stable tag stored by the collaborator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
        }
    }
}

/// Link between a login account and a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGrant {
    pub user_id: AccountId,
    pub school_id: SchoolId,
    pub role: Role,
    pub is_active: bool,
}

impl RoleGrant {
    /// Active admin grant for the newly registered school.
    #[must_use]
    pub fn school_admin(user_id: AccountId, school_id: SchoolId) -> Self {
        Self {
            user_id,
            school_id,
            role: Role::Admin,
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", FieldValidationError::Required)]
    #[case("1234567", FieldValidationError::TooShort { min: PASSWORD_MIN })]
    fn rejects_short_passwords(#[case] raw: &str, #[case] expected: FieldValidationError) {
        assert_eq!(Password::new(raw), Err(expected));
    }

    #[rstest]
    fn password_whitespace_counts() {
        let password = Password::new("  pass  ").expect("eight characters");
        assert_eq!(password.expose(), "  pass  ");
    }

    #[rstest]
    fn password_debug_is_redacted() {
        let password = Password::new("supersecret").expect("valid password");
        assert!(!format!("{password:?}").contains("supersecret"));
    }

    #[rstest]
    fn school_admin_grants_are_active() {
        let grant = RoleGrant::school_admin(AccountId::random(), SchoolId::random());
        assert_eq!(grant.role.as_str(), "admin");
        assert!(grant.is_active);
    }
}
