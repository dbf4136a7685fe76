//! Ordered multi-table registration writes.
//!
//! A submission creates, strictly in order, the school row, its location, the
//! headmaster row, the administrator login account and the role grant that
//! links the account to the school. Every write waits for the previous one
//! and the sequence stops at the first failure; nothing is retried. Each
//! completed write has an undo operation which the [`CompensationPolicy`]
//! decides whether to run.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;

use super::administrator::{HeadmasterDetails, NewAdminAccount, RoleGrant};
use super::ids::{AccountId, AdministratorId, LocationId, SchoolId};
use super::location::LocationDetails;
use super::notice::{Locale, Notice};
use super::ports::{
    AccountProvisioner, AccountProvisionerError, RegisterSchoolRequest, SchoolRecordStore,
    SchoolRecordStoreError, SchoolRegistrationCommand,
};
use super::school::{NewSchool, Subdomain};
use super::submission_guard::SubmissionGuard;
use super::validation::build_registration;
use super::Error;

/// Path the client is sent to after a successful registration.
pub const LOGIN_PATH: &str = "/login";
/// Delay before the redirect to [`LOGIN_PATH`].
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 2_000;

/// Typed values of a fully validated registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolRegistration {
    pub school: NewSchool,
    pub location: LocationDetails,
    pub headmaster: HeadmasterDetails,
    pub account: NewAdminAccount,
}

/// One write of the registration sequence, in execution order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStep {
    School,
    Location,
    Administrator,
    AuthAccount,
    RoleGrant,
}

impl RegistrationStep {
    /// Steps in execution order.
    pub const ALL: [Self; 5] = [
        Self::School,
        Self::Location,
        Self::Administrator,
        Self::AuthAccount,
        Self::RoleGrant,
    ];

    /// Prefix of the message surfaced when the step fails.
    #[must_use]
    pub fn failure_prefix(self) -> &'static str {
        match self {
            Self::School => "Failed to create school record",
            Self::Location => "Failed to save school location",
            Self::Administrator => "Failed to save headmaster details",
            Self::AuthAccount => "Failed to create administrator account",
            Self::RoleGrant => "Failed to assign administrator role",
        }
    }

    /// Stable tag used in logs and error details.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::School => "school",
            Self::Location => "location",
            Self::Administrator => "administrator",
            Self::AuthAccount => "auth_account",
            Self::RoleGrant => "role_grant",
        }
    }
}

impl fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens to completed writes when a later write fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompensationPolicy {
    /// Undo completed writes in reverse order.
    #[default]
    Rollback,
    /// Leave completed writes in place.
    Retain,
}

/// Raised when a compensation policy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown compensation policy `{0}` (expected `rollback` or `retain`)")]
pub struct UnknownCompensationPolicy(pub String);

impl FromStr for CompensationPolicy {
    type Err = UnknownCompensationPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rollback" => Ok(Self::Rollback),
            "retain" => Ok(Self::Retain),
            other => Err(UnknownCompensationPolicy(other.to_owned())),
        }
    }
}

/// A write that completed before the sequence stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "record", content = "id", rename_all = "snake_case")]
pub enum CompletedWrite {
    School(SchoolId),
    Location(LocationId),
    Administrator(AdministratorId),
    AuthAccount(AccountId),
}

impl fmt::Display for CompletedWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::School(id) => write!(f, "school {id}"),
            Self::Location(id) => write!(f, "location {id}"),
            Self::Administrator(id) => write!(f, "administrator {id}"),
            Self::AuthAccount(id) => write!(f, "auth account {id}"),
        }
    }
}

/// Classification of a collaborator failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// Collaborator unreachable or timed out.
    Connection,
    /// A uniqueness constraint or existing account clashed.
    Conflict,
    /// Collaborator refused the values.
    Rejected,
}

impl From<&SchoolRecordStoreError> for FailureCause {
    fn from(error: &SchoolRecordStoreError) -> Self {
        match error {
            SchoolRecordStoreError::Connection { .. } => Self::Connection,
            SchoolRecordStoreError::Conflict { .. } => Self::Conflict,
            SchoolRecordStoreError::Rejected { .. } => Self::Rejected,
        }
    }
}

impl From<&AccountProvisionerError> for FailureCause {
    fn from(error: &AccountProvisionerError) -> Self {
        match error {
            AccountProvisionerError::Connection { .. } => Self::Connection,
            AccountProvisionerError::AlreadyRegistered { .. } => Self::Conflict,
            AccountProvisionerError::Rejected { .. } => Self::Rejected,
        }
    }
}

/// A registration attempt that stopped at `step`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RegistrationFailure {
    pub step: RegistrationStep,
    pub cause: FailureCause,
    /// `<step prefix>: <collaborator message>`.
    pub message: String,
    /// Completed writes still present after compensation.
    pub orphaned: Vec<CompletedWrite>,
}

impl RegistrationFailure {
    fn new(step: RegistrationStep, cause: FailureCause, detail: &str) -> Self {
        Self {
            step,
            cause,
            message: format!("{}: {detail}", step.failure_prefix()),
            orphaned: Vec::new(),
        }
    }

    fn store(step: RegistrationStep, error: &SchoolRecordStoreError) -> Self {
        Self::new(step, error.into(), error.message())
    }

    fn account(error: &AccountProvisionerError) -> Self {
        Self::new(RegistrationStep::AuthAccount, error.into(), error.message())
    }

    /// Convert into a domain error carrying a localized notice.
    #[must_use]
    pub fn into_error(self, locale: Locale) -> Error {
        let notice = Notice::failed(locale, &self.message);
        let details = json!({
            "step": self.step,
            "notice": notice,
            "orphaned": self.orphaned,
        });
        let error = match self.cause {
            FailureCause::Connection => Error::service_unavailable(self.message),
            FailureCause::Conflict => Error::conflict(self.message),
            FailureCause::Rejected => Error::invalid_request(self.message),
        };
        error.with_details(details)
    }
}

/// Client-side navigation issued after success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    #[schema(example = "/login")]
    pub path: String,
    #[schema(example = 2000)]
    pub after_ms: u64,
}

impl Redirect {
    /// Redirect to the login view after `after_ms` milliseconds.
    #[must_use]
    pub fn to_login(after_ms: u64) -> Self {
        Self {
            path: LOGIN_PATH.to_owned(),
            after_ms,
        }
    }
}

/// Result of a completed registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub school_id: SchoolId,
    #[schema(value_type = String, example = "mwengesecondaryschool")]
    pub subdomain: Subdomain,
    pub notice: Notice,
    pub redirect: Redirect,
}

/// Tunables for [`SchoolRegistrationService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationOptions {
    pub compensation: CompensationPolicy,
    pub redirect_delay_ms: u64,
    pub default_locale: Locale,
}

impl Default for RegistrationOptions {
    fn default() -> Self {
        Self {
            compensation: CompensationPolicy::default(),
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
            default_locale: Locale::default(),
        }
    }
}

/// Registration service running the write sequence against the collaborator
/// ports.
#[derive(Clone)]
pub struct SchoolRegistrationService<S, A> {
    store: Arc<S>,
    accounts: Arc<A>,
    options: RegistrationOptions,
    guard: SubmissionGuard,
}

impl<S, A> SchoolRegistrationService<S, A> {
    /// Create a service with the given collaborators.
    pub fn new(store: Arc<S>, accounts: Arc<A>, options: RegistrationOptions) -> Self {
        Self {
            store,
            accounts,
            options,
            guard: SubmissionGuard::default(),
        }
    }

    /// Guard tracking in-flight submissions.
    #[must_use]
    pub fn submission_guard(&self) -> &SubmissionGuard {
        &self.guard
    }
}

impl<S, A> SchoolRegistrationService<S, A>
where
    S: SchoolRecordStore,
    A: AccountProvisioner,
{
    /// Run the five writes for `registration`.
    ///
    /// On failure the configured [`CompensationPolicy`] is applied before the
    /// failure is returned.
    pub async fn submit(
        &self,
        registration: &SchoolRegistration,
        locale: Locale,
    ) -> Result<RegistrationReceipt, RegistrationFailure> {
        let subdomain = registration.school.subdomain();
        let mut journal = Vec::new();

        match self.write_all(registration, &mut journal).await {
            Ok(school_id) => {
                info!(%school_id, %subdomain, "school registered");
                Ok(RegistrationReceipt {
                    school_id,
                    notice: Notice::registered(locale, &subdomain),
                    subdomain,
                    redirect: Redirect::to_login(self.options.redirect_delay_ms),
                })
            }
            Err(mut failure) => {
                warn!(
                    step = %failure.step,
                    cause = ?failure.cause,
                    completed = journal.len(),
                    message = %failure.message,
                    "school registration stopped"
                );
                failure.orphaned = match self.options.compensation {
                    CompensationPolicy::Rollback => self.roll_back(journal).await,
                    CompensationPolicy::Retain => journal,
                };
                Err(failure)
            }
        }
    }

    async fn write_all(
        &self,
        registration: &SchoolRegistration,
        journal: &mut Vec<CompletedWrite>,
    ) -> Result<SchoolId, RegistrationFailure> {
        debug!(step = %RegistrationStep::School, "writing");
        let school_id = self
            .store
            .insert_school(&registration.school)
            .await
            .map_err(|err| RegistrationFailure::store(RegistrationStep::School, &err))?;
        journal.push(CompletedWrite::School(school_id));

        debug!(step = %RegistrationStep::Location, %school_id, "writing");
        let location_id = self
            .store
            .insert_location(school_id, &registration.location)
            .await
            .map_err(|err| RegistrationFailure::store(RegistrationStep::Location, &err))?;
        journal.push(CompletedWrite::Location(location_id));

        debug!(step = %RegistrationStep::Administrator, %school_id, "writing");
        let administrator_id = self
            .store
            .insert_administrator(school_id, &registration.headmaster)
            .await
            .map_err(|err| RegistrationFailure::store(RegistrationStep::Administrator, &err))?;
        journal.push(CompletedWrite::Administrator(administrator_id));

        debug!(step = %RegistrationStep::AuthAccount, %school_id, "writing");
        let account_id = self
            .accounts
            .create_account(&registration.account)
            .await
            .map_err(|err| RegistrationFailure::account(&err))?;
        journal.push(CompletedWrite::AuthAccount(account_id));

        debug!(step = %RegistrationStep::RoleGrant, %school_id, %account_id, "writing");
        self.store
            .insert_role_grant(&RoleGrant::school_admin(account_id, school_id))
            .await
            .map_err(|err| RegistrationFailure::store(RegistrationStep::RoleGrant, &err))?;

        Ok(school_id)
    }

    /// Undo `journal` newest first and return the writes that could not be
    /// undone, oldest first.
    async fn roll_back(&self, journal: Vec<CompletedWrite>) -> Vec<CompletedWrite> {
        let mut orphaned = Vec::new();
        for write in journal.into_iter().rev() {
            let outcome = match write {
                CompletedWrite::School(id) => {
                    self.store.delete_school(id).await.map_err(|e| e.to_string())
                }
                CompletedWrite::Location(id) => {
                    self.store.delete_location(id).await.map_err(|e| e.to_string())
                }
                CompletedWrite::Administrator(id) => self
                    .store
                    .delete_administrator(id)
                    .await
                    .map_err(|e| e.to_string()),
                CompletedWrite::AuthAccount(id) => self
                    .accounts
                    .delete_account(id)
                    .await
                    .map_err(|e| e.to_string()),
            };
            match outcome {
                Ok(()) => debug!(record = %write, "compensated"),
                Err(message) => {
                    error!(record = %write, %message, "compensation failed; record orphaned");
                    orphaned.push(write);
                }
            }
        }
        orphaned.reverse();
        orphaned
    }
}

#[async_trait]
impl<S, A> SchoolRegistrationCommand for SchoolRegistrationService<S, A>
where
    S: SchoolRecordStore,
    A: AccountProvisioner,
{
    async fn register(&self, request: RegisterSchoolRequest) -> Result<RegistrationReceipt, Error> {
        let locale = request.locale.unwrap_or(self.options.default_locale);
        let Some(_ticket) = self.guard.try_acquire(request.wizard_id) else {
            warn!(wizard_id = %request.wizard_id, "duplicate submission rejected");
            return Err(
                Error::conflict("a submission for this wizard is already in progress")
                    .with_details(json!({ "notice": Notice::generic(locale) })),
            );
        };

        let registration = build_registration(&request.form).map_err(|fields| {
            Error::invalid_request("registration form has invalid fields").with_details(json!({
                "step": fields.first_step(),
                "fields": fields,
            }))
        })?;

        self.submit(&registration, locale)
            .await
            .map_err(|failure| failure.into_error(locale))
    }
}

#[cfg(test)]
#[path = "registration_tests.rs"]
mod tests;
