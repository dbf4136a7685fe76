//! Driving port for final registration submissions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::registration::DEFAULT_REDIRECT_DELAY_MS;
use crate::domain::{
    Error, Locale, Notice, RegistrationForm, RegistrationReceipt, Redirect, SchoolId, Subdomain,
};

/// Submission of a completed wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSchoolRequest {
    /// Wizard instance submitting the form. One submission per id may run at
    /// a time.
    pub wizard_id: Uuid,
    /// Notice language; the configured default applies when absent.
    #[serde(default)]
    pub locale: Option<Locale>,
    pub form: RegistrationForm,
}

/// Driving port for registering a school.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchoolRegistrationCommand: Send + Sync {
    /// Validate the whole form and run the ordered writes.
    ///
    /// Field errors surface as `invalid_request` with the rejected fields in
    /// the details. Collaborator failures carry the failed step and a
    /// localized notice.
    async fn register(&self, request: RegisterSchoolRequest)
    -> Result<RegistrationReceipt, Error>;
}

/// Command that reports success without writing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSchoolRegistrationCommand;

#[async_trait]
impl SchoolRegistrationCommand for FixtureSchoolRegistrationCommand {
    async fn register(
        &self,
        request: RegisterSchoolRequest,
    ) -> Result<RegistrationReceipt, Error> {
        let locale = request.locale.unwrap_or_default();
        let subdomain = Subdomain::derive(&request.form.school_name);
        Ok(RegistrationReceipt {
            school_id: SchoolId::random(),
            notice: Notice::registered(locale, &subdomain),
            subdomain,
            redirect: Redirect::to_login(DEFAULT_REDIRECT_DELAY_MS),
        })
    }
}
