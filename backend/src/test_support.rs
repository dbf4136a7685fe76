//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`). Only
//! compiled for tests or with the `test-support` feature.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    AccountProvisioner, AccountProvisionerError, SchoolRecordStore, SchoolRecordStoreError,
};
use crate::domain::{
    AccountId, AdministratorId, HeadmasterDetails, LocationDetails, LocationId, NewAdminAccount,
    NewSchool, RegistrationForm, RoleGrant, RoleGrantId, School, SchoolId, Subdomain,
};
use crate::outbound::memory::InMemorySchoolBackend;

/// A form that passes every validation rule.
///
/// # Examples
/// ```
/// use shule::domain::validate_form;
/// use shule::test_support::valid_form;
///
/// assert!(validate_form(&valid_form()).is_empty());
/// ```
#[must_use]
pub fn valid_form() -> RegistrationForm {
    RegistrationForm {
        school_name: "Mwenge Secondary School".into(),
        registration_number: "S.4512".into(),
        school_type: "secondary".into(),
        contact_email: "info@mwenge.ac.tz".into(),
        contact_phone: "0712345678".into(),
        region: "Dar es Salaam".into(),
        district: "Kinondoni".into(),
        ward: "Mwenge".into(),
        street: "Sam Nujoma Road".into(),
        established_date: "1998-01-15".into(),
        description: String::new(),
        headmaster_name: "Asha Mrema".into(),
        headmaster_email: "asha.mrema@mwenge.ac.tz".into(),
        headmaster_phone: "0755123456".into(),
        admin_first_name: "Juma".into(),
        admin_last_name: "Kassim".into(),
        admin_email: "juma.kassim@mwenge.ac.tz".into(),
        admin_password: "Mwenge2024!".into(),
        confirm_password: "Mwenge2024!".into(),
    }
}

/// Collaborator operations observed by [`ScriptedBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendCall {
    InsertSchool,
    InsertLocation,
    InsertAdministrator,
    CreateAccount,
    InsertRoleGrant,
    FindSchools,
    DeleteSchool,
    DeleteLocation,
    DeleteAdministrator,
    DeleteAccount,
}

/// Failure class injected by [`ScriptedBackend::fail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedFault {
    Connection,
    Conflict,
    Rejected,
}

impl ScriptedFault {
    fn store_error(self, message: &str) -> SchoolRecordStoreError {
        match self {
            Self::Connection => SchoolRecordStoreError::connection(message),
            Self::Conflict => SchoolRecordStoreError::conflict(message),
            Self::Rejected => SchoolRecordStoreError::rejected(message),
        }
    }

    fn account_error(self, message: &str) -> AccountProvisionerError {
        match self {
            Self::Connection => AccountProvisionerError::connection(message),
            Self::Conflict => AccountProvisionerError::already_registered(message),
            Self::Rejected => AccountProvisionerError::rejected(message),
        }
    }
}

/// In-memory backend that records every call and fails on demand.
///
/// Scripted failures persist until [`ScriptedBackend::heal`] is called.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    inner: InMemorySchoolBackend,
    calls: Mutex<Vec<BackendCall>>,
    failures: Mutex<HashMap<BackendCall, (ScriptedFault, String)>>,
}

impl ScriptedBackend {
    /// Create a backend that accepts every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every future `call` with `fault` and `message`.
    pub fn fail(&self, call: BackendCall, fault: ScriptedFault, message: impl Into<String>) {
        lock(&self.failures).insert(call, (fault, message.into()));
    }

    /// Stop failing `call`.
    pub fn heal(&self, call: BackendCall) {
        lock(&self.failures).remove(&call);
    }

    /// Calls observed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<BackendCall> {
        lock(&self.calls).clone()
    }

    /// Forget observed calls.
    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    /// Backing tables.
    #[must_use]
    pub fn tables(&self) -> &InMemorySchoolBackend {
        &self.inner
    }

    fn observe(&self, call: BackendCall) -> Option<(ScriptedFault, String)> {
        lock(&self.calls).push(call);
        lock(&self.failures).get(&call).cloned()
    }

    fn store_gate(&self, call: BackendCall) -> Result<(), SchoolRecordStoreError> {
        match self.observe(call) {
            Some((fault, message)) => Err(fault.store_error(&message)),
            None => Ok(()),
        }
    }

    fn account_gate(&self, call: BackendCall) -> Result<(), AccountProvisionerError> {
        match self.observe(call) {
            Some((fault, message)) => Err(fault.account_error(&message)),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl SchoolRecordStore for ScriptedBackend {
    async fn insert_school(&self, school: &NewSchool) -> Result<SchoolId, SchoolRecordStoreError> {
        self.store_gate(BackendCall::InsertSchool)?;
        self.inner.insert_school(school).await
    }

    async fn insert_location(
        &self,
        school_id: SchoolId,
        location: &LocationDetails,
    ) -> Result<LocationId, SchoolRecordStoreError> {
        self.store_gate(BackendCall::InsertLocation)?;
        self.inner.insert_location(school_id, location).await
    }

    async fn insert_administrator(
        &self,
        school_id: SchoolId,
        headmaster: &HeadmasterDetails,
    ) -> Result<AdministratorId, SchoolRecordStoreError> {
        self.store_gate(BackendCall::InsertAdministrator)?;
        self.inner.insert_administrator(school_id, headmaster).await
    }

    async fn insert_role_grant(
        &self,
        grant: &RoleGrant,
    ) -> Result<RoleGrantId, SchoolRecordStoreError> {
        self.store_gate(BackendCall::InsertRoleGrant)?;
        self.inner.insert_role_grant(grant).await
    }

    async fn find_schools_by_subdomain(
        &self,
        subdomain: &Subdomain,
    ) -> Result<Vec<School>, SchoolRecordStoreError> {
        self.store_gate(BackendCall::FindSchools)?;
        self.inner.find_schools_by_subdomain(subdomain).await
    }

    async fn delete_school(&self, id: SchoolId) -> Result<(), SchoolRecordStoreError> {
        self.store_gate(BackendCall::DeleteSchool)?;
        self.inner.delete_school(id).await
    }

    async fn delete_location(&self, id: LocationId) -> Result<(), SchoolRecordStoreError> {
        self.store_gate(BackendCall::DeleteLocation)?;
        self.inner.delete_location(id).await
    }

    async fn delete_administrator(
        &self,
        id: AdministratorId,
    ) -> Result<(), SchoolRecordStoreError> {
        self.store_gate(BackendCall::DeleteAdministrator)?;
        self.inner.delete_administrator(id).await
    }
}

#[async_trait]
impl AccountProvisioner for ScriptedBackend {
    async fn create_account(
        &self,
        account: &NewAdminAccount,
    ) -> Result<AccountId, AccountProvisionerError> {
        self.account_gate(BackendCall::CreateAccount)?;
        self.inner.create_account(account).await
    }

    async fn delete_account(&self, id: AccountId) -> Result<(), AccountProvisionerError> {
        self.account_gate(BackendCall::DeleteAccount)?;
        self.inner.delete_account(id).await
    }
}
