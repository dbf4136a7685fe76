//! In-process stand-in for the managed data store and auth service.
//!
//! Used when no managed backend is configured and throughout the tests. Rows
//! live behind one mutex; identifiers are random UUIDs just as the managed
//! backend would generate them. Account emails are unique, matching the auth
//! service; school names and subdomains are not.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    AccountProvisioner, AccountProvisionerError, SchoolRecordStore, SchoolRecordStoreError,
};
use crate::domain::{
    AccountId, AdministratorId, HeadmasterDetails, LocationDetails, LocationId, NewAdminAccount,
    NewSchool, RoleGrant, RoleGrantId, School, SchoolId, Subdomain,
};

#[derive(Debug, Default)]
struct Tables {
    schools: Vec<School>,
    locations: HashMap<LocationId, (SchoolId, LocationDetails)>,
    administrators: HashMap<AdministratorId, (SchoolId, HeadmasterDetails)>,
    accounts: HashMap<AccountId, String>,
    role_grants: HashMap<RoleGrantId, RoleGrant>,
}

impl Tables {
    fn has_school(&self, id: SchoolId) -> bool {
        self.schools.iter().any(|school| school.id == id)
    }
}

/// Row counts held by an [`InMemorySchoolBackend`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub schools: usize,
    pub locations: usize,
    pub administrators: usize,
    pub accounts: usize,
    pub role_grants: usize,
}

/// School store and account provisioner backed by process memory.
#[derive(Debug, Default)]
pub struct InMemorySchoolBackend {
    tables: Mutex<Tables>,
}

impl InMemorySchoolBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current row counts.
    #[must_use]
    pub fn counts(&self) -> TableCounts {
        let tables = self.tables();
        TableCounts {
            schools: tables.schools.len(),
            locations: tables.locations.len(),
            administrators: tables.administrators.len(),
            accounts: tables.accounts.len(),
            role_grants: tables.role_grants.len(),
        }
    }

    /// Every school row in insertion order.
    #[must_use]
    pub fn schools(&self) -> Vec<School> {
        self.tables().schools.clone()
    }

    /// Role grants referencing `school_id`.
    #[must_use]
    pub fn role_grants_for(&self, school_id: SchoolId) -> Vec<RoleGrant> {
        self.tables()
            .role_grants
            .values()
            .filter(|grant| grant.school_id == school_id)
            .copied()
            .collect()
    }
}

#[async_trait]
impl SchoolRecordStore for InMemorySchoolBackend {
    async fn insert_school(&self, school: &NewSchool) -> Result<SchoolId, SchoolRecordStoreError> {
        let id = SchoolId::random();
        self.tables().schools.push(School {
            id,
            subdomain: school.subdomain(),
            details: school.clone(),
        });
        Ok(id)
    }

    async fn insert_location(
        &self,
        school_id: SchoolId,
        location: &LocationDetails,
    ) -> Result<LocationId, SchoolRecordStoreError> {
        let mut tables = self.tables();
        if !tables.has_school(school_id) {
            return Err(SchoolRecordStoreError::rejected(format!(
                "school {school_id} does not exist"
            )));
        }
        let id = LocationId::random();
        tables.locations.insert(id, (school_id, location.clone()));
        Ok(id)
    }

    async fn insert_administrator(
        &self,
        school_id: SchoolId,
        headmaster: &HeadmasterDetails,
    ) -> Result<AdministratorId, SchoolRecordStoreError> {
        let mut tables = self.tables();
        if !tables.has_school(school_id) {
            return Err(SchoolRecordStoreError::rejected(format!(
                "school {school_id} does not exist"
            )));
        }
        let id = AdministratorId::random();
        tables
            .administrators
            .insert(id, (school_id, headmaster.clone()));
        Ok(id)
    }

    async fn insert_role_grant(
        &self,
        grant: &RoleGrant,
    ) -> Result<RoleGrantId, SchoolRecordStoreError> {
        let mut tables = self.tables();
        if !tables.has_school(grant.school_id) {
            return Err(SchoolRecordStoreError::rejected(format!(
                "school {} does not exist",
                grant.school_id
            )));
        }
        if !tables.accounts.contains_key(&grant.user_id) {
            return Err(SchoolRecordStoreError::rejected(format!(
                "user {} does not exist",
                grant.user_id
            )));
        }
        let id = RoleGrantId::random();
        tables.role_grants.insert(id, *grant);
        Ok(id)
    }

    async fn find_schools_by_subdomain(
        &self,
        subdomain: &Subdomain,
    ) -> Result<Vec<School>, SchoolRecordStoreError> {
        Ok(self
            .tables()
            .schools
            .iter()
            .filter(|school| &school.subdomain == subdomain)
            .cloned()
            .collect())
    }

    async fn delete_school(&self, id: SchoolId) -> Result<(), SchoolRecordStoreError> {
        self.tables().schools.retain(|school| school.id != id);
        Ok(())
    }

    async fn delete_location(&self, id: LocationId) -> Result<(), SchoolRecordStoreError> {
        self.tables().locations.remove(&id);
        Ok(())
    }

    async fn delete_administrator(
        &self,
        id: AdministratorId,
    ) -> Result<(), SchoolRecordStoreError> {
        self.tables().administrators.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl AccountProvisioner for InMemorySchoolBackend {
    async fn create_account(
        &self,
        account: &NewAdminAccount,
    ) -> Result<AccountId, AccountProvisionerError> {
        let email = account.email.as_ref().to_ascii_lowercase();
        let mut tables = self.tables();
        if tables.accounts.values().any(|existing| *existing == email) {
            return Err(AccountProvisionerError::already_registered(
                "A user with this email address has already been registered",
            ));
        }
        let id = AccountId::random();
        tables.accounts.insert(id, email);
        Ok(id)
    }

    async fn delete_account(&self, id: AccountId) -> Result<(), AccountProvisionerError> {
        self.tables().accounts.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::build_registration;
    use crate::test_support::valid_form;
    use rstest::{fixture, rstest};

    #[fixture]
    fn registration() -> crate::domain::SchoolRegistration {
        build_registration(&valid_form()).expect("valid form")
    }

    #[rstest]
    #[tokio::test]
    async fn schools_with_the_same_name_share_a_subdomain(
        registration: crate::domain::SchoolRegistration,
    ) {
        let backend = InMemorySchoolBackend::new();
        let first = backend.insert_school(&registration.school).await.expect("insert");
        let second = backend.insert_school(&registration.school).await.expect("insert");
        assert_ne!(first, second);

        let found = backend
            .find_schools_by_subdomain(&registration.school.subdomain())
            .await
            .expect("lookup");
        assert_eq!(found.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn account_emails_are_unique_ignoring_case(
        registration: crate::domain::SchoolRegistration,
    ) {
        let backend = InMemorySchoolBackend::new();
        backend
            .create_account(&registration.account)
            .await
            .expect("first account");

        let mut shouting = registration.account.clone();
        shouting.email = crate::domain::EmailAddress::new(
            registration.account.email.as_ref().to_ascii_uppercase(),
        )
        .expect("valid email");
        let error = backend
            .create_account(&shouting)
            .await
            .expect_err("duplicate email");
        assert!(matches!(
            error,
            AccountProvisionerError::AlreadyRegistered { .. }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn dependent_rows_need_an_existing_school(
        registration: crate::domain::SchoolRegistration,
    ) {
        let backend = InMemorySchoolBackend::new();
        let error = backend
            .insert_location(SchoolId::random(), &registration.location)
            .await
            .expect_err("dangling location");
        assert!(matches!(error, SchoolRecordStoreError::Rejected { .. }));
        assert_eq!(backend.counts(), TableCounts::default());
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_rows_updates_counts(registration: crate::domain::SchoolRegistration) {
        let backend = InMemorySchoolBackend::new();
        let school_id = backend.insert_school(&registration.school).await.expect("school");
        let location_id = backend
            .insert_location(school_id, &registration.location)
            .await
            .expect("location");

        backend.delete_location(location_id).await.expect("delete");
        backend.delete_school(school_id).await.expect("delete");
        assert_eq!(backend.counts(), TableCounts::default());
    }
}
