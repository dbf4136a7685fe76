//! Driven port for the school tables of the external data store.
//!
//! Each insert returns the identifier generated by the store so later writes
//! can reference it. Deletes exist only to undo a partially completed
//! registration.

use async_trait::async_trait;

use crate::domain::{
    AdministratorId, HeadmasterDetails, LocationDetails, LocationId, NewSchool, RoleGrant,
    RoleGrantId, School, SchoolId, Subdomain,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by school record store adapters.
    pub enum SchoolRecordStoreError {
        /// Store could not be reached or did not answer in time.
        Connection { message: String } => "school record store unreachable: {message}",
        /// A uniqueness or foreign-key constraint rejected the row.
        Conflict { message: String } => "school record conflicts with existing data: {message}",
        /// The store refused the request.
        Rejected { message: String } => "school record rejected: {message}",
    }
}

/// Port for writing and reading school registration rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchoolRecordStore: Send + Sync {
    /// Insert a school row with its derived subdomain.
    async fn insert_school(&self, school: &NewSchool) -> Result<SchoolId, SchoolRecordStoreError>;

    /// Insert the location row of `school_id`.
    async fn insert_location(
        &self,
        school_id: SchoolId,
        location: &LocationDetails,
    ) -> Result<LocationId, SchoolRecordStoreError>;

    /// Insert the headmaster row of `school_id`.
    async fn insert_administrator(
        &self,
        school_id: SchoolId,
        headmaster: &HeadmasterDetails,
    ) -> Result<AdministratorId, SchoolRecordStoreError>;

    /// Insert a role grant linking an account to a school.
    async fn insert_role_grant(
        &self,
        grant: &RoleGrant,
    ) -> Result<RoleGrantId, SchoolRecordStoreError>;

    /// Schools whose subdomain equals `subdomain`.
    async fn find_schools_by_subdomain(
        &self,
        subdomain: &Subdomain,
    ) -> Result<Vec<School>, SchoolRecordStoreError>;

    /// Remove a school row.
    async fn delete_school(&self, id: SchoolId) -> Result<(), SchoolRecordStoreError>;

    /// Remove a location row.
    async fn delete_location(&self, id: LocationId) -> Result<(), SchoolRecordStoreError>;

    /// Remove a headmaster row.
    async fn delete_administrator(&self, id: AdministratorId)
    -> Result<(), SchoolRecordStoreError>;
}

/// Store that accepts every write and holds no rows.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSchoolRecordStore;

#[async_trait]
impl SchoolRecordStore for FixtureSchoolRecordStore {
    async fn insert_school(&self, _school: &NewSchool) -> Result<SchoolId, SchoolRecordStoreError> {
        Ok(SchoolId::random())
    }

    async fn insert_location(
        &self,
        _school_id: SchoolId,
        _location: &LocationDetails,
    ) -> Result<LocationId, SchoolRecordStoreError> {
        Ok(LocationId::random())
    }

    async fn insert_administrator(
        &self,
        _school_id: SchoolId,
        _headmaster: &HeadmasterDetails,
    ) -> Result<AdministratorId, SchoolRecordStoreError> {
        Ok(AdministratorId::random())
    }

    async fn insert_role_grant(
        &self,
        _grant: &RoleGrant,
    ) -> Result<RoleGrantId, SchoolRecordStoreError> {
        Ok(RoleGrantId::random())
    }

    async fn find_schools_by_subdomain(
        &self,
        _subdomain: &Subdomain,
    ) -> Result<Vec<School>, SchoolRecordStoreError> {
        Ok(Vec::new())
    }

    async fn delete_school(&self, _id: SchoolId) -> Result<(), SchoolRecordStoreError> {
        Ok(())
    }

    async fn delete_location(&self, _id: LocationId) -> Result<(), SchoolRecordStoreError> {
        Ok(())
    }

    async fn delete_administrator(
        &self,
        _id: AdministratorId,
    ) -> Result<(), SchoolRecordStoreError> {
        Ok(())
    }
}
