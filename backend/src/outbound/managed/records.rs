//! `SchoolRecordStore` over the managed data API.
//!
//! Inserts use `Prefer: return=representation` so the generated id comes
//! back in the same round trip; reads and deletes filter with `eq.`.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::client::{Fault, FaultKind, ManagedBackendClient};
use super::dto::{
    CreatedRowDto, NewAdministratorRow, NewLocationRow, NewRoleGrantRow, NewSchoolRow,
    SchoolRowDto,
};
use crate::domain::ports::{SchoolRecordStore, SchoolRecordStoreError};
use crate::domain::{
    AdministratorId, HeadmasterDetails, LocationDetails, LocationId, NewSchool, RoleGrant,
    RoleGrantId, School, SchoolId, Subdomain,
};

const SCHOOLS: &str = "schools";
const SCHOOL_LOCATIONS: &str = "school_locations";
const SCHOOL_ADMINISTRATORS: &str = "school_administrators";
const USER_ROLES: &str = "user_roles";

fn table_path(table: &str) -> String {
    format!("rest/v1/{table}")
}

fn map_fault(fault: Fault) -> SchoolRecordStoreError {
    match fault.kind {
        FaultKind::Connection => SchoolRecordStoreError::connection(fault.message),
        FaultKind::Conflict => SchoolRecordStoreError::conflict(fault.message),
        FaultKind::Rejected => SchoolRecordStoreError::rejected(fault.message),
    }
}

/// School tables of the managed backend.
#[derive(Debug, Clone)]
pub struct ManagedSchoolRecordStore {
    client: ManagedBackendClient,
}

impl ManagedSchoolRecordStore {
    /// Create a store sharing `client`.
    pub fn new(client: ManagedBackendClient) -> Self {
        Self { client }
    }

    async fn insert<R: Serialize + Sync>(
        &self,
        table: &str,
        row: &R,
    ) -> Result<Uuid, SchoolRecordStoreError> {
        let url = self.client.endpoint(&table_path(table)).map_err(map_fault)?;
        let request = self
            .client
            .http()
            .post(url)
            .header("Prefer", "return=representation")
            .json(row);
        let created: Vec<CreatedRowDto> =
            self.client.send_json(request).await.map_err(map_fault)?;
        created.first().map(|row| row.id).ok_or_else(|| {
            SchoolRecordStoreError::rejected(format!("{table} insert returned no row"))
        })
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Vec<T>, SchoolRecordStoreError> {
        let url = self.client.endpoint(&table_path(table)).map_err(map_fault)?;
        let request = self
            .client
            .http()
            .get(url)
            .query(&[("select", "*".to_owned()), (column, format!("eq.{value}"))]);
        self.client.send_json(request).await.map_err(map_fault)
    }

    async fn delete(&self, table: &str, id: &Uuid) -> Result<(), SchoolRecordStoreError> {
        let url = self.client.endpoint(&table_path(table)).map_err(map_fault)?;
        let request = self
            .client
            .http()
            .delete(url)
            .query(&[("id", format!("eq.{id}"))]);
        self.client.send_empty(request).await.map_err(map_fault)
    }
}

#[async_trait]
impl SchoolRecordStore for ManagedSchoolRecordStore {
    async fn insert_school(&self, school: &NewSchool) -> Result<SchoolId, SchoolRecordStoreError> {
        self.insert(SCHOOLS, &NewSchoolRow::from(school))
            .await
            .map(SchoolId::from_uuid)
    }

    async fn insert_location(
        &self,
        school_id: SchoolId,
        location: &LocationDetails,
    ) -> Result<LocationId, SchoolRecordStoreError> {
        self.insert(SCHOOL_LOCATIONS, &NewLocationRow::new(school_id, location))
            .await
            .map(LocationId::from_uuid)
    }

    async fn insert_administrator(
        &self,
        school_id: SchoolId,
        headmaster: &HeadmasterDetails,
    ) -> Result<AdministratorId, SchoolRecordStoreError> {
        self.insert(
            SCHOOL_ADMINISTRATORS,
            &NewAdministratorRow::new(school_id, headmaster),
        )
        .await
        .map(AdministratorId::from_uuid)
    }

    async fn insert_role_grant(
        &self,
        grant: &RoleGrant,
    ) -> Result<RoleGrantId, SchoolRecordStoreError> {
        self.insert(USER_ROLES, &NewRoleGrantRow::from(grant))
            .await
            .map(RoleGrantId::from_uuid)
    }

    async fn find_schools_by_subdomain(
        &self,
        subdomain: &Subdomain,
    ) -> Result<Vec<School>, SchoolRecordStoreError> {
        let rows: Vec<SchoolRowDto> = self
            .select(SCHOOLS, "subdomain", subdomain.as_ref())
            .await?;
        rows.into_iter()
            .map(|row| row.into_domain().map_err(SchoolRecordStoreError::rejected))
            .collect()
    }

    async fn delete_school(&self, id: SchoolId) -> Result<(), SchoolRecordStoreError> {
        self.delete(SCHOOLS, id.as_uuid()).await
    }

    async fn delete_location(&self, id: LocationId) -> Result<(), SchoolRecordStoreError> {
        self.delete(SCHOOL_LOCATIONS, id.as_uuid()).await
    }

    async fn delete_administrator(
        &self,
        id: AdministratorId,
    ) -> Result<(), SchoolRecordStoreError> {
        self.delete(SCHOOL_ADMINISTRATORS, id.as_uuid()).await
    }
}
