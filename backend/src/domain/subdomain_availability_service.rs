//! Subdomain lookups for candidate school names.
//!
//! Informational only: registration does not consult this service, and two
//! schools with the same name may both register.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    SchoolRecordStore, SchoolRecordStoreError, SubdomainAvailability, SubdomainAvailabilityQuery,
};
use crate::domain::Subdomain;

fn map_store_error(error: SchoolRecordStoreError) -> Error {
    match error {
        SchoolRecordStoreError::Connection { message } => {
            Error::service_unavailable(format!("school lookup unavailable: {message}"))
        }
        other => Error::internal(format!("school lookup failed: {other}")),
    }
}

/// Query service answering subdomain lookups from the school store.
#[derive(Clone)]
pub struct SubdomainAvailabilityService<S> {
    store: Arc<S>,
}

impl<S> SubdomainAvailabilityService<S> {
    /// Create a service reading from `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> SubdomainAvailabilityQuery for SubdomainAvailabilityService<S>
where
    S: SchoolRecordStore,
{
    async fn check(&self, school_name: &str) -> Result<SubdomainAvailability, Error> {
        let subdomain = Subdomain::derive(school_name);
        if subdomain.as_ref().is_empty() {
            return Err(Error::invalid_request("school name must not be blank"));
        }
        let existing = self
            .store
            .find_schools_by_subdomain(&subdomain)
            .await
            .map_err(map_store_error)?;
        Ok(SubdomainAvailability {
            available: existing.is_empty(),
            existing_schools: existing.len(),
            subdomain,
        })
    }
}
