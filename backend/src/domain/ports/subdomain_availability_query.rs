//! Driving port reporting whether a school name's subdomain is taken.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Subdomain};

/// Subdomain derived from a candidate name and its current use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubdomainAvailability {
    #[schema(value_type = String, example = "mwengesecondaryschool")]
    pub subdomain: Subdomain,
    pub available: bool,
    /// Number of schools already registered under the subdomain.
    pub existing_schools: usize,
}

/// Driving port for subdomain lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubdomainAvailabilityQuery: Send + Sync {
    /// Derive the subdomain for `school_name` and look it up.
    async fn check(&self, school_name: &str) -> Result<SubdomainAvailability, Error>;
}

/// Query that reports every subdomain as free.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSubdomainAvailabilityQuery;

#[async_trait]
impl SubdomainAvailabilityQuery for FixtureSubdomainAvailabilityQuery {
    async fn check(&self, school_name: &str) -> Result<SubdomainAvailability, Error> {
        Ok(SubdomainAvailability {
            subdomain: Subdomain::derive(school_name),
            available: true,
            existing_schools: 0,
        })
    }
}
