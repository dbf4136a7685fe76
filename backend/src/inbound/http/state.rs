//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureSchoolRegistrationCommand, FixtureSubdomainAvailabilityQuery,
    SchoolRegistrationCommand, SubdomainAvailabilityQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registrations: Arc<dyn SchoolRegistrationCommand>,
    pub availability: Arc<dyn SubdomainAvailabilityQuery>,
}

impl HttpState {
    /// Construct state from the registration command and availability query.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use shule::domain::ports::{
    ///     FixtureSchoolRegistrationCommand, FixtureSubdomainAvailabilityQuery,
    /// };
    /// use shule::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureSchoolRegistrationCommand),
    ///     Arc::new(FixtureSubdomainAvailabilityQuery),
    /// );
    /// let _registrations = state.registrations.clone();
    /// ```
    pub fn new(
        registrations: Arc<dyn SchoolRegistrationCommand>,
        availability: Arc<dyn SubdomainAvailabilityQuery>,
    ) -> Self {
        Self {
            registrations,
            availability,
        }
    }

    /// State backed by the fixture ports.
    #[must_use]
    pub fn fixtures() -> Self {
        Self::new(
            Arc::new(FixtureSchoolRegistrationCommand),
            Arc::new(FixtureSubdomainAvailabilityQuery),
        )
    }
}
