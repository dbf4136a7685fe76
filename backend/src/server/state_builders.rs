//! Builders for HTTP state from the configured registration backend.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use shule::domain::ports::{AccountProvisioner, SchoolRecordStore};
use shule::domain::{RegistrationOptions, SchoolRegistrationService, SubdomainAvailabilityService};
use shule::inbound::http::state::HttpState;
use shule::outbound::managed::{
    ManagedAccountProvisioner, ManagedBackendClient, ManagedSchoolRecordStore,
};
use shule::outbound::memory::InMemorySchoolBackend;

use super::ServerConfig;

/// Wire the registration and availability services over one store and one
/// account provisioner.
fn wire<S, A>(store: Arc<S>, accounts: Arc<A>, options: RegistrationOptions) -> HttpState
where
    S: SchoolRecordStore + 'static,
    A: AccountProvisioner + 'static,
{
    let registrations = SchoolRegistrationService::new(store.clone(), accounts, options);
    let availability = SubdomainAvailabilityService::new(store);
    HttpState::new(Arc::new(registrations), Arc::new(availability))
}

/// Build HTTP state, using the managed backend when configured and the
/// in-memory backend otherwise.
///
/// # Errors
/// Returns [`std::io::Error`] if the managed backend HTTP client cannot be
/// constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let state = match &config.backend {
        Some(backend) => {
            info!(base_url = %backend.base_url, "using managed registration backend");
            let client = ManagedBackendClient::new(backend.clone()).map_err(|e| {
                std::io::Error::other(format!("managed backend client setup failed: {e}"))
            })?;
            wire(
                Arc::new(ManagedSchoolRecordStore::new(client.clone())),
                Arc::new(ManagedAccountProvisioner::new(client)),
                config.registration,
            )
        }
        None => {
            info!("using in-memory registration backend");
            let backend = Arc::new(InMemorySchoolBackend::new());
            wire(backend.clone(), backend, config.registration)
        }
    };
    Ok(web::Data::new(state))
}
