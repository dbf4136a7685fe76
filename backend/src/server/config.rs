//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use shule::domain::RegistrationOptions;
use shule::outbound::managed::ManagedBackendConfig;
use shule::settings::RuntimeSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) backend: Option<ManagedBackendConfig>,
    pub(crate) registration: RegistrationOptions,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr` using the
    /// in-memory backend and default registration options.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            backend: None,
            registration: RegistrationOptions::default(),
        }
    }

    /// Attach a managed backend for the registration ports.
    #[must_use]
    pub fn with_managed_backend(mut self, backend: ManagedBackendConfig) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Override the registration options.
    #[must_use]
    pub fn with_registration(mut self, registration: RegistrationOptions) -> Self {
        self.registration = registration;
        self
    }
}

impl From<RuntimeSettings> for ServerConfig {
    fn from(settings: RuntimeSettings) -> Self {
        let config = Self::new(settings.bind_addr).with_registration(settings.registration);
        match settings.backend {
            Some(backend) => config.with_managed_backend(backend),
            None => config,
        }
    }
}
