//! Server configuration loaded via OrthoConfig.
//!
//! Values layer as defaults < configuration file < `SHULE_*` environment
//! variables < command-line flags. [`ShuleSettings::resolve`] turns the raw
//! values into typed runtime settings and rejects anything malformed before
//! the server binds.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::registration::DEFAULT_REDIRECT_DELAY_MS;
use crate::domain::{
    CompensationPolicy, Locale, RegistrationOptions, UnknownCompensationPolicy, UnsupportedLocale,
};
use crate::outbound::managed::ManagedBackendConfig;

const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

/// Raw configuration values for the registration server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHULE")]
pub struct ShuleSettings {
    /// Socket address the HTTP server binds to.
    #[ortho_config(default = "0.0.0.0:8080".to_owned())]
    pub bind_addr: String,
    /// Managed backend project URL. The in-memory backend is used when unset.
    pub backend_url: Option<String>,
    /// Service-role key for the managed backend.
    pub backend_service_key: Option<String>,
    /// Per-request timeout for managed backend calls, in seconds.
    pub backend_timeout_secs: Option<u64>,
    /// `rollback` or `retain`.
    pub compensation: Option<String>,
    /// Delay before the post-registration redirect, in milliseconds.
    pub redirect_delay_ms: Option<u64>,
    /// `en` or `sw`.
    pub default_locale: Option<String>,
}

/// Configuration rejected at startup.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address is not a socket address.
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// The backend URL does not parse.
    #[error("invalid backend URL `{value}`: {source}")]
    BackendUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// A backend URL was configured without a service key.
    #[error("backend_service_key is required when backend_url is set")]
    MissingServiceKey,
    /// A zero timeout would fail every call.
    #[error("backend_timeout_secs must be greater than zero")]
    ZeroTimeout,
    /// Unknown compensation policy.
    #[error(transparent)]
    Compensation(#[from] UnknownCompensationPolicy),
    /// Unknown default locale.
    #[error(transparent)]
    Locale(#[from] UnsupportedLocale),
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub bind_addr: SocketAddr,
    /// Managed backend connection; `None` selects the in-memory backend.
    pub backend: Option<ManagedBackendConfig>,
    pub registration: RegistrationOptions,
}

impl ShuleSettings {
    /// Validate and type every configured value.
    ///
    /// # Errors
    /// Returns [`SettingsError`] naming the first malformed value.
    pub fn resolve(&self) -> Result<RuntimeSettings, SettingsError> {
        let bind_addr = self
            .bind_addr
            .trim()
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                value: self.bind_addr.clone(),
                source,
            })?;

        let compensation = self
            .compensation
            .as_deref()
            .map(str::parse::<CompensationPolicy>)
            .transpose()?
            .unwrap_or_default();
        let default_locale = self
            .default_locale
            .as_deref()
            .map(str::parse::<Locale>)
            .transpose()?
            .unwrap_or_default();

        Ok(RuntimeSettings {
            bind_addr,
            backend: self.managed_backend()?,
            registration: RegistrationOptions {
                compensation,
                redirect_delay_ms: self.redirect_delay_ms.unwrap_or(DEFAULT_REDIRECT_DELAY_MS),
                default_locale,
            },
        })
    }

    fn managed_backend(&self) -> Result<Option<ManagedBackendConfig>, SettingsError> {
        let Some(raw_url) = self.backend_url.as_deref().filter(|url| !url.trim().is_empty())
        else {
            return Ok(None);
        };
        let base_url = Url::parse(raw_url.trim()).map_err(|source| SettingsError::BackendUrl {
            value: raw_url.to_owned(),
            source,
        })?;
        let service_key = self
            .backend_service_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(SettingsError::MissingServiceKey)?;
        let timeout_secs = self
            .backend_timeout_secs
            .unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }
        Ok(Some(ManagedBackendConfig {
            base_url,
            service_key: Zeroizing::new(service_key),
            timeout: Duration::from_secs(timeout_secs),
        }))
    }
}
