//! Registration server entry-point: loads settings, selects the registration
//! backend and serves the REST endpoints.

mod server;

use std::env;
use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use shule::inbound::http::health::HealthState;
use shule::settings::{RuntimeSettings, ShuleSettings};

use server::{ServerConfig, create_server};

/// Merge CLI, environment and file layers, then resolve them.
fn load_runtime<I>(args: I) -> std::io::Result<RuntimeSettings>
where
    I: IntoIterator<Item = OsString>,
{
    let settings = ShuleSettings::load_from_iter(args)
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    settings
        .resolve()
        .map_err(|e| std::io::Error::other(format!("invalid settings: {e}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = load_runtime(env::args_os())?;
    info!(
        bind_addr = %runtime.bind_addr,
        compensation = ?runtime.registration.compensation,
        "starting registration server"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::from(runtime))?;
    server.await
}

#[cfg(test)]
mod tests {
    use super::*;
    use env_lock::lock_env;
    use rstest::rstest;

    #[rstest]
    fn bare_invocation_resolves_to_the_default_bind_address() {
        let _guard = lock_env([
            ("SHULE_BIND_ADDR", None::<String>),
            ("SHULE_BACKEND_URL", None),
            ("SHULE_BACKEND_SERVICE_KEY", None),
            ("SHULE_BACKEND_TIMEOUT_SECS", None),
            ("SHULE_COMPENSATION", None),
            ("SHULE_REDIRECT_DELAY_MS", None),
            ("SHULE_DEFAULT_LOCALE", None),
        ]);

        let runtime = load_runtime([OsString::from("shule")]).expect("settings resolve");
        assert_eq!(runtime.bind_addr.port(), 8080);
        assert!(runtime.backend.is_none());
    }

    #[rstest]
    fn malformed_bind_address_fails_startup() {
        let _guard = lock_env([("SHULE_BIND_ADDR", Some("localhost"))]);

        let error = load_runtime([OsString::from("shule")]).expect_err("bad address");
        assert!(error.to_string().starts_with("invalid settings:"), "{error}");
    }
}
