//! School registration backend library modules.
//!
//! A step-gated registration wizard, the validation schema behind it, the
//! region/district selector and the ordered multi-table write sequencer,
//! arranged as domain, ports and adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
