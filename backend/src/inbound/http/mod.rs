//! HTTP inbound adapter exposing the registration REST endpoints.

pub mod error;
pub mod health;
pub mod regions;
pub mod registrations;
pub mod schools;
pub mod state;
pub mod wizard;

pub use error::ApiResult;
