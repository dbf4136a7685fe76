//! Managed backend adapters.
//!
//! Thin reqwest implementations of the `SchoolRecordStore` and
//! `AccountProvisioner` ports against a PostgREST-style data API and an auth
//! admin API that share one project URL and service key.

mod accounts;
mod client;
mod dto;
mod records;

pub use accounts::ManagedAccountProvisioner;
pub use client::{ManagedBackendClient, ManagedBackendConfig};
pub use records::ManagedSchoolRecordStore;
