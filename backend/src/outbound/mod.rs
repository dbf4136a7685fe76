//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local school store and account provisioner
//! - **managed**: reqwest-backed data and auth APIs of the managed backend
//!
//! Adapters are thin translators between domain types and wire
//! representations. They contain no business logic.

pub mod managed;
pub mod memory;
