//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_provisioner;
mod school_record_store;
mod school_registration_command;
mod subdomain_availability_query;

#[cfg(test)]
pub use account_provisioner::MockAccountProvisioner;
pub use account_provisioner::{
    AccountProvisioner, AccountProvisionerError, FixtureAccountProvisioner,
};
#[cfg(test)]
pub use school_record_store::MockSchoolRecordStore;
pub use school_record_store::{
    FixtureSchoolRecordStore, SchoolRecordStore, SchoolRecordStoreError,
};
#[cfg(test)]
pub use school_registration_command::MockSchoolRegistrationCommand;
pub use school_registration_command::{
    FixtureSchoolRegistrationCommand, RegisterSchoolRequest, SchoolRegistrationCommand,
};
#[cfg(test)]
pub use subdomain_availability_query::MockSubdomainAvailabilityQuery;
pub use subdomain_availability_query::{
    FixtureSubdomainAvailabilityQuery, SubdomainAvailability, SubdomainAvailabilityQuery,
};
