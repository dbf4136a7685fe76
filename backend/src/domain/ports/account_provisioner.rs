//! Driven port for the external auth service.

use async_trait::async_trait;

use crate::domain::{AccountId, NewAdminAccount};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account provisioning adapters.
    pub enum AccountProvisionerError {
        /// Auth service could not be reached or did not answer in time.
        Connection { message: String } => "auth service unreachable: {message}",
        /// An account already uses the email address.
        AlreadyRegistered { message: String } => "account already registered: {message}",
        /// The auth service refused the request.
        Rejected { message: String } => "account rejected: {message}",
    }
}

/// Port for creating administrator login accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountProvisioner: Send + Sync {
    /// Create a login account carrying first and last name metadata.
    async fn create_account(
        &self,
        account: &NewAdminAccount,
    ) -> Result<AccountId, AccountProvisionerError>;

    /// Remove an account created by [`AccountProvisioner::create_account`].
    async fn delete_account(&self, id: AccountId) -> Result<(), AccountProvisionerError>;
}

/// Provisioner that accepts every account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccountProvisioner;

#[async_trait]
impl AccountProvisioner for FixtureAccountProvisioner {
    async fn create_account(
        &self,
        _account: &NewAdminAccount,
    ) -> Result<AccountId, AccountProvisionerError> {
        Ok(AccountId::random())
    }

    async fn delete_account(&self, _id: AccountId) -> Result<(), AccountProvisionerError> {
        Ok(())
    }
}
