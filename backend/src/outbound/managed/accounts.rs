//! `AccountProvisioner` over the managed auth admin API.

use async_trait::async_trait;

use super::client::{Fault, FaultKind, ManagedBackendClient};
use super::dto::{CreateUserRequest, UserDto};
use crate::domain::ports::{AccountProvisioner, AccountProvisionerError};
use crate::domain::{AccountId, NewAdminAccount};

const ADMIN_USERS: &str = "auth/v1/admin/users";

fn map_fault(fault: Fault) -> AccountProvisionerError {
    match fault.kind {
        FaultKind::Connection => AccountProvisionerError::connection(fault.message),
        FaultKind::Conflict => AccountProvisionerError::already_registered(fault.message),
        FaultKind::Rejected => AccountProvisionerError::rejected(fault.message),
    }
}

/// Login accounts created through the managed auth service.
#[derive(Debug, Clone)]
pub struct ManagedAccountProvisioner {
    client: ManagedBackendClient,
}

impl ManagedAccountProvisioner {
    /// Create a provisioner sharing `client`.
    pub fn new(client: ManagedBackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountProvisioner for ManagedAccountProvisioner {
    async fn create_account(
        &self,
        account: &NewAdminAccount,
    ) -> Result<AccountId, AccountProvisionerError> {
        let url = self.client.endpoint(ADMIN_USERS).map_err(map_fault)?;
        let request = self
            .client
            .http()
            .post(url)
            .json(&CreateUserRequest::from(account));
        let user: UserDto = self.client.send_json(request).await.map_err(map_fault)?;
        Ok(AccountId::from_uuid(user.id))
    }

    async fn delete_account(&self, id: AccountId) -> Result<(), AccountProvisionerError> {
        let url = self
            .client
            .endpoint(&format!("{ADMIN_USERS}/{id}"))
            .map_err(map_fault)?;
        self.client
            .send_empty(self.client.http().delete(url))
            .await
            .map_err(map_fault)
    }
}
