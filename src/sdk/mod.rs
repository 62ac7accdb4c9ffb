//! The typed SDK boundary. Wire-level HTTP/JSON, auth, and retry-on-5xx
//! belong to the real ZillaForge SDK crate and are out of scope;
//! the core only ever calls through this trait surface.

pub mod models;
pub mod waiter;

use async_trait::async_trait;

use crate::error::SdkError;
use models::*;

/// The client handed to every reconciler. Exposes the two cloud-API
/// families: compute (VPS) and image/repository (VRM).
pub trait ProjectClient: Send + Sync {
    fn vps(&self) -> &dyn VpsClient;
    fn vrm(&self) -> &dyn VrmClient;
}

#[async_trait]
pub trait VpsClient: Send + Sync {
    async fn create_server(&self, req: ServerCreateRequest) -> Result<ServerResource, SdkError>;
    async fn get_server(&self, id: &str) -> Result<ServerResource, SdkError>;
    async fn list_servers(&self) -> Result<Vec<ServerResource>, SdkError>;
    async fn update_server(
        &self,
        id: &str,
        patch: ServerUpdateRequest,
    ) -> Result<ServerResource, SdkError>;
    async fn delete_server(&self, id: &str) -> Result<(), SdkError>;

    async fn list_server_nics(&self, server_id: &str) -> Result<Vec<NicResource>, SdkError>;
    async fn create_nic(&self, server_id: &str, spec: NicSpec) -> Result<NicResource, SdkError>;
    async fn delete_nic(&self, server_id: &str, network_id: &str) -> Result<(), SdkError>;
    async fn update_nic_security_groups(
        &self,
        server_id: &str,
        nic_id: &str,
        security_group_ids: Vec<String>,
    ) -> Result<(), SdkError>;
    async fn associate_floating_ip(
        &self,
        server_id: &str,
        nic_id: &str,
        floating_ip_id: &str,
    ) -> Result<(), SdkError>;
    /// Disassociation is idempotent: a 404 is success.
    async fn disassociate_floating_ip(
        &self,
        server_id: &str,
        nic_id: &str,
        floating_ip_id: &str,
    ) -> Result<(), SdkError>;

    async fn get_floating_ip(&self, id: &str) -> Result<FloatingIpResource, SdkError>;
    async fn list_floating_ips(&self) -> Result<Vec<FloatingIpResource>, SdkError>;
    async fn create_floating_ip(
        &self,
        req: FloatingIpCreateRequest,
    ) -> Result<FloatingIpResource, SdkError>;
    async fn update_floating_ip(
        &self,
        id: &str,
        patch: FloatingIpUpdateRequest,
    ) -> Result<FloatingIpResource, SdkError>;
    async fn delete_floating_ip(&self, id: &str) -> Result<(), SdkError>;

    async fn get_security_group(&self, id: &str) -> Result<SecurityGroupResource, SdkError>;
    async fn list_security_groups(&self, detail: bool) -> Result<Vec<SecurityGroupResource>, SdkError>;
    async fn create_security_group(
        &self,
        req: SecurityGroupCreateRequest,
    ) -> Result<SecurityGroupResource, SdkError>;
    async fn update_security_group(
        &self,
        id: &str,
        patch: SecurityGroupUpdateRequest,
    ) -> Result<SecurityGroupResource, SdkError>;
    async fn delete_security_group(&self, id: &str) -> Result<(), SdkError>;

    async fn get_keypair(&self, id: &str) -> Result<KeypairResource, SdkError>;
    async fn list_keypairs(&self) -> Result<Vec<KeypairResource>, SdkError>;
    async fn create_keypair(&self, req: KeypairCreateRequest) -> Result<KeypairResource, SdkError>;
    async fn update_keypair(
        &self,
        id: &str,
        description: Option<String>,
    ) -> Result<KeypairResource, SdkError>;
    async fn delete_keypair(&self, id: &str) -> Result<(), SdkError>;

    async fn list_networks(&self) -> Result<Vec<NetworkResource>, SdkError>;
    async fn list_flavors(&self) -> Result<Vec<FlavorResource>, SdkError>;
}

#[async_trait]
pub trait VrmClient: Send + Sync {
    async fn list_repository_tags(&self, repository: &str) -> Result<Vec<String>, SdkError>;
    async fn list_images(&self) -> Result<Vec<ImageResource>, SdkError>;
}
