//! Remote representations returned by the (out-of-scope) ZillaForge SDK.
//! These are plain data, owned by the reconciler for the lifetime of one
//! operation.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerStatus {
    Building,
    Active,
    Error,
    Deleted,
}

impl ServerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerStatus::Building => "building",
            ServerStatus::Active => "active",
            ServerStatus::Error => "error",
            ServerStatus::Deleted => "deleted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloatingIpStatus {
    Active,
    Down,
    Pending,
    Rejected,
}

impl FloatingIpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FloatingIpStatus::Active => "ACTIVE",
            FloatingIpStatus::Down => "DOWN",
            FloatingIpStatus::Pending => "PENDING",
            FloatingIpStatus::Rejected => "REJECTED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerResource {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub flavor_id: String,
    pub image_id: String,
    pub keypair: Option<String>,
    pub status: ServerStatus,
    pub private_ips: Vec<String>,
    pub public_ips: Vec<String>,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NicResource {
    pub nic_id: String,
    pub network_id: String,
    pub ip_address: String,
    pub security_group_ids: Vec<String>,
    /// `true` when the remote itself exposes a primary indicator for this
    /// NIC. The remote in this system does not, so
    /// this is always `None` in practice; the field exists so a future SDK
    /// revision can populate it without a model break.
    pub is_primary: Option<bool>,
    pub floating_ip: Option<AttachedFloatingIp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachedFloatingIp {
    pub floating_ip_id: String,
    pub ip_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingIpResource {
    pub id: String,
    pub ip_address: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: FloatingIpStatus,
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroupRuleResource {
    pub protocol: String,
    pub port_min: Option<u16>,
    pub port_max: Option<u16>,
    pub source_cidr: Option<String>,
    pub destination_cidr: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroupResource {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub ingress_rules: Vec<SecurityGroupRuleResource>,
    pub egress_rules: Vec<SecurityGroupRuleResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeypairResource {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public_key: String,
    pub private_key: Option<String>,
    pub fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkResource {
    pub id: String,
    pub name: String,
    pub cidr: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorResource {
    pub id: String,
    pub name: String,
    pub vcpus: u32,
    pub ram_mb: u32,
    pub disk_gb: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResource {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
}

// --- request payloads -------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NicSpec {
    pub network_id: String,
    /// Empty string means DHCP assignment.
    pub ip_address: String,
    pub is_primary: bool,
    pub security_group_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerCreateRequest {
    pub name: String,
    pub description: Option<String>,
    pub flavor_id: String,
    pub image_id: String,
    pub keypair: Option<String>,
    /// Base64-encoded cloud-init user data.
    pub user_data_base64: Option<String>,
    /// Base64-encoded initial password.
    pub password_base64: Option<String>,
    pub nics: Vec<NicSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingIpCreateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatingIpUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroupCreateRequest {
    pub name: String,
    pub description: Option<String>,
    pub ingress_rules: Vec<SecurityGroupRuleResource>,
    pub egress_rules: Vec<SecurityGroupRuleResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroupUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingress_rules: Option<Vec<SecurityGroupRuleResource>>,
    pub egress_rules: Option<Vec<SecurityGroupRuleResource>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeypairCreateRequest {
    pub name: String,
    pub description: Option<String>,
    pub public_key: Option<String>,
}
