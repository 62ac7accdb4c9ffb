use serde::{Deserialize, Serialize};

use crate::value::Value;

/// The standalone `zillaforge_floating_ip` resource. This resource never
/// drives NIC association itself -- that lifecycle belongs to the server
/// reconciler's `floating_ip_id` attachment delta; `device_id`
/// here is purely observational.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingIp {
    pub id: Value<String>,
    pub ip_address: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub status: Value<String>,
    pub device_id: Value<String>,
}
