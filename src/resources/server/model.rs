use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Sensitive;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAttachment {
    pub network_id: Value<String>,
    pub ip_address: Value<String>,
    pub primary: Value<bool>,
    pub security_group_ids: Value<Vec<String>>,
    pub floating_ip_id: Value<String>,
    /// Computed: the public IPv4 of the associated floating IP, or null.
    pub floating_ip: Value<String>,
}

impl NetworkAttachment {
    pub fn is_primary(&self) -> bool {
        matches!(self.primary, Value::Known(true))
    }

    pub fn network_id_str(&self) -> Option<&str> {
        self.network_id.known().map(|s| s.as_str())
    }

    pub fn floating_ip_id_str(&self) -> Option<&str> {
        self.floating_ip_id.known().map(|s| s.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeouts {
    pub create: Option<String>,
    pub update: Option<String>,
    pub delete: Option<String>,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            create: None,
            update: None,
            delete: None,
        }
    }
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

impl Timeouts {
    pub fn create_duration(&self) -> Duration {
        parse_duration(self.create.as_deref()).unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn update_duration(&self) -> Duration {
        parse_duration(self.update.as_deref()).unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn delete_duration(&self) -> Duration {
        parse_duration(self.delete.as_deref()).unwrap_or(DEFAULT_TIMEOUT)
    }
}

/// Parses human-readable durations like `"10m"`, `"90s"`, `"1h"`. Returns
/// `None` (so the caller falls back to the 10m default) on anything it
/// doesn't recognize, rather than failing the whole plan over a cosmetic
/// timeout string.
fn parse_duration(s: Option<&str>) -> Option<Duration> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    let (digits, unit) = s.split_at(s.len() - 1);
    let n: u64 = digits.parse().ok()?;
    match unit {
        "s" => Some(Duration::from_secs(n)),
        "m" => Some(Duration::from_secs(n * 60)),
        "h" => Some(Duration::from_secs(n * 3600)),
        _ => None,
    }
}

/// Used for both the Terraform plan (pre-apply) and the Terraform state
/// (post-apply) representation of a `server` resource -- the same attribute
/// set, read at different points in the lifecycle, which is why both carry
/// the full `Value<T>` tri-state rather than a plan-only/state-only split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: Value<String>,
    pub name: Value<String>,
    pub description: Value<String>,
    pub flavor_id: Value<String>,
    pub image_id: Value<String>,
    pub keypair: Value<String>,
    pub user_data: Value<Sensitive<String>>,
    pub password: Value<Sensitive<String>>,
    pub network_attachment: Value<Vec<NetworkAttachment>>,
    pub wait_for_active: Value<bool>,
    pub wait_for_deleted: Value<bool>,
    pub timeouts: Timeouts,

    // computed
    pub status: Value<String>,
    pub ip_addresses: Value<Vec<String>>,
    pub created_at: Value<String>,
}

impl Server {
    pub fn wait_for_active(&self) -> bool {
        !matches!(self.wait_for_active, Value::Known(false))
    }

    pub fn wait_for_deleted(&self) -> bool {
        !matches!(self.wait_for_deleted, Value::Known(false))
    }

    pub fn attachments(&self) -> &[NetworkAttachment] {
        match &self.network_attachment {
            Value::Known(list) => list.as_slice(),
            _ => &[],
        }
    }
}
