//! Populates a [`Server`] state fragment from the remote representation
//!. Ordering is always lexicographic so two reads of an
//! unchanged remote produce byte-identical state.

use crate::sdk::models::{NicResource, ServerResource};
use crate::value::Value;

use super::model::{NetworkAttachment, Server};

/// Maps one remote NIC into a `NetworkAttachment`. `primary` uses a
/// documented fallback: the remote has no primary indicator, so the first
/// NIC after the caller's sort is reported primary.
fn map_nic(nic: &NicResource, is_first: bool) -> NetworkAttachment {
    let mut security_group_ids = nic.security_group_ids.clone();
    security_group_ids.sort();

    let (floating_ip_id, floating_ip) = match &nic.floating_ip {
        Some(fip) => (
            Value::Known(fip.floating_ip_id.clone()),
            Value::Known(fip.ip_address.clone()),
        ),
        None => (Value::Null, Value::Null),
    };

    NetworkAttachment {
        network_id: Value::Known(nic.network_id.clone()),
        ip_address: Value::Known(nic.ip_address.clone()),
        primary: Value::Known(nic.is_primary.unwrap_or(is_first)),
        security_group_ids: Value::Known(security_group_ids),
        floating_ip_id,
        floating_ip,
    }
}

/// Builds the full computed state for a server.
/// `nics` need not arrive pre-sorted; this function owns the ordering.
pub fn map_server_to_state(server: &ServerResource, nics: &[NicResource]) -> Server {
    let mut sorted_nics = nics.to_vec();
    sorted_nics.sort_by(|a, b| a.network_id.cmp(&b.network_id));

    let attachments: Vec<NetworkAttachment> = sorted_nics
        .iter()
        .enumerate()
        .map(|(i, nic)| map_nic(nic, i == 0))
        .collect();

    let mut ip_addresses: Vec<String> = server
        .private_ips
        .iter()
        .chain(server.public_ips.iter())
        .cloned()
        .collect();
    ip_addresses.sort();

    Server {
        id: Value::Known(server.id.clone()),
        name: Value::Known(server.name.clone()),
        description: server.description.clone().into(),
        flavor_id: Value::Known(server.flavor_id.clone()),
        image_id: Value::Known(server.image_id.clone()),
        keypair: server.keypair.clone().into(),
        // Never derivable from the remote -- these attributes are
        // write-only.
        user_data: Value::Null,
        password: Value::Null,
        network_attachment: Value::Known(attachments),
        wait_for_active: Value::Known(true),
        wait_for_deleted: Value::Known(true),
        timeouts: Default::default(),
        status: Value::Known(server.status.as_str().to_string()),
        ip_addresses: Value::Known(ip_addresses),
        created_at: Value::Known(server.created_at.to_rfc3339()),
    }
}
