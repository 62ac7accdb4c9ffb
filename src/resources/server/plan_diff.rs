//! Classifies an Update plan into the in-place-patchable parts and the
//! per-attachment deltas. `flavor_id`/`image_id` are
//! `RequiresReplace` attributes at the schema level, so Terraform itself
//! routes a change on either into destroy-then-create rather than Update;
//! the guard here exists only because Update must never silently no-op or
//! mutate the wrong resource if that routing is ever bypassed.

use crate::error::{Diagnostic, Diagnostics};
use crate::value::Value;

use super::model::{NetworkAttachment, Server};

#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentChange {
    Add(NetworkAttachment),
    Remove(NetworkAttachment),
    SecurityGroupsChanged {
        network_id: String,
        desired_sg_ids: Vec<String>,
    },
    FloatingIpChanged {
        network_id: String,
        prior: Option<String>,
        desired: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerUpdatePlan {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub attachment_changes: Vec<AttachmentChange>,
}

impl ServerUpdatePlan {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.attachment_changes.is_empty()
    }
}

fn changed<T: PartialEq + Clone>(prior: &Value<T>, desired: &Value<T>) -> Option<T> {
    match (prior, desired) {
        (Value::Known(p), Value::Known(d)) if p != d => Some(d.clone()),
        _ => None,
    }
}

/// Returns an error diagnostic (never a patch) when `flavor_id` or
/// `image_id` differ between prior and desired. Otherwise, builds the
/// patch from scalar and attachment deltas.
pub fn diff_server_update(prior: &Server, desired: &Server) -> Result<ServerUpdatePlan, Diagnostics> {
    let mut diags = Diagnostics::new();

    if changed(&prior.flavor_id, &desired.flavor_id).is_some() {
        diags.push(Diagnostic::error_on(
            "flavor_id",
            "unsupported change",
            "flavor_id cannot be changed in place; this requires destroying and recreating the server",
        ));
    }
    if changed(&prior.image_id, &desired.image_id).is_some() {
        diags.push(Diagnostic::error_on(
            "image_id",
            "unsupported change",
            "image_id cannot be changed in place; this requires destroying and recreating the server",
        ));
    }
    if diags.has_errors() {
        return Err(diags);
    }

    let mut plan = ServerUpdatePlan::default();
    plan.name = changed(&prior.name, &desired.name);
    if let (Value::Known(p), Value::Known(d)) = (&prior.description, &desired.description) {
        if p != d {
            plan.description = Some(Some(d.clone()));
        }
    } else if prior.description.is_known() && desired.description.is_null() {
        plan.description = Some(None);
    }

    plan.attachment_changes = diff_attachments(prior.attachments(), desired.attachments());

    Ok(plan)
}

/// Attachments are matched by `network_id`, the stable key across plan and
/// state -- list position is not meaningful.
fn diff_attachments(prior: &[NetworkAttachment], desired: &[NetworkAttachment]) -> Vec<AttachmentChange> {
    let mut changes = Vec::new();

    for d in desired {
        let network_id = match d.network_id_str() {
            Some(id) => id,
            None => continue,
        };
        match prior.iter().find(|p| p.network_id_str() == Some(network_id)) {
            None => changes.push(AttachmentChange::Add(d.clone())),
            Some(p) => {
                let desired_sg_ids = match &d.security_group_ids {
                    Value::Known(ids) => {
                        let mut ids = ids.clone();
                        ids.sort();
                        ids
                    }
                    _ => Vec::new(),
                };
                let prior_sg_ids = match &p.security_group_ids {
                    Value::Known(ids) => {
                        let mut ids = ids.clone();
                        ids.sort();
                        ids
                    }
                    _ => Vec::new(),
                };
                if desired_sg_ids != prior_sg_ids {
                    changes.push(AttachmentChange::SecurityGroupsChanged {
                        network_id: network_id.to_string(),
                        desired_sg_ids,
                    });
                }

                let prior_fip = p.floating_ip_id_str().map(|s| s.to_string());
                let desired_fip = d.floating_ip_id_str().map(|s| s.to_string());
                if prior_fip != desired_fip {
                    changes.push(AttachmentChange::FloatingIpChanged {
                        network_id: network_id.to_string(),
                        prior: prior_fip,
                        desired: desired_fip,
                    });
                }
            }
        }
    }

    for p in prior {
        let network_id = match p.network_id_str() {
            Some(id) => id,
            None => continue,
        };
        if !desired.iter().any(|d| d.network_id_str() == Some(network_id)) {
            changes.push(AttachmentChange::Remove(p.clone()));
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(network_id: &str, sg: Vec<&str>, fip: Option<&str>) -> NetworkAttachment {
        NetworkAttachment {
            network_id: Value::Known(network_id.to_string()),
            ip_address: Value::Null,
            primary: Value::Known(false),
            security_group_ids: Value::Known(sg.into_iter().map(String::from).collect()),
            floating_ip_id: fip.map(|s| Value::Known(s.to_string())).unwrap_or(Value::Null),
            floating_ip: Value::Null,
        }
    }

    fn server_with(attachments: Vec<NetworkAttachment>, flavor_id: &str) -> Server {
        Server {
            id: Value::Known("s1".to_string()),
            name: Value::Known("web".to_string()),
            description: Value::Null,
            flavor_id: Value::Known(flavor_id.to_string()),
            image_id: Value::Known("img".to_string()),
            keypair: Value::Null,
            user_data: Value::Null,
            password: Value::Null,
            network_attachment: Value::Known(attachments),
            wait_for_active: Value::Known(true),
            wait_for_deleted: Value::Known(true),
            timeouts: Default::default(),
            status: Value::Unknown,
            ip_addresses: Value::Unknown,
            created_at: Value::Unknown,
        }
    }

    #[test]
    fn flavor_id_change_is_rejected_not_silently_applied() {
        let prior = server_with(vec![], "f1");
        let desired = server_with(vec![], "f2");
        let result = diff_server_update(&prior, &desired);
        assert!(result.is_err());
    }

    #[test]
    fn detects_added_and_removed_attachments() {
        let prior = server_with(vec![attachment("net-a", vec![], None)], "f1");
        let desired = server_with(vec![attachment("net-b", vec![], None)], "f1");
        let plan = diff_server_update(&prior, &desired).unwrap();
        assert!(plan
            .attachment_changes
            .iter()
            .any(|c| matches!(c, AttachmentChange::Add(a) if a.network_id_str() == Some("net-b"))));
        assert!(plan
            .attachment_changes
            .iter()
            .any(|c| matches!(c, AttachmentChange::Remove(a) if a.network_id_str() == Some("net-a"))));
    }

    #[test]
    fn detects_security_group_change_on_matched_attachment() {
        let prior = server_with(vec![attachment("net-a", vec!["sg1"], None)], "f1");
        let desired = server_with(vec![attachment("net-a", vec!["sg2"], None)], "f1");
        let plan = diff_server_update(&prior, &desired).unwrap();
        assert!(plan.attachment_changes.iter().any(|c| matches!(
            c,
            AttachmentChange::SecurityGroupsChanged { network_id, .. } if network_id == "net-a"
        )));
    }

    #[test]
    fn detects_floating_ip_change_on_matched_attachment() {
        let prior = server_with(vec![attachment("net-a", vec![], None)], "f1");
        let desired = server_with(vec![attachment("net-a", vec![], Some("fip-1"))], "f1");
        let plan = diff_server_update(&prior, &desired).unwrap();
        assert!(plan.attachment_changes.iter().any(|c| matches!(
            c,
            AttachmentChange::FloatingIpChanged { network_id, prior, desired }
                if network_id == "net-a" && prior.is_none() && desired.as_deref() == Some("fip-1")
        )));
    }

    #[test]
    fn no_changes_yields_empty_plan() {
        let a = vec![attachment("net-a", vec!["sg1"], Some("fip-1"))];
        let prior = server_with(a.clone(), "f1");
        let desired = server_with(a, "f1");
        let plan = diff_server_update(&prior, &desired).unwrap();
        assert!(plan.is_empty());
    }
}
