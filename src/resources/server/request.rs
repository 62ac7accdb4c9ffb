use base64::encode;

use crate::error::{Diagnostic, Diagnostics};
use crate::sdk::models::{NicSpec, ServerCreateRequest};
use crate::validators;
use crate::value::Value;

use super::model::Server;

/// Schema-level validators plus the cross-field invariants on the plan
/// (floating_ip_id uniqueness across attachments; at most one primary NIC).
/// Runs before any SDK call, so validation failures never leave a partially
/// created resource behind.
pub fn validate_server_plan(plan: &Server) -> Diagnostics {
    let mut diags = Diagnostics::new();

    if let Some(d) = validators::validate_non_empty(
        plan.attachments(),
        "network_attachment",
        "network_attachment",
    ) {
        diags.push(d);
    }

    let primary_flags: Vec<bool> = plan.attachments().iter().map(|a| a.is_primary()).collect();
    if let Some(d) = validators::validate_at_most_one_primary(&primary_flags, "network_attachment") {
        diags.push(d);
    }

    let floating_ip_ids: Vec<String> = plan
        .attachments()
        .iter()
        .filter_map(|a| a.floating_ip_id_str().map(|s| s.to_string()))
        .collect();
    if let Some(d) = validators::validate_unique_floating_ips(&floating_ip_ids, "network_attachment") {
        diags.push(d);
    }

    for (i, attachment) in plan.attachments().iter().enumerate() {
        let path = format!("network_attachment[{}]", i);
        if let Some(d) = validators::validate_uuid(&attachment.network_id, &format!("{}.network_id", path))
        {
            diags.push(d);
        }
        if let Some(d) =
            validators::validate_uuid(&attachment.floating_ip_id, &format!("{}.floating_ip_id", path))
        {
            diags.push(d);
        }
        let sg_ids = match &attachment.security_group_ids {
            Value::Known(ids) => ids.clone(),
            _ => Vec::new(),
        };
        if let Some(d) = validators::validate_non_empty(
            &sg_ids,
            &format!("{}.security_group_ids", path),
            "security_group_ids",
        ) {
            diags.push(d);
        }
        for (j, sg_id) in sg_ids.iter().enumerate() {
            if !validators::uuid::is_valid_uuid(sg_id) {
                diags.push(Diagnostic::error_on(
                    format!("{}.security_group_ids[{}]", path, j),
                    "invalid UUID",
                    format!("value {:?} is invalid", sg_id),
                ));
            }
        }
    }

    // Open Question: password-vs-keypair is deliberately
    // unenforced. We only add a warning when both are absent, since that's
    // the combination a user is least likely to have intended.
    if plan.keypair.is_null() && plan.password.is_null() {
        diags.push(Diagnostic::warning(
            "no keypair or password set",
            "the server will have no documented way to log in; this is not rejected \
             because the remote schema does not enforce a one-of constraint",
        ));
    }

    diags
}

/// Assembles the create request in declared order.
pub fn build_server_create_request(plan: &Server) -> Result<ServerCreateRequest, Diagnostics> {
    let diags = validate_server_plan(plan);
    if diags.has_errors() {
        return Err(diags);
    }

    let nics = plan
        .attachments()
        .iter()
        .map(|a| NicSpec {
            network_id: a.network_id_str().unwrap_or_default().to_string(),
            ip_address: a.ip_address.known().cloned().unwrap_or_default(),
            is_primary: a.is_primary(),
            security_group_ids: match &a.security_group_ids {
                Value::Known(ids) => ids.clone(),
                _ => Vec::new(),
            },
        })
        .collect();

    Ok(ServerCreateRequest {
        name: plan.name.known().cloned().unwrap_or_default(),
        description: plan.description.known().cloned(),
        flavor_id: plan.flavor_id.known().cloned().unwrap_or_default(),
        image_id: plan.image_id.known().cloned().unwrap_or_default(),
        keypair: plan.keypair.known().cloned(),
        user_data_base64: plan
            .user_data
            .known()
            .map(|s| encode(s.as_inner().as_bytes())),
        password_base64: plan
            .password
            .known()
            .map(|s| encode(s.as_inner().as_bytes())),
        nics,
    })
}
