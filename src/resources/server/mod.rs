//! The server resource reconciler: Create/Read/Update/Delete/Import for
//! `zillaforge_server`.

pub mod floating_ip;
pub mod mapper;
pub mod model;
pub mod plan_diff;
pub mod request;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{Diagnostic, Diagnostics};
use crate::sdk::models::NicSpec;
use crate::sdk::waiter::{wait_for_server_deleted, wait_for_server_status, WaitContext};
use crate::sdk::models::ServerStatus;
use crate::sdk::models::ServerUpdateRequest;
use crate::sdk::{ProjectClient, VpsClient};
use crate::value::Value;

use model::Server;
use plan_diff::AttachmentChange;

pub struct ServerReconciler<'a> {
    client: &'a dyn ProjectClient,
}

impl<'a> ServerReconciler<'a> {
    pub fn new(client: &'a dyn ProjectClient) -> Self {
        Self { client }
    }

    fn vps(&self) -> &dyn VpsClient {
        self.client.vps()
    }

    async fn nic_id_map(&self, server_id: &str) -> Result<HashMap<String, String>, Diagnostics> {
        self.vps()
            .list_server_nics(server_id)
            .await
            .map(|nics| nics.into_iter().map(|n| (n.network_id, n.nic_id)).collect())
            .map_err(|e| Diagnostics::from_sdk_error(&e))
    }

    async fn read_state(&self, server_id: &str) -> Result<Server, Diagnostics> {
        let server = self
            .vps()
            .get_server(server_id)
            .await
            .map_err(|e| Diagnostics::from_sdk_error(&e))?;
        let nics = self
            .vps()
            .list_server_nics(server_id)
            .await
            .map_err(|e| Diagnostics::from_sdk_error(&e))?;
        Ok(mapper::map_server_to_state(&server, &nics))
    }

    /// Validate, create, optionally wait, associate floating
    /// IPs in NIC order, then Read back the final state. A failure after
    /// the server exists still attempts a Read so the caller can record a
    /// partial resource rather than leak one outside state.
    pub async fn create(&self, plan: &Server) -> (Option<Server>, Diagnostics) {
        let req = match request::build_server_create_request(plan) {
            Ok(req) => req,
            Err(diags) => return (None, diags),
        };

        let created = match self.vps().create_server(req).await {
            Ok(s) => s,
            Err(e) => return (None, Diagnostics::from_sdk_error(&e)),
        };
        let server_id = created.id.clone();
        let mut diags = Diagnostics::new();

        let ctx = WaitContext::with_timeout(plan.timeouts.create_duration());
        if plan.wait_for_active() {
            if let Err(e) = wait_for_server_status(self.vps(), &server_id, ServerStatus::Active, &ctx).await {
                diags.extend(Diagnostics::from_sdk_error(&e));
                let (state, read_diags) = self.finish_with_read(&server_id).await;
                diags.extend(read_diags);
                return (state, diags);
            }
        }

        match self.nic_id_map(&server_id).await {
            Ok(nic_ids) => {
                for attachment in plan.attachments() {
                    let (Some(network_id), Some(floating_ip_id)) =
                        (attachment.network_id_str(), attachment.floating_ip_id_str())
                    else {
                        continue;
                    };
                    let Some(nic_id) = nic_ids.get(network_id) else {
                        diags.push(Diagnostic::error_on(
                            "network_attachment",
                            "nic not found",
                            format!("no NIC found for network_id {:?} after creation", network_id),
                        ));
                        continue;
                    };
                    if let Err(e) = floating_ip::reconcile_nic_floating_ip(
                        self.vps(),
                        &server_id,
                        nic_id,
                        None,
                        Some(floating_ip_id),
                        &ctx,
                    )
                    .await
                    {
                        diags.extend(Diagnostics::from_sdk_error(&e));
                    }
                }
            }
            Err(d) => diags.extend(d),
        }

        let (state, read_diags) = self.finish_with_read(&server_id).await;
        diags.extend(read_diags);
        (state, diags)
    }

    async fn finish_with_read(&self, server_id: &str) -> (Option<Server>, Diagnostics) {
        match self.read_state(server_id).await {
            Ok(state) => (Some(state), Diagnostics::new()),
            Err(d) => (None, d),
        }
    }

    /// Reads the server and its NICs and maps them into state.
    pub async fn read(&self, server_id: &str) -> (Option<Server>, Diagnostics) {
        match self.read_state(server_id).await {
            Ok(state) => (Some(state), Diagnostics::new()),
            Err(d) => (None, d),
        }
    }

    /// Classify the diff, reject unsupported changes before any
    /// SDK call, then apply the scalar patch and per-attachment deltas.
    pub async fn update(&self, prior: &Server, desired: &Server) -> (Option<Server>, Diagnostics) {
        let server_id = match prior.id.known() {
            Some(id) => id.clone(),
            None => {
                let mut diags = Diagnostics::new();
                diags.push(Diagnostic::error("missing id", "prior state has no server id"));
                return (None, diags);
            }
        };

        let plan = match plan_diff::diff_server_update(prior, desired) {
            Ok(plan) => plan,
            Err(diags) => return (None, diags),
        };
        if plan.is_empty() {
            return self.finish_with_read(&server_id).await;
        }

        let mut diags = Diagnostics::new();
        let ctx = WaitContext::with_timeout(desired.timeouts.update_duration());

        if plan.name.is_some() || plan.description.is_some() {
            let patch = ServerUpdateRequest {
                name: plan.name.clone(),
                description: plan.description.clone().flatten(),
            };
            if let Err(e) = self.vps().update_server(&server_id, patch).await {
                diags.extend(Diagnostics::from_sdk_error(&e));
            }
        }

        let nic_ids = match self.nic_id_map(&server_id).await {
            Ok(map) => map,
            Err(d) => {
                diags.extend(d);
                HashMap::new()
            }
        };

        for change in &plan.attachment_changes {
            match change {
                AttachmentChange::Add(attachment) => {
                    let spec = NicSpec {
                        network_id: attachment.network_id_str().unwrap_or_default().to_string(),
                        ip_address: attachment.ip_address.known().cloned().unwrap_or_default(),
                        is_primary: attachment.is_primary(),
                        security_group_ids: match &attachment.security_group_ids {
                            Value::Known(ids) => ids.clone(),
                            _ => Vec::new(),
                        },
                    };
                    if let Err(e) = self.vps().create_nic(&server_id, spec).await {
                        diags.extend(Diagnostics::from_sdk_error(&e));
                    }
                }
                AttachmentChange::Remove(attachment) => {
                    let network_id = attachment.network_id_str().unwrap_or_default();
                    if let Some(nic_id) = nic_ids.get(network_id) {
                        if let Some(floating_ip_id) = attachment.floating_ip_id_str() {
                            if let Err(e) = floating_ip::reconcile_nic_floating_ip(
                                self.vps(),
                                &server_id,
                                nic_id,
                                Some(floating_ip_id),
                                None,
                                &ctx,
                            )
                            .await
                            {
                                diags.extend(Diagnostics::from_sdk_error(&e));
                            }
                        }
                        if let Err(e) = self.vps().delete_nic(&server_id, network_id).await {
                            diags.extend(Diagnostics::from_sdk_error(&e));
                        }
                    }
                }
                AttachmentChange::SecurityGroupsChanged {
                    network_id,
                    desired_sg_ids,
                } => {
                    if let Some(nic_id) = nic_ids.get(network_id) {
                        if let Err(e) = self
                            .vps()
                            .update_nic_security_groups(&server_id, nic_id, desired_sg_ids.clone())
                            .await
                        {
                            diags.extend(Diagnostics::from_sdk_error(&e));
                        }
                    }
                }
                AttachmentChange::FloatingIpChanged {
                    network_id,
                    prior,
                    desired,
                } => {
                    if let Some(nic_id) = nic_ids.get(network_id) {
                        if let Err(e) = floating_ip::reconcile_nic_floating_ip(
                            self.vps(),
                            &server_id,
                            nic_id,
                            prior.as_deref(),
                            desired.as_deref(),
                            &ctx,
                        )
                        .await
                        {
                            diags.extend(Diagnostics::from_sdk_error(&e));
                        }
                    }
                }
            }
        }

        let (state, read_diags) = self.finish_with_read(&server_id).await;
        diags.extend(read_diags);
        (state, diags)
    }

    /// Disassociate every attached floating IP before deleting
    /// the server, then optionally wait for deletion.
    pub async fn delete(&self, prior: &Server) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let server_id = match prior.id.known() {
            Some(id) => id.clone(),
            None => {
                diags.push(Diagnostic::error("missing id", "prior state has no server id"));
                return diags;
            }
        };

        let ctx = WaitContext::with_timeout(prior.timeouts.delete_duration());

        if let Ok(nic_ids) = self.nic_id_map(&server_id).await {
            for attachment in prior.attachments() {
                let (Some(network_id), Some(floating_ip_id)) =
                    (attachment.network_id_str(), attachment.floating_ip_id_str())
                else {
                    continue;
                };
                if let Some(nic_id) = nic_ids.get(network_id) {
                    if let Err(e) = floating_ip::reconcile_nic_floating_ip(
                        self.vps(),
                        &server_id,
                        nic_id,
                        Some(floating_ip_id),
                        None,
                        &ctx,
                    )
                    .await
                    {
                        diags.extend(Diagnostics::from_sdk_error(&e));
                    }
                }
            }
        }

        if let Err(e) = self.vps().delete_server(&server_id).await {
            if !e.is_not_found() {
                diags.extend(Diagnostics::from_sdk_error(&e));
                return diags;
            }
        }

        if prior.wait_for_deleted() {
            if let Err(e) = wait_for_server_deleted(self.vps(), &server_id, &ctx).await {
                diags.extend(Diagnostics::from_sdk_error(&e));
            }
        }

        diags
    }

    /// Import is a Read by id, with no plan to diff against.
    pub async fn import(&self, server_id: &str) -> (Option<Server>, Diagnostics) {
        self.read(server_id).await
    }
}

#[async_trait]
impl<'a> super::Reconciler for ServerReconciler<'a> {
    type State = Server;

    async fn create(&self, plan: &Server) -> (Option<Server>, Diagnostics) {
        ServerReconciler::create(self, plan).await
    }

    async fn read(&self, id: &str) -> (Option<Server>, Diagnostics) {
        ServerReconciler::read(self, id).await
    }

    async fn update(&self, prior: &Server, desired: &Server) -> (Option<Server>, Diagnostics) {
        ServerReconciler::update(self, prior, desired).await
    }

    async fn delete(&self, prior: &Server) -> Diagnostics {
        ServerReconciler::delete(self, prior).await
    }
}
