//! Standalone floating-IP resource reconciler.
//! Association with a server NIC is out of this reconciler's scope -- that
//! lifecycle lives in `resources::server::floating_ip`.

pub mod model;

use crate::error::{Diagnostic, Diagnostics};
use crate::sdk::models::{FloatingIpCreateRequest, FloatingIpUpdateRequest};
use crate::sdk::{ProjectClient, VpsClient};
use crate::value::Value;

use model::FloatingIp;

pub struct FloatingIpReconciler<'a> {
    client: &'a dyn ProjectClient,
}

impl<'a> FloatingIpReconciler<'a> {
    pub fn new(client: &'a dyn ProjectClient) -> Self {
        Self { client }
    }

    fn vps(&self) -> &dyn VpsClient {
        self.client.vps()
    }

    fn map_to_state(resource: &crate::sdk::models::FloatingIpResource) -> FloatingIp {
        FloatingIp {
            id: Value::Known(resource.id.clone()),
            ip_address: Value::Known(resource.ip_address.clone()),
            name: resource.name.clone().into(),
            description: resource.description.clone().into(),
            status: Value::Known(resource.status.as_str().to_string()),
            device_id: resource.device_id.clone().into(),
        }
    }

    pub async fn create(&self, plan: &FloatingIp) -> (Option<FloatingIp>, Diagnostics) {
        let req = FloatingIpCreateRequest {
            name: plan.name.known().cloned(),
            description: plan.description.known().cloned(),
        };
        match self.vps().create_floating_ip(req).await {
            Ok(resource) => (Some(Self::map_to_state(&resource)), Diagnostics::new()),
            Err(e) => (None, Diagnostics::from_sdk_error(&e)),
        }
    }

    pub async fn read(&self, id: &str) -> (Option<FloatingIp>, Diagnostics) {
        match self.vps().get_floating_ip(id).await {
            Ok(resource) => (Some(Self::map_to_state(&resource)), Diagnostics::new()),
            Err(e) => (None, Diagnostics::from_sdk_error(&e)),
        }
    }

    pub async fn update(&self, prior: &FloatingIp, desired: &FloatingIp) -> (Option<FloatingIp>, Diagnostics) {
        let id = match prior.id.known() {
            Some(id) => id.clone(),
            None => {
                let mut diags = Diagnostics::new();
                diags.push(Diagnostic::error("missing id", "prior state has no floating IP id"));
                return (None, diags);
            }
        };

        let patch = FloatingIpUpdateRequest {
            name: desired.name.known().cloned(),
            description: desired.description.known().cloned(),
        };
        match self.vps().update_floating_ip(&id, patch).await {
            Ok(resource) => (Some(Self::map_to_state(&resource)), Diagnostics::new()),
            Err(e) => (None, Diagnostics::from_sdk_error(&e)),
        }
    }

    pub async fn delete(&self, prior: &FloatingIp) -> Diagnostics {
        let mut diags = Diagnostics::new();
        let id = match prior.id.known() {
            Some(id) => id.clone(),
            None => {
                diags.push(Diagnostic::error("missing id", "prior state has no floating IP id"));
                return diags;
            }
        };
        if let Err(e) = self.vps().delete_floating_ip(&id).await {
            diags.extend(Diagnostics::from_sdk_error(&e));
        }
        diags
    }

    pub async fn import(&self, id: &str) -> (Option<FloatingIp>, Diagnostics) {
        self.read(id).await
    }
}
