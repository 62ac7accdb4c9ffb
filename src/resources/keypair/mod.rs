//! Keypair resource reconciler.

pub mod fingerprint;
pub mod model;

use crate::error::{Diagnostic, Diagnostics, Sensitive};
use crate::sdk::models::KeypairCreateRequest;
use crate::sdk::{ProjectClient, VpsClient};
use crate::value::Value;

use model::Keypair;

pub struct KeypairReconciler<'a> {
    client: &'a dyn ProjectClient,
}

impl<'a> KeypairReconciler<'a> {
    pub fn new(client: &'a dyn ProjectClient) -> Self {
        Self { client }
    }

    fn vps(&self) -> &dyn VpsClient {
        self.client.vps()
    }

    fn map_to_state(
        resource: &crate::sdk::models::KeypairResource,
        prior_private_key: Value<Sensitive<String>>,
    ) -> Keypair {
        let fingerprint = if resource.fingerprint.is_empty() {
            fingerprint::compute_fingerprint(&resource.public_key)
        } else {
            Some(resource.fingerprint.clone())
        };

        let private_key = match &resource.private_key {
            Some(pk) => Value::Known(Sensitive(pk.clone())),
            None => prior_private_key,
        };

        Keypair {
            id: Value::Known(resource.id.clone()),
            name: Value::Known(resource.name.clone()),
            description: resource.description.clone().into(),
            public_key: Value::Known(resource.public_key.clone()),
            private_key,
            fingerprint: fingerprint.into(),
        }
    }

    /// If `public_key` is provided, send it; otherwise the
    /// remote generates a new one and returns `private_key` exactly once.
    pub async fn create(&self, plan: &Keypair) -> (Option<Keypair>, Diagnostics) {
        let req = KeypairCreateRequest {
            name: plan.name.known().cloned().unwrap_or_default(),
            description: plan.description.known().cloned(),
            public_key: plan.public_key.known().cloned(),
        };

        match self.vps().create_keypair(req).await {
            Ok(resource) => (Some(Self::map_to_state(&resource, Value::Null)), Diagnostics::new()),
            Err(e) => (None, Diagnostics::from_sdk_error(&e)),
        }
    }

    /// `private_key` is preserved from prior state, never
    /// overwritten with null -- the remote does not echo it back.
    pub async fn read(&self, id: &str, prior_private_key: Value<Sensitive<String>>) -> (Option<Keypair>, Diagnostics) {
        match self.vps().get_keypair(id).await {
            Ok(resource) => (Some(Self::map_to_state(&resource, prior_private_key)), Diagnostics::new()),
            Err(e) => (None, Diagnostics::from_sdk_error(&e)),
        }
    }

    /// Only `description` is patchable; any other change
    /// (notably `name`, `public_key`) must force replacement rather than
    /// silently patching or silently doing nothing.
    pub async fn update(&self, prior: &Keypair, desired: &Keypair) -> (Option<Keypair>, Diagnostics) {
        let id = match prior.id.known() {
            Some(id) => id.clone(),
            None => {
                let mut diags = Diagnostics::new();
                diags.push(Diagnostic::error("missing id", "prior state has no keypair id"));
                return (None, diags);
            }
        };

        if prior.name.known_ne(&desired.name) || prior.public_key.known_ne(&desired.public_key) {
            let mut diags = Diagnostics::new();
            diags.push(Diagnostic::error_on(
                "name",
                "unsupported change",
                "name and public_key cannot be changed in place; this requires destroying and recreating the keypair",
            ));
            return (None, diags);
        }

        let description = desired.description.known().cloned();
        match self.vps().update_keypair(&id, description).await {
            Ok(resource) => (
                Some(Self::map_to_state(&resource, prior.private_key.clone())),
                Diagnostics::new(),
            ),
            Err(e) => (None, Diagnostics::from_sdk_error(&e)),
        }
    }

    /// Surfaces a warning that dependent instances may lose SSH
    /// access, but never blocks the delete.
    pub async fn delete(&self, prior: &Keypair) -> Diagnostics {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::warning(
            "keypair deletion may affect running servers",
            "any server instance still referencing this keypair may lose documented SSH access",
        ));

        let id = match prior.id.known() {
            Some(id) => id.clone(),
            None => {
                diags.push(Diagnostic::error("missing id", "prior state has no keypair id"));
                return diags;
            }
        };
        if let Err(e) = self.vps().delete_keypair(&id).await {
            diags.extend(Diagnostics::from_sdk_error(&e));
        }
        diags
    }

    /// Import by ID; `private_key` becomes null since it was
    /// never captured at creation time in this session.
    pub async fn import(&self, id: &str) -> (Option<Keypair>, Diagnostics) {
        self.read(id, Value::Null).await
    }
}
