//! Resource reconcilers: one module per Terraform resource type, each
//! implementing the same CRUD-plus-Import capability set under the
//! ResourceContext framing.

pub mod floating_ip;
pub mod keypair;
pub mod security_group;
pub mod server;

use async_trait::async_trait;

use crate::error::Diagnostics;

/// The operation surface every resource reconciler exposes. `State` is the
/// resource's own model type (e.g. `server::model::Server`); `create` and
/// `update` take the desired plan and return the new computed state plus
/// any diagnostics, mirroring the "(state-fragment, Diagnostics)" return
/// convention used throughout this crate.
#[async_trait]
pub trait Reconciler {
    type State: Send;

    async fn create(&self, plan: &Self::State) -> (Option<Self::State>, Diagnostics);
    async fn read(&self, id: &str) -> (Option<Self::State>, Diagnostics);
    async fn update(&self, prior: &Self::State, desired: &Self::State) -> (Option<Self::State>, Diagnostics);
    async fn delete(&self, prior: &Self::State) -> Diagnostics;
}
