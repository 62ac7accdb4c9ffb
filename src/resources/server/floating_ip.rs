//! Floating-IP association sub-state machine for a single NIC.
//!
//! Every case below is driven purely by `(prior, desired)` floating-IP id
//! pairs; the caller is responsible for resolving `network_id` to the
//! remote's `nic_id` before calling in, and for calling once per NIC whose
//! floating-IP attachment changed.

use crate::error::SdkError;
use crate::sdk::waiter::{
    wait_for_floating_ip_disassociated, wait_for_floating_ip_status, WaitContext,
    FLOATING_IP_ASSOCIATE_TIMEOUT, FLOATING_IP_DISASSOCIATE_TIMEOUT,
};
use crate::sdk::models::FloatingIpStatus;
use crate::sdk::VpsClient;

/// Applies one NIC's `(prior_floating_ip_id, desired_floating_ip_id)` delta.
/// Covers all four cases:
///
/// - `(None, None)`: no-op.
/// - `(None, Some(x))`: associate `x`, then wait for it to become active on
///   this device.
/// - `(Some(x), None)`: disassociate `x` (idempotent: a 404 is success),
///   then wait for the disassociation to be observable.
/// - `(Some(x), Some(y))` with `x != y`: sequential swap -- disassociate `x`
///   and wait, then associate `y` and wait. Never attempted concurrently,
///   since the remote only allows one floating IP per NIC at a time.
pub async fn reconcile_nic_floating_ip(
    client: &dyn VpsClient,
    server_id: &str,
    nic_id: &str,
    prior_floating_ip_id: Option<&str>,
    desired_floating_ip_id: Option<&str>,
    ctx: &WaitContext,
) -> Result<(), SdkError> {
    match (prior_floating_ip_id, desired_floating_ip_id) {
        (None, None) => Ok(()),
        (None, Some(desired)) => associate(client, server_id, nic_id, desired, ctx).await,
        (Some(prior), None) => disassociate(client, server_id, nic_id, prior, ctx).await,
        (Some(prior), Some(desired)) if prior == desired => Ok(()),
        (Some(prior), Some(desired)) => {
            disassociate(client, server_id, nic_id, prior, ctx).await?;
            associate(client, server_id, nic_id, desired, ctx).await
        }
    }
}

async fn associate(
    client: &dyn VpsClient,
    server_id: &str,
    nic_id: &str,
    floating_ip_id: &str,
    ctx: &WaitContext,
) -> Result<(), SdkError> {
    client
        .associate_floating_ip(server_id, nic_id, floating_ip_id)
        .await?;
    let inner = ctx.capped_at(FLOATING_IP_ASSOCIATE_TIMEOUT);
    wait_for_floating_ip_status(
        client,
        floating_ip_id,
        FloatingIpStatus::Active,
        Some(server_id),
        &inner,
    )
    .await?;
    Ok(())
}

async fn disassociate(
    client: &dyn VpsClient,
    server_id: &str,
    nic_id: &str,
    floating_ip_id: &str,
    ctx: &WaitContext,
) -> Result<(), SdkError> {
    match client
        .disassociate_floating_ip(server_id, nic_id, floating_ip_id)
        .await
    {
        Ok(()) => {}
        Err(e) if e.is_not_found() => return Ok(()),
        Err(e) => return Err(e),
    }
    let inner = ctx.capped_at(FLOATING_IP_DISASSOCIATE_TIMEOUT);
    wait_for_floating_ip_disassociated(client, floating_ip_id, &inner).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::models::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct FakeVps {
        fips: Mutex<std::collections::HashMap<String, FloatingIpResource>>,
        associate_calls: Mutex<Vec<(String, String)>>,
        disassociate_calls: Mutex<Vec<String>>,
    }

    fn fip(id: &str, status: FloatingIpStatus, device_id: Option<&str>) -> FloatingIpResource {
        FloatingIpResource {
            id: id.to_string(),
            ip_address: "203.0.113.5".to_string(),
            name: None,
            description: None,
            status,
            device_id: device_id.map(String::from),
        }
    }

    #[async_trait]
    impl VpsClient for FakeVps {
        async fn create_server(&self, _: ServerCreateRequest) -> Result<ServerResource, SdkError> {
            unimplemented!()
        }
        async fn get_server(&self, _: &str) -> Result<ServerResource, SdkError> {
            unimplemented!()
        }
        async fn list_servers(&self) -> Result<Vec<ServerResource>, SdkError> {
            unimplemented!()
        }
        async fn update_server(&self, _: &str, _: ServerUpdateRequest) -> Result<ServerResource, SdkError> {
            unimplemented!()
        }
        async fn delete_server(&self, _: &str) -> Result<(), SdkError> {
            unimplemented!()
        }
        async fn list_server_nics(&self, _: &str) -> Result<Vec<NicResource>, SdkError> {
            unimplemented!()
        }
        async fn create_nic(&self, _: &str, _: NicSpec) -> Result<NicResource, SdkError> {
            unimplemented!()
        }
        async fn delete_nic(&self, _: &str, _: &str) -> Result<(), SdkError> {
            unimplemented!()
        }
        async fn update_nic_security_groups(&self, _: &str, _: &str, _: Vec<String>) -> Result<(), SdkError> {
            unimplemented!()
        }
        async fn associate_floating_ip(
            &self,
            _server_id: &str,
            nic_id: &str,
            floating_ip_id: &str,
        ) -> Result<(), SdkError> {
            self.associate_calls
                .lock()
                .unwrap()
                .push((nic_id.to_string(), floating_ip_id.to_string()));
            let mut fips = self.fips.lock().unwrap();
            if let Some(entry) = fips.get_mut(floating_ip_id) {
                entry.status = FloatingIpStatus::Active;
                entry.device_id = Some("srv-1".to_string());
            }
            Ok(())
        }
        async fn disassociate_floating_ip(
            &self,
            _server_id: &str,
            _nic_id: &str,
            floating_ip_id: &str,
        ) -> Result<(), SdkError> {
            self.disassociate_calls.lock().unwrap().push(floating_ip_id.to_string());
            let mut fips = self.fips.lock().unwrap();
            match fips.get_mut(floating_ip_id) {
                Some(entry) => {
                    entry.device_id = None;
                    Ok(())
                }
                None => Err(SdkError::NotFound {
                    resource: "floating_ip",
                    id: floating_ip_id.to_string(),
                }),
            }
        }
        async fn get_floating_ip(&self, id: &str) -> Result<FloatingIpResource, SdkError> {
            self.fips
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| SdkError::NotFound {
                    resource: "floating_ip",
                    id: id.to_string(),
                })
        }
        async fn list_floating_ips(&self) -> Result<Vec<FloatingIpResource>, SdkError> {
            unimplemented!()
        }
        async fn create_floating_ip(&self, _: FloatingIpCreateRequest) -> Result<FloatingIpResource, SdkError> {
            unimplemented!()
        }
        async fn update_floating_ip(&self, _: &str, _: FloatingIpUpdateRequest) -> Result<FloatingIpResource, SdkError> {
            unimplemented!()
        }
        async fn delete_floating_ip(&self, _: &str) -> Result<(), SdkError> {
            unimplemented!()
        }
        async fn get_security_group(&self, _: &str) -> Result<SecurityGroupResource, SdkError> {
            unimplemented!()
        }
        async fn list_security_groups(&self, _: bool) -> Result<Vec<SecurityGroupResource>, SdkError> {
            unimplemented!()
        }
        async fn create_security_group(&self, _: SecurityGroupCreateRequest) -> Result<SecurityGroupResource, SdkError> {
            unimplemented!()
        }
        async fn update_security_group(&self, _: &str, _: SecurityGroupUpdateRequest) -> Result<SecurityGroupResource, SdkError> {
            unimplemented!()
        }
        async fn delete_security_group(&self, _: &str) -> Result<(), SdkError> {
            unimplemented!()
        }
        async fn get_keypair(&self, _: &str) -> Result<KeypairResource, SdkError> {
            unimplemented!()
        }
        async fn list_keypairs(&self) -> Result<Vec<KeypairResource>, SdkError> {
            unimplemented!()
        }
        async fn create_keypair(&self, _: KeypairCreateRequest) -> Result<KeypairResource, SdkError> {
            unimplemented!()
        }
        async fn update_keypair(&self, _: &str, _: Option<String>) -> Result<KeypairResource, SdkError> {
            unimplemented!()
        }
        async fn delete_keypair(&self, _: &str) -> Result<(), SdkError> {
            unimplemented!()
        }
        async fn list_networks(&self) -> Result<Vec<NetworkResource>, SdkError> {
            unimplemented!()
        }
        async fn list_flavors(&self) -> Result<Vec<FlavorResource>, SdkError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn null_to_null_is_a_noop() {
        let client = FakeVps::default();
        let ctx = WaitContext::with_timeout(Duration::from_secs(5));
        reconcile_nic_floating_ip(&client, "srv-1", "nic-1", None, None, &ctx)
            .await
            .unwrap();
        assert!(client.associate_calls.lock().unwrap().is_empty());
        assert!(client.disassociate_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn null_to_some_associates_and_waits() {
        let client = FakeVps::default();
        client
            .fips
            .lock()
            .unwrap()
            .insert("fip-1".to_string(), fip("fip-1", FloatingIpStatus::Down, None));
        let ctx = WaitContext::with_timeout(Duration::from_secs(5));
        reconcile_nic_floating_ip(&client, "srv-1", "nic-1", None, Some("fip-1"), &ctx)
            .await
            .unwrap();
        assert_eq!(
            client.associate_calls.lock().unwrap().as_slice(),
            &[("nic-1".to_string(), "fip-1".to_string())]
        );
    }

    #[tokio::test]
    async fn some_to_null_disassociates_and_waits() {
        let client = FakeVps::default();
        client.fips.lock().unwrap().insert(
            "fip-1".to_string(),
            fip("fip-1", FloatingIpStatus::Active, Some("srv-1")),
        );
        let ctx = WaitContext::with_timeout(Duration::from_secs(5));
        reconcile_nic_floating_ip(&client, "srv-1", "nic-1", Some("fip-1"), None, &ctx)
            .await
            .unwrap();
        assert_eq!(client.disassociate_calls.lock().unwrap().as_slice(), &["fip-1".to_string()]);
    }

    #[tokio::test]
    async fn disassociating_an_already_gone_floating_ip_succeeds() {
        let client = FakeVps::default();
        let ctx = WaitContext::with_timeout(Duration::from_secs(5));
        let result = reconcile_nic_floating_ip(&client, "srv-1", "nic-1", Some("fip-gone"), None, &ctx).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn swap_disassociates_old_then_associates_new() {
        let client = FakeVps::default();
        client.fips.lock().unwrap().insert(
            "fip-old".to_string(),
            fip("fip-old", FloatingIpStatus::Active, Some("srv-1")),
        );
        client
            .fips
            .lock()
            .unwrap()
            .insert("fip-new".to_string(), fip("fip-new", FloatingIpStatus::Down, None));
        let ctx = WaitContext::with_timeout(Duration::from_secs(5));
        reconcile_nic_floating_ip(&client, "srv-1", "nic-1", Some("fip-old"), Some("fip-new"), &ctx)
            .await
            .unwrap();
        assert_eq!(client.disassociate_calls.lock().unwrap().as_slice(), &["fip-old".to_string()]);
        assert_eq!(
            client.associate_calls.lock().unwrap().as_slice(),
            &[("nic-1".to_string(), "fip-new".to_string())]
        );
    }

    #[tokio::test]
    async fn same_floating_ip_on_both_sides_is_a_noop() {
        let client = FakeVps::default();
        let ctx = WaitContext::with_timeout(Duration::from_secs(5));
        reconcile_nic_floating_ip(&client, "srv-1", "nic-1", Some("fip-1"), Some("fip-1"), &ctx)
            .await
            .unwrap();
        assert!(client.associate_calls.lock().unwrap().is_empty());
        assert!(client.disassociate_calls.lock().unwrap().is_empty());
    }
}
