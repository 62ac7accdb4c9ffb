//! Generic, time-bounded, cancelable status pollers.
//!
//! Structurally this is `zeronsd::authority::ZTAuthority::find_members`'s
//! `loop { ... ; tokio::time::sleep(interval).await }` shape, generalized
//! into a small helper parameterized over a `Get` callback and a
//! target/failed predicate -- the async counterpart of `rust-openstack`'s
//! synchronous `Waiter` trait (`ServerStatusWaiter::poll`/`timeout_error`).

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::SdkError;

use super::models::{FloatingIpResource, FloatingIpStatus, ServerResource, ServerStatus};
use super::VpsClient;

/// Floating-IP association waits up to 30s, disassociation up to 15s.
pub const FLOATING_IP_ASSOCIATE_TIMEOUT: Duration = Duration::from_secs(30);
pub const FLOATING_IP_DISASSOCIATE_TIMEOUT: Duration = Duration::from_secs(15);

const SERVER_POLL_INTERVAL: Duration = Duration::from_secs(3);
const FLOATING_IP_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Carries a deadline and a cooperative cancellation flag across one
/// waiter's lifetime. The deadline is `timeouts.{create|update|delete}`
///; cancellation models the orchestrator's context cancellation.
#[derive(Clone)]
pub struct WaitContext {
    deadline: Instant,
    cancelled: Arc<AtomicBool>,
}

impl WaitContext {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now() + timeout,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Caps this context's deadline at `timeout` if that's sooner, so an
    /// inner waiter (e.g. the 30s floating-IP wait) never outlives the
    /// outer operation timeout.
    pub fn capped_at(&self, timeout: Duration) -> Self {
        let capped = Instant::now() + timeout;
        Self {
            deadline: self.deadline.min(capped),
            cancelled: self.cancelled.clone(),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}

pub enum PollOutcome {
    Target,
    Pending,
    Failed(String),
}

/// The shared loop: `get()`, classify with `is_target`, sleep, repeat.
/// Terminates on target, on a failed classification, on context
/// cancellation/expiry, or immediately on a `get()` error (no internal
/// retry -- the SDK handles transient retry itself).
pub async fn poll_until<T, G, Fut, P>(
    ctx: &WaitContext,
    interval: Duration,
    label: &str,
    mut get: G,
    mut is_target: P,
) -> Result<T, SdkError>
where
    G: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SdkError>>,
    P: FnMut(&T) -> PollOutcome,
{
    loop {
        if ctx.is_cancelled() {
            return Err(SdkError::Cancelled);
        }
        if ctx.is_expired() {
            return Err(SdkError::WaiterTimedOut(label.to_string()));
        }

        let entity = get().await?;
        match is_target(&entity) {
            PollOutcome::Target => return Ok(entity),
            PollOutcome::Failed(reason) => {
                return Err(SdkError::TerminalNegative {
                    resource: "server",
                    id: reason,
                })
            }
            PollOutcome::Pending => {}
        }

        let sleep_for = interval.min(ctx.remaining());
        tokio::time::sleep(sleep_for).await;
    }
}

pub async fn wait_for_server_status(
    client: &dyn VpsClient,
    server_id: &str,
    target: ServerStatus,
    ctx: &WaitContext,
) -> Result<ServerResource, SdkError> {
    let label = format!("server {} to reach status {:?}", server_id, target);
    poll_until(
        ctx,
        SERVER_POLL_INTERVAL,
        &label,
        || client.get_server(server_id),
        |server| {
            if server.status == target {
                PollOutcome::Target
            } else if server.status == ServerStatus::Error {
                PollOutcome::Failed(server.id.clone())
            } else {
                PollOutcome::Pending
            }
        },
    )
    .await
}

pub async fn wait_for_floating_ip_status(
    client: &dyn VpsClient,
    floating_ip_id: &str,
    target: FloatingIpStatus,
    target_device_id: Option<&str>,
    ctx: &WaitContext,
) -> Result<FloatingIpResource, SdkError> {
    let label = format!(
        "floating IP {} to reach status {:?}{}",
        floating_ip_id,
        target,
        target_device_id
            .map(|d| format!(" on device {}", d))
            .unwrap_or_default()
    );
    poll_until(
        ctx,
        FLOATING_IP_POLL_INTERVAL,
        &label,
        || client.get_floating_ip(floating_ip_id),
        |fip| {
            let status_matches = fip.status == target;
            let device_matches = match target_device_id {
                Some(expected) => fip.device_id.as_deref() == Some(expected),
                None => true,
            };
            if status_matches && device_matches {
                PollOutcome::Target
            } else if fip.status == FloatingIpStatus::Rejected {
                PollOutcome::Failed(fip.id.clone())
            } else {
                PollOutcome::Pending
            }
        },
    )
    .await
}

/// The dual of the other waiters: success is a `NotFound` error from `Get`,
/// not a positive match. Anything else -- a server that still
/// exists, or a transient SDK error -- keeps polling until the deadline.
pub async fn wait_for_server_deleted(
    client: &dyn VpsClient,
    server_id: &str,
    ctx: &WaitContext,
) -> Result<(), SdkError> {
    loop {
        if ctx.is_cancelled() {
            return Err(SdkError::Cancelled);
        }
        if ctx.is_expired() {
            return Err(SdkError::WaiterTimedOut(format!(
                "server {} to be deleted",
                server_id
            )));
        }

        match client.get_server(server_id).await {
            Err(e) if e.is_not_found() => return Ok(()),
            _ => {
                let sleep_for = SERVER_POLL_INTERVAL.min(ctx.remaining());
                tokio::time::sleep(sleep_for).await;
            }
        }
    }
}

/// Disassociation succeeds when the remote reports no `device_id`, or when
/// the floating IP has disappeared entirely (both count as "not attached",
/// extending the same idempotent-disassociation rule to the wait phase).
pub async fn wait_for_floating_ip_disassociated(
    client: &dyn VpsClient,
    floating_ip_id: &str,
    ctx: &WaitContext,
) -> Result<(), SdkError> {
    loop {
        if ctx.is_cancelled() {
            return Err(SdkError::Cancelled);
        }
        if ctx.is_expired() {
            return Err(SdkError::WaiterTimedOut(format!(
                "floating IP {} to be disassociated",
                floating_ip_id
            )));
        }

        match client.get_floating_ip(floating_ip_id).await {
            Ok(fip) if fip.device_id.is_none() => return Ok(()),
            Ok(_) => {
                let sleep_for = FLOATING_IP_POLL_INTERVAL.min(ctx.remaining());
                tokio::time::sleep(sleep_for).await;
            }
            Err(e) if e.is_not_found() => return Ok(()),
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn returns_target_as_soon_as_reached() {
        let ctx = WaitContext::with_timeout(Duration::from_secs(5));
        let calls = Mutex::new(0);
        let result = poll_until(
            &ctx,
            Duration::from_millis(1),
            "test",
            || {
                let mut c = calls.lock().unwrap();
                *c += 1;
                let n = *c;
                async move { Ok::<_, SdkError>(n) }
            },
            |n| {
                if *n >= 3 {
                    PollOutcome::Target
                } else {
                    PollOutcome::Pending
                }
            },
        )
        .await
        .unwrap();

        assert_eq!(result, 3);
    }

    #[tokio::test]
    async fn propagates_failed_classification_as_terminal_negative() {
        let ctx = WaitContext::with_timeout(Duration::from_secs(5));
        let result = poll_until(
            &ctx,
            Duration::from_millis(1),
            "test",
            || async { Ok::<_, SdkError>(()) },
            |_| PollOutcome::Failed("boom".to_string()),
        )
        .await;

        assert!(matches!(result, Err(SdkError::TerminalNegative { .. })));
    }

    #[tokio::test]
    async fn expired_deadline_times_out() {
        let ctx = WaitContext::with_timeout(Duration::from_millis(0));
        tokio::time::sleep(Duration::from_millis(5)).await;
        let result: Result<(), SdkError> = poll_until(
            &ctx,
            Duration::from_millis(1),
            "test",
            || async { Ok(()) },
            |_| PollOutcome::Pending,
        )
        .await;

        assert!(matches!(result, Err(SdkError::WaiterTimedOut(_))));
    }

    #[tokio::test]
    async fn cancellation_is_observed_before_first_poll() {
        let ctx = WaitContext::with_timeout(Duration::from_secs(5));
        ctx.cancel();
        let result: Result<(), SdkError> = poll_until(
            &ctx,
            Duration::from_millis(1),
            "test",
            || async { Ok(()) },
            |_| PollOutcome::Pending,
        )
        .await;

        assert!(matches!(result, Err(SdkError::Cancelled)));
    }
}
