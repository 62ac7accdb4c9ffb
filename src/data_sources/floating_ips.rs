use crate::error::SdkError;
use crate::sdk::models::FloatingIpResource;
use crate::sdk::VpsClient;

#[derive(Debug, Clone, Default)]
pub struct FloatingIpFilter {
    pub status: Option<String>,
    /// `Some(true)` matches only floating IPs with a `device_id`;
    /// `Some(false)` matches only unattached ones.
    pub attached: Option<bool>,
}

impl FloatingIpFilter {
    fn matches(&self, fip: &FloatingIpResource) -> bool {
        let status_ok = self
            .status
            .as_deref()
            .map_or(true, |s| fip.status.as_str().eq_ignore_ascii_case(s));
        let attached_ok = self.attached.map_or(true, |want| fip.device_id.is_some() == want);
        status_ok && attached_ok
    }
}

pub async fn list_floating_ips(
    client: &dyn VpsClient,
    filter: &FloatingIpFilter,
) -> Result<Vec<FloatingIpResource>, SdkError> {
    let mut fips: Vec<FloatingIpResource> = client
        .list_floating_ips()
        .await?
        .into_iter()
        .filter(|f| filter.matches(f))
        .collect();
    super::sort_by_id(&mut fips, |f| f.id.as_str());
    Ok(fips)
}
