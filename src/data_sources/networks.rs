use crate::error::SdkError;
use crate::sdk::models::NetworkResource;
use crate::sdk::VpsClient;

#[derive(Debug, Clone, Default)]
pub struct NetworkFilter {
    pub name: Option<String>,
    pub cidr: Option<String>,
}

impl NetworkFilter {
    fn matches(&self, network: &NetworkResource) -> bool {
        self.name.as_deref().map_or(true, |n| network.name == n)
            && self.cidr.as_deref().map_or(true, |c| network.cidr == c)
    }
}

pub async fn list_networks(client: &dyn VpsClient, filter: &NetworkFilter) -> Result<Vec<NetworkResource>, SdkError> {
    let mut networks: Vec<NetworkResource> = client
        .list_networks()
        .await?
        .into_iter()
        .filter(|n| filter.matches(n))
        .collect();
    super::sort_by_id(&mut networks, |n| n.id.as_str());
    Ok(networks)
}
