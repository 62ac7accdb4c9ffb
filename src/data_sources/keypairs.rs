use crate::error::SdkError;
use crate::sdk::models::KeypairResource;
use crate::sdk::VpsClient;

#[derive(Debug, Clone, Default)]
pub struct KeypairFilter {
    pub name: Option<String>,
}

impl KeypairFilter {
    fn matches(&self, keypair: &KeypairResource) -> bool {
        self.name.as_deref().map_or(true, |n| keypair.name == n)
    }
}

pub async fn list_keypairs(client: &dyn VpsClient, filter: &KeypairFilter) -> Result<Vec<KeypairResource>, SdkError> {
    let mut keypairs: Vec<KeypairResource> = client
        .list_keypairs()
        .await?
        .into_iter()
        .filter(|k| filter.matches(k))
        .collect();
    super::sort_by_id(&mut keypairs, |k| k.id.as_str());
    Ok(keypairs)
}
