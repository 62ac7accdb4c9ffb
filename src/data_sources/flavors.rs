use crate::error::SdkError;
use crate::sdk::models::FlavorResource;
use crate::sdk::VpsClient;

#[derive(Debug, Clone, Default)]
pub struct FlavorFilter {
    pub name: Option<String>,
}

impl FlavorFilter {
    fn matches(&self, flavor: &FlavorResource) -> bool {
        self.name.as_deref().map_or(true, |name| flavor.name == name)
    }
}

pub async fn list_flavors(client: &dyn VpsClient, filter: &FlavorFilter) -> Result<Vec<FlavorResource>, SdkError> {
    let mut flavors: Vec<FlavorResource> = client
        .list_flavors()
        .await?
        .into_iter()
        .filter(|f| filter.matches(f))
        .collect();
    super::sort_by_id(&mut flavors, |f| f.id.as_str());
    Ok(flavors)
}
