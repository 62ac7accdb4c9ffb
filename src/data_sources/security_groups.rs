use crate::error::SdkError;
use crate::sdk::models::SecurityGroupResource;
use crate::sdk::VpsClient;

#[derive(Debug, Clone, Default)]
pub struct SecurityGroupFilter {
    pub name: Option<String>,
}

impl SecurityGroupFilter {
    fn matches(&self, sg: &SecurityGroupResource) -> bool {
        self.name.as_deref().map_or(true, |n| sg.name == n)
    }
}

/// Requests `detail=true` on the underlying `List`.
pub async fn list_security_groups(
    client: &dyn VpsClient,
    filter: &SecurityGroupFilter,
) -> Result<Vec<SecurityGroupResource>, SdkError> {
    let mut groups: Vec<SecurityGroupResource> = client
        .list_security_groups(true)
        .await?
        .into_iter()
        .filter(|sg| filter.matches(sg))
        .collect();
    super::sort_by_id(&mut groups, |sg| sg.id.as_str());
    Ok(groups)
}
