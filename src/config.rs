//! Provider-configure environment resolution. A thin collaborator --
//! credential acquisition and the wire transport belong to the SDK, not
//! here -- grounded in `zeronsd::utils::central_token`'s env-var resolution
//! and `zeronsd::utils::central_config`'s small builder.

use anyhow::{anyhow, Result};

use crate::validators::jwt::is_valid_jwt_shape;

const DEFAULT_API_ENDPOINT: &str = "https://api.zillaforge.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectSelector {
    Id(String),
    SysCode(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_endpoint: String,
    pub api_key: String,
    pub project: ProjectSelector,
}

/// Resolves the provider configuration from the environment.
/// `ZILLAFORGE_API_KEY` is checked only for JWT *shape*, never decoded or
/// verified cryptographically -- that belongs to the SDK at request time.
pub fn resolve_from_env() -> Result<ProviderConfig> {
    let api_endpoint = std::env::var("ZILLAFORGE_API_ENDPOINT").unwrap_or_else(|_| DEFAULT_API_ENDPOINT.to_string());

    let api_key = std::env::var("ZILLAFORGE_API_KEY")
        .map_err(|_| anyhow!("missing ZILLAFORGE_API_KEY: set it in the environment"))?;
    if !is_valid_jwt_shape(&api_key) {
        return Err(anyhow!("ZILLAFORGE_API_KEY does not have the shape of a JWT"));
    }

    let project_id = std::env::var("ZILLAFORGE_PROJECT_ID").ok().filter(|s| !s.is_empty());
    let project_sys_code = std::env::var("ZILLAFORGE_PROJECT_SYS_CODE")
        .ok()
        .filter(|s| !s.is_empty());

    let project = match (project_id, project_sys_code) {
        (Some(id), None) => ProjectSelector::Id(id),
        (None, Some(code)) => ProjectSelector::SysCode(code),
        (None, None) => {
            return Err(anyhow!(
                "set exactly one of ZILLAFORGE_PROJECT_ID or ZILLAFORGE_PROJECT_SYS_CODE"
            ))
        }
        (Some(_), Some(_)) => {
            return Err(anyhow!(
                "ZILLAFORGE_PROJECT_ID and ZILLAFORGE_PROJECT_SYS_CODE are mutually exclusive"
            ))
        }
    };

    Ok(ProviderConfig {
        api_endpoint,
        api_key,
        project,
    })
}
