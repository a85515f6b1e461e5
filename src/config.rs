use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tenant value shipped in the sample config; a run with it would hit someone else's host.
pub const PLACEHOLDER_TENANT: &str = "something.atlassian.net";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "ATLASSIAN_TENANT")]
    pub tenant: String,
    #[serde(rename = "ATLASSIAN_EMAIL")]
    pub email: String,
    #[serde(rename = "API_TOKEN")]
    pub api_token: String,
    /// `"true"` or `"false"`.
    #[serde(rename = "INCLUDE_ATTACHMENTS")]
    pub include_attachments: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        serde_yaml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Overwrites whatever is at `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self).map_err(ConfigError::Serialize)?;
        fs::write(path, content)
            .map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tenant == PLACEHOLDER_TENANT {
            return Err(ConfigError::Placeholder(self.tenant.clone()));
        }
        Ok(())
    }

    pub fn includes_attachments(&self) -> bool {
        self.include_attachments.eq_ignore_ascii_case("true")
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("tenant", &self.tenant)
            .field("email", &self.email)
            .field("api_token", &"***")
            .field("include_attachments", &self.include_attachments)
            .finish()
    }
}
