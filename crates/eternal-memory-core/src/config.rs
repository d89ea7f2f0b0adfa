use thiserror::Error;

pub const URL_ENV: &str = "ETERNAL_MEMORY_URL";
pub const API_KEY_ENV: &str = "ETERNAL_MEMORY_API_KEY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
}

/// Connection settings for the remote memory API. Built once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct MemoryApiConfig {
    pub base_url: String,
    pub api_key: String,
}

impl std::fmt::Debug for MemoryApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl MemoryApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        Ok(Self {
            base_url: required(URL_ENV)?,
            api_key: required(API_KEY_ENV)?,
        })
    }
}
