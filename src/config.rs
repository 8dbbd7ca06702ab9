use crate::error::AppError;
use std::env;

pub const DEFAULT_API_URL: &str = "https://toxic-api-production.gggrunt16.workers.dev";
pub const DEFAULT_USER_AGENT: &str = "toxic_stats/0.1.0";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_url = env::var("TOXIC_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let user_agent =
            env::var("TOXIC_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        Config::default().with_api_url(api_url).map(|config| Config {
            user_agent,
            ..config
        })
    }

    /// Replaces the base URL, dropping any trailing slash so endpoint paths
    /// can be appended directly.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Result<Self, AppError> {
        let api_url = api_url.into();
        let trimmed = api_url.trim().trim_end_matches('/');

        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(AppError::ConfigError(format!(
                "TOXIC_API_URL must be an http(s) URL, got '{}'",
                api_url
            )));
        }

        self.api_url = trimmed.to_string();
        Ok(self)
    }
}
