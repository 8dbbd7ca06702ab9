use crate::config::Config;
use crate::error::AppError;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::endpoints::Resource;

/// Anything that can hand back the raw JSON body of a stats resource.
pub trait StatsSource: Sync {
    fn fetch(&self, resource: Resource, season: Option<u32>) -> Result<String, AppError>;
}

pub struct ToxicApiClient {
    config: Config,
    agent: ureq::Agent,
}

impl ToxicApiClient {
    pub fn new(config: Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(&config.user_agent)
            .build();
        ToxicApiClient { config, agent }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        // No retries: a failed request surfaces straight to the caller.
        let response = self
            .agent
            .get(url)
            .set("Accept", "application/json")
            .call();

        match response {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| AppError::HttpError(e.to_string())),
            Err(ureq::Error::Status(code, _)) => Err(AppError::HttpError(format!(
                "{} returned status {}",
                url, code
            ))),
            Err(e) => Err(AppError::HttpError(e.to_string())),
        }
    }

    pub fn get<T: DeserializeOwned>(
        &self,
        resource: Resource,
        season: Option<u32>,
    ) -> Result<T, AppError> {
        let body = self.fetch(resource, season)?;
        parse_body(resource, &body)
    }
}

impl StatsSource for ToxicApiClient {
    fn fetch(&self, resource: Resource, season: Option<u32>) -> Result<String, AppError> {
        let url = resource.url(&self.config.api_url, season);
        debug!(%url, "GET");
        self.execute_request(&url)
    }
}

pub fn parse_body<T: DeserializeOwned>(resource: Resource, body: &str) -> Result<T, AppError> {
    serde_json::from_str(body)
        .map_err(|e| AppError::JsonError(format!("/{} payload: {}", resource, e)))
}
