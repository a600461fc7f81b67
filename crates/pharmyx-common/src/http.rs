use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::error::Result;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "Pharmyx/0.1 (clinical-research)";

/// Settings for the single process-wide HTTP client. Every outbound call
/// (regulatory, label, literature, LLM) goes through a client built from
/// these, so the timeout bound applies uniformly.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Builds the shared `reqwest::Client`. The client is a cheap handle over a
/// connection pool, so components receive clones rather than references.
pub fn build_http_client(settings: &HttpSettings) -> Result<Client> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .user_agent(settings.user_agent.clone())
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = HttpSettings::default();
        assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(settings.user_agent.starts_with("Pharmyx/"));
    }

    #[test]
    fn test_build_client() {
        let client = build_http_client(&HttpSettings::default());
        assert!(client.is_ok());
    }
}
