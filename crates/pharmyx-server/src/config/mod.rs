//! Configuration loading for Pharmyx.
//! Reads pharmyx.toml from the current directory or path in PHARMYX_CONFIG
//! env var. Every key has a default, so the file itself is optional; the
//! OpenAI API key is the one value that must come from the environment.

use std::path::Path;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::warn;

use pharmyx_retrieval::harvester::DEFAULT_MAX_ARTICLES;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub pubmed: PubmedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "0.0.0.0:8000".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Uniform timeout applied to every outbound call, the LLM included.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64    { pharmyx_common::http::DEFAULT_TIMEOUT_SECS }
fn default_user_agent()   -> String { pharmyx_common::http::DEFAULT_USER_AGENT.to_string() }

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_api_url() -> String { pharmyx_llm::backend::DEFAULT_OPENAI_API_URL.to_string() }
fn default_model()   -> String { "gpt-4o-mini".to_string() }

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
        }
    }
}

impl OpenAiConfig {
    /// The API key comes from the environment only, never from the file.
    pub fn api_key() -> anyhow::Result<SecretString> {
        match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Ok(SecretString::from(key)),
            _ => anyhow::bail!(
                "OPENAI_API_KEY is not set. Put it in the environment or in a .env file."
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubmedConfig {
    /// NCBI-recommended contact address sent with every E-utilities call.
    pub email: Option<String>,
    #[serde(default = "default_tool")]
    pub tool: String,
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
}

fn default_tool()         -> String { "pharmyx".to_string() }
fn default_max_articles() -> usize  { DEFAULT_MAX_ARTICLES }

impl Default for PubmedConfig {
    fn default() -> Self {
        Self {
            email: None,
            tool: default_tool(),
            max_articles: default_max_articles(),
        }
    }
}


impl Config {
    /// Load configuration from pharmyx.toml.
    /// Checks PHARMYX_CONFIG env var first, then the current directory.
    /// A missing file is not an error: every key has a usable default.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("PHARMYX_CONFIG")
            .unwrap_or_else(|_| "pharmyx.toml".to_string());

        if !Path::new(&path).exists() {
            warn!(path = %path, "Config file not found, running on defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
