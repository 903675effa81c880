//! Application state wiring the chat service to its concrete backend.
//!
//! ChatService is generic over the assistant client and file name cache;
//! AppState pins it to the HTTP client from threadcite-infra.

use std::path::PathBuf;

use anyhow::Context;
use threadcite_core::chat::poller::RunPoller;
use threadcite_core::chat::service::ChatService;
use threadcite_infra::config::{ASSISTANT_ID_ENV, load_global_config, resolve_assistant_id};
use threadcite_infra::filesystem::resolve_data_dir;
use threadcite_infra::openai::OpenAiAssistantClient;
use threadcite_infra::secret::{API_KEY_ENV, require_api_key, secret_from_env};
use threadcite_types::config::GlobalConfig;

/// Chat service pinned to the HTTP assistant client and the in-memory cache.
pub type ConcreteChatService = ChatService<OpenAiAssistantClient>;

/// Resolved configuration for one invocation of the binary.
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: GlobalConfig,
    pub assistant_id: Option<String>,
}

impl AppState {
    /// Load `config.toml` and resolve the assistant id.
    ///
    /// No network access and no API key are needed at this point.
    pub async fn init(assistant_flag: Option<&str>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_global_config(&data_dir).await;
        let env_value = std::env::var(ASSISTANT_ID_ENV).ok();
        let assistant_id = resolve_assistant_id(assistant_flag, env_value.as_deref(), &config);

        Ok(Self {
            data_dir,
            config,
            assistant_id,
        })
    }

    /// Whether an API key is present in the environment.
    pub fn api_key_set(&self) -> bool {
        secret_from_env(API_KEY_ENV).is_some()
    }

    pub fn poller(&self) -> RunPoller {
        RunPoller::from_config(&self.config)
    }

    /// Build the chat service for the resolved assistant.
    pub fn chat_service(&self) -> anyhow::Result<ConcreteChatService> {
        let assistant_id = self.assistant_id.as_deref().with_context(|| {
            format!(
                "no assistant configured. Pass --assistant, set {ASSISTANT_ID_ENV}, \
                 or add assistant_id to {}",
                self.data_dir.join("config.toml").display()
            )
        })?;
        let api_key = require_api_key()?;
        let client = OpenAiAssistantClient::from_config(&self.config, api_key)?;

        Ok(ChatService::new(client, assistant_id, self.poller()))
    }
}
