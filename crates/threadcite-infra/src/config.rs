//! Global configuration loader for threadcite.
//!
//! Reads `config.toml` from the data directory (`~/.threadcite/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use threadcite_types::config::GlobalConfig;

/// Environment variable selecting the assistant.
pub const ASSISTANT_ID_ENV: &str = "THREADCITE_ASSISTANT_ID";

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Resolve which assistant to converse with.
///
/// Priority:
/// 1. `--assistant` command line flag
/// 2. `THREADCITE_ASSISTANT_ID` environment variable
/// 3. `assistant_id` in `config.toml`
///
/// Blank values at any level are skipped.
pub fn resolve_assistant_id(
    flag: Option<&str>,
    env_value: Option<&str>,
    config: &GlobalConfig,
) -> Option<String> {
    [flag, env_value, config.assistant_id.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|id| !id.is_empty())
        .map(str::to_string)
}
