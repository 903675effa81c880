//! `tcite config`: show the effective configuration.

use console::style;
use serde::Serialize;

use crate::state::AppState;

/// The configuration as resolved for this invocation. The API key itself
/// is never included.
#[derive(Debug, Serialize)]
pub struct EffectiveConfig {
    pub data_dir: String,
    pub assistant_id: Option<String>,
    pub api_base_url: String,
    pub api_key_set: bool,
    pub poll_interval_ms: u64,
    pub max_poll_secs: u64,
    pub request_timeout_secs: u64,
}

impl EffectiveConfig {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            data_dir: state.data_dir.display().to_string(),
            assistant_id: state.assistant_id.clone(),
            api_base_url: state.config.api_base_url.clone(),
            api_key_set: state.api_key_set(),
            poll_interval_ms: state.config.poll_interval_ms,
            max_poll_secs: state.config.max_poll_secs,
            request_timeout_secs: state.config.request_timeout_secs,
        }
    }
}

pub fn show_config(state: &AppState, json: bool) -> anyhow::Result<()> {
    let effective = EffectiveConfig::from_state(state);

    if json {
        println!("{}", serde_json::to_string_pretty(&effective)?);
        return Ok(());
    }

    let unset = || style("(not set)".to_string()).yellow();
    let max_poll = if effective.max_poll_secs == 0 {
        "disabled".to_string()
    } else {
        format!("{}s", effective.max_poll_secs)
    };

    println!();
    println!("  {}", style("Configuration").bold());
    println!();
    println!("  {:<16} {}", "Data dir:", style(&effective.data_dir).dim());
    println!(
        "  {:<16} {}",
        "Assistant:",
        effective
            .assistant_id
            .as_ref()
            .map(|id| style(id.clone()).cyan())
            .unwrap_or_else(unset)
    );
    println!("  {:<16} {}", "API base URL:", effective.api_base_url);
    println!(
        "  {:<16} {}",
        "API key:",
        if effective.api_key_set {
            style("set".to_string()).green()
        } else {
            unset()
        }
    );
    println!("  {:<16} {}ms", "Poll interval:", effective.poll_interval_ms);
    println!("  {:<16} {max_poll}", "Max poll wait:");
    println!("  {:<16} {}s", "Request timeout:", effective.request_timeout_secs);
    println!();

    Ok(())
}
