use crate::error::ChatError;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/api/chat".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    pub enabled: bool,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChatConfig {
    pub backend: BackendConfig,
    pub transcript: TranscriptConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct PartialChatConfig {
    backend: Option<BackendConfig>,
    transcript: Option<TranscriptConfig>,
}

fn env_or_u64(var: &str, fallback: u64) -> u64 {
    match env::var(var) {
        Ok(v) => v.trim().parse::<u64>().ok().unwrap_or(fallback),
        Err(_) => fallback,
    }
}

fn env_or_bool(var: &str, fallback: bool) -> bool {
    match env::var(var) {
        Ok(v) => match v.trim() {
            "1" | "true" | "TRUE" | "yes" | "on" => true,
            "0" | "false" | "FALSE" | "no" | "off" => false,
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn validate(cfg: &ChatConfig) -> Result<()> {
    let endpoint = cfg.backend.endpoint.trim();
    if endpoint.is_empty() {
        return Err(ChatError::InvalidConfig("backend endpoint cannot be empty".into()).into());
    }
    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        return Err(ChatError::InvalidConfig(format!(
            "backend endpoint must be an http(s) URL, got `{endpoint}`"
        ))
        .into());
    }
    if cfg.backend.timeout_secs == 0 {
        return Err(ChatError::InvalidConfig("backend timeout must be >= 1 second".into()).into());
    }
    Ok(())
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("STOCKCHAT_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    let home = dirs::home_dir()?;
    Some(home.join(".stock-chat").join("config.toml"))
}

fn apply_partial(base: &mut ChatConfig, parsed: PartialChatConfig) {
    if let Some(backend) = parsed.backend {
        base.backend = backend;
    }
    if let Some(transcript) = parsed.transcript {
        base.transcript = transcript;
    }
}

fn merge_file_config(base: &mut ChatConfig) -> Result<()> {
    let Some(path) = resolve_config_path() else {
        return Ok(());
    };
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(&path)?;
    let parsed: PartialChatConfig = toml::from_str(&raw)
        .map_err(|err| anyhow!("failed to parse chat config {}: {err}", path.display()))?;
    apply_partial(base, parsed);
    Ok(())
}

pub fn load_config() -> Result<ChatConfig> {
    let mut cfg = ChatConfig::default();
    merge_file_config(&mut cfg)?;

    cfg.backend.endpoint = env_or_string("STOCKCHAT_ENDPOINT", &cfg.backend.endpoint);
    cfg.backend.timeout_secs = env_or_u64("STOCKCHAT_TIMEOUT_SECS", cfg.backend.timeout_secs);
    cfg.transcript.enabled = env_or_bool("STOCKCHAT_TRANSCRIPT_ENABLED", cfg.transcript.enabled);

    validate(&cfg)?;
    Ok(cfg)
}
