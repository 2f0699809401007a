use anyhow::Result;
use std::env;

use crate::chat::config::load_config;
use crate::chat::paths::resolve_paths;
use crate::chat::transcript;
use crate::chat::util::truncate_with_ellipsis;
use crate::commands::CommandReport;

include!(concat!(env!("OUT_DIR"), "/stockchat_env_allowlist.rs"));

pub fn run() -> Result<CommandReport> {
    let mut report = CommandReport::new("status");
    let cfg = load_config()?;
    let paths = resolve_paths()?;

    report.detail(format!("build: {}", env!("BUILD_UUID")));
    report.detail(format!("chat home: {}", paths.chat_home.display()));
    report.detail(format!("endpoint: {}", cfg.backend.endpoint));
    report.detail(format!("timeout_secs: {}", cfg.backend.timeout_secs));

    let transcript_state = if cfg.transcript.enabled {
        "enabled"
    } else {
        "disabled"
    };
    report.detail(format!(
        "transcript: {} with {} event(s) at {}",
        transcript_state,
        transcript::event_count(&paths),
        paths.transcript_file.display()
    ));
    if let Some(content) = transcript::last_event_content(&paths) {
        report.detail(format!("last event: {}", truncate_with_ellipsis(&content, 72)));
    }

    let set_keys: Vec<&str> = GENERATED_STOCKCHAT_ENV_ALLOWLIST
        .iter()
        .copied()
        .filter(|key| env::var_os(key).is_some())
        .collect();
    if set_keys.is_empty() {
        report.detail("env overrides: none");
    } else {
        report.detail(format!("env overrides: {}", set_keys.join(", ")));
    }

    Ok(report)
}
