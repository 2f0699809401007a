use crate::chat::paths::ChatPaths;
use crate::chat::session::Message;
use crate::chat::util::now_epoch_secs;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEvent {
    pub at_epoch_secs: u64,
    pub role: String,
    pub content: String,
}

/// Append one message to the JSONL transcript, creating the logs directory
/// on first use.
pub fn append_message(paths: &ChatPaths, message: &Message) -> Result<()> {
    fs::create_dir_all(&paths.logs_dir)
        .with_context(|| format!("failed to create {}", paths.logs_dir.display()))?;
    let event = TranscriptEvent {
        at_epoch_secs: now_epoch_secs()?,
        role: message.role.as_str().to_string(),
        content: message.content.clone(),
    };

    let line = format!("{}\n", serde_json::to_string(&event)?);
    use std::io::Write;
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.transcript_file)?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

/// Number of recorded events, zero when no transcript exists yet.
pub fn event_count(paths: &ChatPaths) -> usize {
    match fs::read_to_string(&paths.transcript_file) {
        Ok(raw) => raw.lines().filter(|l| !l.trim().is_empty()).count(),
        Err(_) => 0,
    }
}

/// Content of the most recent event, if any.
pub fn last_event_content(paths: &ChatPaths) -> Option<String> {
    let raw = fs::read_to_string(&paths.transcript_file).ok()?;
    let line = raw.lines().rev().find(|l| !l.trim().is_empty())?;
    let event: serde_json::Value = serde_json::from_str(line).ok()?;
    event
        .get("content")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}
