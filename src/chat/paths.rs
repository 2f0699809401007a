use anyhow::Result;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ChatPaths {
    pub chat_home: PathBuf,
    pub logs_dir: PathBuf,
    pub transcript_file: PathBuf,
}

fn required_home_dir() -> Result<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        return Ok(home);
    }
    Err(anyhow::anyhow!("HOME directory could not be resolved"))
}

fn env_or_default_path(var: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback,
    }
}

pub fn resolve_paths() -> Result<ChatPaths> {
    let home = required_home_dir()?;
    let chat_home = env_or_default_path("STOCKCHAT_HOME", home.join(".stock-chat"));

    let logs_dir = env_or_default_path("STOCKCHAT_LOGS_DIR", chat_home.join("logs"));
    let transcript_file = logs_dir.join("transcript.jsonl");

    Ok(ChatPaths {
        chat_home,
        logs_dir,
        transcript_file,
    })
}
