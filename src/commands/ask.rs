use anyhow::Result;

use crate::chat::config::load_config;
use crate::chat::paths::resolve_paths;
use crate::chat::session::{ExchangeStatus, Session};
use crate::chat::transcript;
use crate::chat::transport::HttpBackend;
use crate::commands::CommandReport;

pub fn run(message: &str) -> Result<CommandReport> {
    let mut report = CommandReport::new("ask");
    let cfg = load_config()?;
    let paths = resolve_paths()?;
    let backend = HttpBackend::new(cfg.backend.endpoint.clone(), cfg.backend.timeout_secs);

    let mut session = Session::new();
    let status = session.submit(&backend, message)?;

    if cfg.transcript.enabled {
        for recorded in session.messages() {
            transcript::append_message(&paths, recorded)?;
        }
    }

    if let Some(reply) = session.last_reply() {
        report.detail(reply.content.clone());
    }
    if let ExchangeStatus::BackendUnavailable(notice) = status {
        report.issue(format!("connection error: {notice}"));
    }
    Ok(report)
}
