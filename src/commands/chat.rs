use anyhow::Result;
use std::io::{self, BufRead, Write};

use crate::chat::config::load_config;
use crate::chat::paths::resolve_paths;
use crate::chat::session::{ExchangeStatus, Session};
use crate::chat::transcript;
use crate::chat::transport::HttpBackend;
use crate::commands::CommandReport;

pub fn run() -> Result<CommandReport> {
    let mut report = CommandReport::new("chat");
    let cfg = load_config()?;
    let paths = resolve_paths()?;
    let backend = HttpBackend::new(cfg.backend.endpoint.clone(), cfg.backend.timeout_secs);

    let mut session = Session::new();
    let mut exchanges = 0usize;
    let mut failures = 0usize;

    let stdin = io::stdin();
    let mut out = io::stdout();
    writeln!(out, "Stock AI Chat. Ask about a ticker, `exit` to quit.")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == "exit" || text == "quit" {
            break;
        }

        // One outstanding request at a time; the blocking submit is the
        // serialization point.
        let status = session.submit(&backend, text)?;
        if let Some(reply) = session.last_reply() {
            writeln!(out, "[{}] assistant: {}", reply.timestamp, reply.content)?;
        }
        if let ExchangeStatus::BackendUnavailable(notice) = status {
            failures += 1;
            eprintln!("connection error: {notice}");
        }
        exchanges += 1;
    }

    if cfg.transcript.enabled {
        for recorded in session.messages() {
            transcript::append_message(&paths, recorded)?;
        }
    }

    report.detail(format!(
        "session closed after {exchanges} exchange(s), {failures} failed"
    ));
    Ok(report)
}
