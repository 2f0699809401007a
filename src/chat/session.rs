use crate::chat::normalize;
use crate::chat::transport::Backend;
use anyhow::Result;
use chrono::Local;
use serde::Serialize;

/// Shown as the assistant reply whenever the backend cannot be reached or
/// answers with a non-success status. Transport errors never reach the
/// normalizer.
pub const CONNECT_FAILURE_REPLY: &str =
    "Sorry, I couldn't connect to the backend. Please ensure it's running and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: String,
}

/// Outcome of one exchange. A transport failure is not an error at this
/// level: the session records the apology reply and stays usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeStatus {
    Answered,
    BackendUnavailable(String),
}

fn local_clock_label() -> String {
    Local::now().format("%I:%M %p").to_string()
}

/// Message history plus the in-flight flag, owned by the calling command.
/// One outstanding exchange at a time; no queue, no cancellation.
#[derive(Debug, Default)]
pub struct Session {
    messages: Vec<Message>,
    in_flight: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_reply(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
    }

    fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message {
            role,
            content: content.into(),
            timestamp: local_clock_label(),
        });
    }

    /// Run one user-submitted message through the backend and record both
    /// sides of the exchange. Refuses re-entry while a request is in flight.
    pub fn submit(&mut self, backend: &dyn Backend, text: &str) -> Result<ExchangeStatus> {
        if self.in_flight {
            anyhow::bail!("a chat request is already in flight");
        }

        self.push(Role::User, text);
        self.in_flight = true;
        let outcome = backend.send_message(text);
        self.in_flight = false;

        match outcome {
            Ok(body) => {
                self.push(Role::Assistant, normalize::normalize(&body));
                Ok(ExchangeStatus::Answered)
            }
            Err(err) => {
                self.push(Role::Assistant, CONNECT_FAILURE_REPLY);
                Ok(ExchangeStatus::BackendUnavailable(format!("{err:#}")))
            }
        }
    }
}
