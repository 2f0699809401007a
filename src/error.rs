use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("config invalid: {0}")]
    InvalidConfig(String),
    #[error("chat backend unavailable: {0}")]
    BackendUnavailable(String),
}
