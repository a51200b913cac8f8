use thiserror::Error;

/// Failures the dispatcher turns into a chat reply
#[derive(Debug, Error)]
pub enum BotError {
    /// Wrong number of arguments; carries the usage line for the command.
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("invalid inserted_at '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error(transparent)]
    Adapter(#[from] anyhow::Error),
}

impl BotError {
    /// Text sent back to the chat for this failure
    pub fn reply_text(&self) -> String {
        match self {
            BotError::Usage(_) => self.to_string(),
            // {:#} keeps the anyhow context chain on one line
            BotError::Adapter(err) => format!("Error: {err:#}"),
            other => format!("Error: {other}"),
        }
    }
}

pub type BotResult<T> = Result<T, BotError>;
