use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("title is empty")]
    EmptyTitle,

    #[error("no conversation with id '{0}'")]
    UnknownConversation(String),

    /// A reply is still being typed.
    #[error("a reply is already pending")]
    Busy,

    #[error("responder failed: {0}")]
    Responder(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ChatError> = std::result::Result<T, E>;
