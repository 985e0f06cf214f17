use hairydogm_core::DogmError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatActionError {
    #[error("Chat action sender is already running")]
    AlreadyRunning,

    #[error("Bot is not started: {0}")]
    BotNotStarted(#[source] DogmError),

    #[error("Failed to send chat action: {0}")]
    Bot(#[source] DogmError),

    #[error("Chat action worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ChatActionError>;
