use thiserror::Error;

#[derive(Error, Debug)]
pub enum DogmError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0} context is not set")]
    ContextNotSet(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DogmError>;
