use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Found locale '{0}' but this language is not compiled!")]
    NotCompiled(String),

    #[error("Invalid catalog {path:?}: {message}")]
    InvalidCatalog { path: Option<PathBuf>, message: String },

    #[error("Invalid plural forms expression {expr:?}: {message}")]
    InvalidPluralForms { expr: String, message: String },

    #[error("I18n context is not set")]
    ContextNotSet,

    #[error("Current locale can only be changed inside an I18n context or use_locale scope")]
    NoLocaleScope,
}

impl I18nError {
    pub(crate) fn catalog(message: impl Into<String>) -> Self {
        I18nError::InvalidCatalog {
            path: None,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, I18nError>;
