use std::fmt::Display;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallbackDataError {
    #[error("Callback data prefix must not be empty")]
    EmptyPrefix,

    #[error("Separator symbol {separator:?} can not be used inside prefix {prefix:?}")]
    SeparatorInPrefix {
        separator: &'static str,
        prefix: &'static str,
    },

    #[error("Separator symbol {separator:?} can not be used in value {key}={value:?}")]
    SeparatorInValue {
        separator: &'static str,
        key: String,
        value: String,
    },

    #[error("Attribute {key} of type {kind:?} can not be packed to callback data")]
    Unsupported { key: String, kind: &'static str },

    #[error("Resulted callback data is too long! len({data:?}) > 64")]
    TooLong { data: String },

    #[error("Callback data {name:?} takes {expected} arguments but {given} were given")]
    ArgumentCount {
        name: &'static str,
        expected: usize,
        given: usize,
    },

    #[error("Bad prefix ({got:?} != {expected:?})")]
    BadPrefix { got: String, expected: &'static str },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("{0}")]
    Message(String),
}

impl serde::ser::Error for CallbackDataError {
    fn custom<T: Display>(msg: T) -> Self {
        CallbackDataError::Message(msg.to_string())
    }
}

impl serde::de::Error for CallbackDataError {
    fn custom<T: Display>(msg: T) -> Self {
        CallbackDataError::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CallbackDataError>;
