use callback_data::CallbackDataError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyboardError {
    #[error("Row size {0} is not allowed")]
    InvalidSize(usize),

    #[error("Row {row} is too long ({len} buttons, MAX_WIDTH=8)")]
    RowTooLong { row: usize, len: usize },

    #[error("Too much buttons detected ({0}), max allowed count - 100")]
    TooManyButtons(usize),

    #[error("Callback data error: {0}")]
    CallbackData(#[from] CallbackDataError),
}

pub type Result<T> = std::result::Result<T, KeyboardError>;
