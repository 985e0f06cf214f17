//! # keyboard
//!
//! Builders for Telegram keyboards. [`KeyboardBuilder`] collects buttons into rows, re-flows them
//! with [`KeyboardBuilder::adjust`], and produces the transport markup; [`InlineKeyboardBuilder`]
//! and [`ReplyKeyboardBuilder`] are the two concrete flavours.

mod builder;
mod button;
mod error;

pub use builder::{InlineKeyboardBuilder, KeyboardBuilder, ReplyKeyboardBuilder};
pub use button::Button;
pub use error::{KeyboardError, Result};

/// Maximum number of buttons in one row.
pub const MAX_WIDTH: usize = 8;
/// Minimum row width accepted by [`KeyboardBuilder::row_with_width`] and [`KeyboardBuilder::adjust`].
pub const MIN_WIDTH: usize = 1;
/// Maximum number of buttons in one keyboard.
pub const MAX_BUTTONS: usize = 100;
