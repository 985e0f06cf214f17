//! Button kinds the builder can lay out.

use std::fmt::Debug;

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

/// A keyboard button type together with the markup it is sent as.
pub trait Button: Clone + Debug + Send + Sync + 'static {
    type Markup;

    /// Wraps rows of buttons into the markup type.
    fn into_markup(rows: Vec<Vec<Self>>) -> Self::Markup;

    /// Rows of an existing markup.
    fn rows(markup: &Self::Markup) -> &[Vec<Self>];
}

impl Button for InlineKeyboardButton {
    type Markup = InlineKeyboardMarkup;

    fn into_markup(rows: Vec<Vec<Self>>) -> InlineKeyboardMarkup {
        InlineKeyboardMarkup::new(rows)
    }

    fn rows(markup: &InlineKeyboardMarkup) -> &[Vec<Self>] {
        &markup.inline_keyboard
    }
}

impl Button for KeyboardButton {
    type Markup = KeyboardMarkup;

    fn into_markup(rows: Vec<Vec<Self>>) -> KeyboardMarkup {
        KeyboardMarkup::new(rows)
    }

    fn rows(markup: &KeyboardMarkup) -> &[Vec<Self>] {
        &markup.keyboard
    }
}
