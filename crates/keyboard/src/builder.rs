//! Generic keyboard builder.

use std::iter;

use callback_data::CallbackData;
use teloxide::types::{InlineKeyboardButton, KeyboardButton, KeyboardMarkup};
use tracing::debug;
use url::Url;

use crate::button::Button;
use crate::error::{KeyboardError, Result};
use crate::{MAX_BUTTONS, MAX_WIDTH, MIN_WIDTH};

/// Builder for inline keyboards (buttons attached to a message).
pub type InlineKeyboardBuilder = KeyboardBuilder<InlineKeyboardButton>;
/// Builder for reply keyboards (buttons replacing the user's keyboard).
pub type ReplyKeyboardBuilder = KeyboardBuilder<KeyboardButton>;

/// Collects buttons into rows.
///
/// Mixing button kinds is ruled out by the type parameter, so [`KeyboardBuilder::attach`] only
/// accepts a builder of the same kind.
#[derive(Debug, Clone)]
pub struct KeyboardBuilder<B: Button> {
    markup: Vec<Vec<B>>,
}

impl<B: Button> Default for KeyboardBuilder<B> {
    fn default() -> Self {
        Self { markup: Vec::new() }
    }
}

impl<B: Button> KeyboardBuilder<B> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from existing rows. Each row may hold at most [`MAX_WIDTH`] buttons and
    /// the whole keyboard at most [`MAX_BUTTONS`].
    pub fn with_markup(markup: Vec<Vec<B>>) -> Result<Self> {
        validate_markup(&markup)?;
        Ok(Self { markup })
    }

    /// Creates a builder from a markup object, e.g. to extend the keyboard of a received message.
    pub fn from_markup(markup: &B::Markup) -> Result<Self> {
        Self::with_markup(B::rows(markup).to_vec())
    }

    /// All buttons, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &B> {
        self.markup.iter().flatten()
    }

    /// Copy of the current rows.
    pub fn export(&self) -> Vec<Vec<B>> {
        self.markup.clone()
    }

    /// Adds buttons, filling the last row up to [`MAX_WIDTH`] before starting new rows.
    pub fn add(&mut self, buttons: impl IntoIterator<Item = B>) -> &mut Self {
        let mut buttons = buttons.into_iter().peekable();

        if let Some(last) = self.markup.last_mut() {
            while last.len() < MAX_WIDTH {
                match buttons.next() {
                    Some(button) => last.push(button),
                    None => break,
                }
            }
        }

        while buttons.peek().is_some() {
            self.markup.push(buttons.by_ref().take(MAX_WIDTH).collect());
        }
        self
    }

    /// Adds one button.
    pub fn button(&mut self, button: B) -> &mut Self {
        self.add(iter::once(button))
    }

    /// Appends buttons as new rows of at most [`MAX_WIDTH`] buttons.
    pub fn row(&mut self, buttons: impl IntoIterator<Item = B>) -> &mut Self {
        self.push_rows(buttons.into_iter().collect(), MAX_WIDTH);
        self
    }

    /// Appends buttons as new rows of at most `width` buttons.
    pub fn row_with_width(
        &mut self,
        buttons: impl IntoIterator<Item = B>,
        width: usize,
    ) -> Result<&mut Self> {
        validate_size(width)?;
        self.push_rows(buttons.into_iter().collect(), width);
        Ok(self)
    }

    fn push_rows(&mut self, buttons: Vec<B>, width: usize) {
        self.markup
            .extend(buttons.chunks(width).map(|chunk| chunk.to_vec()));
    }

    /// Re-flows all buttons into rows of the given sizes.
    ///
    /// Row `i` gets `sizes[i]` buttons. Past the end of `sizes` the last size repeats, or, with
    /// `repeat`, the whole sequence starts over. No sizes means rows of [`MAX_WIDTH`].
    pub fn adjust(&mut self, sizes: &[usize], repeat: bool) -> Result<&mut Self> {
        for &size in sizes {
            validate_size(size)?;
        }
        let sizes: &[usize] = if sizes.is_empty() { &[MAX_WIDTH] } else { sizes };
        let last = sizes[sizes.len() - 1];

        let mut widths: Box<dyn Iterator<Item = usize> + '_> = if repeat {
            Box::new(sizes.iter().copied().cycle())
        } else {
            Box::new(sizes.iter().copied().chain(iter::repeat(last)))
        };

        let mut buttons = std::mem::take(&mut self.markup).into_iter().flatten().peekable();
        let mut markup = Vec::new();
        while buttons.peek().is_some() {
            let width = widths.next().unwrap_or(last);
            markup.push(buttons.by_ref().take(width).collect());
        }

        debug!(rows = markup.len(), "keyboard adjusted");
        self.markup = markup;
        Ok(self)
    }

    /// Appends the rows of another builder.
    pub fn attach(&mut self, builder: &KeyboardBuilder<B>) -> &mut Self {
        self.markup.extend(builder.export());
        self
    }

    /// Builds the markup object to send.
    pub fn as_markup(&self) -> B::Markup {
        B::into_markup(self.export())
    }
}

impl KeyboardBuilder<InlineKeyboardButton> {
    /// Adds a button whose callback data is packed from `data`.
    pub fn callback_button<T: CallbackData>(
        &mut self,
        text: impl Into<String>,
        data: &T,
    ) -> Result<&mut Self> {
        let packed = data.pack()?;
        Ok(self.button(InlineKeyboardButton::callback(text.into(), packed)))
    }

    /// Adds a button with raw callback data.
    pub fn callback_button_raw(
        &mut self,
        text: impl Into<String>,
        data: impl Into<String>,
    ) -> &mut Self {
        self.button(InlineKeyboardButton::callback(text.into(), data.into()))
    }

    /// Adds a button opening `url`.
    pub fn url_button(&mut self, text: impl Into<String>, url: Url) -> &mut Self {
        self.button(InlineKeyboardButton::url(text.into(), url))
    }
}

impl KeyboardBuilder<KeyboardButton> {
    /// Adds a plain text button.
    pub fn text_button(&mut self, text: impl Into<String>) -> &mut Self {
        self.button(KeyboardButton::new(text.into()))
    }

    /// Builds the markup, optionally asking clients to shrink the keyboard to fit and to hide it
    /// after one use.
    pub fn as_markup_with(&self, resize: bool, one_time: bool) -> KeyboardMarkup {
        let mut markup = self.as_markup();
        if resize {
            markup = markup.resize_keyboard();
        }
        if one_time {
            markup = markup.one_time_keyboard();
        }
        markup
    }
}

fn validate_size(size: usize) -> Result<()> {
    if (MIN_WIDTH..=MAX_WIDTH).contains(&size) {
        Ok(())
    } else {
        Err(KeyboardError::InvalidSize(size))
    }
}

fn validate_markup<B>(markup: &[Vec<B>]) -> Result<()> {
    let count: usize = markup.iter().map(Vec::len).sum();
    if count > MAX_BUTTONS {
        return Err(KeyboardError::TooManyButtons(count));
    }
    for (row, buttons) in markup.iter().enumerate() {
        if buttons.len() > MAX_WIDTH {
            return Err(KeyboardError::RowTooLong {
                row,
                len: buttons.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buttons(n: usize) -> Vec<InlineKeyboardButton> {
        (0..n)
            .map(|i| InlineKeyboardButton::callback(format!("b{i}"), format!("d{i}")))
            .collect()
    }

    fn shape<B: Button>(builder: &KeyboardBuilder<B>) -> Vec<usize> {
        builder.export().iter().map(Vec::len).collect()
    }

    #[test]
    fn test_validate_size_bounds() {
        assert!(validate_size(0).is_err());
        assert!(validate_size(1).is_ok());
        assert!(validate_size(8).is_ok());
        assert_eq!(validate_size(9), Err(KeyboardError::InvalidSize(9)));
    }

    #[test]
    fn test_validate_markup_limits() {
        let wide = vec![buttons(9)];
        assert_eq!(
            validate_markup(&wide),
            Err(KeyboardError::RowTooLong { row: 0, len: 9 })
        );

        let many: Vec<Vec<InlineKeyboardButton>> = (0..13).map(|_| buttons(8)).collect();
        assert_eq!(validate_markup(&many), Err(KeyboardError::TooManyButtons(104)));
    }

    #[test]
    fn test_add_fills_last_row_first() {
        let mut builder = InlineKeyboardBuilder::new();
        builder.row(buttons(3));
        builder.add(buttons(10));
        assert_eq!(shape(&builder), vec![8, 5]);
    }
}
