//! # hairydogm
//!
//! Helper utilities for Telegram bots in the style of aiogram's utils, on top of teloxide:
//!
//! - [`callback_data`]: typed, compact callback data for inline buttons, and a filter matching it
//! - [`keyboard`]: inline and reply keyboard builders
//! - [`i18n`]: gettext catalogs with a task-scoped current locale
//! - [`chat_action`]: keeps "typing..." visible while a reply is prepared
//! - [`telegram`]: teloxide adapters and dptree glue
//!
//! Core types and traits ([`Bot`], [`Filter`], [`ContextInstance`], ...) are re-exported at the root.

pub use callback_data;
pub use chat_action;
pub use hairydogm_telegram as telegram;
pub use i18n;
pub use keyboard;

pub use hairydogm_core::{
    init_tracing, signature_to_string, Bot, CallbackQuery, Chat, ChatAction, ChatRef,
    ContextInstance, DogmError, Filter, Result, User,
};

/// Package version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports for bot code. Does not clash with `teloxide::prelude`.
pub mod prelude {
    pub use crate::callback_data::{CallbackData, CallbackQueryFilter};
    pub use crate::chat_action::ChatActionSender;
    pub use crate::i18n::{gettext, gettext_in, lazy_gettext, lazy_ngettext, ngettext, I18n};
    pub use crate::keyboard::{InlineKeyboardBuilder, ReplyKeyboardBuilder};
    pub use crate::telegram::{callback_filter, TelegramBotAdapter};
    pub use hairydogm_core::Filter;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use crate::telegram::teloxide::types::InlineKeyboardButtonKind;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Vote {
        poll: u32,
        up: bool,
    }

    impl CallbackData for Vote {
        const PREFIX: &'static str = "vote";
    }

    #[test]
    fn test_version_is_semver() {
        let parts: Vec<&str> = super::VERSION.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.parse::<u32>().is_ok()));
    }

    /// **Test: callback data packed into a keyboard matches its filter.**
    #[test]
    fn test_keyboard_and_filter_work_together() {
        let mut builder = InlineKeyboardBuilder::new();
        builder
            .callback_button("👍", &Vote { poll: 7, up: true })
            .unwrap()
            .callback_button("👎", &Vote { poll: 7, up: false })
            .unwrap();
        let packed: Vec<String> = builder
            .buttons()
            .filter_map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(packed, vec!["vote:7:1", "vote:7:0"]);

        let query = crate::CallbackQuery {
            id: "1".to_string(),
            from: crate::User {
                id: 1,
                is_bot: false,
                username: None,
                first_name: Some("A".to_string()),
                last_name: None,
                language_code: None,
            },
            chat: None,
            message_id: None,
            data: Some(packed[1].clone()),
        };
        let upvotes = Vote::filter_with(|v: &Vote| v.up);
        assert_eq!(upvotes.check(&query), None);
        assert_eq!(Vote::filter().check(&query), Some(Vote { poll: 7, up: false }));
    }
}
