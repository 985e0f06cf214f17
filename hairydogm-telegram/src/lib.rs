//! # hairydogm-telegram
//!
//! Telegram layer for the hairydogm helpers: conversions from teloxide types, a
//! [`hairydogm_core::Bot`] implementation over `teloxide::Bot`, minimal config, and glue for
//! using [`callback_data::CallbackQueryFilter`] in dptree handler trees.

mod adapters;
mod bot_adapter;
mod config;
mod dispatch;

pub use adapters::{TelegramCallbackQueryWrapper, TelegramChatWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use dispatch::callback_filter;
pub use teloxide;
