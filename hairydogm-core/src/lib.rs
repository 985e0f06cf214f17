//! # hairydogm-core
//!
//! Core types and traits shared by the helper crates: [`Bot`], users, chats and callback queries,
//! [`Filter`], the task-scoped [`ContextInstance`] registry and tracing initialization.
//! Transport-agnostic; hairydogm-telegram maps teloxide onto it.

pub mod bot;
pub mod context;
pub mod error;
pub mod filter;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use context::ContextInstance;
pub use error::{DogmError, Result};
pub use filter::{signature_to_string, Filter};
pub use logger::init_tracing;
pub use types::{
    CallbackQuery, Chat, ChatAction, ChatRef, ToCoreCallbackQuery, ToCoreUser, User,
};

#[doc(hidden)]
pub use tokio as __tokio;
