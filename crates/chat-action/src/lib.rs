//! # chat-action
//!
//! [`ChatActionSender`] keeps "typing..." (or another [`ChatAction`]) visible in a chat while
//! the bot works on a reply, re-sending the action every few seconds until stopped.

mod error;
mod sender;

pub use error::{ChatActionError, Result};
pub use hairydogm_core::ChatAction;
pub use sender::{ChatActionSender, DEFAULT_INITIAL_SLEEP, DEFAULT_INTERVAL};
