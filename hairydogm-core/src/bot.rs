//! Bot abstraction used by the helpers that talk to Telegram.
//!
//! [`Bot`] is transport-agnostic; hairydogm-telegram implements it via teloxide, tests substitute mocks.

use crate::error::Result;
use crate::types::{ChatAction, ChatRef, User};
use async_trait::async_trait;

/// Requests the helpers need from a bot transport.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Returns the bot's own account. Fails when the bot is not authorized or not started.
    async fn get_me(&self) -> Result<User>;
    /// Broadcasts a chat action (typing, uploading, ...) to `chat`, optionally inside a forum topic.
    async fn send_chat_action(
        &self,
        chat: &ChatRef,
        action: ChatAction,
        message_thread_id: Option<i32>,
    ) -> Result<()>;
}
