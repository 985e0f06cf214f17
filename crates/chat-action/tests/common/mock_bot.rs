//! Mock implementation of [`hairydogm_core::Bot`] for chat action tests.
//!
//! Records every `send_chat_action` call with the (paused) tokio clock so tests can assert on
//! timing without hitting Telegram.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hairydogm_core::{Bot, ChatAction, ChatRef, DogmError, Result, User};
use tokio::time::Instant;

/// One recorded call to `send_chat_action(chat, action, message_thread_id)`.
#[derive(Debug, Clone)]
pub struct ActionRecord {
    pub chat: ChatRef,
    pub action: ChatAction,
    pub message_thread_id: Option<i32>,
    pub at: Instant,
}

#[derive(Default)]
pub struct MockBot {
    /// `get_me` fails, as for a bot that was never started.
    pub not_started: bool,
    /// `send_chat_action` fails once this many calls have succeeded.
    pub fail_after: Option<usize>,
    records: Mutex<Vec<ActionRecord>>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn not_started() -> Arc<Self> {
        Arc::new(Self {
            not_started: true,
            ..Self::default()
        })
    }

    pub fn failing_after(successful: usize) -> Arc<Self> {
        Arc::new(Self {
            fail_after: Some(successful),
            ..Self::default()
        })
    }

    pub fn records(&self) -> Vec<ActionRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn sent(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn get_me(&self) -> Result<User> {
        if self.not_started {
            return Err(DogmError::Bot("client is not authorized".to_string()));
        }
        Ok(User {
            id: 42,
            is_bot: true,
            username: Some("mock_bot".to_string()),
            first_name: Some("Mock".to_string()),
            last_name: None,
            language_code: None,
        })
    }

    async fn send_chat_action(
        &self,
        chat: &ChatRef,
        action: ChatAction,
        message_thread_id: Option<i32>,
    ) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        if self.fail_after.is_some_and(|n| records.len() >= n) {
            return Err(DogmError::Bot("Too Many Requests".to_string()));
        }
        records.push(ActionRecord {
            chat: chat.clone(),
            action,
            message_thread_id,
            at: Instant::now(),
        });
        Ok(())
    }
}
