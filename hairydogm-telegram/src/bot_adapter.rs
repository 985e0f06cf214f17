//! Wraps teloxide::Bot and implements [`hairydogm_core::Bot`]. Production code talks to Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use hairydogm_core::{Bot as CoreBot, ChatAction, ChatRef, DogmError, Result, ToCoreUser, User};
use teloxide::payloads::SendChatActionSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, Recipient, ThreadId};
use tracing::error;

use super::adapters::TelegramUserWrapper;

/// Thin wrapper around teloxide::Bot that implements hairydogm-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

/// Telegram accepts a numeric chat id or `@channelusername`.
pub(crate) fn to_recipient(chat: &ChatRef) -> Recipient {
    match chat {
        ChatRef::Id(id) => Recipient::Id(ChatId(*id)),
        ChatRef::Username(name) if name.starts_with('@') => Recipient::ChannelUsername(name.clone()),
        ChatRef::Username(name) => Recipient::ChannelUsername(format!("@{name}")),
    }
}

pub(crate) fn to_teloxide_action(action: ChatAction) -> teloxide::types::ChatAction {
    use teloxide::types::ChatAction as Tg;
    match action {
        ChatAction::Typing => Tg::Typing,
        ChatAction::UploadPhoto => Tg::UploadPhoto,
        ChatAction::RecordVideo => Tg::RecordVideo,
        ChatAction::UploadVideo => Tg::UploadVideo,
        ChatAction::RecordVoice => Tg::RecordVoice,
        ChatAction::UploadVoice => Tg::UploadVoice,
        ChatAction::UploadDocument => Tg::UploadDocument,
        ChatAction::ChooseSticker => Tg::ChooseSticker,
        ChatAction::FindLocation => Tg::FindLocation,
        ChatAction::RecordVideoNote => Tg::RecordVideoNote,
        ChatAction::UploadVideoNote => Tg::UploadVideoNote,
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn get_me(&self) -> Result<User> {
        let me = self.bot.get_me().await.map_err(|e| {
            error!(error = %e, "getMe failed");
            DogmError::Bot(e.to_string())
        })?;
        Ok(TelegramUserWrapper(&me.user).to_core())
    }

    async fn send_chat_action(
        &self,
        chat: &ChatRef,
        action: ChatAction,
        message_thread_id: Option<i32>,
    ) -> Result<()> {
        let mut request = self
            .bot
            .send_chat_action(to_recipient(chat), to_teloxide_action(action));
        if let Some(thread_id) = message_thread_id {
            request = request.message_thread_id(ThreadId(MessageId(thread_id)));
        }
        request
            .await
            .map_err(|e| DogmError::Bot(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_recipient() {
        assert_eq!(to_recipient(&ChatRef::Id(-100)), Recipient::Id(ChatId(-100)));
        assert_eq!(
            to_recipient(&ChatRef::from("@news")),
            Recipient::ChannelUsername("@news".to_string())
        );
        assert_eq!(
            to_recipient(&ChatRef::from("news")),
            Recipient::ChannelUsername("@news".to_string())
        );
    }

    #[test]
    fn test_actions_map_to_same_wire_name() {
        for action in [
            ChatAction::Typing,
            ChatAction::UploadPhoto,
            ChatAction::RecordVoice,
            ChatAction::UploadVoice,
            ChatAction::UploadVideoNote,
        ] {
            let wire = serde_json::to_string(&to_teloxide_action(action)).unwrap();
            assert_eq!(wire, format!("\"{}\"", action.as_str()));
        }
    }
}
