//! Core types: user, chat, chat target, callback query and chat action.

use std::fmt;

use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// IETF language tag reported by the client; used to pick a translation locale.
    pub language_code: Option<String>,
}

/// Chat (channel, group or private) identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// Target of an outgoing request: a numeric chat id or a public `@username`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChatRef {
    Id(i64),
    Username(String),
}

impl From<i64> for ChatRef {
    fn from(id: i64) -> Self {
        ChatRef::Id(id)
    }
}

impl From<&str> for ChatRef {
    fn from(username: &str) -> Self {
        ChatRef::Username(username.to_string())
    }
}

impl From<String> for ChatRef {
    fn from(username: String) -> Self {
        ChatRef::Username(username)
    }
}

impl From<&Chat> for ChatRef {
    fn from(chat: &Chat) -> Self {
        ChatRef::Id(chat.id)
    }
}

impl fmt::Display for ChatRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRef::Id(id) => write!(f, "{}", id),
            ChatRef::Username(name) => write!(f, "{}", name),
        }
    }
}

/// Incoming callback query (inline keyboard button press).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    /// Chat of the message the button was attached to; absent for inline-mode messages.
    pub chat: Option<Chat>,
    pub message_id: Option<i32>,
    /// Raw callback data string (at most 64 bytes on Telegram's side).
    pub data: Option<String>,
}

/// Status shown to the other side of a chat while the bot prepares a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordVoice,
    UploadVoice,
    UploadDocument,
    ChooseSticker,
    FindLocation,
    RecordVideoNote,
    UploadVideoNote,
}

impl ChatAction {
    /// Telegram wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatAction::Typing => "typing",
            ChatAction::UploadPhoto => "upload_photo",
            ChatAction::RecordVideo => "record_video",
            ChatAction::UploadVideo => "upload_video",
            ChatAction::RecordVoice => "record_voice",
            ChatAction::UploadVoice => "upload_voice",
            ChatAction::UploadDocument => "upload_document",
            ChatAction::ChooseSticker => "choose_sticker",
            ChatAction::FindLocation => "find_location",
            ChatAction::RecordVideoNote => "record_video_note",
            ChatAction::UploadVideoNote => "upload_video_note",
        }
    }
}

impl fmt::Display for ChatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific callback query type to core [`CallbackQuery`].
pub trait ToCoreCallbackQuery: Send + Sync {
    fn to_core(&self) -> CallbackQuery;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_action_wire_names_match_serde() {
        for action in [
            ChatAction::Typing,
            ChatAction::UploadPhoto,
            ChatAction::RecordVideoNote,
            ChatAction::ChooseSticker,
        ] {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }

    #[test]
    fn test_chat_ref_from() {
        assert_eq!(ChatRef::from(42i64), ChatRef::Id(42));
        assert_eq!(ChatRef::from("@channel"), ChatRef::Username("@channel".to_string()));
        let chat = Chat {
            id: -100,
            chat_type: "group".to_string(),
        };
        assert_eq!(ChatRef::from(&chat).to_string(), "-100");
    }
}
