//! Adapters from Telegram (teloxide) types to hairydogm_core types.
//! Depends only on teloxide and hairydogm_core type definitions.

use hairydogm_core::{CallbackQuery, Chat, ToCoreCallbackQuery, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            is_bot: self.0.is_bot,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
            language_code: self.0.language_code.clone(),
        }
    }
}

/// Wraps a teloxide Chat for conversion to core [`Chat`].
pub struct TelegramChatWrapper<'a>(pub &'a teloxide::types::Chat);

impl<'a> TelegramChatWrapper<'a> {
    pub fn to_core(&self) -> Chat {
        let chat = self.0;
        let chat_type = if chat.is_private() {
            "private"
        } else if chat.is_supergroup() {
            "supergroup"
        } else if chat.is_group() {
            "group"
        } else {
            "channel"
        };
        Chat {
            id: chat.id.0,
            chat_type: chat_type.to_string(),
        }
    }
}

/// Wraps a teloxide CallbackQuery for conversion to core [`CallbackQuery`].
///
/// `chat` and `message_id` come from the message the button was attached to, and are `None` for
/// buttons under inline-mode messages.
pub struct TelegramCallbackQueryWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> ToCoreCallbackQuery for TelegramCallbackQueryWrapper<'a> {
    fn to_core(&self) -> CallbackQuery {
        let query = self.0;
        let message = query.message.as_ref();
        CallbackQuery {
            id: query.id.to_string(),
            from: TelegramUserWrapper(&query.from).to_core(),
            chat: message.map(|m| TelegramChatWrapper(m.chat()).to_core()),
            message_id: message.map(|m| m.id().0),
            data: query.data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_json() -> serde_json::Value {
        serde_json::json!({
            "id": 123,
            "is_bot": false,
            "first_name": "Test",
            "last_name": "User",
            "username": "testuser",
            "language_code": "uk"
        })
    }

    /// **Test: TelegramUserWrapper converts teloxide User to core User with id, names and language code.**
    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert!(!core_user.is_bot);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
        assert_eq!(core_user.language_code, Some("en".to_string()));
    }

    /// **Test: callback query from a chat message keeps chat, message id and data.**
    #[test]
    fn test_callback_query_with_message() {
        let query: teloxide::types::CallbackQuery = serde_json::from_value(serde_json::json!({
            "id": "4382bfdwdsb323b2d9",
            "from": user_json(),
            "message": {
                "message_id": 77,
                "date": 1_700_000_000,
                "chat": { "id": 123, "type": "private", "first_name": "Test" },
                "from": { "id": 999, "is_bot": true, "first_name": "Menu" },
                "text": "Pick one"
            },
            "chat_instance": "-8620911046473960154",
            "data": "pick:1"
        }))
        .unwrap();

        let core = TelegramCallbackQueryWrapper(&query).to_core();

        assert_eq!(core.id, "4382bfdwdsb323b2d9");
        assert_eq!(core.from.language_code.as_deref(), Some("uk"));
        let chat = core.chat.unwrap();
        assert_eq!(chat.id, 123);
        assert_eq!(chat.chat_type, "private");
        assert_eq!(core.message_id, Some(77));
        assert_eq!(core.data.as_deref(), Some("pick:1"));
    }

    /// **Test: callback query from an inline-mode message has no chat.**
    #[test]
    fn test_callback_query_inline_message() {
        let query: teloxide::types::CallbackQuery = serde_json::from_value(serde_json::json!({
            "id": "1",
            "from": user_json(),
            "inline_message_id": "AAAAAAAAAA",
            "chat_instance": "1",
            "data": "pick:2"
        }))
        .unwrap();

        let core = TelegramCallbackQueryWrapper(&query).to_core();

        assert!(core.chat.is_none());
        assert!(core.message_id.is_none());
        assert_eq!(core.data.as_deref(), Some("pick:2"));
    }
}
