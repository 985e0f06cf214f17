//! 框架最小配置：token、API URL、日志路径，以及翻译目录。
//! 与外部交互：从环境变量 BOT_TOKEN、TELEGRAM_API_URL、LOG_FILE、LOCALES_PATH、DEFAULT_LOCALE、I18N_DOMAIN 加载。

use anyhow::Result;
use std::env;
use tracing::error;

pub const DEFAULT_LOCALES_PATH: &str = "locales";
pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_I18N_DOMAIN: &str = "bot";

/// Telegram Bot 最小配置（Telegram 接入、日志与 i18n）。
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
    /// `<locales_path>/<locale>/LC_MESSAGES/<i18n_domain>.mo`
    pub locales_path: String,
    pub default_locale: String,
    pub i18n_domain: String,
}

impl TelegramConfig {
    /// 从环境变量加载：BOT_TOKEN 必填，其余可选。
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?;
        let mut config = Self::with_token(bot_token);
        config.telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        config.log_file = env::var("LOG_FILE").ok();
        if let Ok(path) = env::var("LOCALES_PATH") {
            config.locales_path = path;
        }
        if let Ok(locale) = env::var("DEFAULT_LOCALE") {
            config.default_locale = locale;
        }
        if let Ok(domain) = env::var("I18N_DOMAIN") {
            config.i18n_domain = domain;
        }
        Ok(config)
    }

    /// 使用给定 token 构造，其余为默认值。
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: None,
            locales_path: DEFAULT_LOCALES_PATH.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            i18n_domain: DEFAULT_I18N_DOMAIN.to_string(),
        }
    }

    /// 构造 teloxide Bot；API URL 无效时记录错误并使用默认地址。
    pub fn build_bot(&self) -> teloxide::Bot {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match &self.telegram_api_url {
            Some(url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            },
            None => bot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_token() {
        let config = TelegramConfig::with_token("test_token".to_string());
        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
        assert!(config.log_file.is_none());
        assert_eq!(config.locales_path, "locales");
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.i18n_domain, "bot");
    }

    #[test]
    fn test_build_bot_with_api_url() {
        let mut config = TelegramConfig::with_token("123:abc".to_string());
        config.telegram_api_url = Some("http://localhost:8081/".to_string());
        assert_eq!(config.build_bot().api_url().as_str(), "http://localhost:8081/");

        config.telegram_api_url = Some("not a url".to_string());
        assert_eq!(config.build_bot().api_url().as_str(), "https://api.telegram.org/");
    }
}
