//! Menu bot: `/start` shows an inline keyboard whose buttons carry packed callback data.
//! Presses are routed through a callback data filter, replies are translated for the user's
//! language, and "typing..." is shown while a slow answer is prepared.
//!
//! Env: BOT_TOKEN, optional LOCALES_PATH (default `locales`), DEFAULT_LOCALE, I18N_DOMAIN, LOG_FILE.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use hairydogm::callback_data::CallbackData;
use hairydogm::chat_action::ChatActionSender;
use hairydogm::i18n::{gettext, lazy_gettext, ngettext, I18n, LazyText};
use hairydogm::keyboard::InlineKeyboardBuilder;
use hairydogm::telegram::{callback_filter, TelegramBotAdapter, TelegramConfig};
use serde::{Deserialize, Serialize};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, MaybeInaccessibleMessage};
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MenuAction {
    Hello,
    Apple,
    Think,
}

/// Callback data of the menu buttons, packed as `menu:<action>:<apples>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Menu {
    action: MenuAction,
    apples: u32,
}

impl CallbackData for Menu {
    const PREFIX: &'static str = "menu";
}

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Commands:")]
enum Command {
    #[command(description = "show the menu")]
    Start,
}

/// Button labels, declared before any user locale is known.
fn labels() -> [(LazyText, MenuAction); 3] {
    [
        (lazy_gettext("Say hello"), MenuAction::Hello),
        (lazy_gettext("Add an apple"), MenuAction::Apple),
        (lazy_gettext("Think slowly"), MenuAction::Think),
    ]
}

/// Renders the menu for the current locale; `apples` is carried in every button.
fn menu_keyboard(apples: u32) -> Result<InlineKeyboardMarkup> {
    let mut builder = InlineKeyboardBuilder::new();
    for (label, action) in labels() {
        builder.callback_button(label.resolve()?, &Menu { action, apples })?;
    }
    builder.adjust(&[2, 1], false)?;
    Ok(builder.as_markup())
}

/// Runs `fut` with `i18n` current and the locale negotiated from the user's language code.
async fn in_user_locale<F: Future>(i18n: &Arc<I18n>, user: &teloxide::types::User, fut: F) -> F::Output {
    let locale = i18n.negotiate_locale(user.language_code.as_deref());
    let scoped = Arc::clone(i18n);
    Arc::clone(i18n)
        .context(async move { scoped.use_locale(locale, fut).await })
        .await
}

#[instrument(skip(bot, msg, i18n))]
async fn on_command(bot: Bot, msg: Message, _cmd: Command, i18n: Arc<I18n>) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    info!(user_id = user.id.0, chat_id = msg.chat.id.0, "Showing menu");
    let (text, keyboard) = in_user_locale(&i18n, user, async {
        anyhow::Ok((gettext("Choose an action:")?, menu_keyboard(0)?))
    })
    .await?;
    bot.send_message(msg.chat.id, text)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

#[instrument(skip(bot, query, i18n, actions))]
async fn on_menu(
    bot: Bot,
    query: CallbackQuery,
    menu: Menu,
    i18n: Arc<I18n>,
    actions: Arc<TelegramBotAdapter>,
) -> Result<()> {
    bot.answer_callback_query(query.id.clone()).await?;
    let Some(chat_id) = query.message.as_ref().map(MaybeInaccessibleMessage::chat).map(|c| c.id)
    else {
        return Ok(());
    };

    let name = query.from.first_name.clone();
    let (text, keyboard) = in_user_locale(&i18n, &query.from, async {
        let apples = match menu.action {
            MenuAction::Apple => menu.apples.saturating_add(1),
            _ => menu.apples,
        };
        let text = match menu.action {
            MenuAction::Hello => gettext("Hello, {name}!")?.replace("{name}", &name),
            MenuAction::Apple => ngettext("You have {n} apple", "You have {n} apples", apples.into())?
                .replace("{n}", &apples.to_string()),
            MenuAction::Think => {
                ChatActionSender::typing(actions, chat_id.0)
                    .run(tokio::time::sleep(Duration::from_secs(3)))
                    .await?;
                gettext("Done thinking.")?
            }
        };
        anyhow::Ok((text, menu_keyboard(apples)?))
    })
    .await?;

    bot.send_message(chat_id, text).reply_markup(keyboard).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = TelegramConfig::from_env()?;
    hairydogm::init_tracing(config.log_file.as_deref())?;

    let i18n = Arc::new(I18n::new(
        &config.locales_path,
        &config.default_locale,
        &config.i18n_domain,
    )?);
    let bot = config.build_bot();
    let actions = Arc::new(TelegramBotAdapter::new(bot.clone()));
    info!(
        version = hairydogm::VERSION,
        locales = ?i18n.available_locales(),
        filter = %Menu::filter(),
        "Menu bot started"
    );

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(on_command),
        )
        .branch(
            Update::filter_callback_query()
                .filter_map(callback_filter(Menu::filter()))
                .endpoint(on_menu),
        );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![i18n, actions])
        .default_handler(|update| async move {
            debug!(update_id = ?update.id, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the menu bot",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
