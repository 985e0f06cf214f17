//! Integration tests for [`chat_action::ChatActionSender`].
//!
//! Time is paused (`start_paused = true`), so intervals are exact and the tests run instantly.

mod common;

use std::time::Duration;

use chat_action::{ChatAction, ChatActionError, ChatActionSender, DEFAULT_INTERVAL};
use common::mock_bot::MockBot;
use hairydogm_core::ChatRef;
use tokio::time::{sleep, Instant};

fn offsets(bot: &MockBot, t0: Instant) -> Vec<Duration> {
    bot.records().iter().map(|r| r.at - t0).collect()
}

/// **Test: typing is sent right away and then every DEFAULT_INTERVAL until stopped.**
#[tokio::test(start_paused = true)]
async fn test_sends_every_interval() {
    let bot = MockBot::new();
    let sender = ChatActionSender::typing(bot.clone(), 1001i64);
    let t0 = Instant::now();

    sender.start().await.unwrap();
    assert!(sender.running().await);
    sleep(Duration::from_secs(12)).await;
    sender.stop().await.unwrap();

    assert!(!sender.running().await);
    assert_eq!(
        offsets(&bot, t0),
        vec![Duration::ZERO, DEFAULT_INTERVAL, DEFAULT_INTERVAL * 2]
    );
    let record = &bot.records()[0];
    assert_eq!(record.chat, ChatRef::Id(1001));
    assert_eq!(record.action, ChatAction::Typing);
    assert_eq!(record.message_thread_id, None);

    // No more actions after stop.
    sleep(Duration::from_secs(30)).await;
    assert_eq!(bot.sent(), 3);
}

/// **Test: initial_sleep delays the first action; interval is configurable.**
#[tokio::test(start_paused = true)]
async fn test_initial_sleep_and_interval() {
    let bot = MockBot::new();
    let sender = ChatActionSender::new(bot.clone(), 7i64)
        .with_initial_sleep(Duration::from_secs(2))
        .with_interval(Duration::from_secs(1));
    let t0 = Instant::now();

    sender.start().await.unwrap();
    sleep(Duration::from_millis(3500)).await;
    sender.stop().await.unwrap();

    assert_eq!(
        offsets(&bot, t0),
        vec![Duration::from_secs(2), Duration::from_secs(3)]
    );
}

/// **Test: stop interrupts the initial sleep without sending anything.**
#[tokio::test(start_paused = true)]
async fn test_stop_interrupts_wait() {
    let bot = MockBot::new();
    let sender =
        ChatActionSender::typing(bot.clone(), 7i64).with_initial_sleep(Duration::from_secs(60));
    let t0 = Instant::now();

    sender.start().await.unwrap();
    sleep(Duration::from_secs(1)).await;
    sender.stop().await.unwrap();

    assert!(t0.elapsed() < Duration::from_secs(2));
    assert_eq!(bot.sent(), 0);
}

/// **Test: starting twice fails; the sender can be restarted after stop.**
#[tokio::test(start_paused = true)]
async fn test_already_running() {
    let bot = MockBot::new();
    let sender = ChatActionSender::typing(bot.clone(), 7i64);

    sender.start().await.unwrap();
    sleep(Duration::from_secs(1)).await;
    assert!(matches!(
        sender.start().await,
        Err(ChatActionError::AlreadyRunning)
    ));
    sender.stop().await.unwrap();

    sender.start().await.unwrap();
    sleep(Duration::from_secs(1)).await;
    sender.stop().await.unwrap();
    assert_eq!(bot.sent(), 2);
}

/// **Test: stop on a sender that is not running is a no-op.**
#[tokio::test(start_paused = true)]
async fn test_stop_when_not_running() {
    let sender = ChatActionSender::typing(MockBot::new(), 7i64);
    assert!(!sender.running().await);
    sender.stop().await.unwrap();
    sender.stop().await.unwrap();
}

/// **Test: the worker ends with BotNotStarted when get_me fails.**
#[tokio::test(start_paused = true)]
async fn test_bot_not_started() {
    let bot = MockBot::not_started();
    let sender = ChatActionSender::typing(bot.clone(), 7i64);

    sender.start().await.unwrap();
    sleep(Duration::from_secs(1)).await;
    // Still considered running until stopped.
    assert!(sender.running().await);
    assert!(matches!(
        sender.stop().await,
        Err(ChatActionError::BotNotStarted(_))
    ));
    assert_eq!(bot.sent(), 0);
}

/// **Test: a failed send ends the worker and is reported by stop.**
#[tokio::test(start_paused = true)]
async fn test_send_failure_ends_worker() {
    let bot = MockBot::failing_after(1);
    let sender = ChatActionSender::typing(bot.clone(), 7i64).with_interval(Duration::from_secs(1));

    sender.start().await.unwrap();
    sleep(Duration::from_secs(5)).await;
    assert!(matches!(sender.stop().await, Err(ChatActionError::Bot(_))));
    assert_eq!(bot.sent(), 1);
}

/// **Test: run keeps the action alive while the future runs and returns its output.**
#[tokio::test(start_paused = true)]
async fn test_run_scoped() {
    let bot = MockBot::new();
    let sender = ChatActionSender::upload_document(bot.clone(), "@reports");

    let output = sender
        .run(async {
            sleep(Duration::from_secs(7)).await;
            "report.pdf"
        })
        .await
        .unwrap();

    assert_eq!(output, "report.pdf");
    assert!(!sender.running().await);
    assert_eq!(bot.sent(), 2);
    assert!(bot
        .records()
        .iter()
        .all(|r| r.action == ChatAction::UploadDocument
            && r.chat == ChatRef::Username("@reports".to_string())));
}

/// **Test: run returns the output even when the worker failed.**
#[tokio::test(start_paused = true)]
async fn test_run_with_failed_worker() {
    let sender = ChatActionSender::typing(MockBot::not_started(), 7i64);
    let output = sender.run(async { 5 }).await.unwrap();
    assert_eq!(output, 5);
    assert!(!sender.running().await);
}

/// **Test: dropping a running sender stops its worker.**
#[tokio::test(start_paused = true)]
async fn test_drop_aborts_worker() {
    let bot = MockBot::new();
    let sender = ChatActionSender::typing(bot.clone(), 7i64);
    sender.start().await.unwrap();
    sleep(Duration::from_secs(1)).await;
    drop(sender);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(bot.sent(), 1);
}

/// **Test: named constructors set the action; thread id is passed through.**
#[tokio::test(start_paused = true)]
async fn test_constructors_and_thread_id() {
    let bot = MockBot::new();
    let cases = [
        (ChatActionSender::typing(bot.clone(), 1i64), ChatAction::Typing),
        (ChatActionSender::upload_photo(bot.clone(), 1i64), ChatAction::UploadPhoto),
        (ChatActionSender::record_video(bot.clone(), 1i64), ChatAction::RecordVideo),
        (ChatActionSender::upload_video(bot.clone(), 1i64), ChatAction::UploadVideo),
        (ChatActionSender::record_voice(bot.clone(), 1i64), ChatAction::RecordVoice),
        (ChatActionSender::upload_voice(bot.clone(), 1i64), ChatAction::UploadVoice),
        (ChatActionSender::upload_document(bot.clone(), 1i64), ChatAction::UploadDocument),
        (ChatActionSender::choose_sticker(bot.clone(), 1i64), ChatAction::ChooseSticker),
        (ChatActionSender::find_location(bot.clone(), 1i64), ChatAction::FindLocation),
        (ChatActionSender::record_video_note(bot.clone(), 1i64), ChatAction::RecordVideoNote),
        (ChatActionSender::upload_video_note(bot.clone(), 1i64), ChatAction::UploadVideoNote),
    ];
    for (sender, action) in &cases {
        assert_eq!(sender.action(), *action);
        assert_eq!(sender.interval(), DEFAULT_INTERVAL);
        assert_eq!(sender.initial_sleep(), Duration::ZERO);
    }

    let sender = ChatActionSender::upload_photo(bot.clone(), -100123i64).with_message_thread_id(Some(9));
    sender
        .run(sleep(Duration::from_secs(1)))
        .await
        .unwrap();
    let record = &bot.records()[0];
    assert_eq!(record.action, ChatAction::UploadPhoto);
    assert_eq!(record.chat, ChatRef::Id(-100123));
    assert_eq!(record.message_thread_id, Some(9));
}
