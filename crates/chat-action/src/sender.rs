//! [`ChatActionSender`]: repeats a chat action until stopped.
//!
//! Telegram shows a chat action for about five seconds, so a long reply (LLM call, file upload)
//! needs the action re-sent periodically. The worker runs as a separate tokio task:
//!
//! 1. `get_me` to make sure the bot is usable ([`ChatActionError::BotNotStarted`] otherwise)
//! 2. wait `initial_sleep`
//! 3. send the action, then wait what is left of `interval`; repeat until closed
//!
//! Both waits end early when the sender is stopped.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use hairydogm_core::{Bot, ChatAction, ChatRef};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::error::{ChatActionError, Result};

/// Delay between two consecutive actions.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
/// Delay before the first action.
pub const DEFAULT_INITIAL_SLEEP: Duration = Duration::ZERO;

struct Worker {
    close: watch::Sender<bool>,
    handle: JoinHandle<Result<()>>,
}

/// Sends `action` to `chat` every `interval` while running.
///
/// ```ignore
/// let sender = ChatActionSender::typing(bot, chat_id);
/// let reply = sender.run(generate_reply(&prompt)).await?;
/// ```
pub struct ChatActionSender<B: Bot + 'static> {
    bot: Arc<B>,
    chat: ChatRef,
    message_thread_id: Option<i32>,
    action: ChatAction,
    interval: Duration,
    initial_sleep: Duration,
    worker: Mutex<Option<Worker>>,
}

macro_rules! action_constructors {
    ($($name:ident => $action:ident,)*) => {
        $(
            pub fn $name(bot: Arc<B>, chat: impl Into<ChatRef>) -> Self {
                Self::new(bot, chat).with_action(ChatAction::$action)
            }
        )*
    };
}

impl<B: Bot + 'static> ChatActionSender<B> {
    /// A `typing` sender with the default interval and no initial sleep.
    pub fn new(bot: Arc<B>, chat: impl Into<ChatRef>) -> Self {
        Self {
            bot,
            chat: chat.into(),
            message_thread_id: None,
            action: ChatAction::Typing,
            interval: DEFAULT_INTERVAL,
            initial_sleep: DEFAULT_INITIAL_SLEEP,
            worker: Mutex::new(None),
        }
    }

    // One constructor per action, e.g. `ChatActionSender::upload_photo(bot, chat)`.
    action_constructors! {
        typing => Typing,
        upload_photo => UploadPhoto,
        record_video => RecordVideo,
        upload_video => UploadVideo,
        record_voice => RecordVoice,
        upload_voice => UploadVoice,
        upload_document => UploadDocument,
        choose_sticker => ChooseSticker,
        find_location => FindLocation,
        record_video_note => RecordVideoNote,
        upload_video_note => UploadVideoNote,
    }

    pub fn with_action(mut self, action: ChatAction) -> Self {
        self.action = action;
        self
    }

    /// Sends the action inside a forum topic.
    pub fn with_message_thread_id(mut self, message_thread_id: Option<i32>) -> Self {
        self.message_thread_id = message_thread_id;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_initial_sleep(mut self, initial_sleep: Duration) -> Self {
        self.initial_sleep = initial_sleep;
        self
    }

    pub fn chat(&self) -> &ChatRef {
        &self.chat
    }

    pub fn action(&self) -> ChatAction {
        self.action
    }

    pub fn message_thread_id(&self) -> Option<i32> {
        self.message_thread_id
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn initial_sleep(&self) -> Duration {
        self.initial_sleep
    }

    /// True between [`start`](Self::start) and [`stop`](Self::stop), even if the worker has
    /// already ended on its own.
    pub async fn running(&self) -> bool {
        self.worker.lock().await.is_some()
    }

    /// Spawns the worker. Fails with [`ChatActionError::AlreadyRunning`] when started twice.
    pub async fn start(&self) -> Result<()> {
        let mut worker = self.worker.lock().await;
        if worker.is_some() {
            return Err(ChatActionError::AlreadyRunning);
        }

        let (close, closed) = watch::channel(false);
        let task = WorkerTask {
            bot: Arc::clone(&self.bot),
            chat: self.chat.clone(),
            message_thread_id: self.message_thread_id,
            action: self.action,
            interval: self.interval,
            initial_sleep: self.initial_sleep,
            closed,
        };
        let handle = tokio::spawn(task.run());
        *worker = Some(Worker { close, handle });
        Ok(())
    }

    /// Signals the worker to close and waits for it. Returns the worker's outcome; a no-op when
    /// not running.
    pub async fn stop(&self) -> Result<()> {
        let mut worker = self.worker.lock().await;
        let Some(Worker { close, handle }) = worker.take() else {
            return Ok(());
        };
        // The worker may have ended already and dropped its receiver.
        let _ = close.send(true);
        handle.await?
    }

    /// Keeps the action running while `fut` executes.
    ///
    /// Fails only when the sender cannot be started; a worker failure is logged and `fut`'s
    /// output is returned anyway.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output> {
        self.start().await?;
        let output = fut.await;
        if let Err(e) = self.stop().await {
            warn!(error = %e, chat = %self.chat, action = %self.action, "chat action sender failed");
        }
        Ok(output)
    }
}

impl<B: Bot + 'static> Drop for ChatActionSender<B> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.get_mut().take() {
            worker.handle.abort();
        }
    }
}

/// Owned state moved into the spawned worker.
struct WorkerTask<B: Bot + 'static> {
    bot: Arc<B>,
    chat: ChatRef,
    message_thread_id: Option<i32>,
    action: ChatAction,
    interval: Duration,
    initial_sleep: Duration,
    closed: watch::Receiver<bool>,
}

impl<B: Bot + 'static> WorkerTask<B> {
    async fn run(mut self) -> Result<()> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(ChatActionError::BotNotStarted)?;

        debug!(
            action = %self.action,
            chat = %self.chat,
            bot_id = me.id,
            "started chat action sender"
        );
        let result = self.send_loop(me.id).await;
        debug!(
            action = %self.action,
            chat = %self.chat,
            bot_id = me.id,
            "finished chat action sender"
        );
        result
    }

    async fn send_loop(&mut self, bot_id: i64) -> Result<()> {
        let mut counter: u64 = 0;
        self.wait(self.initial_sleep).await;

        while !self.is_closed() {
            let started = Instant::now();
            debug!(
                action = %self.action,
                chat = %self.chat,
                bot_id,
                sent = counter,
                "sending chat action"
            );
            if let Err(e) = self
                .bot
                .send_chat_action(&self.chat, self.action, self.message_thread_id)
                .await
            {
                warn!(error = %e, action = %self.action, chat = %self.chat, "failed to send chat action");
                return Err(ChatActionError::Bot(e));
            }
            counter += 1;

            self.wait(self.interval.saturating_sub(started.elapsed()))
                .await;
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Sleeps for `duration` or until the sender is closed.
    async fn wait(&mut self, duration: Duration) {
        tokio::select! {
            _ = sleep(duration) => {}
            _ = close_signal(&mut self.closed) => {}
        }
    }
}

/// Resolves once `true` is sent or the sender side is dropped.
async fn close_signal(closed: &mut watch::Receiver<bool>) {
    loop {
        let is_closed = *closed.borrow_and_update();
        if is_closed || closed.changed().await.is_err() {
            return;
        }
    }
}
