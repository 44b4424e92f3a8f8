use std::collections::HashMap;
use std::sync::Arc;

use pc_assembly::feedback::{Debouncer, Lifetimes, ToastKind};
use teloxide::prelude::*;
use teloxide::types::MessageId;
use teloxide::RequestError;
use tokio::sync::Mutex;

/// Self-deleting popup messages, one visible per chat.
pub struct Toasts {
    bot: Bot,
    lifetimes: Lifetimes,
    visible: Arc<Mutex<HashMap<ChatId, MessageId>>>,
    dismissals: Debouncer<ChatId>,
    pulses: Debouncer<ChatId>,
}

impl Toasts {
    pub fn new(bot: Bot, lifetimes: Lifetimes) -> Self {
        Self {
            bot,
            lifetimes,
            visible: Arc::new(Mutex::new(HashMap::new())),
            dismissals: Debouncer::new(),
            pulses: Debouncer::new(),
        }
    }

    /// Replace whatever popup the chat has with `text`.
    pub async fn show(&self, chat: ChatId, kind: ToastKind, text: &str) -> Result<(), RequestError> {
        self.dismiss_now(chat).await;

        let sent = self
            .bot
            .send_message(chat, text)
            .disable_notification(true)
            .await?;
        let id = sent.id;
        self.visible.lock().await.insert(chat, id);

        let bot = self.bot.clone();
        let visible = Arc::clone(&self.visible);
        self.dismissals
            .arm(chat, self.lifetimes.of(kind), move || async move {
                {
                    let mut visible = visible.lock().await;
                    if visible.get(&chat) == Some(&id) {
                        visible.remove(&chat);
                    }
                }
                delete_quietly(&bot, chat, id).await;
            })
            .await;
        Ok(())
    }

    /// Drop the visible popup, if any, without waiting for its timer.
    pub async fn dismiss_now(&self, chat: ChatId) {
        self.dismissals.disarm(&chat).await;
        let previous = self.visible.lock().await.remove(&chat);
        if let Some(id) = previous {
            delete_quietly(&self.bot, chat, id).await;
        }
    }

    /// Swap `message` to `highlighted` and restore `normal` after the
    /// pulse lifetime.
    pub async fn pulse(&self, chat: ChatId, message: MessageId, highlighted: String, normal: String) {
        if let Err(e) = self.bot.edit_message_text(chat, message, highlighted).await {
            log::debug!("pulse skipped in {chat}: {e}");
            return;
        }
        let bot = self.bot.clone();
        self.pulses
            .arm(chat, self.lifetimes.pulse, move || async move {
                if let Err(e) = bot.edit_message_text(chat, message, normal).await {
                    log::debug!("pulse restore failed in {chat}: {e}");
                }
            })
            .await;
    }
}

async fn delete_quietly(bot: &Bot, chat: ChatId, id: MessageId) {
    if let Err(e) = bot.delete_message(chat, id).await {
        log::debug!("could not delete popup {} in {chat}: {e}", id.0);
    }
}
