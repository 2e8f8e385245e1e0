use crate::error::ReportError;
use crate::telegram::Notifier;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::{LinkPreviewOptions, Recipient};

/// Sends plain-text messages to a single chat.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramNotifier {
    pub fn new(
        bot_token: &str,
        chat_id: &str,
        api_url: reqwest::Url,
        timeout: Duration,
    ) -> Result<Self, ReportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ReportError::ClientBuild)?;
        let bot = Bot::with_client(bot_token, client).set_api_url(api_url);

        Ok(Self {
            bot,
            recipient: parse_recipient(chat_id),
        })
    }

    pub async fn send(&self, text: &str) -> Result<(), ReportError> {
        let msg = self
            .bot
            .send_message(self.recipient.clone(), text)
            .link_preview_options(disabled_link_preview())
            .await?;
        tracing::info!(message_id = msg.id.0, "Report delivered to Telegram");
        Ok(())
    }
}

impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), ReportError> {
        self.send(text).await
    }
}

/// Numeric ids address users and groups, anything else is taken as a public
/// `@channel` username.
fn parse_recipient(chat_id: &str) -> Recipient {
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.to_string()),
    }
}

fn disabled_link_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}
