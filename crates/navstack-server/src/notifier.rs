//! Best-effort outbound notification sinks.
//!
//! After an insert is committed to the store, the server announces it to
//! a Telegram chat and a generic webhook. Both sinks are skipped when
//! unconfigured, and a send failure is logged and swallowed: the primary
//! write already succeeded and must never be rolled back or reported as
//! failed because a notification could not be delivered.

use serde::Serialize;

use navstack_core::NotificationEvent;

use crate::config::ServerConfig;

/// Telegram bot credentials.
#[derive(Debug, Clone)]
struct TelegramSink {
    bot_token: String,
    chat_id: String,
}

/// Webhook payload; `navigation_url` is the wire name existing
/// receivers expect for the directory's public URL.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    title: &'a str,
    logo: &'a str,
    url: &'a str,
    description: &'a str,
    navigation_url: Option<&'a str>,
}

/// Outbound notification sinks.
#[derive(Debug)]
pub struct Notifier {
    client: reqwest::Client,
    telegram: Option<TelegramSink>,
    webhook_url: Option<String>,
    navigation_url: Option<String>,
}

impl Notifier {
    /// Build the sinks from configuration. Telegram requires both the
    /// bot token and the chat id.
    pub fn from_config(config: &ServerConfig) -> Self {
        let telegram = match (&config.telegram_bot_token, &config.telegram_chat_id) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramSink {
                bot_token: bot_token.clone(),
                chat_id: chat_id.clone(),
            }),
            _ => None,
        };

        Self {
            client: reqwest::Client::new(),
            telegram,
            webhook_url: config.webhook_url.clone(),
            navigation_url: config.navigation_url.clone(),
        }
    }

    /// Announce a committed insert on every configured sink.
    pub async fn announce(&self, event: &NotificationEvent) {
        if let Err(err) = self.send_telegram(event).await {
            tracing::warn!(error = %err, "telegram notification failed");
        }
        if let Err(err) = self.send_webhook(event).await {
            tracing::warn!(error = %err, "webhook notification failed");
        }
    }

    async fn send_telegram(&self, event: &NotificationEvent) -> Result<(), reqwest::Error> {
        let Some(telegram) = &self.telegram else {
            return Ok(());
        };

        let mut text = format!(
            "<b>Navigation directory update</b>\nTitle: {}\nLogo: {}\nURL: {}\nDescription: {}",
            event.title, event.logo, event.url, event.description
        );
        if let Some(navigation_url) = &self.navigation_url {
            text.push_str(&format!("\nDirectory: {navigation_url}"));
        }

        let url = format!(
            "https://api.telegram.org/bot{}/sendMessage",
            telegram.bot_token
        );
        self.client
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": telegram.chat_id,
                "text": text,
                "parse_mode": "HTML",
            }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn send_webhook(&self, event: &NotificationEvent) -> Result<(), reqwest::Error> {
        let Some(webhook_url) = &self.webhook_url else {
            return Ok(());
        };

        let payload = WebhookPayload {
            title: &event.title,
            logo: &event.logo,
            url: &event.url,
            description: &event.description,
            navigation_url: self.navigation_url.as_deref(),
        };
        self.client
            .post(webhook_url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event() -> NotificationEvent {
        NotificationEvent {
            title: "Example".to_string(),
            logo: "https://e.com/l.png".to_string(),
            url: "https://e.com".to_string(),
            description: "demo".to_string(),
            date: Utc::now(),
        }
    }

    #[test]
    fn telegram_sink_needs_both_token_and_chat_id() {
        let mut config = ServerConfig {
            telegram_bot_token: Some("bot".to_string()),
            ..ServerConfig::default()
        };
        assert!(Notifier::from_config(&config).telegram.is_none());

        config.telegram_chat_id = Some("42".to_string());
        assert!(Notifier::from_config(&config).telegram.is_some());
    }

    #[tokio::test]
    async fn unconfigured_sinks_are_skipped_without_error() {
        let notifier = Notifier::from_config(&ServerConfig::default());
        // No sinks configured: announce must be a no-op, not a failure.
        notifier.announce(&event()).await;
    }

    #[test]
    fn webhook_payload_uses_the_stable_wire_names() {
        let e = event();
        let payload = WebhookPayload {
            title: &e.title,
            logo: &e.logo,
            url: &e.url,
            description: &e.description,
            navigation_url: Some("https://nav.example"),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["title"], "Example");
        assert_eq!(json["navigation_url"], "https://nav.example");
    }
}
