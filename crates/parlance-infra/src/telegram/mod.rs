//! TelegramNotifier -- concrete [`Notifier`] implementation over the
//! Telegram Bot API.
//!
//! Delivery is best-effort by contract: callers log and swallow failures.
//! The bot token is wrapped in [`secrecy::SecretString`] and is never
//! logged or included in `Debug` output. With no token configured the
//! notifier runs in disabled mode and reports `NotifyError::Disabled`.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use parlance_core::notify::Notifier;
use parlance_types::error::NotifyError;

/// Telegram Bot API notifier.
pub struct TelegramNotifier {
    client: reqwest::Client,
    token: Option<SecretString>,
    base_url: String,
}

impl TelegramNotifier {
    /// Create a notifier. `None` token means disabled mode.
    pub fn new(token: Option<SecretString>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            token,
            base_url: "https://api.telegram.org".to_string(),
        }
    }

    /// Whether a delivery token is configured.
    pub fn is_enabled(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
}

impl Notifier for TelegramNotifier {
    async fn notify(&self, chat_id: i64, text: &str) -> Result<(), NotifyError> {
        let token = self.token.as_ref().ok_or(NotifyError::Disabled)?;

        let url = format!("{}/bot{}/sendMessage", self.base_url, token.expose_secret());
        let response = self
            .client
            .post(url)
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Delivery(format!(
                "sendMessage returned {status}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_mode_reports_disabled() {
        let notifier = TelegramNotifier::new(None);
        assert!(!notifier.is_enabled());

        let err = notifier.notify(42, "hello").await.unwrap_err();
        assert!(matches!(err, NotifyError::Disabled));
    }

    #[test]
    fn test_enabled_with_token() {
        let notifier = TelegramNotifier::new(Some(SecretString::from("bot-token")));
        assert!(notifier.is_enabled());
    }

    #[test]
    fn test_send_message_request_shape() {
        let json = serde_json::to_string(&SendMessageRequest {
            chat_id: 42,
            text: "hi",
        })
        .unwrap();
        assert_eq!(json, r#"{"chat_id":42,"text":"hi"}"#);
    }
}
