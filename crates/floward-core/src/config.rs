//! Client configuration.
//!
//! The library never reads the environment; the embedding application builds a
//! [`ClientConfig`] in code or deserializes one. Missing fields take defaults.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::i18n::Locale;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";
const DEFAULT_APP_LOGIN_URI: &str = "floward://login";

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Serving origin of the auth API; also passed to the desktop app as `api_url`.
    pub base_url: Url,
    /// Custom-scheme URI the desktop app listens on.
    pub app_login_uri: Url,
    /// Where the browser goes after a successful login.
    pub dashboard_path: String,
    /// Resend cooldown after a verification code was sent.
    pub countdown_seconds: u32,
    pub min_password_length: usize,
    pub notification_ttl_ms: u64,
    pub redirect_delay_ms: u64,
    pub register_switch_delay_ms: u64,
    /// Requests have no timeout unless set.
    pub request_timeout_ms: Option<u64>,
    pub locale: Locale,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("Valid default base URL"),
            app_login_uri: Url::parse(DEFAULT_APP_LOGIN_URI).expect("Valid default app URI"),
            dashboard_path: "/dashboard".to_string(),
            countdown_seconds: 60,
            min_password_length: 6,
            notification_ttl_ms: 5_000,
            redirect_delay_ms: 1_500,
            register_switch_delay_ms: 1_500,
            request_timeout_ms: None,
            locale: Locale::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub fn register_switch_delay(&self) -> Duration {
        Duration::from_millis(self.register_switch_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// `scheme://host[:port]` of the API.
    pub fn origin(&self) -> String {
        self.base_url.origin().ascii_serialization()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ClientConfig = serde_json::from_str(
            r#"{ "base_url": "https://sync.example.com/app/", "locale": "zh-cn" }"#,
        )
        .unwrap();

        assert_eq!(config.origin(), "https://sync.example.com");
        assert_eq!(config.locale, Locale::ZhCn);
        assert_eq!(config.countdown_seconds, 60);
        assert_eq!(config.app_login_uri.as_str(), "floward://login");
        assert_eq!(config.redirect_delay(), Duration::from_millis(1_500));
        assert_eq!(config.request_timeout(), None);
    }
}
