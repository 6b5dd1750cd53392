//! Verification-code requests and the resend countdown.

use std::time::Duration;

use floward_shared::dto::SendCodeRequest;
use floward_shared::routes;

use super::busy::{BusyGuard, Control};
use super::{AuthController, Outcome};
use crate::domain::{Notification, is_email_shaped};
use crate::error::ClientError;
use crate::i18n::MessageKey;

impl AuthController {
    pub(super) async fn send_verification_code(&self) -> Outcome {
        let (email, remaining) =
            self.with_state(|s| (s.fields.login_email.clone(), s.countdown.remaining()));
        if remaining > 0 {
            tracing::debug!(remaining, "Resend countdown still running");
            return Outcome::Ignored;
        }

        let Some(_busy) = BusyGuard::engage(&self.state, Control::SendCode) else {
            return Outcome::Ignored;
        };

        let invalid = if email.is_empty() {
            Some(MessageKey::MissingFields)
        } else if !is_email_shaped(&email) {
            Some(MessageKey::InvalidEmail)
        } else {
            None
        };
        if let Some(key) = invalid {
            let err = ClientError::Validation(key);
            self.report(&err, MessageKey::SendCodeFailed);
            return Outcome::Failed(err);
        }

        match self
            .post(routes::SEND_VERIFICATION_CODE, &SendCodeRequest { email })
            .await
        {
            Ok(_) => {
                self.with_state(|s| s.countdown.start(self.config.countdown_seconds));
                tracing::info!(
                    cooldown_secs = self.config.countdown_seconds,
                    "Verification code sent"
                );
                self.notify(Notification::success(self.text(MessageKey::CodeSent)));
                Outcome::CodeSent
            }
            Err(err) => {
                self.report(&err, MessageKey::SendCodeFailed);
                Outcome::Failed(err)
            }
        }
    }

    /// One second of the resend countdown elapsed. Returns the seconds left.
    pub fn tick_countdown(&self) -> u32 {
        let (was_running, remaining) =
            self.with_state(|s| (!s.countdown.can_send(), s.countdown.tick()));
        if was_running && remaining == 0 {
            tracing::debug!("Verification code can be requested again");
        }
        remaining
    }

    /// Drive the countdown once per second until it reaches 0.
    pub async fn run_countdown(&self) {
        while self.with_state(|s| s.countdown.remaining()) > 0 {
            self.ports.clock.sleep(Duration::from_secs(1)).await;
            self.tick_countdown();
        }
    }

    /// Label of the send-code control in the configured locale.
    pub fn send_code_label(&self) -> String {
        self.with_state(|s| s.send_code_label(self.config.locale))
    }
}
