//! Registration submission.

use floward_shared::EMAIL_ALREADY_REGISTERED;
use floward_shared::dto::RegisterRequest;
use floward_shared::routes;

use super::busy::{BusyGuard, Control};
use super::{AuthController, Outcome};
use crate::domain::{FormMode, Notification, is_email_shaped};
use crate::error::ClientError;
use crate::i18n::MessageKey;

/// Local checks, in the order the user sees them.
fn validate_registration(
    email: &str,
    password: &str,
    confirm: &str,
    min_password_length: usize,
) -> Result<(), ClientError> {
    if email.is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(ClientError::Validation(MessageKey::MissingFields));
    }
    if password != confirm {
        return Err(ClientError::Validation(MessageKey::PasswordMismatch));
    }
    if password.chars().count() < min_password_length {
        return Err(ClientError::Validation(MessageKey::PasswordTooShort {
            min: min_password_length,
        }));
    }
    if !is_email_shaped(email) {
        return Err(ClientError::Validation(MessageKey::InvalidEmail));
    }
    Ok(())
}

impl AuthController {
    pub(super) async fn handle_register(&self) -> Outcome {
        let registered = {
            let Some(_busy) = BusyGuard::engage(&self.state, Control::RegisterSubmit) else {
                return Outcome::Ignored;
            };
            self.register().await
        };

        match registered {
            Ok(email) => {
                self.ports
                    .clock
                    .sleep(self.config.register_switch_delay())
                    .await;
                self.with_state(|s| {
                    s.form.switch_form(FormMode::Login);
                    s.fields.login_email = email;
                });
                Outcome::Registered
            }
            Err(err) => {
                if err.is_rejection(EMAIL_ALREADY_REGISTERED) {
                    tracing::info!("Registration rejected: email already registered");
                    self.notify(Notification::error(
                        self.text(MessageKey::EmailAlreadyRegistered),
                    ));
                } else {
                    self.report(&err, MessageKey::RegisterFailed);
                }
                Outcome::Failed(err)
            }
        }
    }

    async fn register(&self) -> Result<String, ClientError> {
        let (email, password, confirm) = self.with_state(|s| {
            (
                s.fields.register_email.clone(),
                s.fields.register_password.clone(),
                s.fields.register_confirm_password.clone(),
            )
        });
        validate_registration(&email, &password, &confirm, self.config.min_password_length)?;

        let request = RegisterRequest {
            email: email.clone(),
            password,
        };
        self.post(routes::REGISTER, &request).await?;

        tracing::info!("Registration accepted");
        self.notify(Notification::success(self.text(MessageKey::RegisterSucceeded)));
        Ok(email)
    }
}
