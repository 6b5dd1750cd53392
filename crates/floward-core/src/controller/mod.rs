//! The auth form controller.
//!
//! [`AuthController`] owns the [`UiState`] and the injected [`Ports`]. UI events
//! come in as [`UiAction`]s through [`AuthController::dispatch`]. The state lock
//! is only held for short synchronous sections, never across an `.await`, so a
//! running countdown and an in-flight request do not block each other.

mod api;
mod busy;
mod login;
mod register;
mod verification;

#[cfg(test)]
mod tests;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use busy::Control;

use crate::config::ClientConfig;
use crate::domain::{
    CodeCountdown, FormField, FormFields, FormMode, FormState, LoginMethod, Notification,
    compute_fingerprint, is_email_shaped, suggested_device_name,
};
use crate::error::ClientError;
use crate::i18n::{Locale, MessageKey};
use crate::ports::{Clock, EnvironmentProbe, HttpClient, KeyValueStore, Navigator, Notifier};

/// Everything the controller talks to.
#[derive(Clone)]
pub struct Ports {
    pub http: Arc<dyn HttpClient>,
    pub storage: Arc<dyn KeyValueStore>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
    pub probe: Arc<dyn EnvironmentProbe>,
}

/// All mutable UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub form: FormState,
    pub fields: FormFields,
    pub countdown: CodeCountdown,
    pub login_busy: bool,
    pub register_busy: bool,
    pub send_code_busy: bool,
    /// Live-validation markers of the register form. Advisory only.
    pub register_email_invalid: bool,
    pub register_confirm_invalid: bool,
}

impl UiState {
    pub fn is_busy(&self, control: Control) -> bool {
        match control {
            Control::LoginSubmit => self.login_busy,
            Control::RegisterSubmit => self.register_busy,
            Control::SendCode => self.send_code_busy,
        }
    }

    fn busy_flag(&mut self, control: Control) -> &mut bool {
        match control {
            Control::LoginSubmit => &mut self.login_busy,
            Control::RegisterSubmit => &mut self.register_busy,
            Control::SendCode => &mut self.send_code_busy,
        }
    }

    pub fn send_code_disabled(&self) -> bool {
        self.send_code_busy || !self.countdown.can_send()
    }

    pub fn send_code_label(&self, locale: Locale) -> String {
        match self.countdown.remaining() {
            0 => locale.render(MessageKey::SendCodeLabel),
            seconds => locale.render(MessageKey::ResendIn { seconds }),
        }
    }
}

/// A user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    SwitchForm(FormMode),
    SwitchLoginMethod(LoginMethod),
    EditField { field: FormField, value: String },
    GenerateDeviceName,
    SendVerificationCode,
    SubmitLogin,
    SubmitRegister,
    DismissNotification,
    CountdownTick,
}

impl UiAction {
    /// Name for logs. Field values are never logged.
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::SwitchForm(_) => "switch_form",
            UiAction::SwitchLoginMethod(_) => "switch_login_method",
            UiAction::EditField { .. } => "edit_field",
            UiAction::GenerateDeviceName => "generate_device_name",
            UiAction::SendVerificationCode => "send_verification_code",
            UiAction::SubmitLogin => "submit_login",
            UiAction::SubmitRegister => "submit_register",
            UiAction::DismissNotification => "dismiss_notification",
            UiAction::CountdownTick => "countdown_tick",
        }
    }
}

/// What a dispatched action ended in.
#[derive(Debug)]
pub enum Outcome {
    /// Local state changed, nothing was sent.
    Updated,
    /// The control was disabled; nothing happened.
    Ignored,
    /// A verification code was sent and the resend countdown set. The countdown
    /// only runs down while [`AuthController::run_countdown`] is driven (e.g. by
    /// `floward_infra::spawn_countdown`); until it reaches 0 the send control
    /// stays disabled.
    CodeSent,
    LoggedIn,
    Registered,
    /// The error has already been shown to the user.
    Failed(ClientError),
}

fn lock(state: &Mutex<UiState>) -> MutexGuard<'_, UiState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Headless controller of the login and registration forms.
#[derive(Clone)]
pub struct AuthController {
    ports: Ports,
    config: Arc<ClientConfig>,
    state: Arc<Mutex<UiState>>,
}

impl AuthController {
    pub fn new(ports: Ports, config: ClientConfig) -> Self {
        Self {
            ports,
            config: Arc::new(config),
            state: Arc::new(Mutex::new(UiState::default())),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Snapshot of the current UI state.
    pub fn state(&self) -> UiState {
        lock(&self.state).clone()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> R {
        f(&mut lock(&self.state))
    }

    /// Page-load work: compute the device fingerprint into the hidden
    /// device-id field. Runs once; later calls keep the cached value.
    pub async fn initialize(&self) {
        if self.with_state(|s| !s.fields.device_id.is_empty()) {
            return;
        }

        let fingerprint = compute_fingerprint(self.ports.probe.as_ref()).await;
        tracing::debug!(fingerprint = %fingerprint, "Device fingerprint computed");

        self.with_state(|s| {
            if s.fields.device_id.is_empty() {
                s.fields.device_id = fingerprint.into_string();
            }
        });
    }

    /// Run the handler bound to `action`.
    pub async fn dispatch(&self, action: UiAction) -> Outcome {
        tracing::debug!(action = action.name(), "Dispatching UI action");

        match action {
            UiAction::SwitchForm(mode) => {
                self.with_state(|s| s.form.switch_form(mode));
                Outcome::Updated
            }
            UiAction::SwitchLoginMethod(method) => {
                self.with_state(|s| s.form.switch_login_method(method, &mut s.fields));
                Outcome::Updated
            }
            UiAction::EditField { field, value } => {
                self.edit_field(field, value);
                Outcome::Updated
            }
            UiAction::GenerateDeviceName => {
                self.generate_device_name();
                Outcome::Updated
            }
            UiAction::SendVerificationCode => self.send_verification_code().await,
            UiAction::SubmitLogin => self.handle_login().await,
            UiAction::SubmitRegister => self.handle_register().await,
            UiAction::DismissNotification => {
                self.ports.notifier.hide();
                Outcome::Updated
            }
            UiAction::CountdownTick => {
                self.tick_countdown();
                Outcome::Updated
            }
        }
    }

    fn edit_field(&self, field: FormField, value: String) {
        self.with_state(|s| {
            s.fields.set(field, value);
            match field {
                FormField::RegisterEmail => {
                    let email = &s.fields.register_email;
                    s.register_email_invalid = !email.is_empty() && !is_email_shaped(email);
                }
                FormField::RegisterConfirmPassword => {
                    let confirm = &s.fields.register_confirm_password;
                    s.register_confirm_invalid =
                        !confirm.is_empty() && *confirm != s.fields.register_password;
                }
                _ => {}
            }
        });
    }

    fn generate_device_name(&self) {
        let name = suggested_device_name(
            &self.ports.probe.user_agent(),
            self.ports.probe.platform().as_deref(),
        );
        self.with_state(|s| s.fields.login_device_name = name);
        self.notify(Notification::success(self.text(MessageKey::DeviceNameGenerated)));
    }

    fn text(&self, key: MessageKey) -> String {
        self.config.locale.render(key)
    }

    fn notify(&self, notification: Notification) {
        self.ports.notifier.show(notification);
    }

    /// Show `error` to the user. Server-supplied text wins; `fallback` is used
    /// when a rejection carries none.
    fn report(&self, error: &ClientError, fallback: MessageKey) {
        let text = match error {
            ClientError::Validation(key) => {
                tracing::debug!(?key, "Validation failed");
                self.text(*key)
            }
            ClientError::Rejected { status, body } => {
                tracing::warn!(status, message = ?body.message(), "Request rejected");
                body.message().unwrap_or_else(|| self.text(fallback))
            }
            ClientError::MalformedResponse(reason) => {
                tracing::warn!(%reason, "Unexpected response body");
                self.text(fallback)
            }
            ClientError::Transport(e) => {
                tracing::warn!(error = %e, "Request did not complete");
                self.text(MessageKey::NetworkError)
            }
            ClientError::Storage(e) => {
                tracing::error!(error = %e, "Failed to persist session");
                self.text(MessageKey::StorageFailed)
            }
            ClientError::Navigation(e) => {
                tracing::warn!(error = %e, "Navigation failed");
                self.text(MessageKey::NavigationFailed)
            }
        };

        self.notify(Notification::error(text));
    }
}
