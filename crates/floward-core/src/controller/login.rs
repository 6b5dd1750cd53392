//! Login submission, session persistence and post-login redirects.

use floward_shared::dto::{CodeLoginRequest, PasswordLoginRequest, TokenResponse};
use floward_shared::routes;

use super::busy::{BusyGuard, Control};
use super::{AuthController, Outcome};
use crate::domain::{
    ACCESS_TOKEN_KEY, DEVICE_NAME_KEY, EMAIL_KEY, LoginMethod, Notification, REFRESH_TOKEN_KEY,
    SessionTokens, device_type,
};
use crate::error::ClientError;
use crate::i18n::MessageKey;

/// A login the backend accepted and that has been persisted.
struct LoginSession {
    tokens: SessionTokens,
    email: String,
    device_name: String,
}

impl AuthController {
    pub(super) async fn handle_login(&self) -> Outcome {
        let method = self.with_state(|s| s.form.method);

        let login = {
            let Some(_busy) = BusyGuard::engage(&self.state, Control::LoginSubmit) else {
                return Outcome::Ignored;
            };
            self.login(method).await
        };

        let session = match login {
            Ok(session) => session,
            Err(err) => {
                let fallback = match method {
                    LoginMethod::Password => MessageKey::LoginFailed,
                    LoginMethod::Code => MessageKey::CodeLoginFailed,
                };
                self.report(&err, fallback);
                return Outcome::Failed(err);
            }
        };

        self.open_desktop_app(&session);

        self.ports.clock.sleep(self.config.redirect_delay()).await;
        match self.ports.navigator.navigate(&self.config.dashboard_path) {
            Ok(()) => Outcome::LoggedIn,
            Err(e) => {
                let err = ClientError::from(e);
                self.report(&err, MessageKey::NavigationFailed);
                Outcome::Failed(err)
            }
        }
    }

    async fn login(&self, method: LoginMethod) -> Result<LoginSession, ClientError> {
        let fields = self.with_state(|s| s.fields.clone());
        let device_type = device_type(
            &self.ports.probe.user_agent(),
            &self.ports.probe.platform().unwrap_or_default(),
        )
        .to_string();

        if fields.device_id.is_empty() {
            // The fingerprint is computed asynchronously at load and may not be
            // ready yet; the required-field check below rejects the submit.
            tracing::debug!("Login submitted before the device fingerprint was ready");
        }
        let required = [
            &fields.login_email,
            &fields.device_id,
            &fields.login_device_name,
            &device_type,
        ];
        if required.iter().any(|value| value.is_empty()) {
            return Err(ClientError::Validation(MessageKey::MissingFields));
        }

        let body = match method {
            LoginMethod::Password => {
                if fields.login_password.is_empty() {
                    return Err(ClientError::Validation(MessageKey::MissingPassword));
                }
                let request = PasswordLoginRequest {
                    email: fields.login_email.clone(),
                    password: fields.login_password.clone(),
                    device_id: fields.device_id.clone(),
                    device_name: fields.login_device_name.clone(),
                    device_type: device_type.clone(),
                };
                self.post(routes::LOGIN, &request).await?
            }
            LoginMethod::Code => {
                if fields.login_code.is_empty() {
                    return Err(ClientError::Validation(MessageKey::MissingCode));
                }
                let request = CodeLoginRequest {
                    email: fields.login_email.clone(),
                    code: fields.login_code.clone(),
                    device_id: fields.device_id.clone(),
                    device_name: fields.login_device_name.clone(),
                    device_type: device_type.clone(),
                };
                self.post(routes::LOGIN_WITH_CODE, &request).await?
            }
        };

        let tokens: SessionTokens = serde_json::from_value::<TokenResponse>(body)
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?
            .into();

        tracing::info!(?method, device_type = %device_type, "Login accepted");

        let session = LoginSession {
            tokens,
            email: fields.login_email,
            device_name: fields.login_device_name,
        };
        self.persist_session(&session).await?;
        self.notify(Notification::success(self.text(MessageKey::LoginSucceeded)));

        Ok(session)
    }

    async fn persist_session(&self, session: &LoginSession) -> Result<(), ClientError> {
        let storage = &self.ports.storage;
        storage
            .set(ACCESS_TOKEN_KEY, &session.tokens.access_token)
            .await?;
        storage
            .set(REFRESH_TOKEN_KEY, &session.tokens.refresh_token)
            .await?;
        storage.set(EMAIL_KEY, &session.email).await?;
        storage.set(DEVICE_NAME_KEY, &session.device_name).await?;
        Ok(())
    }

    /// Best effort: hand the session to the desktop app if one is installed.
    fn open_desktop_app(&self, session: &LoginSession) {
        let mut uri = self.config.app_login_uri.clone();
        uri.query_pairs_mut()
            .append_pair("email", &session.email)
            .append_pair("token", &session.tokens.access_token)
            .append_pair("device_name", &session.device_name)
            .append_pair("api_url", &self.config.origin());

        if let Err(e) = self.ports.navigator.open_external(&uri) {
            tracing::debug!(error = %e, "Desktop app not available");
        }
    }
}
