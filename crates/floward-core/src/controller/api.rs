use floward_shared::ErrorBody;
use serde::Serialize;
use serde_json::Value;

use super::AuthController;
use crate::error::ClientError;
use crate::ports::TransportError;

impl AuthController {
    /// POST `payload` to `path`. A 2xx yields the response body; anything else
    /// becomes [`ClientError::Rejected`] with the decoded error body.
    pub(super) async fn post<T: Serialize>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Value, ClientError> {
        let body =
            serde_json::to_value(payload).map_err(|e| TransportError::Encode(e.to_string()))?;

        let response = self.ports.http.post_json(path, body).await?;
        tracing::debug!(path, status = response.status, "Auth API responded");

        if response.is_success() {
            Ok(response.body)
        } else {
            Err(ClientError::Rejected {
                status: response.status,
                body: ErrorBody::from_value(&response.body),
            })
        }
    }
}
