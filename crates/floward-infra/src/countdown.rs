//! Background driver of the verification-code resend countdown.

use tokio::task::JoinHandle;

use floward_core::AuthController;

/// Tick the countdown once per second on a tokio task until it reaches 0.
///
/// Call after a dispatch returned [`floward_core::Outcome::CodeSent`]. The task
/// shares the controller state, so other actions keep working while it runs.
pub fn spawn_countdown(controller: AuthController) -> JoinHandle<()> {
    tokio::spawn(async move {
        controller.run_countdown().await;
        tracing::debug!("Resend countdown finished");
    })
}

#[cfg(test)]
mod tests {
    use floward_core::domain::FormField;
    use floward_core::testing::Harness;
    use floward_core::{Outcome, UiAction};
    use floward_shared::routes;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_spawned_countdown_runs_to_zero() -> anyhow::Result<()> {
        let harness = Harness::new();
        let controller = harness.controller.clone();
        controller
            .dispatch(UiAction::EditField {
                field: FormField::LoginEmail,
                value: "user@example.com".to_string(),
            })
            .await;
        harness
            .http
            .respond(routes::SEND_VERIFICATION_CODE, 200, json!({}));

        let outcome = controller.dispatch(UiAction::SendVerificationCode).await;
        assert!(matches!(outcome, Outcome::CodeSent));

        spawn_countdown(controller.clone()).await?;

        assert_eq!(controller.state().countdown.remaining(), 0);
        assert_eq!(harness.clock.sleeps().len(), 60);
        Ok(())
    }
}
