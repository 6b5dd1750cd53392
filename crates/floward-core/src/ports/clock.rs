use async_trait::async_trait;
use std::time::Duration;

/// Timer abstraction, so delays and the resend countdown can be driven
/// instantly in tests.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
