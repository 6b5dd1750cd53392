use std::time::Duration;

use async_trait::async_trait;

use floward_core::ports::Clock;

/// Wall-clock timer on the tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
