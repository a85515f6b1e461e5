use std::time::Duration;

use async_trait::async_trait;

/// Source of the pause between two status polls. Swapped out in tests so no test
/// actually waits.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Records every requested pause and returns immediately.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingClock {
        pub(crate) sleeps: Arc<Mutex<Vec<Duration>>>,
    }

    impl RecordingClock {
        pub(crate) fn recorded(&self) -> Vec<Duration> {
            self.sleeps.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Clock for RecordingClock {
        async fn sleep(&self, duration: Duration) {
            self.sleeps.lock().unwrap().push(duration);
        }
    }
}
