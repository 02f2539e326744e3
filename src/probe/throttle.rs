use std::time::Duration;

/// Fixed courtesy pause between resources
///
/// Applied once per resource probed against the catalog, not once per request.
/// This is not a rate controller: there is no bucket and no burst allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A throttle that never waits
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleeps for the configured delay
    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tracing::trace!("Pausing {:?} before next resource", self.delay);
            tokio::time::sleep(self.delay).await;
        }
    }
}
