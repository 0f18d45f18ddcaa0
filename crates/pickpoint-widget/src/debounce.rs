//! Debounced triggering for search input.

use std::time::Duration;

/// Generation-token debouncer with cancel-on-reschedule semantics.
///
/// Each keystroke calls [`Debouncer::schedule`], which invalidates every
/// previously issued token. The caller then awaits [`Debouncer::wait`];
/// once the delay elapses, `wait` reports whether the token is still
/// current. A stale token means a newer input superseded this one and its
/// lookup must be dropped. This is the same recency trick the widget uses
/// for courier-drag address resolutions, applied to timers.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
        }
    }

    /// Invalidates all previously issued tokens and returns a new one.
    pub fn schedule(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Sleeps the configured delay, then reports whether `token` is still
    /// the latest scheduled one.
    pub async fn wait(&self, token: u64) -> bool {
        tokio::time::sleep(self.delay).await;
        self.is_current(token)
    }

    #[must_use]
    pub fn is_current(&self, token: u64) -> bool {
        token == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn latest_token_survives_the_delay() {
        let mut debouncer = Debouncer::new(Duration::from_millis(250));
        let token = debouncer.schedule();
        assert!(debouncer.wait(token).await);
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_invalidates_older_tokens() {
        let mut debouncer = Debouncer::new(Duration::from_millis(250));
        let first = debouncer.schedule();
        let second = debouncer.schedule();

        assert!(!debouncer.wait(first).await);
        assert!(debouncer.wait(second).await);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_still_checks_recency() {
        let mut debouncer = Debouncer::new(Duration::ZERO);
        let first = debouncer.schedule();
        let second = debouncer.schedule();

        assert!(!debouncer.wait(first).await);
        assert!(debouncer.is_current(second));
    }
}
