//! Clock implementations for the PUPPET frame loop

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

/// Monotonic time source
///
/// Times are offsets from the clock's origin. `now` never decreases.
pub trait Clock {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;

    /// Wait until `deadline` (an offset from the origin)
    /// Returns immediately if the deadline has passed
    fn sleep_until(&self, deadline: Duration) -> impl Future<Output = ()> + Send;

    /// Wait for `duration` from now
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        self.sleep_until(self.now().saturating_add(duration))
    }
}

/// Wall clock backed by the tokio timer
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is now
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep_until(&self, deadline: Duration) -> impl Future<Output = ()> + Send {
        match self.origin.checked_add(deadline) {
            Some(at) => tokio::time::sleep_until(at),
            // Unrepresentable instant: tokio clamps this to its far future
            None => tokio::time::sleep(Duration::MAX),
        }
    }
}

/// Virtual clock - time only moves when slept on or advanced
/// Clones share the same time, so a test can observe the clock it handed out.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    /// Create a virtual clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a virtual clock at `start`
    pub fn starting_at(start: Duration) -> Self {
        ManualClock {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Move time forward by `dt`
    pub fn advance(&self, dt: Duration) {
        let mut now = self.now.lock();
        *now = now.saturating_add(dt);
    }

    /// Move time forward to `target` (never backwards)
    pub fn advance_to(&self, target: Duration) {
        let mut now = self.now.lock();
        if target > *now {
            *now = target;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }

    fn sleep_until(&self, deadline: Duration) -> impl Future<Output = ()> + Send {
        self.advance_to(deadline);
        std::future::ready(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_system_clock_monotonic() {
        let clock = SystemClock::new();

        let t1 = clock.now();
        clock.sleep(Duration::from_millis(10)).await;
        let t2 = clock.now();

        assert!(t2 > t1);
        assert!(t2 >= Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_system_clock_past_deadline() {
        let clock = SystemClock::new();
        clock.sleep(Duration::from_millis(5)).await;

        // Already elapsed, must not block
        let before = clock.now();
        clock.sleep_until(Duration::from_millis(1)).await;
        assert!(clock.now() - before < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_system_clock_huge_deadline() {
        let clock = SystemClock::new();

        // Must not overflow the instant; the sleep just never finishes
        let sleep = clock.sleep_until(Duration::from_secs_f64(1.5e19));
        let result = tokio::time::timeout(Duration::from_millis(10), sleep).await;
        assert!(result.is_err());

        let sleep = clock.sleep(Duration::MAX);
        let result = tokio::time::timeout(Duration::from_millis(10), sleep).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_manual_clock_sleep_advances() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        clock.sleep_until(Duration::from_millis(250)).await;
        assert_eq!(clock.now(), Duration::from_millis(250));

        // Never moves backwards
        clock.sleep_until(Duration::from_millis(100)).await;
        assert_eq!(clock.now(), Duration::from_millis(250));

        clock.sleep(Duration::from_secs(1)).await;
        assert_eq!(clock.now(), Duration::from_millis(1250));
    }

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::starting_at(Duration::from_secs(3));
        let observer = clock.clone();

        clock.advance(Duration::from_millis(500));
        assert_eq!(observer.now(), Duration::from_millis(3500));
    }
}
