//! Simulated network latency for mock backends.
//!
//! The in-memory services in this crate imitate a remote API, including
//! its response times. A [`Latency`] profile carries one delay per CRUD
//! operation; tests pass [`Latency::none`] to run instantly.

use std::time::Duration;

/// Per-operation delay profile for a mock resource service.
///
/// The defaults mirror a believable admin-API round trip: listings are
/// slower than point reads, mutations slower than listings.
///
/// # Example
///
/// ```rust
/// use adminkit::mock::Latency;
///
/// let profile = Latency::default();
/// assert!(profile.list > profile.get);
///
/// let instant = Latency::none();
/// assert!(instant.list.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    /// Delay for `list` calls.
    pub list: Duration,
    /// Delay for `get` calls.
    pub get: Duration,
    /// Delay for `create` calls.
    pub create: Duration,
    /// Delay for `update` calls.
    pub update: Duration,
    /// Delay for `delete` calls.
    pub delete: Duration,
}

impl Latency {
    /// A profile with every delay at zero, for tests.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            list: Duration::ZERO,
            get: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
        }
    }

    /// A uniform profile with the same delay for every operation.
    #[must_use]
    pub const fn uniform(delay: Duration) -> Self {
        Self {
            list: delay,
            get: delay,
            create: delay,
            update: delay,
            delete: delay,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            list: Duration::from_millis(500),
            get: Duration::from_millis(300),
            create: Duration::from_millis(600),
            update: Duration::from_millis(600),
            delete: Duration::from_millis(400),
        }
    }
}

/// Sleeps for the given duration, skipping the timer entirely for zero.
pub async fn delay(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_values() {
        let profile = Latency::default();
        assert_eq!(profile.list, Duration::from_millis(500));
        assert_eq!(profile.get, Duration::from_millis(300));
        assert_eq!(profile.create, Duration::from_millis(600));
        assert_eq!(profile.update, Duration::from_millis(600));
        assert_eq!(profile.delete, Duration::from_millis(400));
    }

    #[test]
    fn test_none_is_all_zero() {
        let profile = Latency::none();
        assert!(profile.list.is_zero());
        assert!(profile.get.is_zero());
        assert!(profile.create.is_zero());
        assert!(profile.update.is_zero());
        assert!(profile.delete.is_zero());
    }

    #[test]
    fn test_uniform_sets_every_operation() {
        let profile = Latency::uniform(Duration::from_millis(50));
        assert_eq!(profile.list, profile.delete);
        assert_eq!(profile.get, Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_zero_delay_completes_immediately() {
        // Must not touch the timer: this would hang under a paused clock
        // if it did.
        delay(Duration::ZERO).await;
    }

    #[tokio::test]
    async fn test_delay_sleeps_for_duration() {
        let start = std::time::Instant::now();
        delay(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
