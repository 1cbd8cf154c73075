//! System clock adapter

use chrono::{DateTime, Utc};
use probe_application::Clock;

/// System clock implementation using the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamps_are_iso8601() {
        let stamp = SystemClock::new().now().to_rfc3339();
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
    }
}
