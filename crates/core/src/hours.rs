//! Time-of-day gating.

use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};

/// Inclusive window of wall-clock hours, e.g. 10..=19 is open from 10:00
/// until 19:59.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub open: u32,
    pub close: u32,
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self { open: 10, close: 19 }
    }
}

impl OperatingHours {
    pub fn contains(&self, hour: u32) -> bool {
        if self.open <= self.close {
            (self.open..=self.close).contains(&hour)
        } else {
            // Window wraps past midnight
            hour >= self.open || hour <= self.close
        }
    }

    /// Whether the local wall clock is inside the window.
    pub fn is_open_now(&self) -> bool {
        self.contains(current_hour())
    }
}

/// Hour of the local wall clock, 0..=23.
pub fn current_hour() -> u32 {
    Local::now().hour()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let hours = OperatingHours::default();

        assert!(!hours.contains(9));
        assert!(hours.contains(10));
        assert!(hours.contains(19));
        assert!(!hours.contains(20));
    }

    #[test]
    fn test_overnight_window() {
        let hours = OperatingHours { open: 22, close: 2 };

        assert!(hours.contains(23));
        assert!(hours.contains(0));
        assert!(hours.contains(2));
        assert!(!hours.contains(12));
    }

    #[test]
    fn test_always_open() {
        let hours = OperatingHours { open: 0, close: 23 };

        assert!(current_hour() < 24);
        assert!(hours.is_open_now());
    }
}
