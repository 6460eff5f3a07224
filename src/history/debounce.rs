// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tourflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tourflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

/// A single cancelable deadline.
///
/// Scheduling again replaces the pending deadline instead of stacking a second one. Time is
/// always passed in, which keeps the editor deterministic under test.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Clears and reports the deadline if it has passed at `now`.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::Debounce;

    #[test]
    fn fires_once_after_delay() {
        let start = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(100));
        debounce.schedule(start);

        assert!(!debounce.fire_if_due(start + Duration::from_millis(99)));
        assert!(debounce.fire_if_due(start + Duration::from_millis(100)));
        assert!(!debounce.fire_if_due(start + Duration::from_millis(500)));
    }

    #[test]
    fn rescheduling_replaces_the_pending_deadline() {
        let start = Instant::now();
        let mut debounce = Debounce::new(Duration::from_millis(100));
        debounce.schedule(start);
        debounce.schedule(start + Duration::from_millis(80));

        assert!(!debounce.fire_if_due(start + Duration::from_millis(120)));
        assert!(debounce.fire_if_due(start + Duration::from_millis(180)));
    }

    #[test]
    fn cancel_reports_whether_something_was_pending() {
        let mut debounce = Debounce::new(Duration::from_millis(10));
        assert!(!debounce.cancel());
        debounce.schedule(Instant::now());
        assert!(debounce.is_pending());
        assert!(debounce.cancel());
        assert!(!debounce.is_pending());
    }
}
