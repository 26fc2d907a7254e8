//! Edit debouncing for the preview pipeline.
//!
//! Every keystroke notifies the debouncer; a pipeline run is only released
//! once the source has been quiescent for the configured interval. A
//! superseded pending run is dropped outright, never queued or merged.
//!
//! The egui shell drives this by calling [`Debouncer::poll`] each frame and
//! scheduling a repaint for [`Debouncer::deadline`].

use std::time::{Duration, Instant};

/// Default quiet interval before a pending edit is released
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Delay-and-coalesce gate in front of the pipeline
#[derive(Debug)]
pub struct Debouncer {
    interval: Duration,
    pending: Option<String>,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
            deadline: None,
        }
    }

    /// Record a source change and restart the quiet-interval timer
    pub fn on_change(&mut self, text: &str) {
        self.on_change_at(text, Instant::now());
    }

    /// Clock-injected variant of [`on_change`](Self::on_change)
    pub fn on_change_at(&mut self, text: &str, now: Instant) {
        self.pending = Some(text.to_string());
        self.deadline = Some(now + self.interval);
    }

    /// Release the pending text if the quiet interval has elapsed.
    ///
    /// Returns the text at most once per change; subsequent polls return
    /// `None` until the next [`on_change`](Self::on_change).
    pub fn poll(&mut self) -> Option<String> {
        self.poll_at(Instant::now())
    }

    /// Clock-injected variant of [`poll`](Self::poll)
    pub fn poll_at(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// Drop any pending run without triggering the pipeline
    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    /// True if a change is waiting for its quiet interval
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending change (if any) becomes due
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TICK: Duration = Duration::from_millis(100);

    #[test]
    fn test_quiet_interval_releases_last_text() {
        let mut debouncer = Debouncer::new(TICK * 5);
        let start = Instant::now();

        debouncer.on_change_at("a", start);
        debouncer.on_change_at("ab", start + TICK);
        debouncer.on_change_at("abc", start + TICK * 2);

        // Not yet quiescent for a full interval
        assert_eq!(debouncer.poll_at(start + TICK * 4), None);
        // Quiet interval measured from the *last* change
        assert_eq!(
            debouncer.poll_at(start + TICK * 7),
            Some("abc".to_string())
        );
        // Released exactly once
        assert_eq!(debouncer.poll_at(start + TICK * 8), None);
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut debouncer = Debouncer::new(TICK);
        let start = Instant::now();

        debouncer.on_change_at("x", start);
        debouncer.cancel();
        assert_eq!(debouncer.poll_at(start + TICK * 2), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_deadline_tracks_latest_change() {
        let mut debouncer = Debouncer::new(TICK * 5);
        let start = Instant::now();

        debouncer.on_change_at("a", start);
        assert_eq!(debouncer.deadline(), Some(start + TICK * 5));

        debouncer.on_change_at("b", start + TICK);
        assert_eq!(debouncer.deadline(), Some(start + TICK * 6));
    }

    proptest! {
        /// N rapid changes within the interval release exactly one run,
        /// carrying the final text.
        #[test]
        fn prop_rapid_changes_coalesce(texts in prop::collection::vec("[a-z]{0,8}", 1..20)) {
            let interval = Duration::from_millis(500);
            let mut debouncer = Debouncer::new(interval);
            let start = Instant::now();

            // All changes land inside a single quiet window.
            for (i, text) in texts.iter().enumerate() {
                let at = start + Duration::from_millis(i as u64 * 10);
                debouncer.on_change_at(text, at);
                prop_assert_eq!(debouncer.poll_at(at), None);
            }

            let last_change = start + Duration::from_millis((texts.len() as u64 - 1) * 10);
            let released = debouncer.poll_at(last_change + interval);
            prop_assert_eq!(released, Some(texts.last().unwrap().clone()));
            prop_assert_eq!(debouncer.poll_at(last_change + interval * 2), None);
        }
    }
}
