// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounced, fire-and-forget output notification.
//!
//! The exhibit reports the fleet's instantaneous power to an external
//! endpoint, but only after the value has been stable for a debounce window
//! — a slider drag produces one notification, not hundreds. Delivery is
//! best-effort: sinks swallow failures and nothing is retried.

use crate::time::{Duration, HostTime};

/// Receives debounced output notifications.
///
/// `send` has no return value on purpose: the notification is
/// fire-and-forget, and a sink that fails must absorb the failure itself.
pub trait OutputSink {
    /// Delivers the latest settled output value, in MW.
    fn send(&mut self, megawatts: f64);
}

/// Timing configuration for the reporter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    /// How long a value must remain unchanged before it is sent.
    pub debounce: Duration,
}

impl ReportConfig {
    /// The exhibit default: 1 s.
    #[must_use]
    pub const fn exhibit() -> Self {
        Self {
            debounce: Duration::from_millis(1_000),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::exhibit()
    }
}

/// Debounces a stream of output values into occasional sink sends.
///
/// Drive it from the frame loop: [`note`](Self::note) the freshly computed
/// value every frame, then [`poll`](Self::poll) with the same timestamp. A
/// *changed* value (re)arms the debounce window; an unchanged value leaves a
/// pending window running.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutputReporter {
    config: ReportConfig,
    /// Value waiting to be sent once the window expires.
    pending: Option<f64>,
    deadline: Option<HostTime>,
    /// Most recently noted value, sent or not, for change detection.
    last_noted: Option<f64>,
}

impl OutputReporter {
    /// Creates a reporter with the exhibit's debounce window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reporter with a custom configuration.
    #[must_use]
    pub fn with_config(config: ReportConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Observes the current output value at `now`.
    ///
    /// A value equal to the previous observation is a no-op; otherwise the
    /// pending value is replaced and the window restarts. Values are
    /// compared exactly — quantize before noting to coalesce jitter.
    pub fn note(&mut self, now: HostTime, megawatts: f64) {
        if self.last_noted == Some(megawatts) {
            return;
        }
        self.last_noted = Some(megawatts);
        self.pending = Some(megawatts);
        self.deadline = now.checked_add(self.config.debounce);
    }

    /// Delivers the pending value to `sink` if its window has expired.
    ///
    /// Returns the value that was sent, if any.
    pub fn poll(&mut self, now: HostTime, sink: &mut dyn OutputSink) -> Option<f64> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        let value = self.pending.take()?;
        sink.send(value);
        Some(value)
    }

    /// Drops any pending notification (component teardown).
    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    /// Whether a notification is waiting for its window to expire.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Recording {
        sent: Vec<f64>,
    }

    impl OutputSink for Recording {
        fn send(&mut self, megawatts: f64) {
            self.sent.push(megawatts);
        }
    }

    const fn at(ms: u64) -> HostTime {
        HostTime(ms * 1_000)
    }

    #[test]
    fn nothing_is_sent_before_the_window_expires() {
        let mut reporter = OutputReporter::new();
        let mut sink = Recording::default();

        reporter.note(at(0), 4.5);
        assert_eq!(reporter.poll(at(500), &mut sink), None);
        assert_eq!(reporter.poll(at(999), &mut sink), None);
        assert!(sink.sent.is_empty());
    }

    #[test]
    fn a_settled_value_is_sent_exactly_once() {
        let mut reporter = OutputReporter::new();
        let mut sink = Recording::default();

        reporter.note(at(0), 4.5);
        assert_eq!(reporter.poll(at(1_000), &mut sink), Some(4.5));
        assert_eq!(reporter.poll(at(1_016), &mut sink), None, "no repeat");
        assert_eq!(sink.sent, [4.5]);
    }

    #[test]
    fn a_changed_value_restarts_the_window() {
        let mut reporter = OutputReporter::new();
        let mut sink = Recording::default();

        reporter.note(at(0), 1.0);
        reporter.note(at(800), 2.0);
        assert_eq!(reporter.poll(at(1_000), &mut sink), None, "window restarted");
        assert_eq!(reporter.poll(at(1_800), &mut sink), Some(2.0));
        assert_eq!(sink.sent, [2.0], "only the latest value is delivered");
    }

    #[test]
    fn an_unchanged_value_does_not_defer_delivery() {
        let mut reporter = OutputReporter::new();
        let mut sink = Recording::default();

        reporter.note(at(0), 3.0);
        // Per-frame notes of the same value must not push the deadline out.
        for t in (16..1_000).step_by(16) {
            reporter.note(at(t), 3.0);
        }
        assert_eq!(reporter.poll(at(1_000), &mut sink), Some(3.0));
    }

    #[test]
    fn cancel_drops_the_pending_value() {
        let mut reporter = OutputReporter::new();
        let mut sink = Recording::default();

        reporter.note(at(0), 7.0);
        reporter.cancel();
        assert_eq!(reporter.poll(at(5_000), &mut sink), None);
        assert!(sink.sent.is_empty());
    }

    #[test]
    fn custom_debounce_window() {
        let mut reporter = OutputReporter::with_config(ReportConfig {
            debounce: Duration::from_millis(100),
        });
        let mut sink = Recording::default();

        reporter.note(at(0), 1.5);
        assert_eq!(reporter.poll(at(100), &mut sink), Some(1.5));
    }
}
