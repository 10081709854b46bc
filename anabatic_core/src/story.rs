// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-advancing story player with hold-to-pause and tap-to-advance.
//!
//! [`StoryPlayer`] steps through an ordered slide sequence on a wall-clock
//! timer. A sustained press pauses playback; releasing resumes it with a
//! fresh full slide window. A brief press-and-release (a tap) advances
//! immediately. When the sequence is exhausted the player emits
//! [`StoryEvent::Exhausted`] exactly once so the host can navigate back to
//! its parent view.
//!
//! # Timer model
//!
//! The player owns two logical timers — the slide advance window and the
//! hold threshold — as deadlines on the host clock, re-evaluated whenever
//! the frame loop calls [`on_tick`](StoryPlayer::on_tick). No OS timers are
//! involved, so teardown is dropping the player. Deadlines are also resolved
//! lazily inside [`release`](StoryPlayer::release) and
//! [`pointer_leave`](StoryPlayer::pointer_leave), which keeps the
//! tap-vs-hold distinction correct even when frames arrive sparsely.
//!
//! When a single tick observes both an expired hold deadline and an expired
//! advance deadline, the hold wins: the player pauses and the advance window
//! is cancelled.

use crate::time::{Duration, HostTime};

/// A source citation attached to a slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Citation {
    /// Link text.
    pub label: &'static str,
    /// Link target.
    pub url: &'static str,
}

/// One slide of a story: two text bands around a large central glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slide {
    /// Text shown above the glyph.
    pub top_text: &'static str,
    /// Text shown below the glyph.
    pub bottom_text: &'static str,
    /// The central emoji/glyph.
    pub emoji: &'static str,
    /// Optional source citation.
    pub citation: Option<Citation>,
}

/// Timing configuration for the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoryConfig {
    /// How long each slide is shown before auto-advancing.
    pub slide_duration: Duration,
    /// Minimum press duration classified as "pause" rather than "tap".
    pub hold_threshold: Duration,
}

impl StoryConfig {
    /// The exhibit defaults: 6 s per slide, 200 ms hold threshold.
    #[must_use]
    pub const fn exhibit() -> Self {
        Self {
            slide_duration: Duration::from_millis(6_000),
            hold_threshold: Duration::from_millis(200),
        }
    }
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self::exhibit()
    }
}

/// A state transition reported back to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoryEvent {
    /// Playback moved to a new slide (by timer or by tap).
    Advanced {
        /// The new current slide index.
        index: usize,
    },
    /// A sustained press paused playback.
    Paused,
    /// The press ended and playback resumed with a fresh slide window.
    Resumed,
    /// The sequence is finished. Emitted exactly once; the host navigates
    /// back to the parent view.
    Exhausted,
}

/// The story player state machine.
///
/// The player tracks only the sequence *length*; slide content lives in
/// static data owned by the host and is looked up via
/// [`display_index`](Self::display_index).
#[derive(Clone, Debug)]
pub struct StoryPlayer {
    config: StoryConfig,
    slide_count: usize,
    /// Raw slide index. Monotonically non-decreasing for the lifetime of the
    /// player; may equal `slide_count` once exhausted.
    index: usize,
    paused: bool,
    exhausted: bool,
    exhaust_signalled: bool,
    /// Deadline for the auto-advance timer. `None` while paused or
    /// exhausted — at most one of {paused, armed} holds at a time.
    advance_deadline: Option<HostTime>,
    /// Deadline for the in-flight press to become a hold.
    hold_deadline: Option<HostTime>,
    /// The in-flight press crossed the hold threshold.
    did_hold: bool,
}

impl StoryPlayer {
    /// Creates a player at slide 0 with a full advance window starting at
    /// `now`.
    #[must_use]
    pub fn new(slide_count: usize, now: HostTime) -> Self {
        Self::with_index(slide_count, 0, now)
    }

    /// Creates a player resuming at `index`.
    ///
    /// An out-of-range index is kept as-is: the exhaustion check compares it
    /// to the sequence length, while [`display_index`](Self::display_index)
    /// clamps for content lookup only.
    #[must_use]
    pub fn with_index(slide_count: usize, index: usize, now: HostTime) -> Self {
        let exhausted = index >= slide_count;
        Self {
            config: StoryConfig::default(),
            slide_count,
            index,
            paused: false,
            exhausted,
            exhaust_signalled: false,
            advance_deadline: if exhausted {
                None
            } else {
                now.checked_add(StoryConfig::default().slide_duration)
            },
            hold_deadline: None,
            did_hold: false,
        }
    }

    /// Replaces the timing configuration (builder style).
    #[must_use]
    pub fn with_config(mut self, config: StoryConfig) -> Self {
        // Re-arm the pending window under the new duration.
        if let Some(deadline) = self.advance_deadline {
            let start = deadline - self.config.slide_duration;
            self.advance_deadline = start.checked_add(config.slide_duration);
        }
        self.config = config;
        self
    }

    /// Evaluates both timers against `now`.
    ///
    /// Called once per frame by the host loop. Returns at most one event per
    /// call; an expired hold is processed before an expired advance window.
    pub fn on_tick(&mut self, now: HostTime) -> Option<StoryEvent> {
        if self.exhausted {
            return self.signal_exhausted();
        }

        if let Some(deadline) = self.hold_deadline
            && now >= deadline
        {
            self.hold_deadline = None;
            self.did_hold = true;
            self.paused = true;
            self.advance_deadline = None;
            return Some(StoryEvent::Paused);
        }

        if let Some(deadline) = self.advance_deadline
            && now >= deadline
        {
            return Some(self.advance(now));
        }

        None
    }

    /// Begins a press at `now`, arming the hold threshold.
    ///
    /// The advance window keeps running: a slide may still auto-advance
    /// under a press that has not yet crossed the threshold.
    pub fn press(&mut self, now: HostTime) {
        if self.exhausted {
            return;
        }
        self.did_hold = false;
        self.hold_deadline = now.checked_add(self.config.hold_threshold);
    }

    /// Ends a press at `now`.
    ///
    /// A press that crossed the hold threshold resumes playback with a fresh
    /// full slide window; anything shorter is a tap and advances
    /// immediately. The hold deadline is cancelled regardless of outcome.
    pub fn release(&mut self, now: HostTime) -> Option<StoryEvent> {
        self.resolve_hold(now);
        if self.exhausted {
            return self.signal_exhausted();
        }

        if self.did_hold {
            self.did_hold = false;
            self.paused = false;
            self.advance_deadline = now.checked_add(self.config.slide_duration);
            return Some(StoryEvent::Resumed);
        }

        Some(self.advance(now))
    }

    /// Handles the pointer leaving the surface mid-press.
    ///
    /// Cancels a pending hold without advancing; if the press had already
    /// paused playback, resumes it.
    pub fn pointer_leave(&mut self, now: HostTime) -> Option<StoryEvent> {
        self.resolve_hold(now);
        if self.exhausted {
            return None;
        }

        if self.did_hold {
            self.did_hold = false;
            self.paused = false;
            self.advance_deadline = now.checked_add(self.config.slide_duration);
            return Some(StoryEvent::Resumed);
        }

        None
    }

    /// Resolves a pending hold deadline against `now` and cancels it.
    ///
    /// A deadline that already expired counts as a hold even if no tick
    /// observed it, so tap-vs-hold classification does not depend on frame
    /// arrival.
    fn resolve_hold(&mut self, now: HostTime) {
        if let Some(deadline) = self.hold_deadline.take()
            && now >= deadline
        {
            self.did_hold = true;
            self.paused = true;
            self.advance_deadline = None;
        }
    }

    /// Moves to the next slide, arming a fresh window at `from`, or
    /// exhausts.
    ///
    /// No window is armed while paused (a second pointer can tap-advance
    /// under an active hold); the window arms on resume instead.
    fn advance(&mut self, from: HostTime) -> StoryEvent {
        self.index += 1;
        if self.index >= self.slide_count {
            self.exhausted = true;
            self.exhaust_signalled = true;
            self.advance_deadline = None;
            StoryEvent::Exhausted
        } else {
            self.advance_deadline = if self.paused {
                None
            } else {
                from.checked_add(self.config.slide_duration)
            };
            StoryEvent::Advanced { index: self.index }
        }
    }

    fn signal_exhausted(&mut self) -> Option<StoryEvent> {
        if self.exhaust_signalled {
            None
        } else {
            self.exhaust_signalled = true;
            Some(StoryEvent::Exhausted)
        }
    }

    /// The raw slide index (may equal the sequence length once exhausted).
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The index to use for content lookup, clamped to the last valid slide.
    #[must_use]
    pub const fn display_index(&self) -> usize {
        if self.slide_count == 0 {
            0
        } else if self.index >= self.slide_count {
            self.slide_count - 1
        } else {
            self.index
        }
    }

    /// The sequence length this player was created over.
    #[must_use]
    pub const fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Whether playback is paused by a sustained press.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the sequence has been exhausted.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The external "is playing" flag consumed by per-slide progress-bar
    /// animations. Reflects pause/resume immediately.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        !self.paused && !self.exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Milliseconds → `HostTime`, for readable fixtures.
    const fn at(ms: u64) -> HostTime {
        HostTime(ms * 1_000)
    }

    /// Runs `on_tick` every 16 ms over `[from, to]` and collects events.
    fn tick_span(player: &mut StoryPlayer, from_ms: u64, to_ms: u64) -> Vec<StoryEvent> {
        let mut events = Vec::new();
        let mut t = from_ms;
        while t <= to_ms {
            if let Some(e) = player.on_tick(at(t)) {
                events.push(e);
            }
            t += 16;
        }
        events
    }

    #[test]
    fn uninterrupted_playthrough_exhausts_once() {
        let mut player = StoryPlayer::new(3, at(0));
        let events = tick_span(&mut player, 0, 20_000);
        assert_eq!(
            events,
            [
                StoryEvent::Advanced { index: 1 },
                StoryEvent::Advanced { index: 2 },
                StoryEvent::Exhausted,
            ]
        );
        assert!(player.is_exhausted());
        assert!(!player.is_running());

        // The exhaustion signal never repeats.
        assert!(tick_span(&mut player, 20_016, 40_000).is_empty());
    }

    #[test]
    fn hold_pauses_and_blocks_the_advance_timer() {
        let mut player = StoryPlayer::new(3, at(0));
        player.press(at(1_000));

        let events = tick_span(&mut player, 1_000, 11_000);
        assert_eq!(events, [StoryEvent::Paused], "held 10s: no advance fires");
        assert_eq!(player.index(), 0);
        assert!(player.is_paused());
        assert!(!player.is_running());

        // Release resumes with a full fresh window: the next advance is 6s
        // after release, not 6s after the original slide start.
        assert_eq!(player.release(at(11_000)), Some(StoryEvent::Resumed));
        assert!(player.is_running());
        assert!(tick_span(&mut player, 11_016, 16_984).is_empty());
        assert_eq!(
            player.on_tick(at(17_000)),
            Some(StoryEvent::Advanced { index: 1 })
        );
    }

    #[test]
    fn tap_advances_immediately() {
        let mut player = StoryPlayer::new(3, at(0));
        player.press(at(1_000));
        let event = player.release(at(1_100));
        assert_eq!(event, Some(StoryEvent::Advanced { index: 1 }));

        // The interrupted window is discarded: the next auto-advance comes a
        // full slide duration after the tap.
        assert!(tick_span(&mut player, 1_116, 7_084).is_empty());
        assert_eq!(
            player.on_tick(at(7_100)),
            Some(StoryEvent::Advanced { index: 2 })
        );
    }

    #[test]
    fn release_before_threshold_is_always_a_tap() {
        let mut player = StoryPlayer::new(3, at(0));
        player.press(at(1_000));
        // A tick lands mid-press, before the 200ms threshold.
        assert_eq!(player.on_tick(at(1_150)), None);
        assert_eq!(
            player.release(at(1_190)),
            Some(StoryEvent::Advanced { index: 1 })
        );
        assert!(!player.is_paused());
    }

    #[test]
    fn expired_hold_resolves_on_release_without_a_tick() {
        // No tick lands between the press and the release, but the release
        // comes after the threshold: that was a hold, not a tap.
        let mut player = StoryPlayer::new(3, at(0));
        player.press(at(1_000));
        assert_eq!(player.release(at(1_500)), Some(StoryEvent::Resumed));
        assert_eq!(player.index(), 0, "a hold never advances");
    }

    #[test]
    fn hold_wins_a_same_tick_race_with_the_advance_deadline() {
        let mut player = StoryPlayer::new(3, at(0));
        // Press 150ms before the 6s advance deadline; the next frame arrives
        // after both deadlines have expired.
        player.press(at(5_850));
        assert_eq!(player.on_tick(at(6_200)), Some(StoryEvent::Paused));
        assert_eq!(player.index(), 0);
        // The advance window was cancelled outright.
        assert!(tick_span(&mut player, 6_216, 30_000).is_empty());
    }

    #[test]
    fn advance_timer_still_fires_under_a_short_press() {
        // The advance window is not cancelled by the press itself, only by
        // entering the paused state.
        let mut player = StoryPlayer::new(3, at(0));
        player.press(at(5_950));
        assert_eq!(
            player.on_tick(at(6_000)),
            Some(StoryEvent::Advanced { index: 1 })
        );
    }

    #[test]
    fn pointer_leave_cancels_a_pending_hold() {
        let mut player = StoryPlayer::new(3, at(0));
        player.press(at(1_000));
        assert_eq!(player.pointer_leave(at(1_100)), None, "no advance on leave");
        // The press is gone: nothing pauses later.
        assert!(tick_span(&mut player, 1_116, 5_984).is_empty());
    }

    #[test]
    fn pointer_leave_during_a_hold_resumes() {
        let mut player = StoryPlayer::new(3, at(0));
        player.press(at(1_000));
        assert_eq!(player.on_tick(at(1_300)), Some(StoryEvent::Paused));
        assert_eq!(player.pointer_leave(at(2_000)), Some(StoryEvent::Resumed));
        assert!(player.is_running());
        assert_eq!(
            player.on_tick(at(8_000)),
            Some(StoryEvent::Advanced { index: 1 })
        );
    }

    #[test]
    fn tap_through_the_last_slide_exhausts() {
        let mut player = StoryPlayer::new(2, at(0));
        player.press(at(100));
        assert_eq!(player.release(at(150)), Some(StoryEvent::Advanced { index: 1 }));
        player.press(at(300));
        assert_eq!(player.release(at(350)), Some(StoryEvent::Exhausted));
        assert!(player.is_exhausted());
        assert_eq!(player.on_tick(at(400)), None, "signalled exactly once");
    }

    #[test]
    fn empty_sequence_exhausts_on_first_tick() {
        let mut player = StoryPlayer::new(0, at(0));
        assert_eq!(player.on_tick(at(16)), Some(StoryEvent::Exhausted));
        assert_eq!(player.on_tick(at(32)), None);
        assert_eq!(player.display_index(), 0);
    }

    #[test]
    fn out_of_range_index_clamps_for_display_only() {
        let mut player = StoryPlayer::with_index(3, 7, at(0));
        assert_eq!(player.index(), 7);
        assert_eq!(player.display_index(), 2);
        assert!(player.is_exhausted());
        assert_eq!(player.on_tick(at(16)), Some(StoryEvent::Exhausted));
    }

    #[test]
    fn index_never_decreases() {
        let mut player = StoryPlayer::new(5, at(0));
        let mut last = player.index();
        for t in (0..40_000).step_by(16) {
            player.on_tick(at(t));
            assert!(player.index() >= last, "index regressed at t={t}");
            last = player.index();
        }
    }

    #[test]
    fn paused_and_armed_are_mutually_exclusive() {
        let mut player = StoryPlayer::new(3, at(0));
        assert!(player.advance_deadline.is_some() && !player.paused);
        player.press(at(100));
        player.on_tick(at(400));
        assert!(player.paused && player.advance_deadline.is_none());
        player.release(at(500));
        assert!(!player.paused && player.advance_deadline.is_some());
    }

    #[test]
    fn custom_config_changes_the_windows() {
        let config = StoryConfig {
            slide_duration: Duration::from_millis(1_000),
            hold_threshold: Duration::from_millis(50),
        };
        let mut player = StoryPlayer::new(2, at(0)).with_config(config);
        assert_eq!(
            player.on_tick(at(1_000)),
            Some(StoryEvent::Advanced { index: 1 })
        );
        player.press(at(1_100));
        assert_eq!(player.on_tick(at(1_160)), Some(StoryEvent::Paused));
    }
}
