// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thread-timer backend for anabatic.
//!
//! Hosts without a display-driven callback mechanism (kiosk simulators,
//! headless tests, native shells) substitute a thread timer as their tick
//! source. [`TimerLoop`] wakes on a fixed interval and delivers a
//! [`FrameTick`] to the registered callback; [`now`] reads microseconds from
//! a process-wide monotonic epoch.
//!
//! The thread is only the tick *source*. All engine state is mutated inside
//! the callback, one tick at a time, preserving the single-threaded
//! cooperative model of the core.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use anabatic_core::time::{Duration, HostTime};
use anabatic_core::timing::{FrameTick, SceneId};

/// Returns the current host time as microseconds since the first call in
/// this process.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "u64 microseconds cover half a million years of uptime"
)]
pub fn now() -> HostTime {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    let epoch = *EPOCH.get_or_init(Instant::now);
    HostTime(epoch.elapsed().as_micros() as u64)
}

/// Tick cadence for a [`TimerLoop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickerConfig {
    /// Interval between ticks.
    pub interval: Duration,
}

impl TickerConfig {
    /// Creates a config with the given interval.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// A display-rate cadence (~16.7 ms).
    #[must_use]
    pub const fn sixty_hz() -> Self {
        Self::new(Duration::from_micros(16_667))
    }

    /// A half-rate cadence (~33.3 ms).
    #[must_use]
    pub const fn thirty_hz() -> Self {
        Self::new(Duration::from_micros(33_333))
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self::sixty_hz()
    }
}

type TickCallback = Box<dyn FnMut(FrameTick) + Send + 'static>;

struct TimerInner {
    /// Whether the loop is currently running.
    running: AtomicBool,
    /// Monotonically increasing frame counter (becomes `FrameTick::frame_index`).
    frame_counter: AtomicU64,
    /// The user-supplied callback that receives [`FrameTick`] events.
    callback: Mutex<TickCallback>,
    config: TickerConfig,
    /// The scene identifier passed through to each [`FrameTick`].
    scene: SceneId,
}

/// A thread-timer tick source that emits [`FrameTick`] events.
///
/// Create with [`TimerLoop::new`], then call [`start`](Self::start) to begin
/// receiving callbacks. The loop ticks until [`stop`](Self::stop) is called
/// or the `TimerLoop` is dropped.
pub struct TimerLoop {
    inner: Arc<TimerInner>,
    handle: Option<JoinHandle<()>>,
}

impl TimerLoop {
    /// Creates a new `TimerLoop` that is **not yet running**.
    ///
    /// `callback` will receive a [`FrameTick`] every `config.interval` once
    /// [`start`](Self::start) is called. `scene` identifies the scene the
    /// ticks drive.
    pub fn new(
        config: TickerConfig,
        scene: SceneId,
        callback: impl FnMut(FrameTick) + Send + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(TimerInner {
                running: AtomicBool::new(false),
                frame_counter: AtomicU64::new(0),
                callback: Mutex::new(Box::new(callback)),
                config,
                scene,
            }),
            handle: None,
        }
    }

    /// Starts the tick thread.
    ///
    /// If already running, this is a no-op.
    pub fn start(&mut self) {
        if self.inner.running.swap(true, Ordering::SeqCst) {
            return;
        }

        let inner = Arc::clone(&self.inner);
        self.handle = Some(thread::spawn(move || {
            let interval = std::time::Duration::from_micros(inner.config.interval.micros());
            while inner.running.load(Ordering::SeqCst) {
                thread::sleep(interval);
                // A stop that landed during the sleep cancels the pending tick.
                if !inner.running.load(Ordering::SeqCst) {
                    break;
                }

                let frame_index = inner.frame_counter.fetch_add(1, Ordering::Relaxed);
                let tick = FrameTick {
                    now: now(),
                    frame_index,
                    scene: inner.scene,
                };
                if let Ok(mut callback) = inner.callback.lock() {
                    callback(tick);
                }
            }
        }));
    }

    /// Stops the tick thread and waits for it to exit.
    ///
    /// The pending tick is cancelled; no callback runs after `stop` returns.
    /// If not running, this is a no-op. Can be restarted by calling
    /// [`start`](Self::start) again.
    pub fn stop(&mut self) {
        if !self.inner.running.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Returns `true` if the loop is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }
}

impl Drop for TimerLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for TimerLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerLoop")
            .field("running", &self.is_running())
            .field(
                "frame_counter",
                &self.inner.frame_counter.load(Ordering::Relaxed),
            )
            .field("scene", &self.inner.scene)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration as StdDuration;

    #[test]
    fn now_is_monotonic() {
        let a = now();
        let b = now();
        assert!(b >= a);
    }

    #[test]
    fn ticker_presets() {
        assert_eq!(TickerConfig::sixty_hz().interval, Duration::from_micros(16_667));
        assert_eq!(TickerConfig::thirty_hz().interval, Duration::from_micros(33_333));
        assert_eq!(TickerConfig::default(), TickerConfig::sixty_hz());
    }

    #[test]
    fn ticks_are_delivered_with_increasing_indices() {
        let (tx, rx) = mpsc::channel();
        let mut timer = TimerLoop::new(
            TickerConfig::new(Duration::from_millis(1)),
            SceneId(3),
            move |tick| {
                let _ = tx.send(tick);
            },
        );
        timer.start();

        let first = rx
            .recv_timeout(StdDuration::from_secs(5))
            .expect("first tick");
        let second = rx
            .recv_timeout(StdDuration::from_secs(5))
            .expect("second tick");
        timer.stop();

        assert_eq!(first.scene, SceneId(3));
        assert_eq!(second.frame_index, first.frame_index + 1);
        assert!(second.now >= first.now);
    }

    #[test]
    fn stop_cancels_pending_ticks() {
        let (tx, rx) = mpsc::channel();
        let mut timer = TimerLoop::new(
            TickerConfig::new(Duration::from_millis(1)),
            SceneId(0),
            move |tick| {
                let _ = tx.send(tick);
            },
        );
        timer.start();
        let _ = rx.recv_timeout(StdDuration::from_secs(5)).expect("a tick");
        timer.stop();
        assert!(!timer.is_running());

        // Drain whatever was in flight, then confirm silence.
        while rx.try_recv().is_ok() {}
        assert!(
            rx.recv_timeout(StdDuration::from_millis(50)).is_err(),
            "no callback may run after stop returns"
        );
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut timer = TimerLoop::new(TickerConfig::sixty_hz(), SceneId(0), |_tick| {});
        timer.stop();
        assert!(!timer.is_running());

        timer.start();
        timer.start();
        assert!(timer.is_running());
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());

        // Restart after a stop works.
        timer.start();
        assert!(timer.is_running());
    }
}
