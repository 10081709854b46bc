// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the exhibit frame loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! frame-loop instrumentation calls at each stage. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing (zero
//! overhead). When **on**, each method performs a single `Option` branch
//! before dispatching.

use crate::time::HostTime;
use crate::timing::{FrameTick, SceneId};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a backend delivers a frame tick.
#[derive(Clone, Copy, Debug)]
pub struct FrameTickEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Which scene this tick targets.
    pub scene: SceneId,
    /// Host time when the tick was generated.
    pub now: HostTime,
}

impl From<&FrameTick> for FrameTickEvent {
    fn from(tick: &FrameTick) -> Self {
        Self {
            frame_index: tick.frame_index,
            scene: tick.scene,
            now: tick.now,
        }
    }
}

/// Emitted after the rotor animator advances its elements for a frame.
#[derive(Clone, Copy, Debug)]
pub struct RotorStepEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Which scene was advanced.
    pub scene: SceneId,
    /// Host time of the step.
    pub now: HostTime,
    /// Elapsed time integrated this step, µs (0 on a skip-frame).
    pub dt_micros: u64,
    /// The live rate the step used.
    pub rpm: f64,
    /// Number of elements advanced.
    pub elements: u32,
}

/// Which story transition occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoryTraceKind {
    /// Playback advanced to a new slide.
    Advanced,
    /// A hold paused playback.
    Paused,
    /// The hold ended and playback resumed.
    Resumed,
    /// The sequence finished.
    Exhausted,
}

/// Emitted when the story player reports a transition.
#[derive(Clone, Copy, Debug)]
pub struct StorySlideEvent {
    /// Host time of the transition.
    pub at: HostTime,
    /// Which transition occurred.
    pub kind: StoryTraceKind,
    /// Current slide index after the transition.
    pub slide_index: u32,
}

/// Emitted when the debounced output reporter delivers a value.
#[derive(Clone, Copy, Debug)]
pub struct ReportEvent {
    /// Host time of the send.
    pub at: HostTime,
    /// Delivered output, MW.
    pub megawatts: f64,
}

/// Per-frame summary produced at the end of a frame callback.
#[derive(Clone, Copy, Debug)]
pub struct FrameSummary {
    /// Frame counter.
    pub frame_index: u64,
    /// Which scene.
    pub scene: SceneId,
    /// Host time of the tick.
    pub now: HostTime,
    /// Frame delta, µs (0 on a skip-frame).
    pub dt_micros: u64,
    /// Rotor rate in effect this frame.
    pub rpm: f64,
    /// Whether story playback was running this frame.
    pub story_running: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the frame loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a frame tick is received.
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        _ = e;
    }

    /// Called after the rotor animator steps.
    fn on_rotor_step(&mut self, e: &RotorStepEvent) {
        _ = e;
    }

    /// Called when the story player transitions.
    fn on_story(&mut self, e: &StorySlideEvent) {
        _ = e;
    }

    /// Called when a debounced output report is delivered.
    fn on_report(&mut self, e: &ReportEvent) {
        _ = e;
    }

    /// Called with a per-frame summary.
    fn on_frame_summary(&mut self, s: &FrameSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`FrameTickEvent`].
    #[inline]
    pub fn frame_tick(&mut self, e: &FrameTickEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame_tick(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RotorStepEvent`].
    #[inline]
    pub fn rotor_step(&mut self, e: &RotorStepEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_rotor_step(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StorySlideEvent`].
    #[inline]
    pub fn story(&mut self, e: &StorySlideEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_story(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ReportEvent`].
    #[inline]
    pub fn report(&mut self, e: &ReportEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_report(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameSummary`].
    #[inline]
    pub fn frame_summary(&mut self, s: &FrameSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_frame_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }
}
