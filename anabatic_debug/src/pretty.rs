// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are printed in milliseconds.

use std::io::Write;

use anabatic_core::time::HostTime;
use anabatic_core::trace::{
    FrameSummary, FrameTickEvent, ReportEvent, RotorStepEvent, StorySlideEvent, StoryTraceKind,
    TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

fn host_ms(t: HostTime) -> f64 {
    t.micros() as f64 / 1000.0
}

fn story_kind_name(kind: StoryTraceKind) -> &'static str {
    match kind {
        StoryTraceKind::Advanced => "advanced",
        StoryTraceKind::Paused => "paused",
        StoryTraceKind::Resumed => "resumed",
        StoryTraceKind::Exhausted => "exhausted",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        let _ = writeln!(
            self.writer,
            "[tick] frame={} scene={} now={:.1}ms",
            e.frame_index,
            e.scene.0,
            host_ms(e.now),
        );
    }

    fn on_rotor_step(&mut self, e: &RotorStepEvent) {
        let _ = writeln!(
            self.writer,
            "[rotor] frame={} dt={:.1}ms rpm={:.1} elements={}",
            e.frame_index,
            e.dt_micros as f64 / 1000.0,
            e.rpm,
            e.elements,
        );
    }

    fn on_story(&mut self, e: &StorySlideEvent) {
        let _ = writeln!(
            self.writer,
            "[story] {} slide={} at {:.1}ms",
            story_kind_name(e.kind),
            e.slide_index,
            host_ms(e.at),
        );
    }

    fn on_report(&mut self, e: &ReportEvent) {
        let _ = writeln!(
            self.writer,
            "[report] {:.2}MW at {:.1}ms",
            e.megawatts,
            host_ms(e.at),
        );
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        let story = if s.story_running { "running" } else { "idle" };
        let _ = writeln!(
            self.writer,
            "[summary] frame={} dt={:.1}ms rpm={:.1} story={story}",
            s.frame_index,
            s.dt_micros as f64 / 1000.0,
            s.rpm,
        );
    }
}
