// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use anabatic_core::time::HostTime;
use anabatic_core::timing::SceneId;
use anabatic_core::trace::{
    FrameSummary, FrameTickEvent, ReportEvent, RotorStepEvent, StorySlideEvent, StoryTraceKind,
    TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_FRAME_TICK: u8 = 1;
const TAG_ROTOR_STEP: u8 = 2;
const TAG_STORY: u8 = 3;
const TAG_REPORT: u8 = 4;
const TAG_FRAME_SUMMARY: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_story_kind(&mut self, kind: StoryTraceKind) {
        self.write_u8(match kind {
            StoryTraceKind::Advanced => 0,
            StoryTraceKind::Paused => 1,
            StoryTraceKind::Resumed => 2,
            StoryTraceKind::Exhausted => 3,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        self.write_u8(TAG_FRAME_TICK);
        self.write_u64(e.frame_index);
        self.write_u32(e.scene.0);
        self.write_u64(e.now.micros());
    }

    fn on_rotor_step(&mut self, e: &RotorStepEvent) {
        self.write_u8(TAG_ROTOR_STEP);
        self.write_u64(e.frame_index);
        self.write_u32(e.scene.0);
        self.write_u64(e.now.micros());
        self.write_u64(e.dt_micros);
        self.write_f64(e.rpm);
        self.write_u32(e.elements);
    }

    fn on_story(&mut self, e: &StorySlideEvent) {
        self.write_u8(TAG_STORY);
        self.write_u64(e.at.micros());
        self.write_story_kind(e.kind);
        self.write_u32(e.slide_index);
    }

    fn on_report(&mut self, e: &ReportEvent) {
        self.write_u8(TAG_REPORT);
        self.write_u64(e.at.micros());
        self.write_f64(e.megawatts);
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.write_u8(TAG_FRAME_SUMMARY);
        self.write_u64(s.frame_index);
        self.write_u32(s.scene.0);
        self.write_u64(s.now.micros());
        self.write_u64(s.dt_micros);
        self.write_f64(s.rpm);
        self.write_u8(u8::from(s.story_running));
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`FrameTickEvent`].
    FrameTick(FrameTickEvent),
    /// A [`RotorStepEvent`].
    RotorStep(RotorStepEvent),
    /// A [`StorySlideEvent`].
    Story(StorySlideEvent),
    /// A [`ReportEvent`].
    Report(ReportEvent),
    /// A [`FrameSummary`].
    FrameSummary(FrameSummary),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_f64(&mut self) -> Option<f64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = f64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_story_kind(&mut self) -> Option<StoryTraceKind> {
        Some(match self.read_u8()? {
            0 => StoryTraceKind::Advanced,
            1 => StoryTraceKind::Paused,
            2 => StoryTraceKind::Resumed,
            _ => StoryTraceKind::Exhausted,
        })
    }

    fn decode_frame_tick(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FrameTick(FrameTickEvent {
            frame_index: self.read_u64()?,
            scene: SceneId(self.read_u32()?),
            now: HostTime(self.read_u64()?),
        }))
    }

    fn decode_rotor_step(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RotorStep(RotorStepEvent {
            frame_index: self.read_u64()?,
            scene: SceneId(self.read_u32()?),
            now: HostTime(self.read_u64()?),
            dt_micros: self.read_u64()?,
            rpm: self.read_f64()?,
            elements: self.read_u32()?,
        }))
    }

    fn decode_story(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Story(StorySlideEvent {
            at: HostTime(self.read_u64()?),
            kind: self.read_story_kind()?,
            slide_index: self.read_u32()?,
        }))
    }

    fn decode_report(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Report(ReportEvent {
            at: HostTime(self.read_u64()?),
            megawatts: self.read_f64()?,
        }))
    }

    fn decode_frame_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FrameSummary(FrameSummary {
            frame_index: self.read_u64()?,
            scene: SceneId(self.read_u32()?),
            now: HostTime(self.read_u64()?),
            dt_micros: self.read_u64()?,
            rpm: self.read_f64()?,
            story_running: self.read_u8()? != 0,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_FRAME_TICK => self.decode_frame_tick(),
            TAG_ROTOR_STEP => self.decode_rotor_step(),
            TAG_STORY => self.decode_story(),
            TAG_REPORT => self.decode_report(),
            TAG_FRAME_SUMMARY => self.decode_frame_summary(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tick_event() -> FrameTickEvent {
        FrameTickEvent {
            frame_index: 7,
            scene: SceneId(1),
            now: HostTime(1_000_000),
        }
    }

    fn sample_rotor_event() -> RotorStepEvent {
        RotorStepEvent {
            frame_index: 7,
            scene: SceneId(1),
            now: HostTime(1_016_667),
            dt_micros: 16_667,
            rpm: 14.9,
            elements: 5,
        }
    }

    fn sample_summary() -> FrameSummary {
        FrameSummary {
            frame_index: 7,
            scene: SceneId(1),
            now: HostTime(1_000_000),
            dt_micros: 16_667,
            rpm: 14.9,
            story_running: true,
        }
    }

    #[test]
    fn round_trip_frame_tick() {
        let mut rec = RecorderSink::new();
        let orig = sample_tick_event();
        rec.on_frame_tick(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::FrameTick(e) => {
                assert_eq!(e.frame_index, orig.frame_index);
                assert_eq!(e.scene, orig.scene);
                assert_eq!(e.now, orig.now);
            }
            other => panic!("expected FrameTick, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_rotor_step() {
        let mut rec = RecorderSink::new();
        let orig = sample_rotor_event();
        rec.on_rotor_step(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::RotorStep(e) => {
                assert_eq!(e.frame_index, orig.frame_index);
                assert_eq!(e.dt_micros, orig.dt_micros);
                assert_eq!(e.rpm, orig.rpm);
                assert_eq!(e.elements, orig.elements);
            }
            other => panic!("expected RotorStep, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_story_kinds() {
        let kinds = [
            StoryTraceKind::Advanced,
            StoryTraceKind::Paused,
            StoryTraceKind::Resumed,
            StoryTraceKind::Exhausted,
        ];
        let mut rec = RecorderSink::new();
        for (i, kind) in kinds.iter().enumerate() {
            rec.on_story(&StorySlideEvent {
                at: HostTime(i as u64 * 1000),
                kind: *kind,
                slide_index: i as u32,
            });
        }

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), kinds.len());
        for (i, event) in events.iter().enumerate() {
            match event {
                RecordedEvent::Story(e) => {
                    assert_eq!(e.kind, kinds[i]);
                    assert_eq!(e.slide_index, i as u32);
                }
                other => panic!("expected Story, got {other:?}"),
            }
        }
    }

    #[test]
    fn round_trip_report() {
        let mut rec = RecorderSink::new();
        rec.on_report(&ReportEvent {
            at: HostTime(2_000_000),
            megawatts: 9.96,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::Report(e) => {
                assert_eq!(e.at, HostTime(2_000_000));
                assert_eq!(e.megawatts, 9.96);
            }
            other => panic!("expected Report, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_frame_summary() {
        let mut rec = RecorderSink::new();
        let orig = sample_summary();
        rec.on_frame_summary(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RecordedEvent::FrameSummary(s) => {
                assert_eq!(s.frame_index, orig.frame_index);
                assert_eq!(s.dt_micros, orig.dt_micros);
                assert_eq!(s.rpm, orig.rpm);
                assert_eq!(s.story_running, orig.story_running);
            }
            other => panic!("expected FrameSummary, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_multiple_events() {
        let mut rec = RecorderSink::new();
        rec.on_frame_tick(&sample_tick_event());
        rec.on_rotor_step(&sample_rotor_event());
        rec.on_frame_summary(&sample_summary());

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], RecordedEvent::FrameTick(_)));
        assert!(matches!(events[1], RecordedEvent::RotorStep(_)));
        assert!(matches!(events[2], RecordedEvent::FrameSummary(_)));
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn truncated_buffer_stops_cleanly() {
        let mut rec = RecorderSink::new();
        rec.on_rotor_step(&sample_rotor_event());
        let bytes = rec.as_bytes();
        let events: Vec<_> = decode(&bytes[..bytes.len() - 3]).collect();
        assert!(events.is_empty(), "partial record must not decode");
    }
}
