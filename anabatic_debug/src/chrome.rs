// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Host timestamps are already microseconds, which is the format's native
/// unit. Rotor steps become complete (`X`) slices spanning the integrated
/// frame delta; everything else is an instant event.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::FrameTick(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "FrameTick",
                    "cat": "Loop",
                    "ts": e.now.micros(),
                    "pid": e.scene.0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::RotorStep(e) => {
                events.push(json!({
                    "ph": "X",
                    "name": "RotorStep",
                    "cat": "Rotor",
                    "ts": e.now.micros().saturating_sub(e.dt_micros),
                    "dur": e.dt_micros,
                    "pid": e.scene.0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                        "rpm": e.rpm,
                        "elements": e.elements,
                    }
                }));
            }
            RecordedEvent::Story(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("Story{:?}", e.kind),
                    "cat": "Story",
                    "ts": e.at.micros(),
                    "pid": 0,
                    "tid": 1,
                    "s": "t",
                    "args": {
                        "slide_index": e.slide_index,
                    }
                }));
            }
            RecordedEvent::Report(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "OutputReport",
                    "cat": "Report",
                    "ts": e.at.micros(),
                    "pid": 0,
                    "tid": 2,
                    "s": "t",
                    "args": {
                        "megawatts": e.megawatts,
                    }
                }));
            }
            RecordedEvent::FrameSummary(s) => {
                events.push(json!({
                    "ph": "i",
                    "name": "FrameSummary",
                    "cat": "Summary",
                    "ts": s.now.micros(),
                    "pid": s.scene.0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": s.frame_index,
                        "dt_micros": s.dt_micros,
                        "rpm": s.rpm,
                        "story_running": s.story_running,
                    }
                }));
            }
        }
    }

    serde_json::to_writer(writer, &events).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use anabatic_core::time::HostTime;
    use anabatic_core::timing::SceneId;
    use anabatic_core::trace::{
        FrameTickEvent, ReportEvent, RotorStepEvent, StorySlideEvent, StoryTraceKind, TraceSink,
    };

    #[test]
    fn export_produces_a_json_array() {
        let mut rec = RecorderSink::new();
        rec.on_frame_tick(&FrameTickEvent {
            frame_index: 0,
            scene: SceneId(0),
            now: HostTime(1_000_000),
        });
        rec.on_rotor_step(&RotorStepEvent {
            frame_index: 0,
            scene: SceneId(0),
            now: HostTime(1_016_667),
            dt_micros: 16_667,
            rpm: 14.9,
            elements: 5,
        });
        rec.on_story(&StorySlideEvent {
            at: HostTime(6_000_000),
            kind: StoryTraceKind::Advanced,
            slide_index: 1,
        });
        rec.on_report(&ReportEvent {
            at: HostTime(7_000_000),
            megawatts: 9.96,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).expect("export failed");

        let parsed: serde_json::Value =
            serde_json::from_slice(&out).expect("exporter must emit valid JSON");
        let events = parsed.as_array().expect("top level is an array");
        assert_eq!(events.len(), 4);
        assert_eq!(events[0]["name"], "FrameTick");
        assert_eq!(events[1]["ph"], "X");
        assert_eq!(events[1]["dur"], 16_667);
        assert_eq!(events[1]["ts"], 1_000_000);
        assert_eq!(events[2]["name"], "StoryAdvanced");
        assert_eq!(events[3]["args"]["megawatts"], 9.96);
    }

    #[test]
    fn skip_frame_slice_does_not_underflow() {
        let mut rec = RecorderSink::new();
        rec.on_rotor_step(&RotorStepEvent {
            frame_index: 0,
            scene: SceneId(0),
            now: HostTime(10),
            dt_micros: 100,
            rpm: 0.0,
            elements: 1,
        });
        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).expect("export failed");
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["ts"], 0, "ts saturates at zero");
    }
}
