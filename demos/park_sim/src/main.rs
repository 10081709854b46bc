// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated exhibit loop that exercises the tracing and diagnostics
//! pipeline.
//!
//! Runs 20 synthetic seconds of 60 Hz frames: the wind ramps from calm to a
//! gale while the fleet spins, a visitor taps and holds their way through a
//! short story, and the debounced reporter delivers fleet output to a fake
//! endpoint. Events are recorded to both a
//! [`PrettyPrintSink`](anabatic_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](anabatic_debug::recorder::RecorderSink), then exported as
//! a Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use anabatic_core::blade::BladePlanform;
use anabatic_core::fleet::{self, TURBINE_COUNT};
use anabatic_core::physics::{PowerReadout, lift_coefficient, wind_to_rpm};
use anabatic_core::records::{DrivetrainStats, GearboxRecord, GeneratorRecord, TurbineRecord};
use anabatic_core::report::{OutputReporter, OutputSink};
use anabatic_core::story::{StoryEvent, StoryPlayer};
use anabatic_core::time::HostTime;
use anabatic_core::timing::{FrameTick, SceneId};
use anabatic_core::trace::{
    FrameSummary, FrameTickEvent, ReportEvent, RotorStepEvent, StorySlideEvent, StoryTraceKind,
    TraceSink, Tracer,
};

use anabatic_debug::pretty::PrettyPrintSink;
use anabatic_debug::recorder::RecorderSink;

const FRAME_COUNT: u64 = 1_200;
/// 16.667 ms frame interval in microseconds (60 Hz).
const FRAME_INTERVAL_US: u64 = 16_667;
const STORY_SLIDES: usize = 3;

/// Stands in for the external endpoint; counts deliveries.
#[derive(Default)]
struct CountingSink {
    sends: Vec<f64>,
}

impl OutputSink for CountingSink {
    fn send(&mut self, megawatts: f64) {
        self.sends.push(megawatts);
    }
}

/// Scripted wind: calm start, steady ramp to rated, then a gust.
fn wind_at(t_secs: f64) -> f64 {
    if t_secs < 2.0 {
        0.0
    } else if t_secs < 12.0 {
        (t_secs - 2.0) * 1.3
    } else {
        (13.0 + (t_secs - 12.0) * 2.0).min(25.0)
    }
}

fn story_kind(event: StoryEvent) -> StoryTraceKind {
    match event {
        StoryEvent::Advanced { .. } => StoryTraceKind::Advanced,
        StoryEvent::Paused => StoryTraceKind::Paused,
        StoryEvent::Resumed => StoryTraceKind::Resumed,
        StoryEvent::Exhausted => StoryTraceKind::Exhausted,
    }
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- engines -----------------------------------------------------------
    let scene = SceneId(0);
    let mut animator = fleet::fleet_animator();
    let mut player = StoryPlayer::new(STORY_SLIDES, HostTime(0));
    let mut reporter = OutputReporter::new();
    let mut sink = CountingSink::default();

    // -- simulated loop ----------------------------------------------------
    for frame_index in 0..FRAME_COUNT {
        let now = HostTime(frame_index * FRAME_INTERVAL_US);
        let t_secs = now.micros() as f64 / 1_000_000.0;
        let tick = FrameTick {
            now,
            frame_index,
            scene,
        };

        let tick_event = FrameTickEvent::from(&tick);
        recorder.on_frame_tick(&tick_event);

        // 1. Rotor: live rate from the scripted wind.
        let wind = wind_at(t_secs);
        let rpm = wind_to_rpm(wind);
        let dt = animator.step(now, rpm);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "element count is the fixed park size"
        )]
        let rotor_event = RotorStepEvent {
            frame_index,
            scene,
            now,
            dt_micros: dt.micros(),
            rpm,
            elements: animator.len() as u32,
        };
        recorder.on_rotor_step(&rotor_event);

        // 2. Visitor script: a tap at 4s, a 1.5s hold starting at 8s.
        if frame_index == 240 {
            player.press(now);
        }
        if frame_index == 246 {
            if let Some(event) = player.release(now) {
                emit_story(&mut pretty, &mut recorder, now, &player, event);
            }
        }
        if frame_index == 480 {
            player.press(now);
        }
        if frame_index == 570 {
            if let Some(event) = player.release(now) {
                emit_story(&mut pretty, &mut recorder, now, &player, event);
            }
        }

        if let Some(event) = player.on_tick(now) {
            emit_story(&mut pretty, &mut recorder, now, &player, event);
        }

        // 3. Debounced report: quantize to hundredths so per-frame jitter
        //    coalesces like the exhibit's displayed value.
        let fleet_mw = (fleet::fleet_power_mw(wind) * 100.0).round() / 100.0;
        reporter.note(now, fleet_mw);
        if let Some(sent) = reporter.poll(now, &mut sink) {
            let report_event = ReportEvent {
                at: now,
                megawatts: sent,
            };
            pretty.on_report(&report_event);
            recorder.on_report(&report_event);
        }

        // 4. Summary once per simulated second.
        if frame_index % 60 == 0 {
            let summary = FrameSummary {
                frame_index,
                scene,
                now,
                dt_micros: dt.micros(),
                rpm,
                story_running: player.is_running(),
            };
            pretty.on_frame_summary(&summary);
            recorder.on_frame_summary(&summary);
        }

        // Exercise the Tracer wrapper once (it dispatches when the `trace`
        // feature is enabled).
        if frame_index == 0 {
            let mut tracer = Tracer::new(&mut recorder);
            tracer.frame_tick(&tick_event);
        }
    }

    // -- wrap-up -----------------------------------------------------------
    println!("story exhausted: {}", player.is_exhausted());
    println!("reports delivered: {:?}", sink.sends);
    let angles: Vec<f64> = animator.angles().collect();
    for i in 0..TURBINE_COUNT {
        println!("turbine T-{:02} angle: {:6.1}°", i + 1, angles[i]);
    }

    let final_wind = wind_at((FRAME_COUNT * FRAME_INTERVAL_US) as f64 / 1_000_000.0);
    let turbine = TurbineRecord::exhibit();
    let readout = PowerReadout::compute(final_wind, &turbine);
    println!(
        "reference turbine at {final_wind:.1} m/s: {:.2} MW of {:.2} MW available, {:.1} RPM",
        readout.power_mw, readout.wind_power_available_mw, readout.rotor_rpm,
    );
    let drivetrain = DrivetrainStats::derive(&GearboxRecord::exhibit(), &GeneratorRecord::exhibit());
    println!(
        "drivetrain: {:?}, combined efficiency {:.1}%, {:.1} t",
        drivetrain.kind,
        drivetrain.combined_efficiency * 100.0,
        drivetrain.total_mass_tonnes,
    );
    let blade = BladePlanform::default();
    println!(
        "reference blade: {:.0} N lift at 8° attack, {:.0} kg, ${:.0}",
        blade.total_lift_n(final_wind, lift_coefficient(8.0)),
        blade.mass_kg(),
        blade.cost_usd(),
    );

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    anabatic_debug::chrome::export(recorder.as_bytes(), &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({FRAME_COUNT} frames)");
}

fn emit_story(
    pretty: &mut PrettyPrintSink,
    recorder: &mut RecorderSink,
    now: HostTime,
    player: &StoryPlayer,
    event: StoryEvent,
) {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "slide indices are tiny"
    )]
    let e = StorySlideEvent {
        at: now,
        kind: story_kind(event),
        slide_index: player.display_index() as u32,
    };
    pretty.on_story(&e);
    recorder.on_story(&e);
}
