// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core state machines and physics for timing-driven turbine exhibits.
//!
//! `anabatic_core` provides the engine behind an educational wind-turbine
//! exhibit: continuously rotating rotor illustrations driven by live physical
//! parameters, an auto-advancing story player with press-to-pause and
//! tap-to-advance, and the pure physics/geometry helpers both consume. It is
//! `no_std` compatible (with `alloc`) and owns no platform resources — hosts
//! inject time and frame callbacks through backend crates.
//!
//! # Architecture
//!
//! The crate is organized around a frame loop that turns platform display
//! callbacks into incremental scene updates:
//!
//! ```text
//!   Backend (tick source)
//!       │
//!       ▼
//!   FrameTick ──► RotorAnimator::step() ──► RotorSurface::apply_rotation()
//!       │
//!       ├──────► StoryPlayer::on_tick() ──► StoryEvent (advance/exhaust)
//!       │
//!       └──────► OutputReporter::poll() ──► OutputSink::send()
//! ```
//!
//! **[`time`]** — Monotonic host time in microsecond ticks.
//!
//! **[`timing`]** — [`FrameTick`](timing::FrameTick), the frame opportunity
//! delivered by backend tick sources, and scene identification.
//!
//! **[`rotor`]** — The rotation animator: per-element angle accumulators
//! advanced each frame at a rate derived from the live rotor speed.
//!
//! **[`surface`]** — The [`RotorSurface`](surface::RotorSurface) trait that
//! backends implement to push rotation transforms onto render targets.
//!
//! **[`story`]** — The story player state machine: timed slide advancement,
//! hold-to-pause, tap-to-advance, one-shot exhaustion signal.
//!
//! **[`physics`]** — Power curve, lift, and rotor-speed conversions.
//!
//! **[`blade`]** — Blade planform geometry and section force integration.
//!
//! **[`fleet`]** — The five-turbine park layout and fleet power aggregates.
//!
//! **[`records`]** — Plain numeric subsystem records supplied by an external
//! fetch layer.
//!
//! **[`report`]** — Debounced, fire-and-forget output notification.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! frame-loop instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod blade;
pub mod fleet;
pub mod physics;
pub mod records;
pub mod report;
pub mod rotor;
pub mod story;
pub mod surface;
pub mod time;
pub mod timing;
pub mod trace;
