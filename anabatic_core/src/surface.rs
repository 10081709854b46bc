// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for render surfaces.
//!
//! Anabatic splits platform-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Tick source** — Produces [`FrameTick`] values via a platform mechanism
//!   (`requestAnimationFrame` on the web, a thread timer elsewhere). This is
//!   backend-specific and not abstracted by a trait because the setup and
//!   lifecycle differ fundamentally across platforms.
//!
//! - **Time** — A `now() -> HostTime` free function that reads the platform's
//!   monotonic clock in microseconds.
//!
//! - **Surface** — Implements the [`RotorSurface`] trait to apply rotation
//!   transforms to native render targets (SVG groups, scene-graph nodes).
//!
//! # Crate boundaries
//!
//! `anabatic_core` owns the state machines, physics, and this contract
//! module. Backend crates depend on `anabatic_core` and provide platform
//! glue. Application code depends on both and wires them together in a frame
//! loop.
//!
//! [`FrameTick`]: crate::timing::FrameTick
//! [`HostTime`]: crate::time::HostTime

use kurbo::Point;

/// Applies per-element rotation transforms to a platform render target.
///
/// Both SVG-backed and test-double surfaces implement this trait, enabling
/// generic frame loops. A surface must tolerate targets that have gone away:
/// applying a rotation to a missing or detached element is a silent no-op for
/// that element only.
///
/// # Frame loop pseudocode
///
/// A typical frame callback wires the pieces together like this:
///
/// ```rust,ignore
/// fn on_frame(tick: FrameTick) {
///     // Read the live rate — never a value captured at start time.
///     let rpm = physics::wind_to_rpm(controls.wind_speed());
///
///     // Advance accumulators and push transforms to the scene.
///     animator.step_and_apply(tick.now, rpm, &mut surface);
///
///     // Drive the story player and the debounced output report.
///     if let Some(event) = player.on_tick(tick.now) {
///         handle(event);
///     }
///     reporter.note(tick.now, fleet::fleet_power_mw(controls.wind_speed()));
///     reporter.poll(tick.now, &mut sink);
/// }
/// ```
pub trait RotorSurface {
    /// Applies `angle_deg` degrees of rotation about `hub` to the render
    /// target registered for `element`.
    fn apply_rotation(&mut self, element: usize, angle_deg: f64, hub: Point);
}
