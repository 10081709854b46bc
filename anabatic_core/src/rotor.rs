// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous rotor rotation driven by a live rate.
//!
//! A [`RotorAnimator`] owns one angle accumulator per rotating element and
//! advances all of them once per frame at a rate derived from the current
//! rotor speed. The rate is read fresh on every [`step`](RotorAnimator::step)
//! — slider-driven RPM changes take effect on the next frame without
//! restarting the animator.
//!
//! Each element owns an *independent* accumulator. In the fleet scene the
//! five turbines spin at different relative speeds; deriving their angles
//! from one shared base angle would accumulate a different rounding error
//! than per-element integration, so every element integrates its own angle.
//!
//! # First-frame skip
//!
//! The animator retains only the previous tick's timestamp. The first step
//! after construction or [`reset`](RotorAnimator::reset) records the
//! timestamp and performs no rotation: without this, the first callback
//! after a long pause would apply one artificially large jump proportional
//! to the time the loop was stopped.

use alloc::vec::Vec;

use kurbo::Point;

use crate::surface::RotorSurface;
use crate::time::{Duration, HostTime};

/// Degrees swept per second at 1 RPM.
pub const DEGREES_PER_RPM_SECOND: f64 = 6.0;

/// One rotating element: a hub to rotate about, a relative speed factor, and
/// the accumulated angle.
#[derive(Clone, Copy, Debug)]
pub struct RotorElement {
    /// Rotation center in scene coordinates.
    pub hub: Point,
    /// Relative speed multiplier applied to the shared base rate.
    pub speed_factor: f64,
    /// Accumulated rotation in degrees, always in `[0, 360)`.
    angle_deg: f64,
}

impl RotorElement {
    /// Creates an element with the given hub, speed factor, and starting
    /// angle (wrapped into `[0, 360)`).
    #[must_use]
    pub fn new(hub: Point, speed_factor: f64, initial_angle_deg: f64) -> Self {
        Self {
            hub,
            speed_factor,
            angle_deg: wrap_degrees(initial_angle_deg),
        }
    }

    /// Returns the accumulated rotation in degrees, in `[0, 360)`.
    #[must_use]
    pub const fn angle_deg(&self) -> f64 {
        self.angle_deg
    }
}

/// Advances a set of [`RotorElement`]s over time at a live RPM.
#[derive(Clone, Debug, Default)]
pub struct RotorAnimator {
    elements: Vec<RotorElement>,
    /// Previous tick timestamp; `None` means the next step is a skip-frame.
    last_tick: Option<HostTime>,
}

impl RotorAnimator {
    /// Creates an empty animator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an animator over the given elements.
    #[must_use]
    pub fn with_elements(elements: Vec<RotorElement>) -> Self {
        Self {
            elements,
            last_tick: None,
        }
    }

    /// Adds an element and returns its index.
    pub fn push_element(&mut self, element: RotorElement) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    /// Returns the number of tracked elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if no elements are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the element at `idx`, if present.
    #[must_use]
    pub fn element(&self, idx: usize) -> Option<&RotorElement> {
        self.elements.get(idx)
    }

    /// Returns an iterator over current element angles in degrees.
    pub fn angles(&self) -> impl Iterator<Item = f64> + '_ {
        self.elements.iter().map(RotorElement::angle_deg)
    }

    /// Advances every element to `now` at the given RPM.
    ///
    /// `rpm` is the *current* rate; callers derive it from live parameters
    /// each frame rather than capturing it once. The first call after
    /// construction or [`reset`](Self::reset) only records `now` (skip-frame
    /// policy). A non-monotonic `now` (earlier than the previous tick)
    /// produces a zero delta, not a panic.
    ///
    /// Returns the elapsed time that was integrated ([`Duration::ZERO`] on a
    /// skip-frame), which instrumentation feeds into rotor-step events.
    pub fn step(&mut self, now: HostTime, rpm: f64) -> Duration {
        let Some(prev) = self.last_tick else {
            self.last_tick = Some(now);
            return Duration::ZERO;
        };

        let dt = now.saturating_duration_since(prev);
        let dps = rpm * DEGREES_PER_RPM_SECOND;
        let dt_secs = dt.as_secs_f64();
        for element in &mut self.elements {
            element.angle_deg =
                wrap_degrees(element.angle_deg + dps * element.speed_factor * dt_secs);
        }
        self.last_tick = Some(now);
        dt
    }

    /// Pushes every element's current angle to `surface`.
    ///
    /// Within one frame this applies all element updates back to back, so a
    /// reader of the rendered transforms never observes a partial update
    /// (single-threaded cooperative stepping).
    pub fn apply(&self, surface: &mut dyn RotorSurface) {
        for (idx, element) in self.elements.iter().enumerate() {
            surface.apply_rotation(idx, element.angle_deg, element.hub);
        }
    }

    /// [`step`](Self::step) followed by [`apply`](Self::apply).
    ///
    /// Returns the integrated elapsed time, as [`step`](Self::step) does.
    pub fn step_and_apply(
        &mut self,
        now: HostTime,
        rpm: f64,
        surface: &mut dyn RotorSurface,
    ) -> Duration {
        let dt = self.step(now, rpm);
        self.apply(surface);
        dt
    }

    /// Forgets the previous tick timestamp.
    ///
    /// Call when the driving loop stops. The next [`step`](Self::step) after
    /// a restart is then a skip-frame instead of integrating across the
    /// entire stopped interval. Element angles are retained.
    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}

/// Wraps an angle into `[0, 360)`.
///
/// Accumulation only ever adds non-negative deltas, so the plain remainder
/// matches the host convention (`angle % 360`).
fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle % 360.0;
    if wrapped < 0.0 { wrapped + 360.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const EPS: f64 = 1e-9;

    fn single(initial: f64) -> RotorAnimator {
        RotorAnimator::with_elements(vec![RotorElement::new(
            Point::new(150.0, 117.0),
            1.0,
            initial,
        )])
    }

    fn only_angle(animator: &RotorAnimator) -> f64 {
        animator.element(0).unwrap().angle_deg()
    }

    #[test]
    fn first_step_is_a_skip_frame() {
        let mut animator = single(0.0);
        animator.step(HostTime(5_000_000), 15.0);
        assert!(only_angle(&animator).abs() < EPS, "no rotation on first frame");
    }

    #[test]
    fn second_step_integrates_rpm() {
        let mut animator = single(0.0);
        animator.step(HostTime(0), 10.0);
        // 0.5s at 10 RPM = 10 * 6 * 0.5 = 30 degrees.
        animator.step(HostTime(500_000), 10.0);
        assert!((only_angle(&animator) - 30.0).abs() < EPS);
    }

    #[test]
    fn angle_wraps_modulo_360() {
        let mut animator = single(350.0);
        animator.step(HostTime(0), 10.0);
        // 0.5s at 10 RPM = 30 degrees: 350 + 30 = 380 → 20.
        animator.step(HostTime(500_000), 10.0);
        assert!((only_angle(&animator) - 20.0).abs() < EPS);
    }

    #[test]
    fn reset_prevents_wall_clock_jump() {
        let mut animator = single(0.0);
        animator.step(HostTime(0), 10.0);
        animator.step(HostTime(500_000), 10.0);
        let before = only_angle(&animator);

        // Loop stops; an hour passes; loop restarts.
        animator.reset();
        animator.step(HostTime(3_600_000_000 + 500_000), 10.0);
        assert!(
            (only_angle(&animator) - before).abs() < EPS,
            "first post-restart frame must not integrate the stopped interval"
        );

        // Normal integration resumes on the following frame.
        animator.step(HostTime(3_600_000_000 + 1_000_000), 10.0);
        assert!((only_angle(&animator) - (before + 30.0)).abs() < EPS);
    }

    #[test]
    fn rate_is_read_each_frame() {
        let mut animator = single(0.0);
        animator.step(HostTime(0), 10.0);
        animator.step(HostTime(1_000_000), 10.0); // 60 degrees
        animator.step(HostTime(2_000_000), 0.0); // wind died: no movement
        assert!((only_angle(&animator) - 60.0).abs() < EPS);
        animator.step(HostTime(3_000_000), 5.0); // 30 degrees
        assert!((only_angle(&animator) - 90.0).abs() < EPS);
    }

    #[test]
    fn elements_accumulate_independently() {
        let factors = [1.20, 1.08, 1.00, 0.90, 0.80];
        let phases = [0.0, 24.0, 48.0, 72.0, 96.0];
        let elements = factors
            .iter()
            .zip(phases)
            .map(|(&f, p)| RotorElement::new(Point::ORIGIN, f, p))
            .collect();
        let mut animator = RotorAnimator::with_elements(elements);

        animator.step(HostTime(0), 10.0);
        animator.step(HostTime(1_000_000), 10.0); // base 60 degrees

        for (i, angle) in animator.angles().enumerate() {
            let expected = (phases[i] + 60.0 * factors[i]) % 360.0;
            assert!(
                (angle - expected).abs() < EPS,
                "element {i}: expected {expected}, got {angle}"
            );
        }
    }

    #[test]
    fn non_monotonic_tick_is_a_zero_delta() {
        let mut animator = single(0.0);
        animator.step(HostTime(1_000_000), 10.0);
        animator.step(HostTime(500_000), 10.0);
        assert!(only_angle(&animator).abs() < EPS);
    }

    #[test]
    fn apply_visits_every_element() {
        struct Recording {
            seen: Vec<(usize, f64, Point)>,
        }
        impl RotorSurface for Recording {
            fn apply_rotation(&mut self, element: usize, angle_deg: f64, hub: Point) {
                self.seen.push((element, angle_deg, hub));
            }
        }

        let mut animator = RotorAnimator::new();
        animator.push_element(RotorElement::new(Point::new(388.0, 198.0), 1.2, 0.0));
        animator.push_element(RotorElement::new(Point::new(295.0, 172.0), 1.08, 24.0));

        let mut surface = Recording { seen: Vec::new() };
        animator.step_and_apply(HostTime(0), 10.0, &mut surface);
        assert_eq!(surface.seen.len(), 2);
        assert_eq!(surface.seen[0].0, 0);
        assert_eq!(surface.seen[1].0, 1);
        assert_eq!(surface.seen[1].2, Point::new(295.0, 172.0));
    }

    #[test]
    fn initial_angle_is_wrapped() {
        let element = RotorElement::new(Point::ORIGIN, 1.0, 725.0);
        assert!((element.angle_deg() - 5.0).abs() < EPS);
        let element = RotorElement::new(Point::ORIGIN, 1.0, -30.0);
        assert!((element.angle_deg() - 330.0).abs() < EPS);
    }
}
