// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Blade planform geometry and section force integration.
//!
//! The blade designer view treats a blade as a quadratically tapered
//! planform: the chord at normalized radius `r` is `max_chord · (1 − r²)`.
//! Forces are integrated as a discrete Riemann sum over
//! [`SECTION_COUNT`] equal-length radial sections evaluated at their
//! midpoints — an illustration-grade approximation, not a claim of
//! aerodynamic accuracy.

use alloc::vec::Vec;

use kurbo::Point;

use crate::physics::{dynamic_pressure_pa, wind_to_power_mw};
use crate::records::BladeRecord;

/// Number of radial sections the blade is discretized into.
pub const SECTION_COUNT: usize = 10;

/// Fewest blades the designer allows.
pub const MIN_BLADE_COUNT: u32 = 1;
/// Most blades the designer allows.
pub const MAX_BLADE_COUNT: u32 = 6;

/// Shortest selectable blade, m.
pub const MIN_LENGTH_M: f64 = 20.0;
/// Longest selectable blade, m.
pub const MAX_LENGTH_M: f64 = 80.0;
/// Blade length stepper increment, m.
pub const LENGTH_STEP_M: f64 = 5.0;
/// Narrowest selectable max chord, m.
pub const MIN_CHORD_M: f64 = 1.0;
/// Widest selectable max chord, m.
pub const MAX_CHORD_M: f64 = 6.0;
/// Max chord stepper increment, m.
pub const CHORD_STEP_M: f64 = 0.5;

/// Lift and drag contributed by one radial section, N.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SectionForces {
    /// Lift contribution, N.
    pub lift_n: f64,
    /// Drag contribution, N.
    pub drag_n: f64,
}

/// A quadratically tapered blade planform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BladePlanform {
    /// Blade length root to tip, m.
    pub length_m: f64,
    /// Chord at the widest point, m.
    pub max_chord_m: f64,
}

impl BladePlanform {
    /// Creates a planform with the given length and max chord.
    #[must_use]
    pub const fn new(length_m: f64, max_chord_m: f64) -> Self {
        Self {
            length_m,
            max_chord_m,
        }
    }

    /// Creates a planform from a blade record.
    #[must_use]
    pub const fn from_record(record: &BladeRecord) -> Self {
        Self::new(record.blade_length_m, record.max_chord_m)
    }

    /// Local chord at normalized radius `r` in `[0, 1]`, m.
    #[must_use]
    pub fn chord_at(&self, r: f64) -> f64 {
        self.max_chord_m * (1.0 - r * r)
    }

    /// Per-section lift and drag at the given wind speed and lift
    /// coefficient.
    ///
    /// Each section spans `length / SECTION_COUNT` and is evaluated at its
    /// midpoint radius. The drag coefficient is the exhibit's
    /// `0.05 + 0.1·cl²` profile-drag estimate.
    #[must_use]
    pub fn section_forces(&self, wind_mps: f64, lift_coefficient: f64) -> [SectionForces; SECTION_COUNT] {
        let q = dynamic_pressure_pa(wind_mps);
        let segment_len = self.length_m / SECTION_COUNT as f64;
        let drag_coefficient = 0.05 + 0.1 * lift_coefficient * lift_coefficient;

        let mut sections = [SectionForces::default(); SECTION_COUNT];
        for (i, section) in sections.iter_mut().enumerate() {
            let r = (i as f64 + 0.5) / SECTION_COUNT as f64;
            let area = self.chord_at(r) * segment_len;
            section.lift_n = q * area * lift_coefficient;
            section.drag_n = q * area * drag_coefficient;
        }
        sections
    }

    /// Total lift over all sections, N.
    #[must_use]
    pub fn total_lift_n(&self, wind_mps: f64, lift_coefficient: f64) -> f64 {
        self.section_forces(wind_mps, lift_coefficient)
            .iter()
            .map(|s| s.lift_n)
            .sum()
    }

    /// Total drag over all sections, N.
    #[must_use]
    pub fn total_drag_n(&self, wind_mps: f64, lift_coefficient: f64) -> f64 {
        self.section_forces(wind_mps, lift_coefficient)
            .iter()
            .map(|s| s.drag_n)
            .sum()
    }

    /// Estimated blade mass, kg (exhibit estimate: `8 · length · chord`).
    #[must_use]
    pub fn mass_kg(&self) -> f64 {
        8.0 * self.length_m * self.max_chord_m
    }

    /// Estimated blade cost, USD (exhibit estimate: `mass · 200`).
    #[must_use]
    pub fn cost_usd(&self) -> f64 {
        self.mass_kg() * 200.0
    }

    /// Closed planform outline for rendering: the left edge root→tip, then
    /// the right edge tip→root, centered on the span axis.
    ///
    /// `samples` points are placed per edge (at least 2). Coordinates are in
    /// meters: `x` is the signed half-chord, `y` the spanwise position from
    /// root (0) to tip (`length_m`).
    #[must_use]
    pub fn profile_points(&self, samples: usize) -> Vec<Point> {
        let samples = samples.max(2);
        let mut outline = Vec::with_capacity(samples * 2);
        for i in 0..samples {
            let t = i as f64 / (samples - 1) as f64;
            let half = self.chord_at(t) / 2.0;
            outline.push(Point::new(-half, t * self.length_m));
        }
        for i in (0..samples).rev() {
            let t = i as f64 / (samples - 1) as f64;
            let half = self.chord_at(t) / 2.0;
            outline.push(Point::new(half, t * self.length_m));
        }
        outline
    }

    /// Steps the blade length up, clamped to [`MAX_LENGTH_M`].
    pub fn lengthen(&mut self) {
        self.length_m = (self.length_m + LENGTH_STEP_M).min(MAX_LENGTH_M);
    }

    /// Steps the blade length down, clamped to [`MIN_LENGTH_M`].
    pub fn shorten(&mut self) {
        self.length_m = (self.length_m - LENGTH_STEP_M).max(MIN_LENGTH_M);
    }

    /// Steps the max chord up, clamped to [`MAX_CHORD_M`].
    pub fn widen(&mut self) {
        self.max_chord_m = (self.max_chord_m + CHORD_STEP_M).min(MAX_CHORD_M);
    }

    /// Steps the max chord down, clamped to [`MIN_CHORD_M`].
    pub fn narrow(&mut self) {
        self.max_chord_m = (self.max_chord_m - CHORD_STEP_M).max(MIN_CHORD_M);
    }
}

impl Default for BladePlanform {
    fn default() -> Self {
        Self::from_record(&BladeRecord::exhibit())
    }
}

/// Evenly spaced starting phases for a rotor with `count` blades, degrees.
///
/// The designer scene redraws its blade group from these whenever the count
/// slider moves.
#[must_use]
pub fn blade_phases_deg(count: u32) -> Vec<f64> {
    let count = count.clamp(MIN_BLADE_COUNT, MAX_BLADE_COUNT);
    (0..count)
        .map(|i| f64::from(i) * (360.0 / f64::from(count)))
        .collect()
}

/// Output derating for a blade count: unity at three blades, dropping 6%
/// per blade away from three.
#[must_use]
pub fn count_derating(count: u32) -> f64 {
    let deviation = i64::from(count) - 3;
    1.0 - deviation.unsigned_abs() as f64 * 0.06
}

/// Power at `wind` for a rotor with `count` blades, MW.
#[must_use]
pub fn derated_power_mw(wind_mps: f64, count: u32) -> f64 {
    wind_to_power_mw(wind_mps) * count_derating(count)
}
