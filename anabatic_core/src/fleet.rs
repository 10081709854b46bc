// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The five-turbine park of the landing scene.
//!
//! Turbine T-01 is closest to the viewer (largest, fastest); T-05 is
//! furthest (smallest, slowest). Each turbine spins at a fixed relative
//! factor of the shared wind-derived rate, and each contributes that same
//! factor of the single-turbine power output to the fleet total.

use kurbo::Point;

use crate::physics::wind_to_power_mw;
use crate::rotor::{RotorAnimator, RotorElement};

/// Number of turbines in the park.
pub const TURBINE_COUNT: usize = 5;

/// Hub position and drawing scale of one park turbine in scene coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurbinePlacement {
    /// Hub center in the scene viewbox.
    pub hub: Point,
    /// Relative drawing scale (1.0 = closest turbine).
    pub scale: f64,
}

/// Park layout, T-01 (closest) first.
pub const PLACEMENTS: [TurbinePlacement; TURBINE_COUNT] = [
    TurbinePlacement {
        hub: Point::new(388.0, 198.0),
        scale: 1.00,
    },
    TurbinePlacement {
        hub: Point::new(295.0, 172.0),
        scale: 0.72,
    },
    TurbinePlacement {
        hub: Point::new(220.0, 154.0),
        scale: 0.53,
    },
    TurbinePlacement {
        hub: Point::new(162.0, 142.0),
        scale: 0.39,
    },
    TurbinePlacement {
        hub: Point::new(116.0, 134.0),
        scale: 0.29,
    },
];

/// Relative rotor speed per turbine: T-01 fastest, T-05 slowest.
pub const SPEED_FACTORS: [f64; TURBINE_COUNT] = [1.20, 1.08, 1.00, 0.90, 0.80];

/// Starting blade angles, staggered so the park never spins in lockstep.
pub const INITIAL_PHASES_DEG: [f64; TURBINE_COUNT] = [0.0, 24.0, 48.0, 72.0, 96.0];

/// Builds the park's rotor animator: one independently accumulating element
/// per placement, phased and speed-scaled per the constants above.
#[must_use]
pub fn fleet_animator() -> RotorAnimator {
    let elements = PLACEMENTS
        .iter()
        .zip(SPEED_FACTORS)
        .zip(INITIAL_PHASES_DEG)
        .map(|((placement, factor), phase)| RotorElement::new(placement.hub, factor, phase))
        .collect();
    RotorAnimator::with_elements(elements)
}

/// Power produced by one park turbine at the given wind speed, MW.
#[must_use]
pub fn turbine_power_mw(wind_mps: f64, index: usize) -> f64 {
    wind_to_power_mw(wind_mps) * SPEED_FACTORS[index]
}

/// Total park output at the given wind speed, MW.
#[must_use]
pub fn fleet_power_mw(wind_mps: f64) -> f64 {
    let single = wind_to_power_mw(wind_mps);
    SPEED_FACTORS.iter().map(|factor| single * factor).sum()
}
