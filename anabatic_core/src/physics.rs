// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Power curve, lift, and rotor-speed conversions.
//!
//! All functions here are deterministic, total functions of their numeric
//! inputs. Inputs outside the documented physical ranges evaluate through the
//! same formulas; the only special cases are the explicit clamps (rated
//! power, maximum lift coefficient, cut-in/cut-out wind).
//!
//! Two families live side by side:
//!
//! - The *exhibit curve*: the simplified linear-RPM / cubic-power ramp the
//!   landing scene animates with ([`wind_to_rpm`], [`wind_to_power_mw`]).
//! - The *turbine-record curve*: the ½ρAv³·Cp computation evaluated against
//!   a full [`TurbineRecord`] ([`actual_power_mw`], [`rotor_rpm`],
//!   [`PowerReadout`]).

use core::f64::consts::PI;

use crate::records::TurbineRecord;

/// Upper bound of the wind-speed control, m/s.
pub const MAX_WIND_MPS: f64 = 25.0;
/// Wind speed at which the exhibit curve reaches rated output, m/s.
pub const RATED_WIND_MPS: f64 = 13.0;
/// Rotor speed at rated wind, RPM.
pub const MAX_ROTOR_RPM: f64 = 14.9;
/// Minimum wind speed producing any power, m/s.
pub const CUT_IN_WIND_MPS: f64 = 4.0;
/// Rated power of one exhibit turbine, MW.
pub const RATED_POWER_MW: f64 = 2.0;
/// Sea-level air density, kg/m³.
pub const AIR_DENSITY_KG_M3: f64 = 1.225;
/// Design tip-speed ratio of the exhibit blade.
pub const DESIGN_TIP_SPEED_RATIO: f64 = 8.0;
/// Stall cap on the thin-airfoil lift coefficient.
pub const MAX_LIFT_COEFFICIENT: f64 = 1.8;

/// Rotor speed for a given wind speed on the exhibit curve.
///
/// Zero at or below calm, a linear ramp up to [`MAX_ROTOR_RPM`] at
/// [`RATED_WIND_MPS`], clamped above.
#[must_use]
pub fn wind_to_rpm(wind_mps: f64) -> f64 {
    if wind_mps <= 0.0 {
        0.0
    } else if wind_mps >= RATED_WIND_MPS {
        MAX_ROTOR_RPM
    } else {
        wind_mps / RATED_WIND_MPS * MAX_ROTOR_RPM
    }
}

/// Power output for a given wind speed on the exhibit curve.
///
/// Zero below [`CUT_IN_WIND_MPS`]; between cut-in and rated wind the output
/// follows the cube of the normalized fraction of the ramp; clamped at
/// [`RATED_POWER_MW`] above rated wind.
#[must_use]
pub fn wind_to_power_mw(wind_mps: f64) -> f64 {
    if wind_mps < CUT_IN_WIND_MPS {
        0.0
    } else if wind_mps >= RATED_WIND_MPS {
        RATED_POWER_MW
    } else {
        let fraction = (wind_mps - CUT_IN_WIND_MPS) / (RATED_WIND_MPS - CUT_IN_WIND_MPS);
        RATED_POWER_MW * fraction * fraction * fraction
    }
}

/// Thin-airfoil lift coefficient for an angle of attack in degrees.
///
/// `min(2π·α_rad, MAX_LIFT_COEFFICIENT)`, floored at zero.
#[must_use]
pub fn lift_coefficient(angle_of_attack_deg: f64) -> f64 {
    let alpha_rad = angle_of_attack_deg * PI / 180.0;
    (2.0 * PI * alpha_rad).clamp(0.0, MAX_LIFT_COEFFICIENT)
}

/// Dynamic pressure ½ρv², Pa.
#[must_use]
pub fn dynamic_pressure_pa(wind_mps: f64) -> f64 {
    0.5 * AIR_DENSITY_KG_M3 * wind_mps * wind_mps
}

/// Pressure difference across the airfoil, Pa.
#[must_use]
pub fn pressure_difference_pa(wind_mps: f64, lift_coefficient: f64) -> f64 {
    dynamic_pressure_pa(wind_mps) * lift_coefficient
}

/// Apparent flow speed over the suction side, m/s.
#[must_use]
pub fn resultant_velocity_mps(wind_mps: f64, lift_coefficient: f64) -> f64 {
    wind_mps * (1.0 + 0.4 * lift_coefficient)
}

/// Blade tip speed at the design tip-speed ratio, m/s.
#[must_use]
pub fn tip_speed_mps(wind_mps: f64) -> f64 {
    DESIGN_TIP_SPEED_RATIO * wind_mps
}

/// Rotor speed from the design tip-speed ratio and a blade length.
///
/// ω = λ·v / R; RPM = ω·60 / 2π. Zero for a non-positive blade length.
#[must_use]
pub fn rotor_rpm_for_blade(wind_mps: f64, blade_length_m: f64) -> f64 {
    if blade_length_m <= 0.0 {
        return 0.0;
    }
    let omega = DESIGN_TIP_SPEED_RATIO * wind_mps / blade_length_m;
    omega * 60.0 / (2.0 * PI)
}

/// Rotor swept area for a rotor diameter, m².
#[must_use]
pub fn swept_area_m2(rotor_diameter_m: f64) -> f64 {
    let radius = rotor_diameter_m / 2.0;
    PI * radius * radius
}

/// Theoretical power available in the wind before the power coefficient, MW.
#[must_use]
pub fn available_wind_power_mw(wind_mps: f64, rotor_diameter_m: f64, air_density_kg_m3: f64) -> f64 {
    let area = swept_area_m2(rotor_diameter_m);
    0.5 * air_density_kg_m3 * area * wind_mps * wind_mps * wind_mps / 1_000_000.0
}

/// Actual power produced by a turbine: ½ρAv³·Cp, clamped to capacity.
///
/// Zero below the cut-in wind speed and at or above the cut-out speed.
#[must_use]
pub fn actual_power_mw(wind_mps: f64, turbine: &TurbineRecord) -> f64 {
    if wind_mps < turbine.cut_in_wind_speed_mps || wind_mps >= turbine.cut_out_wind_speed_mps {
        return 0.0;
    }
    let area = swept_area_m2(turbine.rotor_diameter_m);
    let power_mw = 0.5
        * turbine.air_density_kg_m3
        * area
        * wind_mps
        * wind_mps
        * wind_mps
        * turbine.power_coefficient
        / 1_000_000.0;
    power_mw.min(turbine.capacity_mw)
}

/// Rotor speed for a turbine record: RPM = λ·v·60 / (2π·R).
///
/// Zero at or below calm.
#[must_use]
pub fn rotor_rpm(wind_mps: f64, turbine: &TurbineRecord) -> f64 {
    if wind_mps <= 0.0 {
        return 0.0;
    }
    let radius = turbine.rotor_diameter_m / 2.0;
    let tip_speed = turbine.tip_speed_ratio * wind_mps;
    tip_speed * 60.0 / (2.0 * PI * radius)
}

/// The full set of derived quantities for one wind speed and turbine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerReadout {
    /// Input wind speed, m/s.
    pub wind_speed_mps: f64,
    /// Produced power, MW.
    pub power_mw: f64,
    /// Power available in the wind, MW.
    pub wind_power_available_mw: f64,
    /// Rotor speed, RPM.
    pub rotor_rpm: f64,
    /// Swept area, m².
    pub swept_area_m2: f64,
    /// Blade tip speed, m/s.
    pub tip_speed_mps: f64,
}

impl PowerReadout {
    /// Computes every derived quantity for `wind_mps` against `turbine`.
    #[must_use]
    pub fn compute(wind_mps: f64, turbine: &TurbineRecord) -> Self {
        Self {
            wind_speed_mps: wind_mps,
            power_mw: actual_power_mw(wind_mps, turbine),
            wind_power_available_mw: available_wind_power_mw(
                wind_mps,
                turbine.rotor_diameter_m,
                turbine.air_density_kg_m3,
            ),
            rotor_rpm: rotor_rpm(wind_mps, turbine),
            swept_area_m2: swept_area_m2(turbine.rotor_diameter_m),
            tip_speed_mps: turbine.tip_speed_ratio * wind_mps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::TurbineRecord;

    const EPS: f64 = 1e-9;

    #[test]
    fn rpm_curve_endpoints_and_clamp() {
        assert_eq!(wind_to_rpm(0.0), 0.0);
        assert_eq!(wind_to_rpm(-5.0), 0.0);
        assert_eq!(wind_to_rpm(13.0), MAX_ROTOR_RPM);
        assert_eq!(wind_to_rpm(20.0), MAX_ROTOR_RPM);
    }

    #[test]
    fn rpm_curve_is_monotonic_on_the_ramp() {
        let mut last = 0.0;
        let mut wind = 0.0;
        while wind <= 13.0 {
            let rpm = wind_to_rpm(wind);
            assert!(rpm >= last, "rpm decreased at wind {wind}");
            last = rpm;
            wind += 0.1;
        }
    }

    #[test]
    fn power_curve_endpoints_and_clamp() {
        assert_eq!(wind_to_power_mw(3.0), 0.0, "below cut-in");
        assert_eq!(wind_to_power_mw(13.0), RATED_POWER_MW);
        assert_eq!(wind_to_power_mw(25.0), RATED_POWER_MW);
    }

    #[test]
    fn power_curve_is_strictly_increasing_between_cut_in_and_rated() {
        let mut last = wind_to_power_mw(4.01);
        let mut wind = 4.5;
        while wind < 13.0 {
            let power = wind_to_power_mw(wind);
            assert!(power > last, "power not increasing at wind {wind}");
            last = power;
            wind += 0.5;
        }
    }

    #[test]
    fn power_curve_is_cubic_in_the_ramp_fraction() {
        // Halfway up the ramp: fraction 0.5 → power = 2.0 * 0.125.
        let halfway = (CUT_IN_WIND_MPS + RATED_WIND_MPS) / 2.0;
        assert!((wind_to_power_mw(halfway) - 0.25).abs() < EPS);
    }

    #[test]
    fn lift_coefficient_zero_at_zero_aoa() {
        assert_eq!(lift_coefficient(0.0), 0.0);
        assert_eq!(lift_coefficient(-5.0), 0.0, "floored at zero");
    }

    #[test]
    fn lift_coefficient_clamps_at_stall() {
        // 2π·(20°·π/180) ≈ 2.19 > 1.8 → clamped.
        assert_eq!(lift_coefficient(20.0), MAX_LIFT_COEFFICIENT);
        assert_eq!(lift_coefficient(90.0), MAX_LIFT_COEFFICIENT);
        // 8° is still on the linear segment.
        let expected = 2.0 * PI * (8.0 * PI / 180.0);
        assert!((lift_coefficient(8.0) - expected).abs() < EPS);
    }

    #[test]
    fn airfoil_readouts() {
        let cl = 1.0;
        assert!((dynamic_pressure_pa(10.0) - 61.25).abs() < EPS);
        assert!((pressure_difference_pa(10.0, cl) - 61.25).abs() < EPS);
        assert!((resultant_velocity_mps(10.0, cl) - 14.0).abs() < EPS);
        assert!((tip_speed_mps(10.0) - 80.0).abs() < EPS);
    }

    #[test]
    fn blade_rpm_from_tip_speed_ratio() {
        // ω = 8·10/40 = 2 rad/s → RPM = 2·60/2π ≈ 19.0986.
        let rpm = rotor_rpm_for_blade(10.0, 40.0);
        assert!((rpm - 19.098_593_171_027_44).abs() < 1e-9);
        assert_eq!(rotor_rpm_for_blade(10.0, 0.0), 0.0);
    }

    #[test]
    fn record_power_respects_cut_in_cut_out_and_capacity() {
        let turbine = TurbineRecord::exhibit();
        assert_eq!(actual_power_mw(2.9, &turbine), 0.0, "below cut-in");
        assert_eq!(actual_power_mw(25.0, &turbine), 0.0, "at cut-out");
        assert_eq!(actual_power_mw(30.0, &turbine), 0.0, "beyond cut-out");
        assert_eq!(
            actual_power_mw(20.0, &turbine),
            turbine.capacity_mw,
            "clamped to rated capacity in strong wind"
        );
        let mid = actual_power_mw(8.0, &turbine);
        assert!(mid > 0.0 && mid < turbine.capacity_mw);
    }

    #[test]
    fn record_rpm_formula() {
        let turbine = TurbineRecord::exhibit();
        assert_eq!(rotor_rpm(0.0, &turbine), 0.0);
        let radius = turbine.rotor_diameter_m / 2.0;
        let expected = turbine.tip_speed_ratio * 9.0 * 60.0 / (2.0 * PI * radius);
        assert!((rotor_rpm(9.0, &turbine) - expected).abs() < EPS);
    }

    #[test]
    fn readout_is_consistent_with_the_pieces() {
        let turbine = TurbineRecord::exhibit();
        let readout = PowerReadout::compute(9.0, &turbine);
        assert_eq!(readout.power_mw, actual_power_mw(9.0, &turbine));
        assert_eq!(readout.rotor_rpm, rotor_rpm(9.0, &turbine));
        assert_eq!(readout.swept_area_m2, swept_area_m2(turbine.rotor_diameter_m));
        assert!(
            readout.wind_power_available_mw >= readout.power_mw,
            "Cp cannot exceed unity"
        );
    }
}
