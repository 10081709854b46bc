// Copyright 2026 the Anabatic Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain numeric subsystem records.
//!
//! These mirror the records an external fetch layer delivers (the core never
//! performs the fetch). They are immutable inputs: the core reads numbers out
//! of them and performs no validation beyond the documented physics clamps.
//!
//! The `exhibit()` constructors carry the reference turbine the exhibit
//! ships with, matching the seeded defaults of the upstream data source.

/// The top-level turbine record the physics helpers evaluate against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurbineRecord {
    /// Nameplate capacity, MW.
    pub capacity_mw: f64,
    /// Rotor diameter, m.
    pub rotor_diameter_m: f64,
    /// Hub height, m.
    pub hub_height_m: f64,
    /// Minimum wind speed producing power, m/s.
    pub cut_in_wind_speed_mps: f64,
    /// Wind speed at which rated power is reached, m/s.
    pub rated_wind_speed_mps: f64,
    /// Wind speed at which the turbine shuts down, m/s.
    pub cut_out_wind_speed_mps: f64,
    /// Aerodynamic power coefficient Cp.
    pub power_coefficient: f64,
    /// Design tip-speed ratio λ.
    pub tip_speed_ratio: f64,
    /// Site air density, kg/m³.
    pub air_density_kg_m3: f64,
}

impl TurbineRecord {
    /// The exhibit's reference turbine.
    #[must_use]
    pub const fn exhibit() -> Self {
        Self {
            capacity_mw: 2.0,
            rotor_diameter_m: 112.0,
            hub_height_m: 94.0,
            cut_in_wind_speed_mps: 3.0,
            rated_wind_speed_mps: 13.0,
            cut_out_wind_speed_mps: 25.0,
            power_coefficient: 0.4,
            tip_speed_ratio: 8.0,
            air_density_kg_m3: 1.225,
        }
    }
}

/// Gearbox record for the drivetrain view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GearboxRecord {
    /// Overall ratio (rotor RPM × ratio = generator RPM).
    pub gear_ratio: f64,
    /// Number of gear stages.
    pub num_stages: u32,
    /// Stage layout, e.g. `"planetary-helical-helical"`.
    pub stage_configuration: &'static str,
    /// Fraction at rated load.
    pub efficiency: f64,
    /// `"forced_oil"` or `"splash"`.
    pub lubrication_type: &'static str,
    /// Low-speed shaft (rotor side), RPM.
    pub input_speed_rpm: f64,
    /// High-speed shaft (generator side), RPM.
    pub output_speed_rpm: f64,
    /// Gearbox mass, t.
    pub mass_tonnes: f64,
}

impl GearboxRecord {
    /// The exhibit's reference gearbox.
    #[must_use]
    pub const fn exhibit() -> Self {
        Self {
            gear_ratio: 100.0,
            num_stages: 3,
            stage_configuration: "planetary-helical-helical",
            efficiency: 0.97,
            lubrication_type: "forced_oil",
            input_speed_rpm: 15.0,
            output_speed_rpm: 1500.0,
            mass_tonnes: 50.0,
        }
    }
}

/// Generator record for the drivetrain view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorRecord {
    /// Linked gearbox, if any. `None` means direct-drive.
    pub gearbox_id: Option<u32>,
    /// `"DFIG"`, `"PMSG"`, `"SCIG"`, or `"EESG"`.
    pub generator_type: &'static str,
    /// Nameplate capacity, kW.
    pub rated_power_kw: f64,
    /// Stator voltage, V.
    pub rated_voltage_v: f64,
    /// Speed at rated output, RPM.
    pub rated_speed_rpm: f64,
    /// Pole pairs (determines synchronous speed).
    pub pole_pairs: u32,
    /// Fraction at rated load.
    pub efficiency: f64,
    /// Lagging, at rated load.
    pub power_factor: f64,
    /// `"air"` or `"liquid"`.
    pub cooling_type: &'static str,
    /// Nacelle generator mass, t.
    pub mass_tonnes: f64,
}

impl GeneratorRecord {
    /// The exhibit's reference generator (geared, DFIG).
    #[must_use]
    pub const fn exhibit() -> Self {
        Self {
            gearbox_id: Some(1),
            generator_type: "DFIG",
            rated_power_kw: 2000.0,
            rated_voltage_v: 690.0,
            rated_speed_rpm: 1500.0,
            pole_pairs: 2,
            efficiency: 0.95,
            power_factor: 0.90,
            cooling_type: "air",
            mass_tonnes: 70.0,
        }
    }
}

/// Blade record for the blade designer view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BladeRecord {
    /// Blade length (half the rotor diameter), m.
    pub blade_length_m: f64,
    /// `"fiberglass"`, `"carbon_fiber"`, or `"hybrid"`.
    pub material: &'static str,
    /// `"hand_layup"`, `"resin_infusion"`, or `"prepreg"`.
    pub manufacturing_method: &'static str,
    /// Single blade mass, kg.
    pub mass_kg: f64,
    /// Widest chord of the airfoil cross-section, m.
    pub max_chord_m: f64,
    /// Chord at the blade root, m.
    pub root_chord_m: f64,
    /// Geometric twist root to tip, degrees.
    pub total_twist_deg: f64,
    /// Airfoil family name.
    pub airfoil_family: &'static str,
    /// Optimal λ for this blade.
    pub design_tip_speed_ratio: f64,
    /// Out-of-plane pre-bend at the tip, m.
    pub pre_bend_m: f64,
    /// Blade count (3 for a HAWT; stored for reference).
    pub num_blades: u32,
}

impl BladeRecord {
    /// The exhibit's reference blade.
    #[must_use]
    pub const fn exhibit() -> Self {
        Self {
            blade_length_m: 56.0,
            material: "fiberglass",
            manufacturing_method: "resin_infusion",
            mass_kg: 12000.0,
            max_chord_m: 4.2,
            root_chord_m: 3.0,
            total_twist_deg: 13.0,
            airfoil_family: "NREL S-series",
            design_tip_speed_ratio: 8.0,
            pre_bend_m: 3.0,
            num_blades: 3,
        }
    }
}

/// Whether the drivetrain routes through a gearbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrivetrainKind {
    /// Rotor → gearbox → generator.
    Geared,
    /// Rotor coupled directly to the generator.
    DirectDrive,
}

/// Derived display stats for the drivetrain view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrivetrainStats {
    /// Geared or direct-drive, from the generator's gearbox link.
    pub kind: DrivetrainKind,
    /// Product of gearbox and generator efficiencies.
    pub combined_efficiency: f64,
    /// Gearbox plus generator mass, t.
    pub total_mass_tonnes: f64,
}

impl DrivetrainStats {
    /// Derives the display stats from a gearbox/generator pair.
    #[must_use]
    pub fn derive(gearbox: &GearboxRecord, generator: &GeneratorRecord) -> Self {
        Self {
            kind: if generator.gearbox_id.is_some() {
                DrivetrainKind::Geared
            } else {
                DrivetrainKind::DirectDrive
            },
            combined_efficiency: gearbox.efficiency * generator.efficiency,
            total_mass_tonnes: gearbox.mass_tonnes + generator.mass_tonnes,
        }
    }
}
