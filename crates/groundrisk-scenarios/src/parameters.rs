//! Reference aircraft per size class and the population-density columns of
//! the iGRC table.

use serde::{Deserialize, Serialize};

use groundrisk_core::constants::DEFAULT_TLOS;
use groundrisk_core::warnings::check_range;
use groundrisk_core::{AircraftDescription, AircraftType};
use groundrisk_models::CriticalAreaModels;

/// One column of the table: a representative aircraft of a size class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeClass {
    /// Characteristic dimension, wingspan or rotor diameter [m]
    pub dimension: f64,
    /// Maximum cruise speed [m/s]
    pub cruise_speed: f64,
    pub mass: f64,         // kg
    pub frontal_area: f64, // m², for the ballistic descent
    pub drag_coef: f64,
    pub glide_ratio: f64,
}

impl SizeClass {
    pub fn new(dimension: f64, cruise_speed: f64, mass: f64, frontal_area: f64, drag_coef: f64, glide_ratio: f64) -> Self {
        Self { dimension, cruise_speed, mass, frontal_area, drag_coef, glide_ratio }
    }

    /// A fixed-wing aircraft as wide and as long as the class dimension.
    pub fn aircraft(&self) -> AircraftDescription {
        let mut ac = AircraftDescription::new(AircraftType::FixedWing, self.dimension, self.dimension, self.mass);
        ac.set_ballistic(self.frontal_area, self.drag_coef);
        ac.set_cruise_speed(self.cruise_speed);
        ac.set_glide_speed_ratio(self.cruise_speed, self.glide_ratio);
        ac
    }

    /// Impact angle of a glide at the class glide ratio [deg].
    pub fn glide_angle(&self) -> f64 {
        (1.0 / self.glide_ratio).atan().to_degrees()
    }

    pub fn validate(&self) {
        check_range(self.dimension > 0.0, "size class dimension", self.dimension, "> 0 m");
        check_range(self.cruise_speed > 0.0, "size class cruise speed", self.cruise_speed, "> 0 m/s");
        check_range(self.mass > 0.0, "size class mass", self.mass, "> 0 kg");
        check_range(self.frontal_area > 0.0, "size class frontal area", self.frontal_area, "> 0 m^2");
        check_range(self.drag_coef > 0.0, "size class drag coefficient", self.drag_coef, "> 0");
        check_range(self.glide_ratio > 0.0, "size class glide ratio", self.glide_ratio, "> 0");
    }
}

fn default_tlos() -> f64 {
    DEFAULT_TLOS
}

fn default_altitude() -> f64 {
    ScenarioParameters::REFERENCE_ALTITUDE
}

/// Everything needed to generate an iGRC table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParameters {
    pub classes: Vec<SizeClass>,
    /// Population densities of the populated columns [ppl/km²]. The table
    /// always adds a controlled-ground-area column in front.
    pub population_densities: Vec<f64>,
    #[serde(default = "default_tlos")]
    pub tlos: f64,
    /// Height of the ballistic descent [m]
    #[serde(default = "default_altitude")]
    pub altitude: f64,
    #[serde(default)]
    pub overlap: f64,
    #[serde(default)]
    pub models: CriticalAreaModels,
}

impl ScenarioParameters {
    pub const REFERENCE_ALTITUDE: f64 = 120.0;
    pub const REFERENCE_DENSITIES: [f64; 5] = [5.0, 50.0, 500.0, 5000.0, 50000.0];

    /// The five reference size classes: 1, 3, 8, 20 and 40 m.
    pub fn reference() -> Self {
        Self {
            classes: vec![
                SizeClass::new(1.0, 25.0, 3.0, 0.1, 0.8, 12.0),
                SizeClass::new(3.0, 35.0, 50.0, 0.5, 0.8, 12.0),
                SizeClass::new(8.0, 75.0, 400.0, 2.5, 0.8, 12.0),
                SizeClass::new(20.0, 120.0, 3000.0, 8.0, 0.8, 12.0),
                SizeClass::new(40.0, 200.0, 10000.0, 20.0, 0.8, 12.0),
            ],
            population_densities: Self::REFERENCE_DENSITIES.to_vec(),
            tlos: DEFAULT_TLOS,
            altitude: Self::REFERENCE_ALTITUDE,
            overlap: 0.0,
            models: CriticalAreaModels::default(),
        }
    }

    /// Warn about every value outside its advised range.
    pub fn validate(&self) {
        for class in &self.classes {
            class.validate();
        }
        for &d in &self.population_densities {
            check_range(d >= 0.0, "population density", d, ">= 0 ppl/km^2");
        }
        check_range(self.tlos > 0.0, "TLOS", self.tlos, "> 0");
        check_range(self.altitude >= 0.0, "descent altitude", self.altitude, ">= 0 m");
        check_range((0.0..=1.0).contains(&self.overlap), "overlap", self.overlap, "[0, 1]");
    }
}

impl Default for ScenarioParameters {
    fn default() -> Self {
        Self::reference()
    }
}
