//! Aircraft description
//!
//! A value object holding the physical parameters of an uncrewed aircraft.
//! Setters validate the values they receive, but validation is advisory:
//! the value is always stored and an out-of-range input only produces a
//! [`Warning`](crate::warnings::Warning). Optional parameters that were never
//! set are `None`.
//!
//! Width, length, mass, fuel quantity and the ballistic drag parameters are
//! [`Param`]s so that one of them can be swept in a computation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FIXED_WING_SIZE, DEFAULT_FRICTION_COEFFICIENT, DEFAULT_RESTITUTION_COEFFICIENT, GRAVITY,
};
use crate::error::{GroundRiskError, Result};
use crate::param::{broadcast_len, Param};
use crate::warnings::{self, check_range, Warning};

/// -------------------------
/// Enumerations
/// -------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftType {
    Generic,
    FixedWing,
    Rotorcraft,
    MultiRotor,
    LighterThanAir,
}

impl AircraftType {
    pub const ALL: [AircraftType; 5] = [
        AircraftType::Generic,
        AircraftType::FixedWing,
        AircraftType::Rotorcraft,
        AircraftType::MultiRotor,
        AircraftType::LighterThanAir,
    ];

    /// Typical drag coefficient for an uncontrolled, tumbling descent.
    pub fn default_ballistic_drag_coefficient(self) -> f64 {
        match self {
            AircraftType::Generic | AircraftType::FixedWing => 0.8,
            AircraftType::Rotorcraft => 0.7,
            AircraftType::MultiRotor | AircraftType::LighterThanAir => 1.0,
        }
    }

    /// Parse, falling back to fixed-wing with a warning for unknown names.
    pub fn parse_lenient(s: &str) -> AircraftType {
        s.parse().unwrap_or_else(|_| {
            warnings::emit(Warning::Fallback {
                kind: "aircraft type",
                value: s.to_string(),
                fallback: "fixed-wing",
            });
            AircraftType::FixedWing
        })
    }
}

impl FromStr for AircraftType {
    type Err = GroundRiskError;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        match key.to_ascii_lowercase().as_str() {
            "generic" => Ok(AircraftType::Generic),
            "fixedwing" => Ok(AircraftType::FixedWing),
            "rotorcraft" | "helicopter" => Ok(AircraftType::Rotorcraft),
            "multirotor" => Ok(AircraftType::MultiRotor),
            "lighterthanair" => Ok(AircraftType::LighterThanAir),
            _ => Err(GroundRiskError::UnknownVariant { kind: "aircraft type", value: s.to_string() }),
        }
    }
}

impl fmt::Display for AircraftType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            AircraftType::Generic => "generic",
            AircraftType::FixedWing => "fixed-wing",
            AircraftType::Rotorcraft => "rotorcraft",
            AircraftType::MultiRotor => "multi-rotor",
            AircraftType::LighterThanAir => "lighter-than-air",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Gasoline,
    Diesel,
    JetA1,
    AvGas,
    Methanol,
    LiquidHydrogen,
    LiquidButane,
    LiFeBattery,
    LiIonBattery,
}

impl FuelType {
    pub const ALL: [FuelType; 9] = [
        FuelType::Gasoline,
        FuelType::Diesel,
        FuelType::JetA1,
        FuelType::AvGas,
        FuelType::Methanol,
        FuelType::LiquidHydrogen,
        FuelType::LiquidButane,
        FuelType::LiFeBattery,
        FuelType::LiIonBattery,
    ];
}

impl FromStr for FuelType {
    type Err = GroundRiskError;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        match key.to_ascii_lowercase().as_str() {
            "gasoline" | "petrol" => Ok(FuelType::Gasoline),
            "diesel" => Ok(FuelType::Diesel),
            "jeta1" => Ok(FuelType::JetA1),
            "avgas" => Ok(FuelType::AvGas),
            "methanol" => Ok(FuelType::Methanol),
            "liquidhydrogen" | "lh2" => Ok(FuelType::LiquidHydrogen),
            "liquidbutane" | "butane" => Ok(FuelType::LiquidButane),
            "lifebattery" | "lifepo4" => Ok(FuelType::LiFeBattery),
            "liionbattery" | "liion" => Ok(FuelType::LiIonBattery),
            _ => Err(GroundRiskError::UnknownFuel(s.to_string())),
        }
    }
}

/// Parachute parameters. All three are required once a parachute is set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parachute {
    pub deploy_time: f64, // s
    pub area: f64,        // m²
    pub drag_coef: f64,
}

/// -------------------------
/// Aircraft description
/// -------------------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AircraftDescription {
    aircraft_type: AircraftType,
    width: Param,  // m
    length: Param, // m
    mass: Param,   // kg
    #[serde(default)]
    wing_area: Option<f64>, // m²
    #[serde(default)]
    cruise_speed: Option<f64>, // m/s
    #[serde(default)]
    glide_speed: Option<f64>, // m/s
    #[serde(default)]
    glide_ratio: Option<f64>,
    #[serde(default)]
    ballistic_frontal_area: Option<Param>, // m²
    ballistic_drag_coef: Param,
    #[serde(default)]
    parachute: Option<Parachute>,
    #[serde(default)]
    fuel_type: Option<FuelType>,
    #[serde(default)]
    fuel_quantity: Param, // L
    friction_coef: f64,
    restitution_coef: f64,
    #[serde(default)]
    oswald_efficiency: Option<f64>,
    #[serde(default)]
    max_ld_ratio: Option<f64>,
    restitution_curve: Vec<(f64, f64)>, // (deg, CoR), sorted by angle
}

impl AircraftDescription {
    /// Restitution at shallow and at perpendicular impact.
    pub const DEFAULT_RESTITUTION_CURVE: [(f64, f64); 2] = [(9.0, 0.9), (90.0, 0.6)];

    pub fn new(
        aircraft_type: AircraftType,
        width: impl Into<Param>,
        length: impl Into<Param>,
        mass: impl Into<Param>,
    ) -> Self {
        let mut ac = Self {
            aircraft_type,
            width: Param::Scalar(0.0),
            length: Param::Scalar(0.0),
            mass: Param::Scalar(0.0),
            wing_area: None,
            cruise_speed: None,
            glide_speed: None,
            glide_ratio: None,
            ballistic_frontal_area: None,
            ballistic_drag_coef: Param::Scalar(aircraft_type.default_ballistic_drag_coefficient()),
            parachute: None,
            fuel_type: None,
            fuel_quantity: Param::Scalar(0.0),
            friction_coef: DEFAULT_FRICTION_COEFFICIENT,
            restitution_coef: DEFAULT_RESTITUTION_COEFFICIENT,
            oswald_efficiency: None,
            max_ld_ratio: None,
            restitution_curve: Self::DEFAULT_RESTITUTION_CURVE.to_vec(),
        };
        ac.set_geometry(width, length);
        ac.set_mass(mass);
        ac
    }

    /// Re-run every setter check, e.g. after deserializing.
    pub fn validate(&self) {
        validate_geometry(&self.width, &self.length);
        validate_mass(&self.mass);
        validate_fuel_quantity(&self.fuel_quantity);
        validate_friction(self.friction_coef);
        validate_restitution(self.restitution_coef);
        if let Some(area) = &self.ballistic_frontal_area {
            validate_ballistic(area, &self.ballistic_drag_coef);
        }
    }

    /* ------------------------------ setters ------------------------------ */

    pub fn set_aircraft_type(&mut self, aircraft_type: AircraftType) {
        self.aircraft_type = aircraft_type;
    }

    pub fn set_geometry(&mut self, width: impl Into<Param>, length: impl Into<Param>) {
        let (width, length) = (width.into(), length.into());
        validate_geometry(&width, &length);
        self.width = width;
        self.length = length;
    }

    pub fn set_mass(&mut self, mass: impl Into<Param>) {
        let mass = mass.into();
        validate_mass(&mass);
        self.mass = mass;
    }

    pub fn set_fuel(&mut self, fuel_type: FuelType, quantity: impl Into<Param>) {
        let quantity = quantity.into();
        validate_fuel_quantity(&quantity);
        self.fuel_type = Some(fuel_type);
        self.fuel_quantity = quantity;
    }

    pub fn set_restitution(&mut self, restitution: f64) {
        validate_restitution(restitution);
        self.restitution_coef = restitution;
    }

    pub fn set_friction(&mut self, friction: f64) {
        validate_friction(friction);
        self.friction_coef = friction;
    }

    /// Frontal area [m²] and drag coefficient for the ballistic descent.
    pub fn set_ballistic(&mut self, frontal_area: impl Into<Param>, drag_coef: impl Into<Param>) {
        let (area, cd) = (frontal_area.into(), drag_coef.into());
        validate_ballistic(&area, &cd);
        self.ballistic_frontal_area = Some(area);
        self.ballistic_drag_coef = cd;
    }

    pub fn set_ballistic_drag_coefficient(&mut self, drag_coef: impl Into<Param>) {
        let cd = drag_coef.into();
        check_range(cd.min() > 0.0, "ballistic drag coefficient", cd.min(), "> 0");
        self.ballistic_drag_coef = cd;
    }

    pub fn set_parachute(&mut self, deploy_time: f64, area: f64, drag_coef: f64) {
        check_range(deploy_time >= 0.0, "parachute deploy time", deploy_time, ">= 0 s");
        check_range(area > 0.0, "parachute area", area, "> 0 m^2");
        check_range(drag_coef > 0.0, "parachute drag coefficient", drag_coef, "> 0");
        self.parachute = Some(Parachute { deploy_time, area, drag_coef });
    }

    pub fn set_wing_area(&mut self, area: f64) {
        check_range(area > 0.0, "wing area", area, "> 0 m^2");
        self.wing_area = Some(area);
    }

    pub fn set_cruise_speed(&mut self, speed: f64) {
        check_range(speed > 0.0, "cruise speed", speed, "> 0 m/s");
        self.cruise_speed = Some(speed);
    }

    pub fn set_glide_speed_ratio(&mut self, speed: f64, ratio: f64) {
        check_range(speed > 0.0, "glide speed", speed, "> 0 m/s");
        check_range(ratio > 0.0, "glide ratio", ratio, "> 0");
        self.glide_speed = Some(speed);
        self.glide_ratio = Some(ratio);
    }

    pub fn set_oswald_efficiency(&mut self, e: f64) {
        check_range(e > 0.0 && e <= 1.0, "Oswald efficiency", e, "(0, 1]");
        self.oswald_efficiency = Some(e);
    }

    pub fn set_max_ld_ratio(&mut self, ratio: f64) {
        check_range(ratio > 0.0, "maximum lift/drag ratio", ratio, "> 0");
        self.max_ld_ratio = Some(ratio);
    }

    /// Replace the (angle [deg], CoR) support points of the restitution curve.
    /// Points are sorted by angle; an empty list keeps the current curve.
    pub fn set_restitution_curve(&mut self, mut points: Vec<(f64, f64)>) {
        if points.is_empty() {
            warnings::emit(Warning::Fallback {
                kind: "restitution curve",
                value: "empty".into(),
                fallback: "current curve",
            });
            return;
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        for &(_, cor) in &points {
            validate_restitution(cor);
        }
        self.restitution_curve = points;
    }

    /* ----------------------------- accessors ----------------------------- */

    pub fn aircraft_type(&self) -> AircraftType { self.aircraft_type }
    pub fn width(&self) -> &Param { &self.width }
    pub fn length(&self) -> &Param { &self.length }
    pub fn mass(&self) -> &Param { &self.mass }
    pub fn wing_area(&self) -> Option<f64> { self.wing_area }
    pub fn cruise_speed(&self) -> Option<f64> { self.cruise_speed }
    pub fn glide_speed(&self) -> Option<f64> { self.glide_speed }
    pub fn glide_ratio(&self) -> Option<f64> { self.glide_ratio }
    pub fn ballistic_frontal_area(&self) -> Option<&Param> { self.ballistic_frontal_area.as_ref() }
    pub fn ballistic_drag_coef(&self) -> &Param { &self.ballistic_drag_coef }
    pub fn parachute(&self) -> Option<Parachute> { self.parachute }
    pub fn fuel_type(&self) -> Option<FuelType> { self.fuel_type }
    pub fn fuel_quantity(&self) -> &Param { &self.fuel_quantity }
    pub fn friction_coef(&self) -> f64 { self.friction_coef }
    pub fn restitution_coef(&self) -> f64 { self.restitution_coef }
    pub fn oswald_efficiency(&self) -> Option<f64> { self.oswald_efficiency }
    pub fn max_ld_ratio(&self) -> Option<f64> { self.max_ld_ratio }
    pub fn restitution_curve(&self) -> &[(f64, f64)] { &self.restitution_curve }

    /* ---------------------------- derived values ---------------------------- */

    /// Coefficient of restitution for an impact at `angle_deg` from horizontal.
    ///
    /// Piecewise-linear through the restitution curve and constant beyond its
    /// end points. Angles outside [0°, 90°] are clipped with a warning.
    pub fn restitution_at_angle(&self, angle_deg: f64) -> f64 {
        let angle = angle_deg.clamp(0.0, 90.0);
        if angle != angle_deg {
            warnings::emit(Warning::Clipped { parameter: "restitution impact angle", from: angle_deg, to: angle });
        }
        interpolate(&self.restitution_curve, angle)
    }

    /// Terminal velocity sqrt(2·m·g / (ρ·A·C_d)) of the ballistic descent.
    pub fn terminal_velocity(&self, rho: f64) -> Result<Param> {
        let area = self
            .ballistic_frontal_area
            .as_ref()
            .ok_or(GroundRiskError::MissingParameter("ballistic frontal area"))?;
        let n = broadcast_len(&[
            ("mass", &self.mass),
            ("ballistic frontal area", area),
            ("ballistic drag coefficient", &self.ballistic_drag_coef),
        ])?;
        let values: Vec<f64> = (0..n)
            .map(|i| terminal_velocity(self.mass.at(i), rho, area.at(i), self.ballistic_drag_coef.at(i)))
            .collect();
        let vector = self.mass.is_vector() || area.is_vector() || self.ballistic_drag_coef.is_vector();
        Ok(if vector { Param::Vector(values) } else { Param::Scalar(values[0]) })
    }

    /// Terminal velocity under a deployed parachute.
    pub fn terminal_velocity_parachute(&self, rho: f64) -> Result<Param> {
        let chute = self.parachute.ok_or(GroundRiskError::MissingParameter("parachute"))?;
        Ok(self.mass.map(|m| terminal_velocity(m, rho, chute.area, chute.drag_coef)))
    }

    /// Drag coefficient in a steady glide, from wing area, glide speed and
    /// glide ratio: C_L = 2·m·g / (ρ·S·v²), C_D = C_L / (L/D).
    pub fn glide_drag_coefficient(&self, rho: f64) -> Option<Param> {
        let (s, v, ld) = (self.wing_area?, self.glide_speed?, self.glide_ratio?);
        if s <= 0.0 || v <= 0.0 || ld <= 0.0 {
            return None;
        }
        Some(self.mass.map(|m| 2.0 * m * GRAVITY / (rho * s * v * v) / ld))
    }
}

impl Default for AircraftDescription {
    fn default() -> Self {
        Self::new(AircraftType::FixedWing, DEFAULT_FIXED_WING_SIZE, DEFAULT_FIXED_WING_SIZE, 1.0)
    }
}

/// sqrt(2·m·g / (ρ·A·C_d)) [m/s]
pub fn terminal_velocity(mass: f64, rho: f64, area: f64, drag_coef: f64) -> f64 {
    (2.0 * mass * GRAVITY / (rho * area * drag_coef)).sqrt()
}

/* ------------------------------- internals ------------------------------- */

fn validate_geometry(width: &Param, length: &Param) {
    check_range(width.min() >= 0.1, "width", width.min(), ">= 0.1 m");
    check_range(length.min() >= 0.1, "length", length.min(), ">= 0.1 m");
}

fn validate_mass(mass: &Param) {
    check_range(mass.min() >= 1.0, "mass", mass.min(), ">= 1 kg");
}

fn validate_fuel_quantity(quantity: &Param) {
    check_range(quantity.min() >= 0.0, "fuel quantity", quantity.min(), ">= 0 L");
}

fn validate_friction(mu: f64) {
    check_range(mu > 0.0 && mu <= 1.5, "friction coefficient", mu, "(0, 1.5]");
}

fn validate_restitution(cor: f64) {
    check_range(cor > 0.0 && cor <= 1.5, "coefficient of restitution", cor, "(0, 1.5]");
}

fn validate_ballistic(area: &Param, cd: &Param) {
    check_range(area.min() > 0.0, "ballistic frontal area", area.min(), "> 0 m^2");
    check_range(cd.min() > 0.0, "ballistic drag coefficient", cd.min(), "> 0");
}

// Linear interpolation with constant extension; `points` sorted by x.
fn interpolate(points: &[(f64, f64)], x: f64) -> f64 {
    match points {
        [] => f64::NAN,
        [(_, y)] => *y,
        _ => {
            let (x0, y0) = points[0];
            let (xn, yn) = points[points.len() - 1];
            if x <= x0 {
                return y0;
            }
            if x >= xn {
                return yn;
            }
            for pair in points.windows(2) {
                let ((xa, ya), (xb, yb)) = (pair[0], pair[1]);
                if x <= xb {
                    let dx = (xb - xa).max(f64::MIN_POSITIVE);
                    return ya + (x - xa) / dx * (yb - ya);
                }
            }
            yn
        }
    }
}

/* -------------------------------- tests -------------------------------- */
