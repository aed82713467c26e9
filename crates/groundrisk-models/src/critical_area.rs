//! Critical-area models
//!
//! Five co-existing formulations turn the impact kinematics of an aircraft
//! into an inert lethal area. They share a preamble (angle handling, glide
//! distance, horizontal speed) and a postamble (adding the deflagration area
//! with an overlap correction); only the glide/slide split differs.
//!
//! Conventions:
//! - impact angle in degrees from the ground, 1° ≤ θ ≤ 179°; angles above 90°
//!   are folded to 180° − θ;
//! - glide distance d_g = H / tan θ with H the height of a standing person;
//! - friction slide s_f(u, μ) = u² / (2·μ·g);
//! - b is the radius of a person, added as a buffer around the aircraft.
//!
//! Combination:
//!   inert = glide + slide
//!   total = inert + defl − min(inert, defl)·clamp(overlap, 0, 1)

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use groundrisk_core::constants::{
    DEFAULT_FAA_DEBRIS_RATIO, DEFAULT_FIXED_WING_SIZE, GRAVITY, JARUS_LETHAL_KE_LARGE, JARUS_LETHAL_KE_SMALL,
    JARUS_SMALL_AIRCRAFT_WIDTH, MAX_IMPACT_ANGLE_DEG, MIN_DIVISION_THRESHOLD, MIN_IMPACT_ANGLE_DEG,
    NAWCAD_LETHAL_KE_FTLB, PERSON_HEIGHT, PERSON_RADIUS,
};
use groundrisk_core::units::ftlb_to_joule;
use groundrisk_core::warnings::{self, Warning};
use groundrisk_core::{broadcast_len, AircraftDescription, FuelType, GroundRiskError, Param, Result};

use crate::deflagration::DeflagrationModel;

/// -------------------------
/// Model selection
/// -------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriticalAreaModel {
    /// Rectangular aircraft projection with a straight friction slide.
    Rcc,
    /// Rounded end with a restitution-reduced slide.
    Rti,
    /// Secondary-debris field.
    Faa,
    /// Slide lethal only above a kinetic-energy threshold.
    Nawcad,
    /// Reference model for iGRC tables.
    Jarus,
}

impl CriticalAreaModel {
    pub const ALL: [CriticalAreaModel; 5] = [
        CriticalAreaModel::Rcc,
        CriticalAreaModel::Rti,
        CriticalAreaModel::Faa,
        CriticalAreaModel::Nawcad,
        CriticalAreaModel::Jarus,
    ];

    /// Parse, falling back to RCC with a warning for unknown names.
    pub fn parse_lenient(s: &str) -> CriticalAreaModel {
        s.parse().unwrap_or_else(|_| {
            warnings::emit(Warning::Fallback {
                kind: "critical area model",
                value: s.to_string(),
                fallback: "RCC",
            });
            CriticalAreaModel::Rcc
        })
    }
}

impl FromStr for CriticalAreaModel {
    type Err = GroundRiskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RCC" => Ok(CriticalAreaModel::Rcc),
            "RTI" => Ok(CriticalAreaModel::Rti),
            "FAA" => Ok(CriticalAreaModel::Faa),
            "NAWCAD" => Ok(CriticalAreaModel::Nawcad),
            "JARUS" => Ok(CriticalAreaModel::Jarus),
            _ => Err(GroundRiskError::UnknownVariant { kind: "critical area model", value: s.to_string() }),
        }
    }
}

impl fmt::Display for CriticalAreaModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            CriticalAreaModel::Rcc => "RCC",
            CriticalAreaModel::Rti => "RTI",
            CriticalAreaModel::Faa => "FAA",
            CriticalAreaModel::Nawcad => "NAWCAD",
            CriticalAreaModel::Jarus => "JARUS",
        };
        f.write_str(name)
    }
}

/// Critical area split into its parts [m²].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CriticalArea {
    pub total: f64,
    pub glide: f64,
    pub slide: f64,
    pub inert: f64,
    pub deflagration: f64,
}

/// One fully resolved impact: scalar aircraft parameters and kinematics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImpactCase {
    pub width: f64,         // m
    pub length: f64,        // m
    pub mass: f64,          // kg
    pub friction: f64,
    pub restitution: f64,
    pub fuel_type: Option<FuelType>,
    pub fuel_quantity: f64, // L
    pub impact_speed: f64,  // m/s
    pub impact_angle: f64,  // deg
    pub overlap: f64,
}

impl ImpactCase {
    /// Element `i` of the aircraft and kinematic inputs.
    pub fn from_aircraft(
        aircraft: &AircraftDescription,
        i: usize,
        impact_speed: f64,
        impact_angle: f64,
        overlap: f64,
    ) -> Self {
        Self {
            width: aircraft.width().at(i),
            length: aircraft.length().at(i),
            mass: aircraft.mass().at(i),
            friction: aircraft.friction_coef(),
            restitution: aircraft.restitution_coef(),
            fuel_type: aircraft.fuel_type(),
            fuel_quantity: aircraft.fuel_quantity().at(i),
            impact_speed,
            impact_angle,
            overlap,
        }
    }
}

/// -------------------------
/// Shared helpers
/// -------------------------

/// Distance [m] a descending body travels horizontally while dropping `height`.
pub fn glide_distance(height: f64, angle_deg: f64) -> f64 {
    height / angle_deg.to_radians().tan()
}

/// Horizontal component [m/s] of an impact at `angle_deg`.
pub fn horizontal_speed(speed: f64, angle_deg: f64) -> f64 {
    speed * angle_deg.to_radians().cos().abs()
}

/// Distance [m] to stop from `speed` under Coulomb friction `mu`.
pub fn slide_distance_friction(speed: f64, mu: f64) -> f64 {
    speed * speed / (2.0 * mu * GRAVITY)
}

/// Speed [m/s] at which a body of `mass` carries `kinetic_energy`.
pub fn speed_from_kinetic_energy(kinetic_energy: f64, mass: f64) -> f64 {
    (2.0 * kinetic_energy / mass).sqrt()
}

/// Default JARUS lethal kinetic energy [J] for an aircraft of `width`.
pub fn lethal_kinetic_energy_threshold(width: f64) -> f64 {
    if width > JARUS_SMALL_AIRCRAFT_WIDTH {
        JARUS_LETHAL_KE_LARGE
    } else {
        JARUS_LETHAL_KE_SMALL
    }
}

// Length [m] of the lethal part of a slide that starts at `speed` and
// decelerates by friction, lethal while faster than `v_min_kill`.
fn lethal_slide_length(speed: f64, v_min_kill: f64, decel: f64) -> f64 {
    let t_safe = ((speed - v_min_kill) / decel).max(0.0);
    speed * t_safe - 0.5 * decel * t_safe * t_safe
}

/// Quantities common to all formulations.
#[derive(Clone, Copy, Debug)]
struct Preamble {
    angle: f64,           // deg, in [1, 90]
    horizontal: f64,      // m/s
    glide_distance: f64,  // m
    width: f64,           // m, non-negative
    length: f64,          // m, non-negative
    rounded_radius: f64,  // b + w/2
}

/// -------------------------
/// Model family
/// -------------------------

/// Configuration shared by every formulation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CriticalAreaModels {
    /// Radius of a person [m]
    pub buffer: f64,
    /// Height of a person [m]
    pub height: f64,
    /// Debris ratio of the FAA model
    pub debris_ratio: f64,
    pub deflagration: DeflagrationModel,
}

impl Default for CriticalAreaModels {
    fn default() -> Self {
        Self {
            buffer: PERSON_RADIUS,
            height: PERSON_HEIGHT,
            debris_ratio: DEFAULT_FAA_DEBRIS_RATIO,
            deflagration: DeflagrationModel::default(),
        }
    }
}

impl CriticalAreaModels {
    /// Critical area for the given aircraft and impact.
    ///
    /// Impact speed [m/s], impact angle [deg] and overlap may each be a scalar
    /// or a vector, as may the aircraft's width, length, mass and fuel
    /// quantity. At most one of them can be a vector; the result has its
    /// length (one element when everything is scalar).
    ///
    /// `ke_lethal` [J] overrides the default threshold of NAWCAD and JARUS.
    pub fn critical_area(
        &self,
        model: CriticalAreaModel,
        aircraft: &AircraftDescription,
        impact_speed: impl Into<Param>,
        impact_angle: impl Into<Param>,
        overlap: impl Into<Param>,
        ke_lethal: Option<f64>,
    ) -> Result<Vec<CriticalArea>> {
        let (speed, angle, overlap) = (impact_speed.into(), impact_angle.into(), overlap.into());
        let n = broadcast_len(&[
            ("impact speed", &speed),
            ("impact angle", &angle),
            ("overlap", &overlap),
            ("width", aircraft.width()),
            ("length", aircraft.length()),
            ("mass", aircraft.mass()),
            ("fuel quantity", aircraft.fuel_quantity()),
        ])?;
        Ok((0..n)
            .map(|i| {
                let case = ImpactCase::from_aircraft(aircraft, i, speed.at(i), angle.at(i), overlap.at(i));
                self.evaluate(model, &case, ke_lethal)
            })
            .collect())
    }

    /// Critical area of one resolved impact.
    pub fn evaluate(&self, model: CriticalAreaModel, case: &ImpactCase, ke_lethal: Option<f64>) -> CriticalArea {
        let pre = self.preamble(case);
        let (glide, slide) = match model {
            CriticalAreaModel::Rcc => self.rcc(&pre, case),
            CriticalAreaModel::Rti => self.rti(&pre, case),
            CriticalAreaModel::Faa => self.faa(&pre),
            CriticalAreaModel::Nawcad => self.nawcad(&pre, case, ke_lethal),
            CriticalAreaModel::Jarus => self.jarus(&pre, case, ke_lethal),
        };
        let deflagration = self.deflagration.area(case.fuel_type, case.fuel_quantity);
        combine(glide, slide, deflagration, case.overlap)
    }

    fn preamble(&self, case: &ImpactCase) -> Preamble {
        let mut angle = case.impact_angle;
        if !(MIN_IMPACT_ANGLE_DEG..=MAX_IMPACT_ANGLE_DEG).contains(&angle) || angle.is_nan() {
            let clipped = if angle.is_nan() { MIN_IMPACT_ANGLE_DEG } else { angle.clamp(MIN_IMPACT_ANGLE_DEG, MAX_IMPACT_ANGLE_DEG) };
            warnings::emit(Warning::Clipped { parameter: "impact angle", from: angle, to: clipped });
            angle = clipped;
        }
        if angle > 90.0 {
            angle = 180.0 - angle;
        }

        let width = valid_size("aircraft width", case.width);
        let length = valid_size("aircraft length", case.length);

        Preamble {
            angle,
            horizontal: horizontal_speed(case.impact_speed, angle),
            glide_distance: glide_distance(self.height, angle),
            width,
            length,
            rounded_radius: self.buffer + width / 2.0,
        }
    }

    /* ------------------------------ formulations ------------------------------ */

    fn rcc(&self, p: &Preamble, case: &ImpactCase) -> (f64, f64) {
        let b = self.buffer;
        let glide = (p.length + p.glide_distance + 2.0 * b) * (p.width + 2.0 * b);
        let slide = slide_distance_friction(p.horizontal, case.friction) * (p.width + 2.0 * b);
        (glide, slide)
    }

    fn rti(&self, p: &Preamble, case: &ImpactCase) -> (f64, f64) {
        let b = self.buffer;
        let r = p.rounded_radius;
        let glide = 2.0 * r * p.glide_distance + PI * r * r;
        let slide = slide_distance_friction(case.restitution * p.horizontal, case.friction) * (2.0 * b + p.width);
        (glide, slide)
    }

    fn faa(&self, p: &Preamble) -> (f64, f64) {
        let r_d = p.rounded_radius;
        let r_ac = self.buffer + p.width / 2.0 * self.debris_ratio.sqrt();
        let h_s = self.height * (90.0 - p.angle).to_radians().sin();

        // Half chord where the person circle meets the debris circle.
        let y = if h_s > MIN_DIVISION_THRESHOLD {
            let a = 2.0 * r_ac * h_s;
            let c = r_ac * r_ac + h_s * h_s - r_d * r_d;
            ((a * a - c * c).max(0.0) / (4.0 * h_s * h_s)).sqrt().min(r_d)
        } else {
            0.0
        };
        let segment = |r: f64| y * (r * r - y * y).max(0.0).sqrt() + r * r * (y / r).clamp(-1.0, 1.0).asin();
        let a_c = 2.0 * y * h_s + segment(r_d) - segment(r_ac);

        let glide = PI * r_d * r_d;
        let slide = PI * r_ac * r_ac + a_c - glide;
        (glide, slide)
    }

    fn nawcad(&self, p: &Preamble, case: &ImpactCase, ke_lethal: Option<f64>) -> (f64, f64) {
        let b = self.buffer;
        let ke = ke_lethal.unwrap_or_else(|| ftlb_to_joule(NAWCAD_LETHAL_KE_FTLB));
        let v_min_kill = speed_from_kinetic_energy(ke, case.mass);
        let slide_lethal = lethal_slide_length(p.horizontal, v_min_kill, case.friction * GRAVITY);

        let glide = p.glide_distance * (2.0 * b + p.width);
        let slide = slide_lethal * (2.0 * b + p.width);
        (glide, slide)
    }

    fn jarus(&self, p: &Preamble, case: &ImpactCase, ke_lethal: Option<f64>) -> (f64, f64) {
        let b = self.buffer;
        let ke = ke_lethal.unwrap_or_else(|| lethal_kinetic_energy_threshold(p.width));
        let v_min_kill = speed_from_kinetic_energy(ke, case.mass);

        let r = p.rounded_radius;
        let end_cap = PI * r * r;
        let glide = 2.0 * r * p.glide_distance + end_cap;

        // Small-aircraft exemption: no slide at all at or below one metre.
        if p.width <= JARUS_SMALL_AIRCRAFT_WIDTH {
            return (glide, 0.0);
        }
        let slide_lethal = lethal_slide_length(case.restitution * p.horizontal, v_min_kill, case.friction * GRAVITY);
        (glide, slide_lethal * (2.0 * b + p.width) + end_cap)
    }
}

/// Postamble shared by all formulations.
pub fn combine(glide: f64, slide: f64, deflagration: f64, overlap: f64) -> CriticalArea {
    let ov = overlap.clamp(0.0, 1.0);
    if ov != overlap {
        warnings::emit(Warning::Clipped { parameter: "overlap", from: overlap, to: ov });
    }
    let inert = glide + slide;
    let overlap_area = inert.min(deflagration) * ov;
    CriticalArea {
        total: inert + deflagration - overlap_area,
        glide,
        slide,
        inert,
        deflagration,
    }
}

// Negative or NaN sizes are replaced by the default fixed-wing size.
fn valid_size(parameter: &'static str, value: f64) -> f64 {
    if value >= 0.0 {
        value
    } else {
        warnings::emit(Warning::Fallback {
            kind: parameter,
            value: value.to_string(),
            fallback: "the fixed-wing default of 1 m",
        });
        DEFAULT_FIXED_WING_SIZE
    }
}

/* -------------------------------- tests -------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use groundrisk_core::warnings::capture;
    use groundrisk_core::AircraftType;

    fn case(width: f64, mass: f64, speed: f64, angle: f64) -> ImpactCase {
        ImpactCase {
            width,
            length: 1.0,
            mass,
            friction: 0.5,
            restitution: 0.7,
            fuel_type: None,
            fuel_quantity: 0.0,
            impact_speed: speed,
            impact_angle: angle,
            overlap: 0.0,
        }
    }

    #[test]
    fn rcc_baseline() {
        let models = CriticalAreaModels::default();
        let ca = models.evaluate(CriticalAreaModel::Rcc, &case(1.5, 5.0, 35.0, 35.0), None);
        let vh = 35.0 * 35f64.to_radians().cos();
        let dg = 1.8 / 35f64.to_radians().tan();
        assert_relative_eq!(ca.glide, (1.0 + dg + 0.6) * 2.1, epsilon = 1e-9);
        assert_relative_eq!(ca.slide, vh * vh / (2.0 * 0.5 * 9.82) * 2.1, epsilon = 1e-9);
        assert_relative_eq!(ca.glide, 8.76, epsilon = 0.01);
        assert_relative_eq!(ca.slide, 175.7, epsilon = 0.1);
        assert_relative_eq!(ca.total, 184.5, epsilon = 0.1);
        assert_eq!(ca.deflagration, 0.0);
    }

    #[test]
    fn jarus_small_aircraft_has_no_slide() {
        let models = CriticalAreaModels::default();
        let ca = models.evaluate(CriticalAreaModel::Jarus, &case(0.8, 2.0, 25.0, 35.0), None);
        assert_eq!(ca.slide, 0.0);
        assert_relative_eq!(ca.total, 5.14, epsilon = 0.01);
        // No slide at any speed.
        let fast = models.evaluate(CriticalAreaModel::Jarus, &case(0.8, 2.0, 250.0, 10.0), None);
        assert_eq!(fast.slide, 0.0);
    }

    #[test]
    fn jarus_large_aircraft_slides() {
        let models = CriticalAreaModels::default();
        let c = case(3.0, 20.0, 35.0, 10.0);
        let ca = models.evaluate(CriticalAreaModel::Jarus, &c, None);
        let r = 0.3 + 1.5;
        let vh = 0.7 * 35.0 * 10f64.to_radians().cos();
        let v_kill = (2.0 * 290.0 / 20.0_f64).sqrt();
        let a = 0.5 * 9.82;
        let t = (vh - v_kill) / a;
        let s = vh * t - 0.5 * a * t * t;
        assert_relative_eq!(ca.slide, s * 3.6 + PI * r * r, epsilon = 1e-9);
    }

    #[test]
    fn jarus_slow_impact_keeps_end_cap() {
        let models = CriticalAreaModels::default();
        let r = 0.3 + 1.5;
        for speed in [5.0, 7.0, 7.5] {
            let ca = models.evaluate(CriticalAreaModel::Jarus, &case(3.0, 20.0, speed, 10.0), None);
            assert_relative_eq!(ca.slide, PI * r * r, epsilon = 1e-9);
        }
        // No jump where the lethal slide starts.
        let below = models.evaluate(CriticalAreaModel::Jarus, &case(3.0, 20.0, 7.8, 10.0), None);
        let above = models.evaluate(CriticalAreaModel::Jarus, &case(3.0, 20.0, 7.9, 10.0), None);
        assert!((above.slide - below.slide).abs() < 1.0);
    }

    #[test]
    fn negative_width_falls_back_to_fixed_wing_default() {
        let models = CriticalAreaModels::default();
        let (ca, w) = capture(|| models.evaluate(CriticalAreaModel::Rcc, &case(-2.0, 5.0, 20.0, 30.0), None));
        let expected = models.evaluate(CriticalAreaModel::Rcc, &case(1.0, 5.0, 20.0, 30.0), None);
        assert_relative_eq!(ca.total, expected.total, epsilon = 1e-12);
        assert!(matches!(w.as_slice(), [Warning::Fallback { kind: "aircraft width", .. }]));
    }

    #[test]
    fn explicit_ke_threshold_overrides_default() {
        let models = CriticalAreaModels::default();
        let c = case(3.0, 20.0, 35.0, 10.0);
        let low = models.evaluate(CriticalAreaModel::Jarus, &c, Some(50.0));
        let default = models.evaluate(CriticalAreaModel::Jarus, &c, None);
        assert!(low.slide > default.slide);
    }

    #[test]
    fn nawcad_uses_54_ftlb() {
        let models = CriticalAreaModels::default();
        let c = case(2.0, 10.0, 30.0, 20.0);
        let ca = models.evaluate(CriticalAreaModel::Nawcad, &c, None);
        let explicit = models.evaluate(CriticalAreaModel::Nawcad, &c, Some(54.0 * 1.355818));
        assert_relative_eq!(ca.slide, explicit.slide, epsilon = 1e-12);
        assert!(ca.slide > 0.0);
    }

    #[test]
    fn rti_glide_has_rounded_end() {
        let models = CriticalAreaModels::default();
        let ca = models.evaluate(CriticalAreaModel::Rti, &case(2.0, 10.0, 20.0, 45.0), None);
        let r = 1.3;
        assert_relative_eq!(ca.glide, 2.0 * r * 1.8 + PI * r * r, epsilon = 1e-9);
    }

    #[test]
    fn faa_vertical_impact_is_debris_disc() {
        let models = CriticalAreaModels::default();
        let ca = models.evaluate(CriticalAreaModel::Faa, &case(2.0, 10.0, 20.0, 90.0), None);
        let r_ac = 0.3 + 4.36_f64.sqrt();
        assert_relative_eq!(ca.inert, PI * r_ac * r_ac, epsilon = 1e-9);
    }

    #[test]
    fn faa_areas_are_finite_for_shallow_impacts() {
        let models = CriticalAreaModels::default();
        for angle in [1.0, 5.0, 30.0, 60.0, 89.0] {
            let ca = models.evaluate(CriticalAreaModel::Faa, &case(2.0, 10.0, 20.0, angle), None);
            assert!(ca.total.is_finite() && ca.total > 0.0, "angle {angle}");
        }
    }

    #[test]
    fn angle_folding_and_clipping() {
        let models = CriticalAreaModels::default();
        let a = models.evaluate(CriticalAreaModel::Rcc, &case(1.5, 5.0, 35.0, 145.0), None);
        let b = models.evaluate(CriticalAreaModel::Rcc, &case(1.5, 5.0, 35.0, 35.0), None);
        assert_relative_eq!(a.total, b.total, epsilon = 1e-9);

        let (low, w) = capture(|| models.evaluate(CriticalAreaModel::Rcc, &case(1.5, 5.0, 35.0, 0.0), None));
        let one = models.evaluate(CriticalAreaModel::Rcc, &case(1.5, 5.0, 35.0, 1.0), None);
        assert_relative_eq!(low.total, one.total);
        assert_eq!(w.len(), 1);

        let (_, w) = capture(|| models.evaluate(CriticalAreaModel::Rcc, &case(1.5, 5.0, 35.0, 180.0), None));
        assert!(matches!(w[0], Warning::Clipped { to, .. } if to == 179.0));
    }

    #[test]
    fn combination_identity() {
        for &(glide, slide, defl, ov) in &[(3.0, 4.0, 10.0, 0.5), (30.0, 0.0, 2.0, 1.0), (1.0, 1.0, 0.0, 0.3)] {
            let ca = combine(glide, slide, defl, ov);
            assert_relative_eq!(ca.total, ca.inert + ca.deflagration - ca.inert.min(ca.deflagration) * ov);
        }
        let (ca, w) = capture(|| combine(1.0, 1.0, 5.0, 1.7));
        assert_relative_eq!(ca.total, 5.0);
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn fuel_adds_deflagration() {
        let models = CriticalAreaModels::default();
        let mut ac = AircraftDescription::new(AircraftType::FixedWing, 3.0, 2.0, 20.0);
        ac.set_fuel(FuelType::Gasoline, 2.0);
        let ca = models.critical_area(CriticalAreaModel::Jarus, &ac, 30.0, 20.0, 0.0, None).unwrap()[0];
        assert!(ca.deflagration > 0.0);
        assert_relative_eq!(ca.total, ca.inert + ca.deflagration);
    }

    #[test]
    fn sweep_follows_the_vector_input() {
        let models = CriticalAreaModels::default();
        let ac = AircraftDescription::new(AircraftType::FixedWing, 3.0, 2.0, 20.0);
        let out = models
            .critical_area(CriticalAreaModel::Rcc, &ac, vec![10.0, 20.0, 30.0], 35.0, 0.0, None)
            .unwrap();
        assert_eq!(out.len(), 3);
        assert!(out[0].slide < out[1].slide && out[1].slide < out[2].slide);
    }

    #[test]
    fn sweep_rejects_two_vectors() {
        let models = CriticalAreaModels::default();
        let ac = AircraftDescription::new(AircraftType::FixedWing, vec![1.0, 2.0], 2.0, 20.0);
        let err = models
            .critical_area(CriticalAreaModel::Rcc, &ac, vec![10.0, 20.0], 35.0, 0.0, None)
            .unwrap_err();
        assert!(matches!(err, GroundRiskError::MultipleVectors { .. }));
    }

    #[test]
    fn lenient_model_parsing() {
        assert_eq!("jarus".parse::<CriticalAreaModel>().unwrap(), CriticalAreaModel::Jarus);
        let (m, w) = capture(|| CriticalAreaModel::parse_lenient("NASA"));
        assert_eq!(m, CriticalAreaModel::Rcc);
        assert_eq!(w.len(), 1);
    }
}
