//! Intrinsic Ground Risk Class.
//!
//!   raw = 1 − log10(TLOS / (ρ · A))
//!
//! with ρ the population density [ppl/m²], A the critical area [m²] and TLOS
//! the target level of safety [fatalities per flight hour]. The class is
//! ⌈raw⌉, never below 1.

use serde::{Deserialize, Serialize};

use groundrisk_core::units::per_km2_to_per_m2;
use groundrisk_core::warnings::{self, Warning};

/// Densities at or below this are a controlled ground area [ppl/km²].
pub const CONTROLLED_DENSITY: f64 = 1.0;

/// iGRC of one (density, critical area) pair.
///
/// `class` is ⌈raw⌉ floored at 1, the lowest ground risk class. Small areas
/// over sparse populations give raw ≤ 0; [`Igrc::ceiling`] keeps that value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Igrc {
    pub class: u32,
    pub raw: f64,
}

impl Igrc {
    /// ⌈raw⌉ without the floor at class 1.
    pub fn ceiling(&self) -> f64 {
        self.raw.ceil()
    }

    /// Class of a controlled ground area, nobody on the ground at risk.
    pub const CONTROLLED: Igrc = Igrc { class: 1, raw: f64::NEG_INFINITY };

    fn from_raw(raw: f64) -> Self {
        let ceil = raw.ceil();
        let class = if ceil.is_finite() && ceil > 1.0 { ceil as u32 } else { 1 };
        Self { class, raw }
    }
}

/// iGRC for `pop_density` [ppl/km²], `critical_area` [m²] and `tlos`.
pub fn igrc(pop_density: f64, critical_area: f64, tlos: f64) -> Igrc {
    let raw = 1.0 - (tlos / (per_km2_to_per_m2(pop_density) * critical_area)).log10();
    if pop_density <= CONTROLLED_DENSITY {
        warnings::emit(Warning::ControlledGroundArea { density: pop_density });
        return Igrc { class: 1, raw };
    }
    Igrc::from_raw(raw)
}
