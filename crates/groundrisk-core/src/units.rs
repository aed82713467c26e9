//! Units & conversions
//!
//! Length conversions go through `uom` (1 ft = 0.3048 m exactly). The pound
//! is pinned to its exact definition, 0.45359237 kg.

use uom::si::f64::Length;
use uom::si::length::{foot, meter};

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453_592_37;

/// Metres per foot
pub const M_PER_FT: f64 = 0.3048;

/// Joules per foot-pound
pub const J_PER_FTLB: f64 = 1.355_818;

pub fn kg_to_lb(kg: f64) -> f64 { kg / KG_PER_LB }
pub fn lb_to_kg(lb: f64) -> f64 { lb * KG_PER_LB }

pub fn ft_to_m(ft: f64) -> f64 {
    Length::new::<foot>(ft).get::<meter>()
}

pub fn m_to_ft(m: f64) -> f64 {
    Length::new::<meter>(m).get::<foot>()
}

pub fn ftlb_to_joule(ftlb: f64) -> f64 { ftlb * J_PER_FTLB }
pub fn joule_to_ftlb(j: f64) -> f64 { j / J_PER_FTLB }

/// People per km² to people per m².
pub fn per_km2_to_per_m2(density: f64) -> f64 { density * 1e-6 }
