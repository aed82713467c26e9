//! Deflagration model
//!
//! Fuel on board is converted to a TNT-equivalent mass
//!
//!   W = (E_fuel / E_TNT) · ρ_fuel · V          [kg]
//!
//! from which three lethal areas follow:
//! - explosion (overpressure):  D = K·W^(1/3), default K = 7.14 (3.5 psi)
//! - thermal (deflagration):    D = −14.8·W^(1/3) / ln(−0.0005493 + 0.000232263 / p_lethal)
//! - fireball:                  D = 2.77·W_lb^0.36 / 0.45  [ft]
//!
//! each as π·D². The deflagration contribution to a critical area is the
//! larger of the fireball and the thermal area.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use groundrisk_core::constants::{DEFAULT_OVERPRESSURE_K, DEFAULT_THERMAL_LETHALITY};
use groundrisk_core::units::{ft_to_m, kg_to_lb};
use groundrisk_core::warnings::{self, Warning};
use groundrisk_core::{FuelType, Result};

/// Specific energy of TNT [MJ/kg]
pub const TNT_SPECIFIC_ENERGY: f64 = 4.184;

/// Energy content and volumetric density of one fuel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuelProperties {
    pub specific_energy: f64, // MJ/kg
    pub density: f64,         // kg/L
}

impl FuelProperties {
    /// Energy density relative to TNT.
    pub fn relative_energy_density(&self) -> f64 {
        self.specific_energy / TNT_SPECIFIC_ENERGY
    }
}

#[derive(Clone, Copy)]
struct FuelRow {
    fuel: FuelType,
    specific_energy: f64,
    density: f64,
}

const FUEL_TABLE: &[FuelRow] = &[
    //                                        MJ/kg                   kg/L
    FuelRow { fuel: FuelType::Gasoline,       specific_energy: 46.4,  density: 0.749 },
    FuelRow { fuel: FuelType::Diesel,         specific_energy: 45.6,  density: 0.832 },
    FuelRow { fuel: FuelType::JetA1,          specific_energy: 43.15, density: 0.804 },
    FuelRow { fuel: FuelType::AvGas,          specific_energy: 44.65, density: 0.69 },
    FuelRow { fuel: FuelType::Methanol,       specific_energy: 19.9,  density: 0.792 },
    FuelRow { fuel: FuelType::LiquidHydrogen, specific_energy: 141.86, density: 0.071 },
    FuelRow { fuel: FuelType::LiquidButane,   specific_energy: 49.5,  density: 0.6 },
    FuelRow { fuel: FuelType::LiFeBattery,    specific_energy: 0.5,   density: 2.0 },
    FuelRow { fuel: FuelType::LiIonBattery,   specific_energy: 0.9,   density: 2.5 },
];

pub fn fuel_properties(fuel: FuelType) -> FuelProperties {
    // Every variant has a row; the fallback is never reached.
    let row = FUEL_TABLE.iter().find(|r| r.fuel == fuel).copied().unwrap_or(FUEL_TABLE[0]);
    FuelProperties { specific_energy: row.specific_energy, density: row.density }
}

/// TNT-equivalent mass [kg] of `quantity` litres of `fuel`.
pub fn tnt_equivalent_mass(fuel: FuelType, quantity: f64) -> f64 {
    let p = fuel_properties(fuel);
    p.relative_energy_density() * p.density * quantity.max(0.0)
}

/// Same as [`tnt_equivalent_mass`] for a fuel given by name. Unknown names fail.
pub fn tnt_equivalent_mass_by_name(fuel: &str, quantity: f64) -> Result<f64> {
    Ok(tnt_equivalent_mass(fuel.parse()?, quantity))
}

/// Lethal area [m²] of the blast overpressure, radius K·W^(1/3).
pub fn explosion_lethal_area(tnt_mass: f64, k: f64) -> f64 {
    let d = k * tnt_mass.max(0.0).cbrt();
    PI * d * d
}

/// Lethal area [m²] of the thermal radiation for a probability of lethality.
///
/// `p_lethal` outside the domain of the logarithm is clipped with a warning.
pub fn thermal_lethal_area(tnt_mass: f64, p_lethal: f64) -> f64 {
    // ln() needs 0 < −0.0005493 + 0.000232263/p < 1
    const P_MAX: f64 = 0.42;
    const P_MIN: f64 = 1e-3;
    let p = p_lethal.clamp(P_MIN, P_MAX);
    if p != p_lethal {
        warnings::emit(Warning::Clipped { parameter: "thermal lethality", from: p_lethal, to: p });
    }
    let d = -14.8 * tnt_mass.max(0.0).cbrt() / (-0.000_549_3 + 0.000_232_263 / p).ln();
    PI * d * d
}

/// Fireball area [m²]; the diameter correlation is in pounds and feet.
pub fn fireball_area(tnt_mass: f64) -> f64 {
    let d_ft = 2.77 * kg_to_lb(tnt_mass.max(0.0)).powf(0.36) / 0.45;
    let d = ft_to_m(d_ft);
    PI * d * d
}

/// max(fireball, thermal) with the given lethality.
pub fn deflagration_area(tnt_mass: f64, p_lethal: f64) -> f64 {
    if tnt_mass <= 0.0 {
        return 0.0;
    }
    fireball_area(tnt_mass).max(thermal_lethal_area(tnt_mass, p_lethal))
}

/// Tunables of the deflagration model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeflagrationModel {
    pub overpressure_k: f64,
    pub thermal_lethality: f64,
}

impl Default for DeflagrationModel {
    fn default() -> Self {
        Self { overpressure_k: DEFAULT_OVERPRESSURE_K, thermal_lethality: DEFAULT_THERMAL_LETHALITY }
    }
}

impl DeflagrationModel {
    /// Deflagration area [m²] for `quantity` litres of `fuel` (none ⇒ 0).
    pub fn area(&self, fuel: Option<FuelType>, quantity: f64) -> f64 {
        match fuel {
            Some(f) if quantity > 0.0 => deflagration_area(tnt_equivalent_mass(f, quantity), self.thermal_lethality),
            _ => 0.0,
        }
    }

    pub fn explosion_area(&self, fuel: FuelType, quantity: f64) -> f64 {
        explosion_lethal_area(tnt_equivalent_mass(fuel, quantity), self.overpressure_k)
    }
}

/* -------------------------------- tests -------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use groundrisk_core::warnings::capture;
    use groundrisk_core::GroundRiskError;

    #[test]
    fn every_fuel_has_a_row() {
        for fuel in FuelType::ALL {
            assert!(FUEL_TABLE.iter().any(|r| r.fuel == fuel), "{fuel:?} missing");
            assert!(fuel_properties(fuel).relative_energy_density() > 0.0);
        }
    }

    #[test]
    fn tnt_mass_is_linear_in_volume() {
        let one = tnt_equivalent_mass(FuelType::Gasoline, 1.0);
        assert_relative_eq!(one, 46.4 / 4.184 * 0.749, epsilon = 1e-12);
        assert_relative_eq!(tnt_equivalent_mass(FuelType::Gasoline, 3.0), 3.0 * one, epsilon = 1e-12);
    }

    #[test]
    fn unknown_fuel_name_fails() {
        assert!(matches!(tnt_equivalent_mass_by_name("plasma", 1.0), Err(GroundRiskError::UnknownFuel(_))));
        assert!(tnt_equivalent_mass_by_name("diesel", 1.0).is_ok());
    }

    #[test]
    fn zero_fuel_gives_zero_areas() {
        assert_eq!(deflagration_area(0.0, 0.1), 0.0);
        assert_eq!(explosion_lethal_area(0.0, 7.14), 0.0);
        assert_eq!(fireball_area(0.0), 0.0);
        assert_eq!(DeflagrationModel::default().area(Some(FuelType::Diesel), 0.0), 0.0);
        assert_eq!(DeflagrationModel::default().area(None, 5.0), 0.0);
    }

    #[test]
    fn explosion_radius_scales_with_cube_root() {
        let a1 = explosion_lethal_area(1.0, 7.14);
        assert_relative_eq!(a1, PI * 7.14 * 7.14, epsilon = 1e-9);
        assert_relative_eq!(explosion_lethal_area(8.0, 7.14), 4.0 * a1, epsilon = 1e-9);
    }

    #[test]
    fn thermal_area_matches_formula() {
        let w = 8.0_f64;
        let d = -14.8 * 2.0 / (-0.0005493 + 0.000232263 / 0.1_f64).ln();
        assert_relative_eq!(thermal_lethal_area(w, 0.1), PI * d * d, epsilon = 1e-9);
        // Lower lethality reaches further.
        assert!(thermal_lethal_area(w, 0.01) > thermal_lethal_area(w, 0.1));
    }

    #[test]
    fn thermal_lethality_clipped() {
        let (_, w) = capture(|| thermal_lethal_area(1.0, 0.9));
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn fireball_uses_imperial_correlation() {
        let w = 10.0;
        let d = 2.77 * (w / 0.45359237_f64).powf(0.36) / 0.45 * 0.3048;
        assert_relative_eq!(fireball_area(w), PI * d * d, epsilon = 1e-9);
    }

    #[test]
    fn deflagration_is_larger_of_fireball_and_thermal() {
        let w = tnt_equivalent_mass(FuelType::JetA1, 5.0);
        let expected = fireball_area(w).max(thermal_lethal_area(w, 0.1));
        assert_relative_eq!(deflagration_area(w, 0.1), expected);
    }
}
