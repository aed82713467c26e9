//! groundrisk-models
//!
//! Lethal-area models of a crashing aircraft:
//!   - `deflagration`: fuel → TNT-equivalent mass → fireball / thermal / blast areas
//!   - `critical_area`: the five inert critical-area formulations plus the
//!     deflagration postamble
//!
//! Exports:
//!   - `CriticalAreaModels::critical_area(model, aircraft, v, θ, overlap, ke)`
//!   - `DeflagrationModel::area(fuel, litres)`

pub mod critical_area;
pub mod deflagration;

pub use critical_area::{
    combine, glide_distance, horizontal_speed, lethal_kinetic_energy_threshold, slide_distance_friction,
    speed_from_kinetic_energy, CriticalArea, CriticalAreaModel, CriticalAreaModels, ImpactCase,
};
pub use deflagration::{
    deflagration_area, explosion_lethal_area, fireball_area, fuel_properties, thermal_lethal_area,
    tnt_equivalent_mass, tnt_equivalent_mass_by_name, DeflagrationModel, FuelProperties,
};
