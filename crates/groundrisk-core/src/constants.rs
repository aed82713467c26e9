//! Physical and model constants shared by every crate of the workspace.

/// Gravitational acceleration in m/s²
pub const GRAVITY: f64 = 9.82;

/// Air density at sea level (kg/m³)
pub const AIR_DENSITY: f64 = 1.225;

/// Radius of a standing person, used as buffer around the aircraft (m)
pub const PERSON_RADIUS: f64 = 0.3;

/// Height of a standing person (m)
pub const PERSON_HEIGHT: f64 = 1.8;

/// Width and length of the default fixed-wing aircraft (m)
pub const DEFAULT_FIXED_WING_SIZE: f64 = 1.0;

/// Default friction coefficient between aircraft and ground
pub const DEFAULT_FRICTION_COEFFICIENT: f64 = 0.6;

/// Default coefficient of restitution
pub const DEFAULT_RESTITUTION_COEFFICIENT: f64 = 0.7;

/// Default debris ratio `F_A` for the FAA secondary-debris model
pub const DEFAULT_FAA_DEBRIS_RATIO: f64 = 4.36;

/// Scaled distance for 3.5 psi overpressure (m·kg^-1/3)
pub const DEFAULT_OVERPRESSURE_K: f64 = 7.14;

/// Default probability of lethality used for the thermal lethal area
pub const DEFAULT_THERMAL_LETHALITY: f64 = 0.1;

/// Default target level of safety (fatalities per flight hour)
pub const DEFAULT_TLOS: f64 = 1e-6;

/// Lethal kinetic energy threshold used by the NAWCAD model (ft·lb)
pub const NAWCAD_LETHAL_KE_FTLB: f64 = 54.0;

/// JARUS lethal kinetic energy for aircraft wider than one metre (J)
pub const JARUS_LETHAL_KE_LARGE: f64 = 290.0;

/// JARUS lethal kinetic energy for aircraft up to one metre wide (J)
pub const JARUS_LETHAL_KE_SMALL: f64 = 580.0;

/// Width at or below which JARUS exempts the aircraft from a lethal slide (m)
pub const JARUS_SMALL_AIRCRAFT_WIDTH: f64 = 1.0;

/// Smallest impact angle used by the critical-area models (deg)
pub const MIN_IMPACT_ANGLE_DEG: f64 = 1.0;

/// Largest impact angle used by the critical-area models (deg)
pub const MAX_IMPACT_ANGLE_DEG: f64 = 179.0;

/// Fraction of terminal velocity an initial vertical speed is clamped to
pub const TERMINAL_VELOCITY_CLAMP: f64 = 0.999;

// Numerical stability constants
/// Minimum threshold for preventing division by zero in general calculations
pub const MIN_DIVISION_THRESHOLD: f64 = 1e-12;
