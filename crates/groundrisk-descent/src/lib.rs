//! groundrisk-descent
//!
//! Ballistic descent of an aircraft after loss of thrust, as a point mass with
//! quadratic drag. Two solvers:
//! - a closed-form approximation that decouples the axes (`descend`,
//!   `descend_sweep`);
//! - an RK4 integration of the fully coupled equations (`integrate_descent`),
//!   used as a numerical reference.
//!
//! Maths:
//!   c = ½·A·ρ·C_d                 (drag parameter)
//!   γ = √(m·g / c)                (terminal vertical speed)
//!   m·dv/dt = −m·g·ŷ − c·|v|·v     (full model, integrated by RK4)
//!
//! The closed form splits the trajectory into three phases:
//!   1. rising leg, from release to the peak (only when v_y > 0);
//!   2. peak to the crossing time t_c, where the horizontal motion is slowed
//!      by drag on the horizontal speed alone: v_x(t) = v_x0 / (1 + t·v_x0·c/m);
//!   3. after t_c, where the horizontal motion follows the vertical terminal
//!      regime.
//!
//! Conventions:
//! - x forward, y up; initial v_y positive means climbing;
//! - altitude is the height of release above the impact plane;
//! - impact angle in radians from horizontal, in [0, π/2].

use groundrisk_core::constants::{AIR_DENSITY, GRAVITY, TERMINAL_VELOCITY_CLAMP};
use groundrisk_core::warnings::{self, Warning};
use groundrisk_core::{broadcast_len, AircraftDescription, GroundRiskError, Param, Result};

/// Intermediate values of the closed form.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseBreakdown {
    pub phase1_distance: f64, // m, release to peak
    pub phase2_distance: f64, // m, peak to crossing (or impact)
    pub phase3_distance: f64, // m, crossing to impact
    pub time_top: f64,        // s
    pub time_cross: f64,      // s, +∞ when the speeds never cross
    pub vx_impact: f64,       // m/s
    pub vy_impact: f64,       // m/s, positive downward
}

/// Impact of a ballistic descent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BallisticResult {
    pub distance: f64,     // m
    pub impact_speed: f64, // m/s
    pub impact_angle: f64, // rad from horizontal
    pub time: f64,         // s
    pub phases: PhaseBreakdown,
}

impl BallisticResult {
    pub fn impact_angle_deg(&self) -> f64 {
        self.impact_angle.to_degrees()
    }
}

/// Scalar body parameters of one descent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescentBody {
    pub mass: f64,         // kg
    pub frontal_area: f64, // m²
    pub drag_coef: f64,
    pub air_density: f64,  // kg/m³
    pub gravity: f64,      // m/s²
}

impl DescentBody {
    /// Drag parameter c = ½·A·ρ·C_d.
    pub fn drag_parameter(&self) -> f64 {
        0.5 * self.frontal_area * self.air_density * self.drag_coef
    }

    /// Terminal vertical speed γ = √(m·g / c).
    pub fn terminal_velocity(&self) -> f64 {
        (self.mass * self.gravity / self.drag_parameter()).sqrt()
    }
}

/// -------------------------
/// Model
/// -------------------------

/// Ballistic descent of one aircraft description.
#[derive(Clone, Debug)]
pub struct BallisticDescent {
    aircraft: AircraftDescription,
    air_density: f64,
    gravity: f64,
}

impl BallisticDescent {
    pub fn new(aircraft: AircraftDescription) -> Self {
        Self { aircraft, air_density: AIR_DENSITY, gravity: GRAVITY }
    }

    #[must_use]
    pub fn with_air_density(mut self, rho: f64) -> Self {
        self.air_density = rho;
        self
    }

    #[must_use]
    pub fn with_gravity(mut self, g: f64) -> Self {
        self.gravity = g;
        self
    }

    pub fn aircraft(&self) -> &AircraftDescription {
        &self.aircraft
    }

    pub fn air_density(&self) -> f64 {
        self.air_density
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Terminal velocity of the aircraft [m/s], shaped like its vector input.
    pub fn terminal_velocity(&self) -> Result<Param> {
        let (n, area) = self.body_len()?;
        let values: Vec<f64> = (0..n).map(|i| self.body(area, i).terminal_velocity()).collect();
        let vector = self.aircraft.mass().is_vector()
            || area.is_vector()
            || self.aircraft.ballistic_drag_coef().is_vector();
        Ok(if vector { Param::Vector(values) } else { Param::Scalar(values[0]) })
    }

    /// Scalar descent from `altitude` [m] with initial velocity (vx, vy) [m/s].
    ///
    /// Uses the first element of any vector aircraft parameter.
    pub fn descend(&self, altitude: f64, vx: f64, vy: f64) -> Result<BallisticResult> {
        let area = self.frontal_area()?;
        descend_body(&self.body(area, 0), altitude, vx, vy)
    }

    /// Descent with any one of altitude, vx, vy, the aircraft's mass, frontal
    /// area or drag coefficient given as a vector.
    pub fn descend_sweep(
        &self,
        altitude: impl Into<Param>,
        vx: impl Into<Param>,
        vy: impl Into<Param>,
    ) -> Result<Vec<BallisticResult>> {
        let (altitude, vx, vy) = (altitude.into(), vx.into(), vy.into());
        let area = self.frontal_area()?;
        let n = broadcast_len(&[
            ("altitude", &altitude),
            ("horizontal velocity", &vx),
            ("vertical velocity", &vy),
            ("mass", self.aircraft.mass()),
            ("ballistic frontal area", area),
            ("ballistic drag coefficient", self.aircraft.ballistic_drag_coef()),
        ])?;
        (0..n)
            .map(|i| descend_body(&self.body(area, i), altitude.at(i), vx.at(i), vy.at(i)))
            .collect()
    }

    fn frontal_area(&self) -> Result<&Param> {
        self.aircraft
            .ballistic_frontal_area()
            .ok_or(GroundRiskError::MissingParameter("ballistic frontal area"))
    }

    fn body_len(&self) -> Result<(usize, &Param)> {
        let area = self.frontal_area()?;
        let n = broadcast_len(&[
            ("mass", self.aircraft.mass()),
            ("ballistic frontal area", area),
            ("ballistic drag coefficient", self.aircraft.ballistic_drag_coef()),
        ])?;
        Ok((n, area))
    }

    fn body(&self, area: &Param, i: usize) -> DescentBody {
        DescentBody {
            mass: self.aircraft.mass().at(i),
            frontal_area: area.at(i),
            drag_coef: self.aircraft.ballistic_drag_coef().at(i),
            air_density: self.air_density,
            gravity: self.gravity,
        }
    }
}

/// -------------------------
/// Closed form
/// -------------------------

/// Rising leg (v_y > 0). All zeros when the body starts level or descending.
#[derive(Clone, Copy, Debug)]
struct Rise {
    time_top: f64,
    height_gain: f64, // m above release at the peak
    distance: f64,
    vx_top: f64,
}

fn rise(body: &DescentBody, vx: f64, vy: f64) -> Rise {
    if vy <= 0.0 {
        return Rise { time_top: 0.0, height_gain: 0.0, distance: 0.0, vx_top: vx };
    }
    let (m, c, g) = (body.mass, body.drag_parameter(), body.gravity);
    let gamma = body.terminal_velocity();
    let time_top = gamma / g * (vy / gamma).atan();
    Rise {
        time_top,
        height_gain: m / (2.0 * c) * (1.0 + vy * vy / (gamma * gamma)).ln(),
        distance: horizontal_distance(m, c, vx, time_top),
        vx_top: horizontal_speed(m, c, vx, time_top),
    }
}

/// Horizontal distance under drag on the horizontal speed alone.
fn horizontal_distance(m: f64, c: f64, vx0: f64, t: f64) -> f64 {
    m / c * (1.0 + vx0 * c * t / m).ln()
}

fn horizontal_speed(m: f64, c: f64, vx0: f64, t: f64) -> f64 {
    vx0 / (1.0 + t * vx0 * c / m)
}

/// acosh(eˢ) for z ≥ 0, without forming eˢ.
fn acosh_exp(z: f64) -> f64 {
    z + (-(-2.0 * z).exp_m1()).sqrt().ln_1p()
}

/// Time at which the horizontal and vertical speeds meet; +∞ when the
/// expression degenerates to a negative value.
fn crossing_time(body: &DescentBody, vx: f64, time_top: f64, h_d: f64) -> f64 {
    let (m, c, g) = (body.mass, body.drag_parameter(), body.gravity);
    let gamma = body.terminal_velocity();
    let k = h_d - g * time_top / gamma;
    let num = m * (g * time_top - gamma * h_d + vx * (1.0 + k * k));
    let den = m * g + vx * c * (g * time_top - gamma * h_d);
    let t_c = num / den;
    if t_c < 0.0 || !t_c.is_finite() {
        f64::INFINITY
    } else {
        t_c.max(time_top)
    }
}

/// Closed-form descent of one scalar body.
///
/// Fails for a negative horizontal velocity and for vx < vy. A vertical speed
/// at or above terminal velocity is clamped to 0.999·γ with a warning.
pub fn descend_body(body: &DescentBody, altitude: f64, vx: f64, vy: f64) -> Result<BallisticResult> {
    if vx < 0.0 {
        return Err(GroundRiskError::NegativeHorizontalVelocity(vx));
    }
    if vx < vy {
        return Err(GroundRiskError::HorizontalBelowVertical { vx, vy });
    }
    if body.drag_parameter() <= 0.0 || body.mass <= 0.0 {
        return Err(GroundRiskError::MissingParameter("positive mass, frontal area and drag coefficient"));
    }

    let (m, c, g) = (body.mass, body.drag_parameter(), body.gravity);
    let gamma = body.terminal_velocity();

    let mut vy = vy;
    if vy.abs() >= gamma {
        let clamped = TERMINAL_VELOCITY_CLAMP * gamma * vy.signum();
        warnings::emit(Warning::VelocityClamped { vy, terminal: gamma, clamped });
        vy = clamped;
    }
    let mut altitude = altitude;
    if altitude < 0.0 {
        warnings::emit(Warning::Clipped { parameter: "altitude", from: altitude, to: 0.0 });
        altitude = 0.0;
    }

    // Phase 1
    let rise = rise(body, vx, vy);

    // Descending leg, starting with downward speed v_d at the peak.
    let v_d = (-vy).max(0.0);
    let h_d = (v_d / gamma).atanh();
    let g_d = -0.5 * (1.0 - v_d * v_d / (gamma * gamma)).ln();
    let fall = altitude + rise.height_gain;
    let time_down = gamma / g * (acosh_exp(c * fall / m + g_d) - h_d);
    let time = rise.time_top + time_down;

    let time_cross = crossing_time(body, vx, rise.time_top, h_d);
    let phi = |t: f64| g * (t - rise.time_top) / gamma + h_d;

    // Phase 2
    let t2 = time.min(time_cross) - rise.time_top;
    let phase2 = horizontal_distance(m, c, rise.vx_top, t2);

    // Phase 3
    let (phase3, vx_impact) = if time > time_cross {
        let vx_cross = horizontal_speed(m, c, rise.vx_top, time_cross - rise.time_top);
        let phi_c = phi(time_cross);
        let vy_cross = gamma * phi_c.tanh();
        let x3 = vx_cross * phi_c.cosh() * gamma / g * (phi(time).sinh().atan() - (vy_cross / gamma).asin());
        (x3, vx_cross * phi_c.cosh() / phi(time).cosh())
    } else {
        (0.0, horizontal_speed(m, c, rise.vx_top, t2))
    };
    let vy_impact = gamma * phi(time).tanh();

    tracing::debug!(
        target: "groundrisk",
        time_top = rise.time_top,
        time_cross,
        time,
        "ballistic descent phases"
    );

    Ok(BallisticResult {
        distance: rise.distance + phase2 + phase3,
        impact_speed: vx_impact.hypot(vy_impact),
        impact_angle: vy_impact.atan2(vx_impact),
        time,
        phases: PhaseBreakdown {
            phase1_distance: rise.distance,
            phase2_distance: phase2,
            phase3_distance: phase3,
            time_top: rise.time_top,
            time_cross,
            vx_impact,
            vy_impact,
        },
    })
}

/// -------------------------
/// RK4 reference
/// -------------------------

#[derive(Clone, Copy, Debug)]
pub struct IntegrateOpts {
    pub dt: f64,       // step size [s]
    pub max_time: f64, // max descent time [s]
    pub max_steps: usize,
}

impl Default for IntegrateOpts {
    fn default() -> Self {
        Self { dt: 1e-3, max_time: 600.0, max_steps: 2_000_000 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescentSample {
    pub t: f64,
    pub x: f64,
    pub y: f64, // height above the impact plane
    pub vx: f64,
    pub vy: f64,
}

impl DescentSample {
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }
}

/// Integrate the coupled quadratic-drag equations until the body reaches the
/// ground (y = 0). The last sample is interpolated onto the ground.
pub fn integrate_descent(body: &DescentBody, altitude: f64, vx: f64, vy: f64, opts: IntegrateOpts) -> Vec<DescentSample> {
    let k = body.drag_parameter() / body.mass;
    let g = body.gravity;
    let deriv = |s: &DescentSample| -> [f64; 4] {
        let v = s.speed();
        [s.vx, s.vy, -k * v * s.vx, -g - k * v * s.vy]
    };
    let step = |s: &DescentSample, d: &[f64; 4], h: f64| DescentSample {
        t: s.t + h,
        x: s.x + h * d[0],
        y: s.y + h * d[1],
        vx: s.vx + h * d[2],
        vy: s.vy + h * d[3],
    };

    let dt = opts.dt;
    let mut s = DescentSample { t: 0.0, x: 0.0, y: altitude.max(0.0), vx, vy };
    let mut out = vec![s];
    let mut steps = 0usize;

    while s.t <= opts.max_time && steps < opts.max_steps {
        let k1 = deriv(&s);
        let k2 = deriv(&step(&s, &k1, 0.5 * dt));
        let k3 = deriv(&step(&s, &k2, 0.5 * dt));
        let k4 = deriv(&step(&s, &k3, dt));
        let mut d = [0.0; 4];
        for (i, di) in d.iter_mut().enumerate() {
            *di = (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]) / 6.0;
        }
        let next = step(&s, &d, dt);

        // Ground hit: interpolate onto y = 0
        if next.y <= 0.0 && s.y > 0.0 {
            let u = s.y / (s.y - next.y);
            out.push(DescentSample {
                t: s.t + u * dt,
                x: s.x + u * (next.x - s.x),
                y: 0.0,
                vx: s.vx + u * (next.vx - s.vx),
                vy: s.vy + u * (next.vy - s.vy),
            });
            break;
        }
        s = next;
        out.push(s);
        steps += 1;
    }
    out
}

/// Impact state of an integrated descent, in the same shape as the closed form.
pub fn integrated_impact(samples: &[DescentSample]) -> Option<BallisticResult> {
    let last = samples.last()?;
    let vy_impact = -last.vy;
    Some(BallisticResult {
        distance: last.x,
        impact_speed: last.speed(),
        impact_angle: vy_impact.atan2(last.vx),
        time: last.t,
        phases: PhaseBreakdown {
            phase1_distance: f64::NAN,
            phase2_distance: f64::NAN,
            phase3_distance: f64::NAN,
            time_top: f64::NAN,
            time_cross: f64::NAN,
            vx_impact: last.vx,
            vy_impact,
        },
    })
}

/* ----------------------------------- tests ---------------------------------- */
