//! Advisory warning side channel.
//!
//! Out-of-range inputs, fallbacks and sanity-check mismatches never fail a
//! computation. They are emitted here instead:
//! - always as a `tracing` event at WARN level (target `groundrisk`), so any
//!   installed subscriber sees them;
//! - additionally into the innermost active [`capture`] scope on the current
//!   thread, for callers that want the list of warnings of one call.

use std::cell::RefCell;
use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Warning {
    /// A value was stored although it lies outside the advised range.
    OutOfRange {
        parameter: &'static str,
        value: f64,
        expected: &'static str,
    },
    /// An unrecognised or invalid option was replaced by a default.
    Fallback {
        kind: &'static str,
        value: String,
        fallback: &'static str,
    },
    /// A value was clipped into its valid domain before use.
    Clipped {
        parameter: &'static str,
        from: f64,
        to: f64,
    },
    /// An initial vertical speed at or above terminal velocity was clamped.
    VelocityClamped { vy: f64, terminal: f64, clamped: f64 },
    /// Population density at or below 1 ppl/km² is a controlled ground area.
    ControlledGroundArea { density: f64 },
    /// Internal sanity check failed; results may be degraded.
    Inconsistency(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::OutOfRange { parameter, value, expected } => {
                write!(f, "{parameter} = {value} is outside the advised range ({expected})")
            }
            Warning::Fallback { kind, value, fallback } => {
                write!(f, "unrecognised {kind} `{value}`, using {fallback}")
            }
            Warning::Clipped { parameter, from, to } => {
                write!(f, "{parameter} clipped from {from} to {to}")
            }
            Warning::VelocityClamped { vy, terminal, clamped } => write!(
                f,
                "vertical velocity {vy} m/s is not below terminal velocity {terminal} m/s, clamped to {clamped} m/s"
            ),
            Warning::ControlledGroundArea { density } => write!(
                f,
                "population density {density} ppl/km^2 treated as controlled ground area"
            ),
            Warning::Inconsistency(msg) => write!(f, "sanity check failed: {msg}"),
        }
    }
}

thread_local! {
    static SINKS: RefCell<Vec<Vec<Warning>>> = const { RefCell::new(Vec::new()) };
}

/// Emit a warning to the tracing subscriber and the active capture scope.
pub fn emit(warning: Warning) {
    tracing::warn!(target: "groundrisk", "{warning}");
    SINKS.with(|sinks| {
        if let Some(top) = sinks.borrow_mut().last_mut() {
            top.push(warning);
        }
    });
}

/// Run `f` and return its result together with every warning it emitted on
/// this thread. Scopes nest; an inner scope does not leak into the outer one.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<Warning>) {
    SINKS.with(|sinks| sinks.borrow_mut().push(Vec::new()));
    let out = f();
    let warnings = SINKS.with(|sinks| sinks.borrow_mut().pop().unwrap_or_default());
    (out, warnings)
}

/// Convenience for the common range check: warn when `ok` is false.
pub fn check_range(ok: bool, parameter: &'static str, value: f64, expected: &'static str) {
    if !ok {
        emit(Warning::OutOfRange { parameter, value, expected });
    }
}
