use thiserror::Error;

/// Domain errors. Everything advisory goes through [`crate::warnings`]
/// instead; these are the fail-fast cases.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroundRiskError {
    #[error("negative horizontal velocity ({0} m/s)")]
    NegativeHorizontalVelocity(f64),
    #[error("horizontal velocity ({vx} m/s) must be greater than or equal to vertical velocity ({vy} m/s)")]
    HorizontalBelowVertical { vx: f64, vy: f64 },
    #[error("unknown fuel type `{0}`")]
    UnknownFuel(String),
    #[error("unknown {kind} `{value}`")]
    UnknownVariant { kind: &'static str, value: String },
    #[error("at most one vector input is allowed per computation, got `{first}` and `{second}`")]
    MultipleVectors { first: &'static str, second: &'static str },
    #[error("vector input `{0}` is empty")]
    EmptyVector(&'static str),
    #[error("missing aircraft parameter: {0}")]
    MissingParameter(&'static str),
    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),
}

pub type Result<T> = std::result::Result<T, GroundRiskError>;
