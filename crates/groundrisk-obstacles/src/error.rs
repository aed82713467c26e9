use thiserror::Error;

use groundrisk_core::GroundRiskError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObstacleError {
    #[error(transparent)]
    Core(#[from] GroundRiskError),
    /// An operation needs obstacles or critical areas that were never generated.
    #[error("obstacle field has no {0}")]
    EmptyField(&'static str),
    #[error("invalid size: {0}")]
    InvalidSize(String),
}

pub type Result<T> = std::result::Result<T, ObstacleError>;
