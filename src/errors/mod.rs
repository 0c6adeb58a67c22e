//! Engine error taxonomy shared by every operation.
//!
//! All failures here are deterministic precondition violations reported at
//! the offending call. Nothing is retried or recovered automatically; an
//! unrated value (`0`/absent) is a valid state, never an error.

use crate::models::matrix::MatrixSize;

/// Axis a rating belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingAxis {
    Impact,
    Likelihood,
}

impl std::fmt::Display for RatingAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Impact => write!(f, "impact"),
            Self::Likelihood => write!(f, "likelihood"),
        }
    }
}

/// Engine error type covering rating, size and record validation failures.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{axis} rating {value} is out of range 1..={} for a {size} matrix", size.side())]
    InvalidRating {
        size: MatrixSize,
        axis: RatingAxis,
        value: u8,
    },

    #[error("unsupported matrix size code: {code}")]
    InvalidSize { code: u8 },

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl EngineError {
    /// Check if this error represents an out-of-range rating.
    pub fn is_invalid_rating(&self) -> bool {
        matches!(self, Self::InvalidRating { .. })
    }

    /// Check if this error represents an unsupported matrix size.
    pub fn is_invalid_size(&self) -> bool {
        matches!(self, Self::InvalidSize { .. })
    }
}
