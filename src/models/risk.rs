//! Risk level taxonomy and the shared severity scale.
//!
//! Two label sets live here and must stay distinct: `RiskLevel` names the
//! computed risk of a cell or vulnerability ("Critical" at the top), while
//! `ScalePosition` names a raw axis step ("Extreme" at the top). Axis
//! headers and matrix definition fields use the scale labels; everything
//! rated uses the level labels.

use serde::{Deserialize, Serialize};

/// Display label for a value that has no computable risk level.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Color tag for a value that has no computable risk level.
pub const UNKNOWN_COLOR: &str = "bg-gray-900 text-white";

/// Qualitative risk level, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// All levels, ascending.
    pub const ALL: [RiskLevel; 5] = [
        Self::VeryLow,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Critical,
    ];

    /// Numeric rank on the 1-5 wire scale.
    pub fn rank(&self) -> u8 {
        match self {
            Self::VeryLow => 1,
            Self::Low => 2,
            Self::Medium => 3,
            Self::High => 4,
            Self::Critical => 5,
        }
    }

    /// Decode a 1-5 rank. `0` (unrated) and out-of-scale values map to `None`.
    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Self::VeryLow),
            2 => Some(Self::Low),
            3 => Some(Self::Medium),
            4 => Some(Self::High),
            5 => Some(Self::Critical),
            _ => None,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Stable color tag used wherever this level is rendered.
    pub fn color(&self) -> &'static str {
        match self {
            Self::VeryLow => "bg-blue-900/50 text-blue-300",
            Self::Low => "bg-green-900/50 text-green-300",
            Self::Medium => "bg-yellow-900/50 text-yellow-300",
            Self::High => "bg-orange-900/50 text-orange-300",
            Self::Critical => "bg-red-900/50 text-red-300",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A display label paired with its color tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskTag {
    pub label: &'static str,
    pub color: &'static str,
}

impl RiskTag {
    /// Tag for a known risk level.
    pub fn for_level(level: RiskLevel) -> Self {
        Self {
            label: level.label(),
            color: level.color(),
        }
    }

    /// Tag for a raw 1-5 rank; `0` and out-of-scale values get the unknown tag.
    pub fn for_rank(rank: u8) -> Self {
        match RiskLevel::from_rank(rank) {
            Some(level) => Self::for_level(level),
            None => Self::unknown(),
        }
    }

    /// Tag for an unrated or unknowable value.
    pub fn unknown() -> Self {
        Self {
            label: UNKNOWN_LABEL,
            color: UNKNOWN_COLOR,
        }
    }
}

/// Step on the shared five-position severity scale.
///
/// Result ratings and matrix definition fields are stored as positions on
/// this scale; each matrix size uses a contiguous window of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScalePosition {
    VeryLow,
    Low,
    Medium,
    High,
    Extreme,
}

impl ScalePosition {
    /// One-based position on the scale.
    pub fn position(&self) -> u8 {
        match self {
            Self::VeryLow => 1,
            Self::Low => 2,
            Self::Medium => 3,
            Self::High => 4,
            Self::Extreme => 5,
        }
    }

    /// Decode a 1-5 scale position.
    pub fn from_position(position: u8) -> Option<Self> {
        match position {
            1 => Some(Self::VeryLow),
            2 => Some(Self::Low),
            3 => Some(Self::Medium),
            4 => Some(Self::High),
            5 => Some(Self::Extreme),
            _ => None,
        }
    }

    /// Axis label for this scale step.
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Extreme => "Extreme",
        }
    }
}
