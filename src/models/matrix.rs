//! Matrix records and the size parameter that drives every classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{EngineError, RatingAxis};
use crate::models::risk::ScalePosition;

/// Matrix side length. Wire encoding is the record's `type` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatrixSize {
    Size3,
    Size4,
    Size5,
}

impl MatrixSize {
    /// All supported sizes, ascending.
    pub const ALL: [MatrixSize; 3] = [Self::Size3, Self::Size4, Self::Size5];

    /// Decode a wire `type` code (1, 2 or 3).
    pub fn from_code(code: u8) -> Result<Self, EngineError> {
        match code {
            1 => Ok(Self::Size3),
            2 => Ok(Self::Size4),
            3 => Ok(Self::Size5),
            _ => Err(EngineError::InvalidSize { code }),
        }
    }

    /// Wire `type` code.
    pub fn code(&self) -> u8 {
        match self {
            Self::Size3 => 1,
            Self::Size4 => 2,
            Self::Size5 => 3,
        }
    }

    /// Side length of the square grid.
    pub fn side(&self) -> u8 {
        match self {
            Self::Size3 => 3,
            Self::Size4 => 4,
            Self::Size5 => 5,
        }
    }

    /// Whether a 1-based cell coordinate lies on this grid.
    pub fn contains(&self, rating: u8) -> bool {
        (1..=self.side()).contains(&rating)
    }

    /// Severity-scale positions this size uses, ascending.
    ///
    /// Only the 5x5 grid reaches down to Very Low; the smaller grids start
    /// at Low, so their stored definition fields and result ratings sit in
    /// the upper part of the scale.
    pub fn scale_window(&self) -> &'static [ScalePosition] {
        use ScalePosition::{Extreme, High, Low, Medium, VeryLow};
        match self {
            Self::Size3 => &[Low, Medium, High],
            Self::Size4 => &[Low, Medium, High, Extreme],
            Self::Size5 => &[VeryLow, Low, Medium, High, Extreme],
        }
    }

    /// First severity-scale position of this size's window.
    pub fn scale_start(&self) -> u8 {
        match self {
            Self::Size3 | Self::Size4 => 2,
            Self::Size5 => 1,
        }
    }

    /// Severity-scale position for a 1-based cell coordinate.
    pub fn scale_position(&self, rating: u8) -> Option<ScalePosition> {
        if !self.contains(rating) {
            return None;
        }
        ScalePosition::from_position(self.scale_start() + rating - 1)
    }
}

impl std::fmt::Display for MatrixSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = self.side();
        write!(f, "{side}x{side}")
    }
}

/// Matrix lifecycle status. Wire codes: 1 Active, 2 Inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatrixStatus {
    Active,
    Inactive,
}

impl MatrixStatus {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Active),
            2 => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Active => 1,
            Self::Inactive => 2,
        }
    }
}

/// Raw matrix record as served by the REST API.
///
/// The `impact_N`/`likelihood_N` fields hold free-text definitions for the
/// severity-scale position `N`; only the positions inside the record's
/// scale window are populated.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatrixRecord {
    pub matrix_id: String,
    pub user_id: Option<String>,
    #[validate(required, length(min = 2, max = 100))]
    pub name: Option<String>,
    #[validate(required, range(min = 1, max = 2))]
    pub status: Option<u8>,
    #[serde(rename = "type")]
    #[validate(required, range(min = 1, max = 3))]
    pub type_code: Option<u8>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(max = 1000))]
    pub impact_1: Option<String>,
    #[validate(length(max = 1000))]
    pub impact_2: Option<String>,
    #[validate(length(max = 1000))]
    pub impact_3: Option<String>,
    #[validate(length(max = 1000))]
    pub impact_4: Option<String>,
    #[validate(length(max = 1000))]
    pub impact_5: Option<String>,
    #[validate(length(max = 1000))]
    pub likelihood_1: Option<String>,
    #[validate(length(max = 1000))]
    pub likelihood_2: Option<String>,
    #[validate(length(max = 1000))]
    pub likelihood_3: Option<String>,
    #[validate(length(max = 1000))]
    pub likelihood_4: Option<String>,
    #[validate(length(max = 1000))]
    pub likelihood_5: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MatrixRecord {
    /// Decode a raw matrix payload and check its field bounds.
    pub fn from_json(data: &[u8]) -> Result<Self, EngineError> {
        let record: Self = serde_json::from_slice(data).map_err(|e| {
            tracing::warn!(error = %e, "rejected malformed matrix payload");
            EngineError::from(e)
        })?;
        record.check()?;
        Ok(record)
    }

    /// Check field bounds, reporting violations as `InvalidRecord`.
    pub fn check(&self) -> Result<(), EngineError> {
        self.validate().map_err(|e| {
            tracing::warn!(matrix_id = %self.matrix_id, error = %e, "matrix record failed validation");
            EngineError::InvalidRecord(e.to_string())
        })
    }

    /// Matrix size decoded from the record's `type` code.
    pub fn size(&self) -> Result<MatrixSize, EngineError> {
        MatrixSize::from_code(self.type_code.unwrap_or(0))
    }

    /// Lifecycle status, `None` when the code is missing or unknown.
    pub fn status(&self) -> Option<MatrixStatus> {
        MatrixStatus::from_code(self.status.unwrap_or(0))
    }

    /// Stored definition text for an impact scale step.
    pub fn impact_definition(&self, position: ScalePosition) -> Option<&str> {
        let text = match position {
            ScalePosition::VeryLow => &self.impact_1,
            ScalePosition::Low => &self.impact_2,
            ScalePosition::Medium => &self.impact_3,
            ScalePosition::High => &self.impact_4,
            ScalePosition::Extreme => &self.impact_5,
        };
        text.as_deref()
    }

    /// Stored definition text for a likelihood scale step.
    pub fn likelihood_definition(&self, position: ScalePosition) -> Option<&str> {
        let text = match position {
            ScalePosition::VeryLow => &self.likelihood_1,
            ScalePosition::Low => &self.likelihood_2,
            ScalePosition::Medium => &self.likelihood_3,
            ScalePosition::High => &self.likelihood_4,
            ScalePosition::Extreme => &self.likelihood_5,
        };
        text.as_deref()
    }

    /// Definition text for a 1-based axis rating, resolved through the
    /// record's scale window (a 3x3 matrix stores its lowest step in the
    /// position-2 fields).
    pub fn rating_definition(&self, axis: RatingAxis, rating: u8) -> Option<&str> {
        let position = self.size().ok()?.scale_position(rating)?;
        match axis {
            RatingAxis::Impact => self.impact_definition(position),
            RatingAxis::Likelihood => self.likelihood_definition(position),
        }
    }

    /// Scale steps inside this record's window that lack a definition.
    /// Absent and empty texts both count as missing.
    pub fn missing_definitions(&self) -> Result<Vec<(RatingAxis, ScalePosition)>, EngineError> {
        let size = self.size()?;
        let mut missing = Vec::new();
        for &position in size.scale_window() {
            if self.impact_definition(position).map_or(true, str::is_empty) {
                missing.push((RatingAxis::Impact, position));
            }
        }
        for &position in size.scale_window() {
            if self.likelihood_definition(position).map_or(true, str::is_empty) {
                missing.push((RatingAxis::Likelihood, position));
            }
        }
        Ok(missing)
    }
}
