//! Assessment records: the analysis request a result answers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::EngineError;

/// Assessment lifecycle status. Wire codes: 1 Active, 2 Inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentStatus {
    Active,
    Inactive,
}

impl AssessmentStatus {
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

/// Raw assessment record as served by the REST API.
///
/// The situation, assets, threats and constraint describe what was
/// assessed; the matrix id names the grid its results are read against.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssessmentRecord {
    pub assessment_id: String,
    pub user_id: Option<String>,
    #[validate(required, length(min = 2, max = 100))]
    pub name: Option<String>,
    #[validate(required, range(min = 1, max = 2))]
    pub status: Option<u8>,
    pub matrix_id: Option<String>,
    pub organization_id: Option<String>,
    #[validate(required)]
    pub situation: Option<String>,
    pub asset: Option<Vec<String>>,
    pub threat: Option<Vec<String>>,
    pub constraint: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssessmentRecord {
    /// Decode a raw assessment payload and check its field bounds.
    pub fn from_json(data: &[u8]) -> Result<Self, EngineError> {
        let record: Self = serde_json::from_slice(data).map_err(|e| {
            tracing::warn!(error = %e, "rejected malformed assessment payload");
            EngineError::from(e)
        })?;
        record.check()?;
        Ok(record)
    }

    /// Check field bounds, reporting violations as `InvalidRecord`.
    pub fn check(&self) -> Result<(), EngineError> {
        self.validate().map_err(|e| {
            tracing::warn!(assessment_id = %self.assessment_id, error = %e, "assessment record failed validation");
            EngineError::InvalidRecord(e.to_string())
        })
    }

    /// Lifecycle status, `None` when the code is missing or unknown.
    pub fn status(&self) -> Option<AssessmentStatus> {
        AssessmentStatus::from_code(self.status.unwrap_or(0))
    }
}
