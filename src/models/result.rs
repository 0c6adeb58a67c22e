//! Analysis result records and the ratings extracted from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::EngineError;

/// Result lifecycle status. Wire codes: 1 Completed, 2 Failed, 3 Removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    Completed,
    Failed,
    Removed,
}

impl ResultStatus {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Completed),
            2 => Some(Self::Failed),
            3 => Some(Self::Removed),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Completed => 1,
            Self::Failed => 2,
            Self::Removed => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Removed => "Removed",
        }
    }
}

/// One impact/likelihood coordinate pair. Zero on either axis means the
/// analyst left it unrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingPair {
    pub impact: u8,
    pub likelihood: u8,
}

impl RatingPair {
    pub fn new(impact: u8, likelihood: u8) -> Self {
        Self { impact, likelihood }
    }

    /// Whether both axes carry a rating.
    pub fn is_rated(&self) -> bool {
        self.impact != 0 && self.likelihood != 0
    }
}

/// Ratings lifted out of one vulnerability, keyed by its 1-based position
/// in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatedItem {
    pub ordinal: usize,
    pub current: RatingPair,
    pub residual: RatingPair,
}

/// A mitigating control attached to a vulnerability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Control {
    pub name: Option<String>,
    pub description: Option<String>,
    pub nist: Option<String>,
    pub iso: Option<String>,
}

/// One vulnerability inside a result's content block.
///
/// `impact`/`likelihood` rate the finding as-is; `new_impact`/
/// `new_likelihood` rate it with the listed controls applied.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Vulnerability {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cve: Option<Vec<String>>,
    pub mitre: Option<Vec<String>>,
    #[validate(range(min = 0, max = 5))]
    pub impact: Option<u8>,
    #[validate(range(min = 0, max = 5))]
    pub likelihood: Option<u8>,
    #[validate(range(min = 0, max = 5))]
    pub new_impact: Option<u8>,
    #[validate(range(min = 0, max = 5))]
    pub new_likelihood: Option<u8>,
    pub control: Option<Vec<Control>>,
}

impl Vulnerability {
    /// Current (pre-control) rating pair, zero where unrated.
    pub fn current(&self) -> RatingPair {
        RatingPair::new(self.impact.unwrap_or(0), self.likelihood.unwrap_or(0))
    }

    /// Residual (post-control) rating pair, zero where unrated.
    pub fn residual(&self) -> RatingPair {
        RatingPair::new(
            self.new_impact.unwrap_or(0),
            self.new_likelihood.unwrap_or(0),
        )
    }

    /// Display name, falling back to the 1-based position when the
    /// analyst left the name blank.
    pub fn display_name(&self, ordinal: usize) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Vulnerability {ordinal}"),
        }
    }

    fn rated_item(&self, ordinal: usize) -> RatedItem {
        RatedItem {
            ordinal,
            current: self.current(),
            residual: self.residual(),
        }
    }
}

/// Payload body produced by an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResultContent {
    #[validate(range(min = 1, max = 2))]
    pub success: Option<u8>,
    #[validate(nested)]
    pub vulnerability: Option<Vec<Vulnerability>>,
    pub summary: Option<String>,
    pub message: Option<String>,
}

/// Raw result record as served by the REST API.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResultRecord {
    pub result_id: String,
    pub user_id: Option<String>,
    #[validate(required, range(min = 1, max = 3))]
    pub status: Option<u8>,
    pub assessment_id: Option<String>,
    #[validate(nested)]
    pub content: Option<ResultContent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResultRecord {
    /// Decode a raw result payload and check its field bounds.
    pub fn from_json(data: &[u8]) -> Result<Self, EngineError> {
        let record: Self = serde_json::from_slice(data).map_err(|e| {
            tracing::warn!(error = %e, "rejected malformed result payload");
            EngineError::from(e)
        })?;
        record.check()?;
        Ok(record)
    }

    /// Check field bounds, reporting violations as `InvalidRecord`.
    pub fn check(&self) -> Result<(), EngineError> {
        self.validate().map_err(|e| {
            tracing::warn!(result_id = %self.result_id, error = %e, "result record failed validation");
            EngineError::InvalidRecord(e.to_string())
        })
    }

    /// Lifecycle status, `None` when the code is missing or unknown.
    pub fn status(&self) -> Option<ResultStatus> {
        ResultStatus::from_code(self.status.unwrap_or(0))
    }

    /// Vulnerabilities in content order, empty when the run produced none.
    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        self.content
            .as_ref()
            .and_then(|c| c.vulnerability.as_deref())
            .unwrap_or(&[])
    }

    /// Rating pairs for every vulnerability, with 1-based ordinals.
    pub fn rated_items(&self) -> Vec<RatedItem> {
        self.vulnerabilities()
            .iter()
            .enumerate()
            .map(|(i, v)| v.rated_item(i + 1))
            .collect()
    }

    /// Analysis summary text, if the run produced one.
    pub fn summary(&self) -> Option<&str> {
        self.content.as_ref().and_then(|c| c.summary.as_deref())
    }

    /// Failure message text, if the run produced one.
    pub fn message(&self) -> Option<&str> {
        self.content.as_ref().and_then(|c| c.message.as_deref())
    }
}
