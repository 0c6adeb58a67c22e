//! Result report assembly.
//!
//! Joins a matrix record, its assessment context and one result record
//! into a serializable view model: per-vulnerability label/color rows,
//! the scored distribution with its headline fold, axis labels and the
//! occupancy plot.

use serde::Serialize;

use crate::errors::EngineError;
use crate::models::assessment::AssessmentRecord;
use crate::models::matrix::{MatrixRecord, MatrixSize};
use crate::models::result::{RatingPair, ResultRecord, ResultStatus};
use crate::models::risk::RiskTag;
use crate::services::grid::{axis_labels, AxisLabels, MatrixPlot};
use crate::services::scoring::{distribution, score, RiskBreakdown, RiskDistribution};

/// Impact, likelihood and scored rating for one pair, each as a
/// label/color tag. Unrated axes and unscorable pairs read "Unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskTriple {
    pub impact: RiskTag,
    pub likelihood: RiskTag,
    pub rating: RiskTag,
}

impl RiskTriple {
    fn resolve(size: MatrixSize, pair: RatingPair) -> Self {
        let rating = match score(size, pair) {
            Some(level) => RiskTag::for_level(level),
            None => RiskTag::unknown(),
        };
        Self {
            impact: RiskTag::for_rank(pair.impact),
            likelihood: RiskTag::for_rank(pair.likelihood),
            rating,
        }
    }
}

/// One vulnerability line of the report summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VulnerabilityRow {
    pub ordinal: usize,
    pub name: String,
    pub current: RiskTriple,
    pub residual: RiskTriple,
}

/// Assembled report for one result.
///
/// Completed results carry rows, distribution, plot and summary; failed
/// and removed results carry only the run's message. Matrix context
/// (size and axis labels) is present either way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultReport {
    pub result_id: String,
    pub status: ResultStatus,
    pub matrix_name: Option<String>,
    pub assessment_name: Option<String>,
    pub size: MatrixSize,
    pub summary: Option<String>,
    pub message: Option<String>,
    pub rows: Vec<VulnerabilityRow>,
    pub distribution: RiskDistribution,
    pub breakdown: RiskBreakdown,
    pub axes: AxisLabels,
    pub plot: MatrixPlot,
}

/// Assemble the report for one result against its matrix.
///
/// Fails when the matrix size code is unsupported or the result has no
/// recognized status; everything else degrades per field ("Unknown"
/// tags, dropped plot markers) instead of failing the whole report.
pub fn build(
    matrix: &MatrixRecord,
    assessment: Option<&AssessmentRecord>,
    result: &ResultRecord,
) -> Result<ResultReport, EngineError> {
    let size = matrix.size()?;
    let status = result.status().ok_or_else(|| {
        EngineError::InvalidRecord(format!(
            "result {} has no recognized status",
            result.result_id
        ))
    })?;

    let (rows, dist, plot, summary, message) = match status {
        ResultStatus::Completed => {
            let items = result.rated_items();
            (
                vulnerability_rows(size, result),
                distribution(size, &items),
                MatrixPlot::from_items(size, &items),
                result.summary().map(str::to_string),
                None,
            )
        }
        ResultStatus::Failed | ResultStatus::Removed => (
            Vec::new(),
            RiskDistribution::default(),
            MatrixPlot::from_items(size, &[]),
            None,
            result.message().map(str::to_string),
        ),
    };

    tracing::debug!(
        result_id = %result.result_id,
        status = status.label(),
        rows = rows.len(),
        "assembled result report"
    );

    Ok(ResultReport {
        result_id: result.result_id.clone(),
        status,
        matrix_name: matrix.name.clone(),
        assessment_name: assessment.and_then(|a| a.name.clone()),
        size,
        summary,
        message,
        breakdown: dist.breakdown(),
        distribution: dist,
        rows,
        axes: axis_labels(size),
        plot,
    })
}

fn vulnerability_rows(size: MatrixSize, result: &ResultRecord) -> Vec<VulnerabilityRow> {
    result
        .vulnerabilities()
        .iter()
        .enumerate()
        .map(|(i, vuln)| {
            let ordinal = i + 1;
            VulnerabilityRow {
                ordinal,
                name: vuln.display_name(ordinal),
                current: RiskTriple::resolve(size, vuln.current()),
                residual: RiskTriple::resolve(size, vuln.residual()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::result::{ResultContent, Vulnerability};
    use crate::models::risk::{RiskLevel, UNKNOWN_LABEL};

    fn matrix(type_code: u8) -> MatrixRecord {
        MatrixRecord {
            matrix_id: "mtx_001".to_string(),
            user_id: None,
            name: Some("Perimeter matrix".to_string()),
            status: Some(1),
            type_code: Some(type_code),
            description: None,
            impact_1: None,
            impact_2: None,
            impact_3: None,
            impact_4: None,
            impact_5: None,
            likelihood_1: None,
            likelihood_2: None,
            likelihood_3: None,
            likelihood_4: None,
            likelihood_5: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn assessment() -> AssessmentRecord {
        AssessmentRecord {
            assessment_id: "ass_001".to_string(),
            user_id: None,
            name: Some("Q1 review".to_string()),
            status: Some(1),
            matrix_id: Some("mtx_001".to_string()),
            organization_id: None,
            situation: Some("external surface".to_string()),
            asset: None,
            threat: None,
            constraint: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn vuln(name: Option<&str>, pairs: [u8; 4]) -> Vulnerability {
        Vulnerability {
            name: name.map(str::to_string),
            description: None,
            cve: None,
            mitre: None,
            impact: Some(pairs[0]),
            likelihood: Some(pairs[1]),
            new_impact: Some(pairs[2]),
            new_likelihood: Some(pairs[3]),
            control: None,
        }
    }

    fn result(status: u8, content: Option<ResultContent>) -> ResultRecord {
        ResultRecord {
            result_id: "res_001".to_string(),
            user_id: None,
            status: Some(status),
            assessment_id: Some("ass_001".to_string()),
            content,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn completed(vulns: Vec<Vulnerability>) -> ResultRecord {
        result(
            1,
            Some(ResultContent {
                success: Some(1),
                vulnerability: Some(vulns),
                summary: Some("Two exposures found".to_string()),
                message: None,
            }),
        )
    }

    #[test]
    fn completed_report_carries_rows_and_plot() {
        let record = completed(vec![
            vuln(Some("Stale TLS cert"), [5, 5, 2, 1]),
            vuln(None, [3, 3, 0, 0]),
        ]);
        let report = build(&matrix(3), Some(&assessment()), &record).unwrap();

        assert_eq!(report.size, MatrixSize::Size5);
        assert_eq!(report.status, ResultStatus::Completed);
        assert_eq!(report.matrix_name.as_deref(), Some("Perimeter matrix"));
        assert_eq!(report.assessment_name.as_deref(), Some("Q1 review"));
        assert_eq!(report.summary.as_deref(), Some("Two exposures found"));
        assert_eq!(report.message, None);

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].name, "Stale TLS cert");
        assert_eq!(report.rows[1].name, "Vulnerability 2");
        assert_eq!(
            report.rows[0].current.rating,
            RiskTag::for_level(RiskLevel::Critical)
        );
        assert_eq!(
            report.rows[0].residual.rating,
            RiskTag::for_level(RiskLevel::VeryLow)
        );
        assert_eq!(report.rows[1].residual.rating.label, UNKNOWN_LABEL);

        assert_eq!(report.distribution.total(), 2);
        assert_eq!(report.breakdown.high, 1);
        assert_eq!(report.breakdown.medium, 1);
        assert_eq!(report.axes.impact.len(), 5);
        assert!(!report.plot.is_empty());
        assert_eq!(report.plot.cell(0, 4).unwrap().current, vec![1]);
    }

    #[test]
    fn unrated_axes_read_unknown() {
        let record = completed(vec![vuln(Some("Unrated finding"), [0, 3, 0, 0])]);
        let report = build(&matrix(3), None, &record).unwrap();
        let row = &report.rows[0];
        assert_eq!(row.current.impact.label, UNKNOWN_LABEL);
        assert_eq!(row.current.likelihood.label, "Medium");
        assert_eq!(row.current.rating.label, UNKNOWN_LABEL);
        assert_eq!(report.distribution.total(), 0);
        assert!(report.plot.is_empty());
    }

    #[test]
    fn smaller_grid_uses_shifted_scale_for_ratings() {
        // On a 3x3 matrix a (2,2) pair scores Low even though the lowest
        // grid cell paints Medium on the cell bands.
        let record = completed(vec![vuln(Some("Edge case"), [2, 2, 0, 0])]);
        let report = build(&matrix(1), None, &record).unwrap();
        assert_eq!(report.size, MatrixSize::Size3);
        assert_eq!(
            report.rows[0].current.rating,
            RiskTag::for_level(RiskLevel::Low)
        );
        // Scale value 2 still pins to grid cell (1,1) = bottom row, left.
        assert_eq!(report.plot.cell(1, 1).unwrap().current, vec![1]);
    }

    #[test]
    fn failed_report_carries_only_the_message() {
        let record = result(
            2,
            Some(ResultContent {
                success: Some(2),
                vulnerability: None,
                summary: None,
                message: Some("Analysis timed out".to_string()),
            }),
        );
        let report = build(&matrix(2), Some(&assessment()), &record).unwrap();
        assert_eq!(report.status, ResultStatus::Failed);
        assert_eq!(report.message.as_deref(), Some("Analysis timed out"));
        assert!(report.rows.is_empty());
        assert_eq!(report.distribution.total(), 0);
        assert!(report.plot.is_empty());
        // matrix context still present for the header
        assert_eq!(report.size, MatrixSize::Size4);
        assert_eq!(report.axes.impact.len(), 4);
    }

    #[test]
    fn removed_report_carries_no_rows() {
        let record = result(3, None);
        let report = build(&matrix(3), None, &record).unwrap();
        assert_eq!(report.status, ResultStatus::Removed);
        assert!(report.rows.is_empty());
        assert_eq!(report.message, None);
    }

    #[test]
    fn missing_status_is_rejected() {
        let mut record = result(1, None);
        record.status = None;
        let err = build(&matrix(3), None, &record).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRecord(_)));
        assert!(err.to_string().contains("res_001"));
    }

    #[test]
    fn unsupported_matrix_size_is_rejected() {
        let mut bad = matrix(3);
        bad.type_code = Some(9);
        let err = build(&bad, None, &completed(vec![])).unwrap_err();
        assert!(err.is_invalid_size());
    }

    #[test]
    fn report_serializes_to_json() {
        let record = completed(vec![vuln(Some("Stale TLS cert"), [5, 5, 2, 1])]);
        let report = build(&matrix(3), Some(&assessment()), &record).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "Completed");
        assert_eq!(json["rows"][0]["current"]["rating"]["label"], "Critical");
        assert_eq!(
            json["rows"][0]["current"]["rating"]["color"],
            "bg-red-900/50 text-red-300"
        );
        assert_eq!(json["axes"]["impact"][0], "Very Low");
    }
}
