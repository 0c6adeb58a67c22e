//! Grid cell classification.
//!
//! Maps a 1-based (impact, likelihood) cell to the risk level its matrix
//! paints that cell with. The bands are hand-tuned per size rather than
//! derived from a score formula, so neighbouring sizes disagree on some
//! borderline cells.

use crate::errors::{EngineError, RatingAxis};
use crate::models::matrix::MatrixSize;
use crate::models::risk::RiskLevel;

/// Classify one cell of the risk grid.
///
/// Coordinates are 1-based, impact along the columns and likelihood up
/// the rows. Coordinates off the grid (including the unrated zero) are
/// rejected.
pub fn classify(size: MatrixSize, impact: u8, likelihood: u8) -> Result<RiskLevel, EngineError> {
    check_rating(size, RatingAxis::Impact, impact)?;
    check_rating(size, RatingAxis::Likelihood, likelihood)?;
    let level = match size {
        MatrixSize::Size3 => classify_3x3(impact, likelihood),
        MatrixSize::Size4 => classify_4x4(impact, likelihood),
        MatrixSize::Size5 => classify_5x5(impact, likelihood),
    };
    Ok(level)
}

fn check_rating(size: MatrixSize, axis: RatingAxis, value: u8) -> Result<(), EngineError> {
    if size.contains(value) {
        Ok(())
    } else {
        Err(EngineError::InvalidRating { size, axis, value })
    }
}

fn classify_3x3(impact: u8, likelihood: u8) -> RiskLevel {
    match (impact, likelihood) {
        (1, 1) | (1, 2) | (2, 1) => RiskLevel::Low,
        (1, 3) | (2, 2) | (3, 1) => RiskLevel::Medium,
        (2, 3) | (3, 2) | (3, 3) => RiskLevel::High,
        // unmatched cells read as the middle of the scale
        _ => RiskLevel::Medium,
    }
}

fn classify_4x4(impact: u8, likelihood: u8) -> RiskLevel {
    match (impact, likelihood) {
        (1, 1) | (1, 2) | (2, 1) => RiskLevel::Low,
        (1, 3) | (1, 4) | (2, 2) | (3, 1) | (4, 1) => RiskLevel::Medium,
        (2, 3) | (2, 4) | (3, 2) | (3, 3) | (4, 2) => RiskLevel::High,
        (3, 4) | (4, 3) | (4, 4) => RiskLevel::Critical,
        _ => RiskLevel::Medium,
    }
}

fn classify_5x5(impact: u8, likelihood: u8) -> RiskLevel {
    match (impact, likelihood) {
        (1, 1) | (1, 2) | (2, 1) => RiskLevel::VeryLow,
        (1, 3) | (2, 2) | (3, 1) => RiskLevel::Low,
        (1, 4) | (1, 5) | (2, 3) | (2, 4) | (3, 2) | (3, 3) | (4, 1) | (4, 2) | (5, 1) => {
            RiskLevel::Medium
        }
        (2, 5) | (3, 4) | (3, 5) | (4, 3) | (4, 4) | (5, 2) | (5, 3) => RiskLevel::High,
        (4, 5) | (5, 4) | (5, 5) => RiskLevel::Critical,
        _ => RiskLevel::Medium,
    }
}
