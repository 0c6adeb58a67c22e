//! Vulnerability scoring and result-level distribution.
//!
//! Ratings here are severity-scale positions, not cell coordinates: the
//! smaller grids only use the upper part of the scale, so their lookup
//! blocks start at position 2. On the 5x5 grid scale and cell coincide
//! and scoring agrees with cell classification everywhere; on the
//! smaller grids the two tables differ on borderline inputs. Anything
//! off the block scores as unrated.

use serde::Serialize;

use crate::models::matrix::MatrixSize;
use crate::models::result::{RatedItem, RatingPair};
use crate::models::risk::RiskLevel;

/// Score one rating pair, `None` when either axis is unrated or the
/// pair falls outside the size's scoring block.
pub fn score(size: MatrixSize, pair: RatingPair) -> Option<RiskLevel> {
    if !pair.is_rated() {
        return None;
    }
    let rank = match size {
        MatrixSize::Size3 => score_3x3(pair.impact, pair.likelihood),
        MatrixSize::Size4 => score_4x4(pair.impact, pair.likelihood),
        MatrixSize::Size5 => score_5x5(pair.impact, pair.likelihood),
    };
    RiskLevel::from_rank(rank)
}

fn score_3x3(impact: u8, likelihood: u8) -> u8 {
    match (impact, likelihood) {
        (2, 2) => 2,
        (2, 3) => 2,
        (2, 4) => 3,
        (3, 2) => 2,
        (3, 3) => 3,
        (3, 4) => 4,
        (4, 2) => 3,
        (4, 3) => 4,
        (4, 4) => 4,
        _ => 0,
    }
}

fn score_4x4(impact: u8, likelihood: u8) -> u8 {
    match (impact, likelihood) {
        (2, 2) => 2,
        (2, 3) => 2,
        (2, 4) => 3,
        (2, 5) => 3,
        (3, 2) => 2,
        (3, 3) => 3,
        (3, 4) => 4,
        (3, 5) => 4,
        (4, 2) => 3,
        (4, 3) => 4,
        (4, 4) => 4,
        (4, 5) => 5,
        (5, 2) => 3,
        (5, 3) => 4,
        (5, 4) => 5,
        (5, 5) => 5,
        _ => 0,
    }
}

fn score_5x5(impact: u8, likelihood: u8) -> u8 {
    match (impact, likelihood) {
        (1, 1) => 1,
        (1, 2) => 1,
        (1, 3) => 2,
        (1, 4) => 3,
        (1, 5) => 3,
        (2, 1) => 1,
        (2, 2) => 2,
        (2, 3) => 3,
        (2, 4) => 3,
        (2, 5) => 4,
        (3, 1) => 2,
        (3, 2) => 3,
        (3, 3) => 3,
        (3, 4) => 4,
        (3, 5) => 4,
        (4, 1) => 3,
        (4, 2) => 3,
        (4, 3) => 4,
        (4, 4) => 4,
        (4, 5) => 5,
        (5, 1) => 3,
        (5, 2) => 4,
        (5, 3) => 4,
        (5, 4) => 5,
        (5, 5) => 5,
        _ => 0,
    }
}

/// Per-level counts of scored vulnerabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    counts: [usize; 5],
}

impl RiskDistribution {
    pub fn add(&mut self, level: RiskLevel) {
        self.counts[(level.rank() - 1) as usize] += 1;
    }

    pub fn count(&self, level: RiskLevel) -> usize {
        self.counts[(level.rank() - 1) as usize]
    }

    /// Scored vulnerabilities in total; unrated ones never enter.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Fold the five levels into the three headline buckets.
    pub fn breakdown(&self) -> RiskBreakdown {
        RiskBreakdown {
            low: self.counts[0] + self.counts[1],
            medium: self.counts[2],
            high: self.counts[3] + self.counts[4],
        }
    }
}

/// Three-bucket headline view: Very Low and Low fold into `low`,
/// High and Critical into `high`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskBreakdown {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Score every item's current rating into a distribution. Residual
/// ratings do not count.
pub fn distribution(size: MatrixSize, items: &[RatedItem]) -> RiskDistribution {
    let mut dist = RiskDistribution::default();
    for item in items {
        if let Some(level) = score(size, item.current) {
            dist.add(level);
        }
    }
    tracing::debug!(
        scored = dist.total(),
        items = items.len(),
        "scored result distribution"
    );
    dist
}
