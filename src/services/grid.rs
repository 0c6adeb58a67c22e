//! Grid geometry: axis labels, cell placement and the occupancy plot.
//!
//! The grid renders with likelihood descending down the rows, so row 0
//! is the top (highest likelihood) and column 0 the lowest impact.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::matrix::MatrixSize;
use crate::models::result::{RatedItem, RatingPair};

/// Axis headers for one grid, in render order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisLabels {
    /// Left to right, ascending impact.
    pub impact: Vec<&'static str>,
    /// Top to bottom, descending likelihood.
    pub likelihood: Vec<&'static str>,
}

/// Axis headers for a grid size, drawn from its severity-scale window.
pub fn axis_labels(size: MatrixSize) -> AxisLabels {
    let window = size.scale_window();
    AxisLabels {
        impact: window.iter().map(|p| p.label()).collect(),
        likelihood: window.iter().rev().map(|p| p.label()).collect(),
    }
}

/// Zero-based row for a 1-based likelihood rating, `None` off the grid.
pub fn likelihood_row(size: MatrixSize, likelihood: u8) -> Option<u8> {
    if size.contains(likelihood) {
        Some(size.side() - likelihood)
    } else {
        None
    }
}

/// Zero-based column for a 1-based impact rating, `None` off the grid.
pub fn impact_column(size: MatrixSize, impact: u8) -> Option<u8> {
    if size.contains(impact) {
        Some(impact - 1)
    } else {
        None
    }
}

/// A zero-based (row, column) grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct CellPosition {
    pub row: u8,
    pub col: u8,
}

/// Grid position for a rating pair, `None` when either axis is unrated
/// or off the grid.
pub fn cell_position(size: MatrixSize, pair: RatingPair) -> Option<CellPosition> {
    let row = likelihood_row(size, pair.likelihood)?;
    let col = impact_column(size, pair.impact)?;
    Some(CellPosition { row, col })
}

/// One occupied plot cell with the 1-based ordinals of the
/// vulnerabilities pinned there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlotCell {
    pub row: u8,
    pub col: u8,
    pub current: Vec<usize>,
    pub residual: Vec<usize>,
}

impl PlotCell {
    fn new(position: CellPosition) -> Self {
        Self {
            row: position.row,
            col: position.col,
            current: Vec::new(),
            residual: Vec::new(),
        }
    }
}

/// Occupancy plot of a result over its matrix grid.
///
/// Only occupied cells are kept, in row-major order. Items whose pair
/// is unrated or lies off this grid are silently left out, matching a
/// result rated against a different matrix size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixPlot {
    size: MatrixSize,
    cells: Vec<PlotCell>,
}

impl MatrixPlot {
    /// Pin each item's current and residual pair onto the grid.
    pub fn from_items(size: MatrixSize, items: &[RatedItem]) -> Self {
        let mut occupied: BTreeMap<CellPosition, PlotCell> = BTreeMap::new();
        for item in items {
            if let Some(position) = cell_position(size, item.current) {
                occupied
                    .entry(position)
                    .or_insert_with(|| PlotCell::new(position))
                    .current
                    .push(item.ordinal);
            }
            if let Some(position) = cell_position(size, item.residual) {
                occupied
                    .entry(position)
                    .or_insert_with(|| PlotCell::new(position))
                    .residual
                    .push(item.ordinal);
            }
        }
        Self {
            size,
            cells: occupied.into_values().collect(),
        }
    }

    pub fn size(&self) -> MatrixSize {
        self.size
    }

    /// Occupied cells in row-major order.
    pub fn cells(&self) -> &[PlotCell] {
        &self.cells
    }

    /// The occupied cell at a grid position, if any.
    pub fn cell(&self, row: u8, col: u8) -> Option<&PlotCell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(ordinal: usize, current: RatingPair, residual: RatingPair) -> RatedItem {
        RatedItem {
            ordinal,
            current,
            residual,
        }
    }

    #[test]
    fn labels_follow_the_scale_window() {
        let labels = axis_labels(MatrixSize::Size3);
        assert_eq!(labels.impact, vec!["Low", "Medium", "High"]);
        assert_eq!(labels.likelihood, vec!["High", "Medium", "Low"]);

        let labels = axis_labels(MatrixSize::Size4);
        assert_eq!(labels.impact, vec!["Low", "Medium", "High", "Extreme"]);
        assert_eq!(labels.likelihood, vec!["Extreme", "High", "Medium", "Low"]);

        let labels = axis_labels(MatrixSize::Size5);
        assert_eq!(
            labels.impact,
            vec!["Very Low", "Low", "Medium", "High", "Extreme"]
        );
        assert_eq!(
            labels.likelihood,
            vec!["Extreme", "High", "Medium", "Low", "Very Low"]
        );
    }

    #[test]
    fn highest_likelihood_is_the_top_row() {
        assert_eq!(likelihood_row(MatrixSize::Size5, 5), Some(0));
        assert_eq!(likelihood_row(MatrixSize::Size5, 1), Some(4));
        assert_eq!(likelihood_row(MatrixSize::Size3, 3), Some(0));
        assert_eq!(likelihood_row(MatrixSize::Size3, 1), Some(2));
    }

    #[test]
    fn off_grid_rows_and_columns() {
        assert_eq!(likelihood_row(MatrixSize::Size3, 0), None);
        assert_eq!(likelihood_row(MatrixSize::Size3, 4), None);
        assert_eq!(impact_column(MatrixSize::Size4, 0), None);
        assert_eq!(impact_column(MatrixSize::Size4, 5), None);
    }

    #[test]
    fn columns_ascend_with_impact() {
        assert_eq!(impact_column(MatrixSize::Size5, 1), Some(0));
        assert_eq!(impact_column(MatrixSize::Size5, 5), Some(4));
    }

    #[test]
    fn cell_position_combines_both_axes() {
        assert_eq!(
            cell_position(MatrixSize::Size5, RatingPair::new(3, 4)),
            Some(CellPosition { row: 1, col: 2 })
        );
        assert_eq!(cell_position(MatrixSize::Size5, RatingPair::new(0, 4)), None);
        assert_eq!(cell_position(MatrixSize::Size5, RatingPair::new(3, 0)), None);
        assert_eq!(cell_position(MatrixSize::Size3, RatingPair::new(4, 2)), None);
    }

    #[test]
    fn plot_pins_current_and_residual_separately() {
        let items = [item(1, RatingPair::new(5, 4), RatingPair::new(2, 1))];
        let plot = MatrixPlot::from_items(MatrixSize::Size5, &items);
        assert_eq!(plot.cells().len(), 2);

        let current = plot.cell(1, 4).unwrap();
        assert_eq!(current.current, vec![1]);
        assert!(current.residual.is_empty());

        let residual = plot.cell(4, 1).unwrap();
        assert!(residual.current.is_empty());
        assert_eq!(residual.residual, vec![1]);
    }

    #[test]
    fn plot_accumulates_shared_cells_in_order() {
        let items = [
            item(1, RatingPair::new(3, 3), RatingPair::new(1, 1)),
            item(2, RatingPair::new(3, 3), RatingPair::new(3, 3)),
            item(3, RatingPair::new(3, 3), RatingPair::new(0, 0)),
        ];
        let plot = MatrixPlot::from_items(MatrixSize::Size5, &items);
        let shared = plot.cell(2, 2).unwrap();
        assert_eq!(shared.current, vec![1, 2, 3]);
        assert_eq!(shared.residual, vec![2]);
    }

    #[test]
    fn plot_drops_unrated_and_off_grid_items() {
        let items = [
            item(1, RatingPair::new(0, 0), RatingPair::new(0, 0)),
            // rated on the severity scale but off a 3x3 grid
            item(2, RatingPair::new(4, 2), RatingPair::new(0, 0)),
            item(3, RatingPair::new(2, 2), RatingPair::new(0, 0)),
        ];
        let plot = MatrixPlot::from_items(MatrixSize::Size3, &items);
        assert_eq!(plot.cells().len(), 1);
        assert_eq!(plot.cell(1, 1).unwrap().current, vec![3]);
    }

    #[test]
    fn plot_cells_sorted_row_major() {
        let items = [
            item(1, RatingPair::new(1, 1), RatingPair::new(0, 0)),
            item(2, RatingPair::new(5, 5), RatingPair::new(0, 0)),
            item(3, RatingPair::new(1, 5), RatingPair::new(0, 0)),
        ];
        let plot = MatrixPlot::from_items(MatrixSize::Size5, &items);
        let order: Vec<(u8, u8)> = plot.cells().iter().map(|c| (c.row, c.col)).collect();
        assert_eq!(order, vec![(0, 0), (0, 4), (4, 0)]);
    }

    #[test]
    fn empty_plot_for_unrated_result() {
        let plot = MatrixPlot::from_items(MatrixSize::Size4, &[]);
        assert!(plot.is_empty());
        assert_eq!(plot.size(), MatrixSize::Size4);
    }
}
