//! Risk matrix classification engine.
//!
//! Pure, deterministic mapping of ordinal impact/likelihood ratings to
//! qualitative risk levels over 3x3, 4x4 and 5x5 grids, plus the derived
//! reporting pieces built on top: per-vulnerability labels, scored
//! distributions, axis labels and grid occupancy plots. No I/O anywhere;
//! records enter as JSON payloads and reports leave as serializable
//! view models.

pub mod errors;
pub mod models;
pub mod services;
