//! Classification, scoring and reporting services.

pub mod classification;
pub mod grid;
pub mod report;
pub mod scoring;
