//! Record DTOs and domain types for all engine entities.

pub mod assessment;
pub mod matrix;
pub mod result;
pub mod risk;
