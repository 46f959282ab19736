//! Core domain types and logic.

pub mod price;
pub mod moving_average;
pub mod trend_reversal;
pub mod fundamentals;
pub mod evaluator;
pub mod universe;
pub mod config_validation;
pub mod error;
