//! reversal-screener — composite buy-candidate screener for equities.
//!
//! Combines a trend-reversal detector (breakout above the 250-day moving
//! average after a sustained downtrend, confirmed by volume expansion) with
//! fundamental quality filters (ROE, profit trajectory, leverage, dividend
//! yield). Hexagonal architecture: domain logic in [`domain`], port traits
//! in [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
