//! Price-history access port trait.

use crate::domain::error::ScreenerError;
use crate::domain::price::PriceSeries;

pub trait DataPort {
    /// Load the full daily history for one code, ordered ascending by date.
    fn load_series(&self, code: &str) -> Result<PriceSeries, ScreenerError>;

    /// Codes with price history available in this source.
    fn list_codes(&self) -> Result<Vec<String>, ScreenerError>;
}
