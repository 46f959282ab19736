//! Fundamental data access port trait.

use crate::domain::error::FetchError;

/// Latest financial indicators for one instrument. Fields the provider could
/// not supply are `None`; the screen decides what a gap means.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialIndicators {
    pub roe_pct: Option<f64>,
    pub debt_to_asset_pct: Option<f64>,
}

/// One dividend payout record.
#[derive(Debug, Clone, PartialEq)]
pub struct DividendRecord {
    pub year: i32,
    pub amount_paid: f64,
}

/// External financial-data provider. The core consumes this capability and
/// never talks to a vendor directly; implementations own their own
/// networking, caching, and timeouts.
pub trait FundamentalsPort {
    fn financial_indicators(&self, code: &str) -> Result<FinancialIndicators, FetchError>;

    /// Quarterly net-profit figures, most recent first.
    fn quarterly_profits(&self, code: &str) -> Result<Vec<f64>, FetchError>;

    fn dividend_history(&self, code: &str) -> Result<Vec<DividendRecord>, FetchError>;

    /// Live quote if one is available; callers fall back to the last close.
    fn latest_quote(&self, code: &str) -> Option<f64>;
}
