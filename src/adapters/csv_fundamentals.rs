//! Offline fundamentals adapter backed by per-code CSV files.
//!
//! Expected files under the base path:
//! - `CODE_indicators.csv` — header roe_pct,debt_to_asset_pct, one data row,
//!   blank cells for unknown fields
//! - `CODE_profits.csv` — header net_profit, rows most recent first
//! - `CODE_dividends.csv` — header year,amount_paid
//! - `CODE_quotes.csv` — header price, one data row (optional file)
//!
//! Missing files map to [`FetchError::NotFound`], parse problems to
//! [`FetchError::Malformed`], so screens can tell "no data" from "bad data".

use crate::domain::error::FetchError;
use crate::ports::fundamentals_port::{DividendRecord, FinancialIndicators, FundamentalsPort};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct CsvFundamentalsAdapter {
    base_path: PathBuf,
}

impl CsvFundamentalsAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn read_file(&self, code: &str, suffix: &str) -> Result<String, FetchError> {
        let path = self.base_path.join(format!("{}_{}.csv", code, suffix));
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchError::NotFound { code: code.into() },
            _ => FetchError::Unavailable {
                reason: format!("failed to read {}: {}", path.display(), e),
            },
        })
    }
}

fn parse_optional(raw: Option<&str>) -> Result<Option<f64>, FetchError> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(|e| FetchError::Malformed {
            reason: format!("invalid number {:?}: {}", s, e),
        }),
    }
}

impl FundamentalsPort for CsvFundamentalsAdapter {
    fn financial_indicators(&self, code: &str) -> Result<FinancialIndicators, FetchError> {
        let content = self.read_file(code, "indicators")?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());

        let record = rdr
            .records()
            .next()
            .ok_or_else(|| FetchError::Malformed {
                reason: "indicators file has no data row".into(),
            })?
            .map_err(|e| FetchError::Malformed {
                reason: format!("CSV parse error: {}", e),
            })?;

        Ok(FinancialIndicators {
            roe_pct: parse_optional(record.get(0))?,
            debt_to_asset_pct: parse_optional(record.get(1))?,
        })
    }

    fn quarterly_profits(&self, code: &str) -> Result<Vec<f64>, FetchError> {
        let content = self.read_file(code, "profits")?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut profits = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| FetchError::Malformed {
                reason: format!("CSV parse error: {}", e),
            })?;
            let raw = record.get(0).ok_or_else(|| FetchError::Malformed {
                reason: "missing net_profit column".into(),
            })?;
            let value: f64 = raw.parse().map_err(|e| FetchError::Malformed {
                reason: format!("invalid net_profit {:?}: {}", raw, e),
            })?;
            profits.push(value);
        }

        Ok(profits)
    }

    fn dividend_history(&self, code: &str) -> Result<Vec<DividendRecord>, FetchError> {
        let content = self.read_file(code, "dividends")?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut records = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| FetchError::Malformed {
                reason: format!("CSV parse error: {}", e),
            })?;
            let year: i32 = record
                .get(0)
                .ok_or_else(|| FetchError::Malformed {
                    reason: "missing year column".into(),
                })?
                .parse()
                .map_err(|e| FetchError::Malformed {
                    reason: format!("invalid year: {}", e),
                })?;
            let amount_paid: f64 = record
                .get(1)
                .ok_or_else(|| FetchError::Malformed {
                    reason: "missing amount_paid column".into(),
                })?
                .parse()
                .map_err(|e| FetchError::Malformed {
                    reason: format!("invalid amount_paid: {}", e),
                })?;
            records.push(DividendRecord { year, amount_paid });
        }

        Ok(records)
    }

    fn latest_quote(&self, code: &str) -> Option<f64> {
        let content = self.read_file(code, "quotes").ok()?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let record = rdr.records().next()?.ok()?;
        record.get(0)?.parse().ok()
    }
}
