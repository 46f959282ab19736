//! CSV price-history adapter.
//!
//! One file per code, `CODE.csv`, columns date,open,high,low,close,volume.
//! Open/high/low may be blank; the screens only read close and volume.

use crate::domain::error::ScreenerError;
use crate::domain::price::{PriceBar, PriceSeries};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, code: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", code))
    }
}

fn optional_field(record: &csv::StringRecord, index: usize) -> Result<Option<f64>, ScreenerError> {
    match record.get(index) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| ScreenerError::DataFile {
                reason: format!("invalid value in column {}: {}", index, e),
            }),
    }
}

impl DataPort for CsvPriceAdapter {
    fn load_series(&self, code: &str) -> Result<PriceSeries, ScreenerError> {
        let path = self.csv_path(code);
        let content = fs::read_to_string(&path).map_err(|e| ScreenerError::DataFile {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| ScreenerError::DataFile {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = record.get(0).ok_or_else(|| ScreenerError::DataFile {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                ScreenerError::DataFile {
                    reason: format!("invalid date {:?}: {}", date_str, e),
                }
            })?;

            let open = optional_field(&record, 1)?;
            let high = optional_field(&record, 2)?;
            let low = optional_field(&record, 3)?;

            let close: f64 = record
                .get(4)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ScreenerError::DataFile {
                    reason: "missing close column".into(),
                })?
                .parse()
                .map_err(|e| ScreenerError::DataFile {
                    reason: format!("invalid close value: {}", e),
                })?;

            let volume: i64 = record
                .get(5)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ScreenerError::DataFile {
                    reason: "missing volume column".into(),
                })?
                .parse()
                .map_err(|e| ScreenerError::DataFile {
                    reason: format!("invalid volume value: {}", e),
                })?;

            bars.push(PriceBar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        bars.sort_by_key(|b| b.date);
        PriceSeries::new(code, bars)
    }

    fn list_codes(&self) -> Result<Vec<String>, ScreenerError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| ScreenerError::DataFile {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut codes = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ScreenerError::DataFile {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(code) = name_str.strip_suffix(".csv") {
                // Fundamentals files live next door with underscored names.
                if !code.contains('_') {
                    codes.push(code.to_string());
                }
            }
        }

        codes.sort();
        Ok(codes)
    }
}
