//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;

use crate::adapters::csv_adapter::CsvPriceAdapter;
use crate::adapters::csv_fundamentals::CsvFundamentalsAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{validate_scan_config, ScanConfig};
use crate::domain::error::ScreenerError;
use crate::domain::evaluator::evaluate;
use crate::domain::universe::parse_codes;
use crate::ports::data_port::DataPort;

/// Exit code for a clean run where the candidate did not qualify.
const EXIT_NOT_QUALIFIED: u8 = 10;

#[derive(Parser, Debug)]
#[command(
    name = "reversal-screener",
    about = "Screen equities for downtrend reversals backed by sound fundamentals"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a universe of codes and print the qualifying ones
    Scan {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated code list; defaults to every code with price data
        #[arg(long)]
        codes: Option<String>,
        /// Evaluate as of this date (YYYY-MM-DD) instead of the latest bar
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Evaluate a single candidate and print the verdict with reasons
    Check {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        as_of: Option<String>,
    },
    /// List codes with price history available
    ListCodes {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Scan {
            config,
            codes,
            as_of,
        } => run_scan(&config, codes.as_deref(), as_of.as_deref()),
        Command::Check {
            config,
            code,
            name,
            as_of,
        } => run_check(&config, &code, name.as_deref(), as_of.as_deref()),
        Command::ListCodes { config } => run_list_codes(&config),
    }
}

fn load_scan_config(path: &PathBuf) -> Result<ScanConfig, ExitCode> {
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| {
        let err = ScreenerError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })?;
    validate_scan_config(&adapter).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn parse_as_of(raw: Option<&str>) -> Result<Option<NaiveDate>, ExitCode> {
    match raw {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Some).map_err(|_| {
            eprintln!("error: invalid --as-of {:?}, expected YYYY-MM-DD", s);
            ExitCode::from(2)
        }),
    }
}

fn run_scan(config_path: &PathBuf, codes: Option<&str>, as_of: Option<&str>) -> ExitCode {
    let scan = match load_scan_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let as_of = match parse_as_of(as_of) {
        Ok(d) => d,
        Err(code) => return code,
    };

    let prices = CsvPriceAdapter::new(scan.prices_path.clone());
    let fundamentals = CsvFundamentalsAdapter::new(scan.fundamentals_path.clone());

    let universe = match codes {
        Some(list) => match parse_codes(list) {
            Ok(codes) => codes,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(2);
            }
        },
        None => match prices.list_codes() {
            Ok(codes) => codes,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(&e);
            }
        },
    };

    let mut qualified = 0usize;
    let total = universe.len();
    for code in &universe {
        let series = match prices.load_series(code) {
            Ok(series) => series,
            Err(e) => {
                warn!(code, %e, "skipping code, price data unusable");
                continue;
            }
        };

        let result = evaluate(&fundamentals, code, code, &series, as_of, &scan.thresholds);
        if result.passed {
            println!("{code}");
            qualified += 1;
        }
    }

    eprintln!("{qualified} of {total} codes qualified");
    ExitCode::SUCCESS
}

fn run_check(
    config_path: &PathBuf,
    code: &str,
    name: Option<&str>,
    as_of: Option<&str>,
) -> ExitCode {
    let scan = match load_scan_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let as_of = match parse_as_of(as_of) {
        Ok(d) => d,
        Err(code) => return code,
    };

    let prices = CsvPriceAdapter::new(scan.prices_path.clone());
    let fundamentals = CsvFundamentalsAdapter::new(scan.fundamentals_path.clone());

    let series = match prices.load_series(code) {
        Ok(series) => series,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    let name = name.unwrap_or(code);
    let result = evaluate(&fundamentals, code, name, &series, as_of, &scan.thresholds);
    if result.passed {
        println!("{code} {name}: buy candidate");
        ExitCode::SUCCESS
    } else {
        println!("{code} {name}: does not qualify");
        for reason in &result.reasons {
            println!("  - {reason}");
        }
        ExitCode::from(EXIT_NOT_QUALIFIED)
    }
}

fn run_list_codes(config_path: &PathBuf) -> ExitCode {
    let scan = match load_scan_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let prices = CsvPriceAdapter::new(scan.prices_path);
    match prices.list_codes() {
        Ok(codes) => {
            for code in codes {
                println!("{code}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}
