//! Integration tests.
//!
//! Cover the evaluation pipeline end to end with a mock fundamentals
//! provider, the short-circuit ordering of the three gates, absorption of
//! provider failures, and the CSV adapters wired together against files on
//! disk.

mod common;

use common::*;
use reversal_screener::adapters::csv_adapter::CsvPriceAdapter;
use reversal_screener::adapters::csv_fundamentals::CsvFundamentalsAdapter;
use reversal_screener::domain::error::FetchError;
use reversal_screener::domain::evaluator::evaluate;
use reversal_screener::domain::fundamentals::ScreenThresholds;
use reversal_screener::domain::trend_reversal;
use reversal_screener::ports::data_port::DataPort;

mod full_pipeline {
    use super::*;

    #[test]
    fn breakout_with_sound_fundamentals_qualifies() {
        // 300 bars with a clean downtrend into a 4-of-5 breakout on doubled
        // volume, plus ROE 15%, debt 10%, improving profits, 4% yield.
        let series = reversal_series("600519");
        let mut closes: Vec<f64> = series.bars().iter().map(|b| b.close).collect();
        closes[296] = 60.0; // one whipsaw bar back under the average
        let volumes: Vec<i64> = series.bars().iter().map(|b| b.volume).collect();
        let series = make_series("600519", &closes, &volumes);

        let provider = MockFundamentals::healthy("600519");
        let result = evaluate(
            &provider,
            "600519",
            "Demo Distillery",
            &series,
            Some(last_bar_date(&series)),
            &ScreenThresholds::default(),
        );

        assert!(result.passed, "reasons: {:?}", result.reasons);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn failing_candidate_reports_exactly_one_reason() {
        let series = reversal_series("600519");
        let provider = MockFundamentals::healthy("600519")
            .with_indicators("600519", Some(5.0), Some(10.0));

        let result = evaluate(
            &provider,
            "600519",
            "Demo Distillery",
            &series,
            Some(last_bar_date(&series)),
            &ScreenThresholds::default(),
        );

        assert!(!result.passed);
        assert_eq!(result.reasons.len(), 1);
        assert!(result.reasons[0].contains("ROE"), "got: {}", result.reasons[0]);
    }

    #[test]
    fn custom_thresholds_are_honored() {
        let series = reversal_series("600519");
        let provider = MockFundamentals::healthy("600519");
        let strict = ScreenThresholds {
            min_roe_pct: 20.0,
            ..ScreenThresholds::default()
        };

        let result = evaluate(
            &provider,
            "600519",
            "Demo Distillery",
            &series,
            Some(last_bar_date(&series)),
            &strict,
        );
        assert!(!result.passed);
    }
}

mod gate_ordering {
    use super::*;

    #[test]
    fn trend_gate_runs_before_fundamentals() {
        // Flat series fails the trend gate; the empty provider would report
        // NotFound if consulted, so the reason must be a trend reason.
        let series = make_series("600519", &vec![100.0; 300], &vec![1000; 300]);
        let provider = MockFundamentals::new();

        let result = evaluate(
            &provider,
            "600519",
            "Demo Distillery",
            &series,
            Some(last_bar_date(&series)),
            &ScreenThresholds::default(),
        );

        assert!(!result.passed);
        assert_eq!(
            result.reasons,
            vec![trend_reversal::RejectReason::NoPriorDowntrend.to_string()]
        );
    }

    #[test]
    fn growth_gate_runs_before_ratios() {
        // Profits are flat-to-falling while dividends are absent; only the
        // growth rejection should surface.
        let series = reversal_series("600519");
        let provider = MockFundamentals::new()
            .with_indicators("600519", Some(15.0), Some(10.0))
            .with_profits("600519", vec![8.0, 2.0, 5.0, 1.0]);

        let result = evaluate(
            &provider,
            "600519",
            "Demo Distillery",
            &series,
            Some(last_bar_date(&series)),
            &ScreenThresholds::default(),
        );

        assert!(!result.passed);
        assert_eq!(result.reasons.len(), 1);
        assert!(
            result.reasons[0].contains("profits"),
            "got: {}",
            result.reasons[0]
        );
    }

    #[test]
    fn insufficient_history_rejects_before_anything_else() {
        let series = make_series("600519", &vec![100.0; 40], &vec![1000; 40]);
        let provider = MockFundamentals::new();

        let result = evaluate(
            &provider,
            "600519",
            "Demo Distillery",
            &series,
            None,
            &ScreenThresholds::default(),
        );

        assert!(!result.passed);
        assert!(result.reasons[0].contains("40 bars"));
    }
}

mod provider_failures {
    use super::*;

    #[test]
    fn indicator_fetch_error_becomes_rejection() {
        let series = reversal_series("600519");
        let provider = MockFundamentals::healthy("600519").with_indicator_error(
            "600519",
            FetchError::Unavailable {
                reason: "connection reset".into(),
            },
        );

        let result = evaluate(
            &provider,
            "600519",
            "Demo Distillery",
            &series,
            Some(last_bar_date(&series)),
            &ScreenThresholds::default(),
        );

        assert!(!result.passed);
        assert!(result.reasons[0].contains("connection reset"));
    }

    #[test]
    fn dividend_fetch_error_becomes_rejection() {
        let series = reversal_series("600519");
        let provider = MockFundamentals::healthy("600519")
            .with_dividend_error("600519", FetchError::NotFound { code: "600519".into() });

        let result = evaluate(
            &provider,
            "600519",
            "Demo Distillery",
            &series,
            Some(last_bar_date(&series)),
            &ScreenThresholds::default(),
        );

        assert!(!result.passed);
        assert_eq!(result.reasons.len(), 1);
    }

    #[test]
    fn unknown_code_rejected_not_crashed() {
        let series = reversal_series("999999");
        let provider = MockFundamentals::new();

        let result = evaluate(
            &provider,
            "999999",
            "Mystery Co",
            &series,
            Some(last_bar_date(&series)),
            &ScreenThresholds::default(),
        );

        assert!(!result.passed);
        assert!(result.reasons[0].contains("999999"));
    }
}

mod csv_pipeline {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_price_csv(dir: &std::path::Path, code: &str, series: &PriceSeries) {
        let mut content = String::from("date,open,high,low,close,volume\n");
        for bar in series.bars() {
            content.push_str(&format!(
                "{},,,,{},{}\n",
                bar.date.format("%Y-%m-%d"),
                bar.close,
                bar.volume
            ));
        }
        fs::write(dir.join(format!("{}.csv", code)), content).unwrap();
    }

    fn write_fundamentals(dir: &std::path::Path, code: &str) {
        fs::write(
            dir.join(format!("{}_indicators.csv", code)),
            "roe_pct,debt_to_asset_pct\n15.0,10.0\n",
        )
        .unwrap();
        fs::write(
            dir.join(format!("{}_profits.csv", code)),
            "net_profit\n-10\n-5\n2\n8\n",
        )
        .unwrap();
        fs::write(
            dir.join(format!("{}_dividends.csv", code)),
            "year,amount_paid\n2023,6.0\n",
        )
        .unwrap();
        fs::write(dir.join(format!("{}_quotes.csv", code)), "price\n150.0\n").unwrap();
    }

    #[test]
    fn adapters_feed_the_evaluator_end_to_end() {
        let dir = TempDir::new().unwrap();
        let path = dir.path();

        let expected = reversal_series("600519");
        write_price_csv(path, "600519", &expected);
        write_fundamentals(path, "600519");

        let prices = CsvPriceAdapter::new(path.to_path_buf());
        let fundamentals = CsvFundamentalsAdapter::new(path.to_path_buf());

        let series = prices.load_series("600519").unwrap();
        assert_eq!(series.len(), expected.len());

        let result = evaluate(
            &fundamentals,
            "600519",
            "Demo Distillery",
            &series,
            Some(last_bar_date(&series)),
            &ScreenThresholds::default(),
        );
        assert!(result.passed, "reasons: {:?}", result.reasons);
    }

    #[test]
    fn missing_fundamentals_files_reject_the_candidate() {
        let dir = TempDir::new().unwrap();
        let path = dir.path();

        let expected = reversal_series("600519");
        write_price_csv(path, "600519", &expected);

        let prices = CsvPriceAdapter::new(path.to_path_buf());
        let fundamentals = CsvFundamentalsAdapter::new(path.to_path_buf());

        let series = prices.load_series("600519").unwrap();
        let result = evaluate(
            &fundamentals,
            "600519",
            "Demo Distillery",
            &series,
            Some(last_bar_date(&series)),
            &ScreenThresholds::default(),
        );
        assert!(!result.passed);
        assert!(result.reasons[0].contains("no fundamental data"));
    }

    #[test]
    fn list_codes_drives_a_scan_universe() {
        let dir = TempDir::new().unwrap();
        let path = dir.path();

        write_price_csv(path, "600519", &reversal_series("600519"));
        write_price_csv(path, "000651", &reversal_series("000651"));
        write_fundamentals(path, "600519");

        let prices = CsvPriceAdapter::new(path.to_path_buf());
        let codes = prices.list_codes().unwrap();
        assert_eq!(codes, vec!["000651", "600519"]);

        let fundamentals = CsvFundamentalsAdapter::new(path.to_path_buf());
        let mut qualified = Vec::new();
        for code in &codes {
            let series = prices.load_series(code).unwrap();
            let result = evaluate(
                &fundamentals,
                code,
                code,
                &series,
                Some(last_bar_date(&series)),
                &ScreenThresholds::default(),
            );
            if result.passed {
                qualified.push(code.clone());
            }
        }
        // 000651 has no fundamentals on disk, so only 600519 qualifies.
        assert_eq!(qualified, vec!["600519"]);
    }
}
