//! Watchlist configuration: parsing, normalization, and the built-in fund
//! sets.
//!
//! A watchlist is a TOML document describing which funds to chart and how:
//!
//! ```toml
//! output_dir = "."
//! page_size = 60
//! margin_ratio = 0.08
//!
//! [[funds]]
//! name = "CSI 300"
//! code = "510310"
//! ```
//!
//! Key behaviors:
//! - Normalization trims names and codes, rejects empty or non-numeric
//!   codes, and de-duplicates funds by code while preserving order.
//! - Two built-in sets mirror the provider's dual code spaces: the
//!   exchange-traded codes ([`Watchlist::primary`]) and the open-end codes
//!   ([`Watchlist::alternative`], the default when no file is given).
//!
//! Entrypoints:
//! - Parse + normalize from a TOML string: [`load_watchlist_str`]
//! - Parse + normalize from a file path: [`load_watchlist_path`]

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, bail};
use nav_ingestor::models::{fund::FundSpec, request_params::DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use toml::from_str;

use crate::chart::axis::DEFAULT_MARGIN_RATIO;

/// The full configuration surface for one charting run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Watchlist {
    /// Funds to fetch and chart, in display order.
    pub funds: Vec<FundSpec>,

    /// Directory the HTML page is written into (created if missing).
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Records requested per fund (newest-first page from the provider).
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Fractional padding applied above/below the value-axis range.
    #[serde(default = "default_margin_ratio")]
    pub margin_ratio: f64,

    /// Chart presentation options.
    #[serde(default)]
    pub chart: ChartStyle,
}

/// Presentation options for the rendered chart.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChartStyle {
    #[serde(default = "default_width_px")]
    pub width_px: u32,
    #[serde(default = "default_height_px")]
    pub height_px: u32,
    /// Chart title, also shown above the legend.
    #[serde(default = "default_title")]
    pub title: String,
    /// Browser tab title of the generated page.
    #[serde(default = "default_title")]
    pub page_title: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_margin_ratio() -> f64 {
    DEFAULT_MARGIN_RATIO
}

fn default_width_px() -> u32 {
    1400
}

fn default_height_px() -> u32 {
    700
}

fn default_title() -> String {
    "Fund NAV History".to_string()
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width_px: default_width_px(),
            height_px: default_height_px(),
            title: default_title(),
            page_title: default_title(),
        }
    }
}

/// The twelve tracked index funds, shared by both built-in code sets.
const FUND_NAMES: [&str; 12] = [
    "CSI 300",
    "CSI 500",
    "CSI Dividend",
    "CSI National Defense",
    "CSI Military Industry",
    "Semiconductor",
    "Robotics",
    "Artificial Intelligence",
    "5G Communications",
    "Cloud Computing",
    "Hang Seng Index",
    "S&P 500",
];

const PRIMARY_CODES: [&str; 12] = [
    "510310", "510500", "515180", "512670", "512660", "159995", "562500", "515980", "515050",
    "516510", "159920", "513500",
];

const ALTERNATIVE_CODES: [&str; 12] = [
    "007339", "070039", "100032", "012041", "002199", "008887", "014881", "008082", "008086",
    "017854", "164705", "050025",
];

impl Watchlist {
    fn from_code_set(codes: &[&str; 12]) -> Self {
        Self {
            funds: FUND_NAMES
                .iter()
                .zip(codes.iter())
                .map(|(name, code)| FundSpec::new(*name, *code))
                .collect(),
            output_dir: default_output_dir(),
            page_size: default_page_size(),
            margin_ratio: default_margin_ratio(),
            chart: ChartStyle::default(),
        }
    }

    /// Built-in watchlist over the exchange-traded fund codes.
    pub fn primary() -> Self {
        Self::from_code_set(&PRIMARY_CODES)
    }

    /// Built-in watchlist over the open-end fund codes. This is the default
    /// when no configuration file is supplied.
    pub fn alternative() -> Self {
        Self::from_code_set(&ALTERNATIVE_CODES)
    }
}

/// Summary of changes performed during normalization.
#[derive(Debug, Default)]
pub struct WatchlistReport {
    /// Number of name/code fields that changed when trimming whitespace.
    pub fields_trimmed: usize,
    /// Count of funds removed as duplicates of an earlier code.
    pub funds_deduped: usize,
}

/// Normalize a watchlist in place.
///
/// - Trim fund names and codes; reject either being empty after trimming
/// - Reject codes containing non-digit characters
/// - De-duplicate funds by code, preserving the first occurrence
/// - Reject a watchlist left with no funds
/// - Validate `page_size >= 1` and `margin_ratio` in `[0, 1)`
pub fn normalize_watchlist(watchlist: &mut Watchlist) -> anyhow::Result<WatchlistReport> {
    let mut report = WatchlistReport::default();

    let mut seen_codes: HashSet<String> = HashSet::new();
    let mut funds = Vec::with_capacity(watchlist.funds.len());

    for mut fund in std::mem::take(&mut watchlist.funds) {
        let name = fund.name.trim();
        let code = fund.code.trim();
        if name.len() != fund.name.len() || code.len() != fund.code.len() {
            report.fields_trimmed += 1;
        }
        if name.is_empty() {
            bail!("fund name cannot be empty after trimming");
        }
        if code.is_empty() {
            bail!("fund code cannot be empty after trimming");
        }
        if !code.chars().all(|c| c.is_ascii_digit()) {
            bail!("fund code must be a numeric string, got '{code}'");
        }
        fund.name = name.to_string();
        fund.code = code.to_string();

        if seen_codes.insert(fund.code.clone()) {
            funds.push(fund);
        } else {
            report.funds_deduped += 1;
        }
    }

    if funds.is_empty() {
        bail!("watchlist contains no funds");
    }
    watchlist.funds = funds;

    if watchlist.page_size == 0 {
        bail!("page_size must be at least 1");
    }
    if !(0.0..1.0).contains(&watchlist.margin_ratio) {
        bail!(
            "margin_ratio must be in [0, 1), got {}",
            watchlist.margin_ratio
        );
    }

    Ok(report)
}

/// Parse and normalize a watchlist from a TOML string.
pub fn load_watchlist_str(toml_str: &str) -> anyhow::Result<Watchlist> {
    let mut watchlist: Watchlist = from_str(toml_str).context("failed to parse watchlist TOML")?;
    let _report = normalize_watchlist(&mut watchlist).context("normalize_watchlist failed")?;
    Ok(watchlist)
}

/// Read a watchlist TOML file from disk, parse, and normalize it.
pub fn load_watchlist_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<Watchlist> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read watchlist file {}", path.as_ref().display()))?;
    load_watchlist_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk() -> Watchlist {
        Watchlist {
            funds: vec![
                FundSpec::new(" CSI 300 ", " 510310 "),
                FundSpec::new("CSI 300 again", "510310"),
                FundSpec::new("CSI 500", "510500"),
            ],
            output_dir: default_output_dir(),
            page_size: 60,
            margin_ratio: 0.08,
            chart: ChartStyle::default(),
        }
    }

    #[test]
    fn normalizes_and_dedupes_by_code() {
        let mut watchlist = mk();
        let report = normalize_watchlist(&mut watchlist).unwrap();

        assert_eq!(report.funds_deduped, 1);
        assert_eq!(report.fields_trimmed, 1);
        assert_eq!(watchlist.funds.len(), 2);
        assert_eq!(watchlist.funds[0].name, "CSI 300");
        assert_eq!(watchlist.funds[0].code, "510310");
        assert_eq!(watchlist.funds[1].code, "510500");
    }

    #[test]
    fn rejects_non_numeric_codes() {
        let mut watchlist = mk();
        watchlist.funds[0].code = "51031O".to_string();
        let err = normalize_watchlist(&mut watchlist).unwrap_err();
        assert!(err.to_string().contains("numeric string"));
    }

    #[test]
    fn rejects_empty_watchlist() {
        let mut watchlist = mk();
        watchlist.funds.clear();
        let err = normalize_watchlist(&mut watchlist).unwrap_err();
        assert!(err.to_string().contains("no funds"));
    }

    #[test]
    fn rejects_out_of_range_margin_ratio() {
        let mut watchlist = mk();
        watchlist.margin_ratio = 1.0;
        assert!(normalize_watchlist(&mut watchlist).is_err());

        let mut watchlist = mk();
        watchlist.margin_ratio = -0.1;
        assert!(normalize_watchlist(&mut watchlist).is_err());
    }

    #[test]
    fn loads_a_minimal_toml_watchlist_with_defaults() {
        let toml_str = r#"
            [[funds]]
            name = "CSI 300"
            code = "510310"
        "#;

        let watchlist = load_watchlist_str(toml_str).unwrap();
        assert_eq!(watchlist.funds.len(), 1);
        assert_eq!(watchlist.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(watchlist.margin_ratio, DEFAULT_MARGIN_RATIO);
        assert_eq!(watchlist.output_dir, PathBuf::from("."));
        assert_eq!(watchlist.chart.width_px, 1400);
        assert_eq!(watchlist.chart.height_px, 700);
    }

    #[test]
    fn rejects_unknown_toml_keys() {
        let toml_str = r#"
            surprise = true
            [[funds]]
            name = "CSI 300"
            code = "510310"
        "#;
        assert!(load_watchlist_str(toml_str).is_err());
    }

    #[test]
    fn builtin_sets_carry_twelve_distinct_numeric_codes() {
        for watchlist in [Watchlist::primary(), Watchlist::alternative()] {
            assert_eq!(watchlist.funds.len(), 12);
            let codes: HashSet<&str> = watchlist.funds.iter().map(|f| f.code.as_str()).collect();
            assert_eq!(codes.len(), 12);
            assert!(
                watchlist
                    .funds
                    .iter()
                    .all(|f| f.code.chars().all(|c| c.is_ascii_digit()))
            );
        }

        // Same display names, different code spaces.
        let primary = Watchlist::primary();
        let alternative = Watchlist::alternative();
        for (a, b) in primary.funds.iter().zip(alternative.funds.iter()) {
            assert_eq!(a.name, b.name);
            assert_ne!(a.code, b.code);
        }
    }
}
