//! Offset-based alignment of per-fund NAV series.
//!
//! The provider returns each fund's history newest-first. Alignment reverses
//! every list and walks it with ascending offsets from 0 (the oldest record
//! in the fetched window), so increasing offsets move forward in time. The
//! shared date index takes its date for an offset from the first fund to
//! supply that offset; later funds never overwrite it. Funds whose trading
//! calendars diverge can therefore sit on slightly different calendar dates
//! at the same x position — an accepted approximation of the upstream
//! behavior.

use indexmap::IndexMap;
use nav_ingestor::models::{fund::FundSpec, request_params::NavRequestParams};
use nav_ingestor::providers::NavProvider;

/// Shared integer-offset → date mapping plus one NAV series per fund code.
#[derive(Debug, Default)]
pub struct AlignedNav {
    /// Offset 0 is the oldest record of the fetched window.
    pub date_index: IndexMap<usize, String>,
    /// Fund code → (offset → unit NAV). Keyed in configured fund order.
    pub series_by_code: IndexMap<String, IndexMap<usize, f64>>,
}

impl AlignedNav {
    /// True when no fund produced any usable data; the pipeline must abort
    /// before chart generation in that case.
    pub fn is_unusable(&self) -> bool {
        self.date_index.is_empty() || self.series_by_code.values().all(|s| s.is_empty())
    }
}

/// One NAV value that failed to parse and was substituted with 0.0.
#[derive(Debug, Clone, PartialEq)]
pub struct BadNavValue {
    pub code: String,
    pub offset: usize,
    pub raw: String,
}

/// Everything the aligner warned about, materialized so tests can assert on
/// it instead of capturing log output.
#[derive(Debug, Default)]
pub struct AlignReport {
    /// Codes whose fetch failed outright (transport, payload, or provider
    /// error). Their series are zero-filled.
    pub fetch_failures: Vec<String>,
    /// Values substituted with 0.0, one entry per bad value.
    pub bad_values: Vec<BadNavValue>,
    /// Codes whose series came back empty and were back-filled with zeros
    /// across the full date index.
    pub zero_filled: Vec<String>,
}

/// Fetches every fund sequentially and aligns the results.
///
/// A single fund's failure never aborts the batch: the failure is logged,
/// recorded in the report, and the fund's series is zero-filled to the
/// shared index length.
pub async fn align_funds(
    provider: &dyn NavProvider,
    funds: &[FundSpec],
    page_size: u32,
) -> (AlignedNav, AlignReport) {
    let mut date_index: IndexMap<usize, String> = IndexMap::new();
    let mut series_by_code: IndexMap<String, IndexMap<usize, f64>> = funds
        .iter()
        .map(|fund| (fund.code.clone(), IndexMap::new()))
        .collect();
    let mut report = AlignReport::default();

    for fund in funds {
        tracing::info!(code = %fund.code, name = %fund.name, "fetching NAV history");

        let records = match provider
            .fetch_nav_history(NavRequestParams::new(&fund.code, page_size))
            .await
        {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(code = %fund.code, %error, "NAV fetch failed, fund skipped");
                report.fetch_failures.push(fund.code.clone());
                continue;
            }
        };

        let fund_series = series_by_code.entry(fund.code.clone()).or_default();

        for (offset, record) in records.iter().rev().enumerate() {
            date_index
                .entry(offset)
                .or_insert_with(|| record.date.clone());

            let value = match record.unit_nav.parse::<f64>() {
                Ok(value) => value,
                Err(_) => {
                    tracing::warn!(
                        code = %fund.code,
                        offset,
                        raw = %record.unit_nav,
                        "malformed unit NAV, substituting 0.0"
                    );
                    report.bad_values.push(BadNavValue {
                        code: fund.code.clone(),
                        offset,
                        raw: record.unit_nav.clone(),
                    });
                    0.0
                }
            };
            fund_series.insert(offset, value);
        }
    }

    // Funds that yielded nothing chart as a flat zero line of full length.
    let index_len = date_index.len();
    if index_len > 0 {
        for fund in funds {
            let fund_series = series_by_code.entry(fund.code.clone()).or_default();
            if fund_series.is_empty() {
                tracing::warn!(
                    code = %fund.code,
                    name = %fund.name,
                    "no data for fund, series zero-filled"
                );
                report.zero_filled.push(fund.code.clone());
                for offset in 0..index_len {
                    fund_series.insert(offset, 0.0);
                }
            }
        }
    }

    (
        AlignedNav {
            date_index,
            series_by_code,
        },
        report,
    )
}
