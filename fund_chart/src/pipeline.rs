//! The fetch → align → chart → render pipeline.

use std::path::PathBuf;

use nav_ingestor::providers::NavProvider;
use thiserror::Error;

use crate::align;
use crate::chart;
use crate::config::Watchlist;
use crate::io::sink::{ChartSink, SinkError};

/// The unified error type for one charting run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No fund produced any usable NAV data; nothing was rendered.
    #[error("no usable NAV data was returned for any configured fund")]
    NoData,

    /// The chart could not be written to its destination.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Runs the whole pipeline for one watchlist and returns the written path.
///
/// Per-fund failures are tolerated (they chart as zero lines); only the
/// batch-fatal case — no fund yielded data at all — aborts, before any
/// output file is produced.
pub async fn run<S>(
    provider: &dyn NavProvider,
    sink: &S,
    watchlist: &Watchlist,
) -> Result<PathBuf, PipelineError>
where
    S: ChartSink<Output = PathBuf> + Sync,
{
    let (nav, report) = align::align_funds(provider, &watchlist.funds, watchlist.page_size).await;

    if nav.is_unusable() {
        tracing::error!("no usable NAV data for any configured fund, aborting");
        return Err(PipelineError::NoData);
    }

    if !report.fetch_failures.is_empty() || !report.bad_values.is_empty() {
        tracing::info!(
            fetch_failures = report.fetch_failures.len(),
            bad_values = report.bad_values.len(),
            zero_filled = report.zero_filled.len(),
            "alignment finished with degraded funds"
        );
    }

    let chart = chart::build_line_chart(
        &nav,
        &watchlist.funds,
        &watchlist.chart,
        watchlist.margin_ratio,
    );

    let output_path = sink.write(&chart).await?;

    let fund_names: Vec<&str> = watchlist
        .funds
        .iter()
        .map(|fund| fund.name.as_str())
        .collect();
    let day_count = nav.date_index.len();
    tracing::info!(
        output = %output_path.display(),
        days = day_count,
        from = nav.date_index.get(&0).map(String::as_str).unwrap_or("unknown"),
        to = nav
            .date_index
            .get(&(day_count.saturating_sub(1)))
            .map(String::as_str)
            .unwrap_or("unknown"),
        funds = ?fund_names,
        "chart written"
    );

    Ok(output_path)
}
