//! Fund NAV charting: fetch a configured watchlist's NAV history, align the
//! per-fund series onto a shared date index, and render an interactive line
//! chart to a standalone HTML page.

pub mod align;
pub mod chart;
pub mod config;
pub mod io;
pub mod pipeline;
