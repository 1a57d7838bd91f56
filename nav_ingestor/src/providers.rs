//! Provider abstraction for fund NAV data sources.
//!
//! This module defines the [`NavProvider`] trait, a unified interface for
//! fetching historical NAV records from any fund-data vendor.
//!
//! Each concrete provider implementation (such as Eastmoney) handles its own
//! wire format and validation behind this trait. The trait is designed for
//! async usage and supports dynamic dispatch (`dyn NavProvider`), which is
//! what lets the alignment and pipeline tests substitute stub providers.

pub mod eastmoney;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{nav::NavRecord, request_params::NavRequestParams};

/// Trait for fetching historical NAV records from a fund data provider.
///
/// Implement this trait for each concrete data vendor. A provider returns
/// records **newest-first**, exactly as upstream reports them; consumers are
/// responsible for reordering.
#[async_trait]
pub trait NavProvider {
    /// Fetches the NAV history for one fund.
    ///
    /// # Arguments
    ///
    /// * `params` - The fund code, page, and optional date-range filters.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<NavRecord>)` - The records for the requested page, newest
    ///   first. An empty vector when the provider has no data for the fund.
    /// * `Err(ProviderError)` - Transport, payload-shape, or
    ///   provider-reported failure. Callers are expected to treat any error
    ///   as final for that fund and continue with the rest of the batch.
    async fn fetch_nav_history(
        &self,
        params: NavRequestParams,
    ) -> Result<Vec<NavRecord>, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `NavProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during the HTTP round-trip (e.g., connection failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider reported a failure: a non-2xx status, or a non-zero
    /// error code inside an otherwise well-formed payload.
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The response body did not have the expected shape (JSONP wrapper
    /// missing, JSON decode failure, missing fields).
    #[snafu(display("Malformed provider payload: {message}"))]
    Payload {
        message: String,
        backtrace: Backtrace,
    },
}
