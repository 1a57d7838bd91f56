use serde::{Deserialize, Serialize};

/// Default number of records requested per fund (roughly three months of
/// trading days).
pub const DEFAULT_PAGE_SIZE: u32 = 60;

/// Universal parameters for requesting NAV history from a data provider.
///
/// This struct is vendor-agnostic; each [`NavProvider`](crate::providers::NavProvider)
/// implementation maps it onto its own query format.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavRequestParams {
    /// Provider fund code (numeric string, e.g. "510310").
    pub fund_code: String,

    /// 1-based page index. The pipeline only ever requests the first page.
    pub page_index: u32,

    /// Number of records per page. Providers return the newest records first.
    pub page_size: u32,

    /// Inclusive start-date filter (`YYYY-MM-DD`), empty for no filter.
    pub start_date: String,

    /// Inclusive end-date filter (`YYYY-MM-DD`), empty for no filter.
    pub end_date: String,
}

impl NavRequestParams {
    /// First page, no date filters.
    pub fn new(fund_code: impl Into<String>, page_size: u32) -> Self {
        Self {
            fund_code: fund_code.into(),
            page_index: 1,
            page_size,
            start_date: String::new(),
            end_date: String::new(),
        }
    }
}
