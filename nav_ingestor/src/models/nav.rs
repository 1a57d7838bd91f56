//! Canonical in-memory representation of a daily NAV record.
//!
//! This struct is the standard output of all [`NavProvider`](crate::providers::NavProvider)
//! implementations, regardless of the upstream vendor.

use serde::{Deserialize, Serialize};

/// One net-asset-value record for a single trading day.
///
/// NAV values are kept as the provider's string-encoded decimals. Parsing
/// (and the substitute-zero policy for malformed values) is owned by the
/// consumer, which can attribute a warning to the exact fund and offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavRecord {
    /// Trading date as reported by the provider (`YYYY-MM-DD`).
    pub date: String,

    /// Unit NAV, string-encoded decimal. May be empty or non-numeric.
    pub unit_nav: String,

    /// Accumulated NAV, string-encoded decimal. May be empty or non-numeric.
    pub accumulated_nav: String,
}
