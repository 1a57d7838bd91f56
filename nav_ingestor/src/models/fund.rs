use serde::{Deserialize, Serialize};

/// A configured fund: a human-readable display name plus the provider's
/// numeric-string code.
///
/// Immutable for a run; the configured order determines the series order in
/// the rendered chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundSpec {
    /// Display name used for the chart series and the legend (e.g., "CSI 300").
    pub name: String,
    /// Provider fund code, a numeric string identifier (e.g., "510310").
    pub code: String,
}

impl FundSpec {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}
