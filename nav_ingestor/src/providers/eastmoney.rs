//! Eastmoney fund-data provider.
//!
//! Talks to the public NAV-history endpoint at
//! `http://api.fund.eastmoney.com/f10/lsjz`, which answers with JSONP
//! (`jQuery_..._...({...})`). The submodules split the concern the usual
//! way: query construction, HTTP client + fetch, and wire-format decoding.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::EastmoneyProvider;
