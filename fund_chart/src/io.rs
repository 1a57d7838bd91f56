//! Output sinks for rendered charts.

pub mod html;
pub mod sink;
