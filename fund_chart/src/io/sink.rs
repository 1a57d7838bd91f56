use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::chart::ChartDocument;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// An error occurred while serializing the chart option to JSON.
    #[snafu(display("Failed to serialize chart option: {source}"))]
    Serialize {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// A generic I/O error while creating directories or writing the output.
    #[snafu(display("I/O error: {source}"))]
    Io {
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait ChartSink {
    /// The type of output returned after a successful write operation.
    ///
    /// A file sink returns the path of the created file; other sinks might
    /// return a URL or a byte count.
    type Output;

    /// Writes a rendered chart to the destination.
    async fn write(&self, chart: &ChartDocument) -> Result<Self::Output, SinkError>;
}
