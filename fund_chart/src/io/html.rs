//! Standalone-HTML sink.
//!
//! Serializes the chart option inline into a single HTML document that
//! pulls the ECharts bundle from a CDN, so opening the file in a browser
//! reproduces the interactive chart without any server.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use snafu::ResultExt;

use crate::chart::ChartDocument;
use crate::io::sink::{ChartSink, IoSnafu, SerializeSnafu, SinkError};

const OUTPUT_FILE_NAME: &str = "index.html";

const ECHARTS_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@5.5.0/dist/echarts.min.js";

pub struct HtmlSink {
    output_dir: PathBuf,
}

impl HtmlSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl ChartSink for HtmlSink {
    type Output = PathBuf;

    /// Writes `index.html` into the output directory, creating the
    /// directory recursively and overwriting any existing file.
    async fn write(&self, chart: &ChartDocument) -> Result<PathBuf, SinkError> {
        fs::create_dir_all(&self.output_dir).context(IoSnafu)?;

        let option_json = serde_json::to_string(&chart.option).context(SerializeSnafu)?;
        let html = render_html(chart, &option_json);

        let output_path = self.output_dir.join(OUTPUT_FILE_NAME);
        fs::write(&output_path, html).context(IoSnafu)?;

        Ok(output_path)
    }
}

fn render_html(chart: &ChartDocument, option_json: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <script src="{cdn}"></script>
</head>
<body>
    <div id="chart" style="width:{width}px;height:{height}px;"></div>
    <script>
        var chart = echarts.init(document.getElementById('chart'));
        var option = {option};
        chart.setOption(option);
    </script>
</body>
</html>
"#,
        title = chart.page_title,
        cdn = ECHARTS_CDN,
        width = chart.width_px,
        height = chart.height_px,
        option = option_json,
    )
}
