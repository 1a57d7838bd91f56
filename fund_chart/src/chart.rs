//! Assembles the aligned NAV series into an ECharts line-chart option.
//!
//! The option object is built as plain JSON: one smoothed line series per
//! configured fund with min/max mark points and an average mark line, a
//! shared category date axis, a scrollable legend, inside + slider zoom,
//! and the export/restore/data-view toolbox.

pub mod axis;

use nav_ingestor::models::fund::FundSpec;
use serde_json::{Value, json};

use crate::align::AlignedNav;
use crate::config::ChartStyle;

/// A renderable chart: page metadata plus the serialized ECharts option.
#[derive(Debug, Clone)]
pub struct ChartDocument {
    pub page_title: String,
    pub width_px: u32,
    pub height_px: u32,
    pub option: Value,
}

/// Builds the chart option from the aligned series.
///
/// Funds keep their configured order. Offsets a shorter series never
/// populated serialize as `null`, which ECharts renders as a gap. An empty
/// fund list still yields a well-formed option with no series; the pipeline
/// aborts before this point when there is no data at all.
pub fn build_line_chart(
    nav: &AlignedNav,
    funds: &[FundSpec],
    style: &ChartStyle,
    margin_ratio: f64,
) -> ChartDocument {
    let day_count = nav.date_index.len();
    let dates: Vec<String> = (0..day_count)
        .map(|offset| nav.date_index.get(&offset).cloned().unwrap_or_default())
        .collect();

    let mut series = Vec::with_capacity(funds.len());
    let mut ranges = Vec::with_capacity(funds.len());

    for fund in funds {
        let Some(fund_series) = nav.series_by_code.get(&fund.code) else {
            continue;
        };

        let data: Vec<Value> = (0..day_count)
            .map(|offset| match fund_series.get(&offset) {
                Some(value) => json!(value),
                None => Value::Null,
            })
            .collect();

        let populated: Vec<f64> = (0..day_count)
            .filter_map(|offset| fund_series.get(&offset).copied())
            .collect();
        ranges.push(axis::axis_range(&populated, margin_ratio));

        series.push(json!({
            "name": fund.name,
            "type": "line",
            "smooth": true,
            "showSymbol": true,
            "label": {"show": false},
            "markPoint": {
                "data": [
                    {"type": "min", "name": "Low"},
                    {"type": "max", "name": "High"}
                ]
            },
            "markLine": {
                "data": [{"type": "average", "name": "Average"}]
            },
            "data": data
        }));
    }

    let subtitle = format!(
        "Data through: {} | {} trading days",
        dates.last().map(String::as_str).unwrap_or("unknown"),
        day_count
    );

    let mut y_axis = json!({
        "type": "value",
        "name": "Unit NAV",
        "nameLocation": "end",
        "axisLabel": {"formatter": "{value}"},
        "splitLine": {"show": true}
    });
    if let Some((y_max, y_min)) = axis::combined_range(&ranges) {
        y_axis["max"] = json!(y_max);
        y_axis["min"] = json!(y_min);
    }

    let fund_names: Vec<&str> = funds.iter().map(|fund| fund.name.as_str()).collect();

    let option = json!({
        "title": {
            "text": style.title,
            "subtext": subtitle,
            "textStyle": {"fontSize": 24},
            "subtextStyle": {"fontSize": 12, "color": "gray"}
        },
        "tooltip": {
            "trigger": "axis",
            "axisPointer": {"type": "cross"},
            "backgroundColor": "rgba(255,255,255,0.9)"
        },
        "legend": {"type": "scroll", "top": "5%", "left": "center", "data": fund_names},
        "toolbox": {
            "show": true,
            "feature": {
                "saveAsImage": {"title": "Save"},
                "dataView": {"title": "Data view"},
                "restore": {"title": "Restore"},
                "dataZoom": {"title": "Zoom"}
            }
        },
        "dataZoom": [
            {"type": "inside", "start": 0, "end": 100},
            {"type": "slider", "show": true, "bottom": "5%"}
        ],
        "xAxis": {
            "type": "category",
            "name": "Date",
            "nameLocation": "end",
            "data": dates,
            "axisLabel": {"rotate": 45},
            "splitLine": {"show": true}
        },
        "yAxis": y_axis,
        "series": series
    });

    ChartDocument {
        page_title: style.page_title.clone(),
        width_px: style.width_px,
        height_px: style.height_px,
        option,
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;

    fn aligned(entries: Vec<(&str, Vec<f64>)>, dates: Vec<&str>) -> AlignedNav {
        let date_index: IndexMap<usize, String> = dates
            .into_iter()
            .enumerate()
            .map(|(offset, date)| (offset, date.to_string()))
            .collect();
        let series_by_code = entries
            .into_iter()
            .map(|(code, values)| {
                let series: IndexMap<usize, f64> = values.into_iter().enumerate().collect();
                (code.to_string(), series)
            })
            .collect();
        AlignedNav {
            date_index,
            series_by_code,
        }
    }

    fn funds(specs: &[(&str, &str)]) -> Vec<FundSpec> {
        specs
            .iter()
            .map(|(name, code)| FundSpec::new(*name, *code))
            .collect()
    }

    #[test]
    fn one_series_per_fund_in_configured_order() {
        let nav = aligned(
            vec![
                ("000001", vec![1.0, 1.1, 1.2]),
                ("000002", vec![2.0, 2.1, 2.2]),
            ],
            vec!["2024-01-01", "2024-01-02", "2024-01-03"],
        );
        let funds = funds(&[("B fund", "000002"), ("A fund", "000001")]);

        let chart = build_line_chart(&nav, &funds, &ChartStyle::default(), 0.08);

        let series = chart.option["series"].as_array().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0]["name"], "B fund");
        assert_eq!(series[1]["name"], "A fund");
        assert_eq!(series[0]["type"], "line");
        assert_eq!(series[0]["smooth"], true);
        assert_eq!(series[0]["data"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn combined_axis_bounds_cover_every_series() {
        let nav = aligned(
            vec![
                ("000001", vec![1.0, 1.1, 1.2]),
                ("000002", vec![2.0, 2.1, 2.2]),
            ],
            vec!["2024-01-01", "2024-01-02", "2024-01-03"],
        );
        let funds = funds(&[("A", "000001"), ("B", "000002")]);

        let chart = build_line_chart(&nav, &funds, &ChartStyle::default(), 0.08);

        assert_eq!(chart.option["yAxis"]["max"], json!(2.376));
        assert_eq!(chart.option["yAxis"]["min"], json!(0.92));
    }

    #[test]
    fn shorter_series_render_missing_offsets_as_null() {
        let nav = aligned(
            vec![("000001", vec![1.0]), ("000002", vec![2.0, 2.1, 2.2])],
            vec!["2024-01-01", "2024-01-02", "2024-01-03"],
        );
        let funds = funds(&[("A", "000001"), ("B", "000002")]);

        let chart = build_line_chart(&nav, &funds, &ChartStyle::default(), 0.08);

        let short = chart.option["series"][0]["data"].as_array().unwrap();
        assert_eq!(short.len(), 3);
        assert_eq!(short[0], json!(1.0));
        assert!(short[1].is_null());
        assert!(short[2].is_null());
    }

    #[test]
    fn subtitle_names_the_latest_date_and_day_count() {
        let nav = aligned(
            vec![("000001", vec![1.0, 1.1])],
            vec!["2024-01-01", "2024-01-02"],
        );
        let funds = funds(&[("A", "000001")]);

        let chart = build_line_chart(&nav, &funds, &ChartStyle::default(), 0.08);

        assert_eq!(
            chart.option["title"]["subtext"],
            "Data through: 2024-01-02 | 2 trading days"
        );
    }

    #[test]
    fn empty_fund_list_still_builds_a_well_formed_option() {
        let nav = AlignedNav::default();
        let chart = build_line_chart(&nav, &[], &ChartStyle::default(), 0.08);

        assert!(chart.option["series"].as_array().unwrap().is_empty());
        assert!(chart.option["yAxis"].get("max").is_none());
        assert_eq!(
            chart.option["title"]["subtext"],
            "Data through: unknown | 0 trading days"
        );
        assert_eq!(chart.option["dataZoom"].as_array().unwrap().len(), 2);
    }
}
