use chrono::Utc;

use crate::models::request_params::NavRequestParams;

/// Generates the cache-busting timestamp and the JSONP callback name.
///
/// The endpoint expects a jQuery-style callback of the form
/// `jQuery_{timestamp}_{sequence}` where the sequence is derived from the
/// same epoch-millisecond timestamp.
pub fn generate_callback() -> (i64, String) {
    let timestamp = Utc::now().timestamp_millis();
    let sequence = timestamp + 1000;
    (timestamp, format!("jQuery_{timestamp}_{sequence}"))
}

/// Builds the query list for the NAV-history endpoint.
///
/// The `_` parameter is the cache buster; it carries the same epoch-millis
/// value the callback name was derived from.
pub fn construct_params(params: &NavRequestParams) -> Vec<(String, String)> {
    let (timestamp, callback) = generate_callback();

    vec![
        ("callback".to_string(), callback),
        ("fundCode".to_string(), params.fund_code.clone()),
        ("pageIndex".to_string(), params.page_index.to_string()),
        ("pageSize".to_string(), params.page_size.to_string()),
        ("startDate".to_string(), params.start_date.clone()),
        ("endDate".to_string(), params.end_date.clone()),
        ("_".to_string(), timestamp.to_string()),
    ]
}
