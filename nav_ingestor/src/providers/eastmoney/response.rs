use serde::Deserialize;
use snafu::OptionExt;

use crate::models::nav::NavRecord;
use crate::providers::{PayloadSnafu, ProviderError};

/// One row of the `Data.LSJZList` array.
///
/// NAV fields come back as strings and are occasionally null or empty for
/// suspended funds; both cases decode to an empty string here.
#[derive(Deserialize, Debug)]
pub struct LsjzRecord {
    #[serde(rename = "FSRQ")]
    pub date: String,
    #[serde(rename = "DWJZ")]
    pub unit_nav: Option<String>,
    #[serde(rename = "LJJZ")]
    pub accumulated_nav: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct LsjzData {
    #[serde(rename = "LSJZList", default)]
    pub lsjz_list: Vec<LsjzRecord>,
}

/// The JSON object inside the JSONP wrapper.
///
/// `ErrCode != 0` is a provider-reported failure even when the transport
/// round-trip succeeded.
#[derive(Deserialize, Debug)]
pub struct LsjzEnvelope {
    #[serde(rename = "ErrCode")]
    pub err_code: i64,
    #[serde(rename = "ErrMsg")]
    pub err_msg: Option<String>,
    #[serde(rename = "Data")]
    pub data: Option<LsjzData>,
    #[serde(rename = "TotalCount", default)]
    pub total_count: i64,
}

impl From<LsjzRecord> for NavRecord {
    fn from(record: LsjzRecord) -> Self {
        NavRecord {
            date: record.date,
            unit_nav: record.unit_nav.unwrap_or_default(),
            accumulated_nav: record.accumulated_nav.unwrap_or_default(),
        }
    }
}

/// Extracts the JSON payload out of a JSONP body.
///
/// Takes the span between the first `(` and the last `)`, which tolerates
/// parentheses inside JSON string values.
pub fn extract_jsonp_payload(body: &str) -> Result<&str, ProviderError> {
    let open = body.find('(').context(PayloadSnafu {
        message: "JSONP wrapper not found: no opening parenthesis",
    })?;
    let close = body.rfind(')').context(PayloadSnafu {
        message: "JSONP wrapper not found: no closing parenthesis",
    })?;
    if close <= open {
        return PayloadSnafu {
            message: "JSONP wrapper not found: parentheses out of order",
        }
        .fail();
    }
    Ok(&body[open + 1..close])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"jQuery_1700000000000_1700000001000({
        "Data": {
            "LSJZList": [
                {"FSRQ": "2024-01-03", "DWJZ": "1.2001", "LJJZ": "2.1001"},
                {"FSRQ": "2024-01-02", "DWJZ": "1.1987", "LJJZ": "2.0987"}
            ]
        },
        "ErrCode": 0,
        "ErrMsg": null,
        "TotalCount": 2
    })"#;

    #[test]
    fn extracts_payload_between_outermost_parens() {
        let payload = extract_jsonp_payload(SAMPLE).unwrap();
        assert!(payload.trim_start().starts_with('{'));
        assert!(payload.trim_end().ends_with('}'));
    }

    #[test]
    fn tolerates_parentheses_inside_string_values() {
        let body = r#"cb({"ErrCode": 0, "ErrMsg": "ok (really)", "Data": null})"#;
        let payload = extract_jsonp_payload(body).unwrap();
        let envelope: LsjzEnvelope = serde_json::from_str(payload).unwrap();
        assert_eq!(envelope.err_msg.as_deref(), Some("ok (really)"));
    }

    #[test]
    fn missing_wrapper_is_a_payload_error() {
        let err = extract_jsonp_payload("not jsonp at all").unwrap_err();
        assert!(matches!(err, ProviderError::Payload { .. }));

        let err = extract_jsonp_payload(")backwards(").unwrap_err();
        assert!(matches!(err, ProviderError::Payload { .. }));
    }

    #[test]
    fn decodes_the_sample_envelope() {
        let payload = extract_jsonp_payload(SAMPLE).unwrap();
        let envelope: LsjzEnvelope = serde_json::from_str(payload).unwrap();

        assert_eq!(envelope.err_code, 0);
        assert_eq!(envelope.total_count, 2);
        let records = envelope.data.unwrap().lsjz_list;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, "2024-01-03");
        assert_eq!(records[0].unit_nav.as_deref(), Some("1.2001"));
    }

    #[test]
    fn null_nav_values_become_empty_strings() {
        let payload = r#"{"ErrCode": 0, "ErrMsg": null, "Data": {"LSJZList": [
            {"FSRQ": "2024-01-02", "DWJZ": null, "LJJZ": null}
        ]}, "TotalCount": 1}"#;
        let envelope: LsjzEnvelope = serde_json::from_str(payload).unwrap();
        let record: NavRecord = envelope.data.unwrap().lsjz_list.remove(0).into();
        assert_eq!(record.unit_nav, "");
        assert_eq!(record.accumulated_nav, "");
    }

    #[test]
    fn absent_record_list_decodes_as_empty() {
        let payload = r#"{"ErrCode": 0, "ErrMsg": null, "Data": {}, "TotalCount": 0}"#;
        let envelope: LsjzEnvelope = serde_json::from_str(payload).unwrap();
        assert!(envelope.data.unwrap().lsjz_list.is_empty());
    }
}
