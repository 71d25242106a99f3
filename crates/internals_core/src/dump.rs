use serde::Serialize;
use serde_json::{Map, Value};

use crate::date::{format_millis_f64, reformat_date_string, INVALID_DATE};
use crate::{OfflinePage, SavePageRequest};

/// Keys with this suffix hold timestamps and are rendered as date strings.
const TIME_KEY_SUFFIX: &str = "Time";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DumpDocument<'a> {
    offline_pages: &'a [OfflinePage],
    save_page_requests: &'a [SavePageRequest],
}

/// Serializes both caches into one pretty JSON document (2-space indent),
/// with every `*Time` field replaced by a human-readable date string.
pub fn dump_as_json(
    pages: &[OfflinePage],
    requests: &[SavePageRequest],
) -> Result<String, serde_json::Error> {
    let document = serde_json::to_value(DumpDocument {
        offline_pages: pages,
        save_page_requests: requests,
    })?;
    serde_json::to_string_pretty(&humanize_times(document))
}

/// Applies the `*Time` rewrite to an arbitrary JSON value.
///
/// A value under a time key is replaced wholesale, whatever its shape; other
/// values are walked recursively. Date strings map to themselves, so the
/// transform is idempotent.
pub fn humanize_times(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| {
                    let value = if key.ends_with(TIME_KEY_SUFFIX) {
                        Value::String(time_value_to_date_string(&value))
                    } else {
                        humanize_times(value)
                    };
                    (key, value)
                })
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(humanize_times).collect()),
        other => other,
    }
}

fn time_value_to_date_string(value: &Value) -> String {
    match value {
        Value::Number(number) => number
            .as_f64()
            .map(format_millis_f64)
            .unwrap_or_else(|| INVALID_DATE.to_string()),
        Value::String(text) => reformat_date_string(text),
        Value::Null => format_millis_f64(0.0),
        Value::Bool(flag) => format_millis_f64(if *flag { 1.0 } else { 0.0 }),
        Value::Array(_) | Value::Object(_) => INVALID_DATE.to_string(),
    }
}
