use internals_core::{
    dump_as_json, humanize_times, reformat_date_string, OfflinePage, SavePageRequest,
    INVALID_DATE,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const NOV_14_2023: &str = "Tue Nov 14 2023 22:13:20 GMT+0000 (Coordinated Universal Time)";
const EPOCH: &str = "Thu Jan 01 1970 00:00:00 GMT+0000 (Coordinated Universal Time)";

fn sample() -> (Vec<OfflinePage>, Vec<SavePageRequest>) {
    let pages = vec![OfflinePage {
        online_url: "https://example.com/a".to_string(),
        creation_time: 1_700_000_000_000,
        id: "3".to_string(),
        namespace: "bookmark".to_string(),
        size: 4096,
        file_path: "/data/a.mhtml".to_string(),
        last_access_time: 0,
        access_count: 2,
        is_expired: false,
        request_origin: String::new(),
    }];
    let requests = vec![SavePageRequest {
        status: "available".to_string(),
        online_url: "https://example.com/b".to_string(),
        creation_time: 1_700_000_000_000,
        id: "9".to_string(),
        namespace: "async_loading".to_string(),
        last_attempt_time: 0,
        request_origin: "origin".to_string(),
    }];
    (pages, requests)
}

#[test]
fn dump_rewrites_time_fields_and_keeps_the_rest() {
    let (pages, requests) = sample();
    let text = dump_as_json(&pages, &requests).expect("dump");
    let parsed: Value = serde_json::from_str(&text).expect("valid json");

    let mut expected = json!({
        "offlinePages": pages,
        "savePageRequests": requests,
    });
    expected["offlinePages"][0]["creationTime"] = json!(NOV_14_2023);
    expected["offlinePages"][0]["lastAccessTime"] = json!(EPOCH);
    expected["savePageRequests"][0]["creationTime"] = json!(NOV_14_2023);
    expected["savePageRequests"][0]["lastAttemptTime"] = json!(EPOCH);

    assert_eq!(parsed, expected);
    assert_eq!(parsed["offlinePages"][0]["size"], json!(4096));
    assert_eq!(parsed["savePageRequests"][0]["id"], json!("9"));
}

#[test]
fn dump_uses_two_space_indentation_and_field_order() {
    let (pages, requests) = sample();
    let text = dump_as_json(&pages, &requests).expect("dump");

    assert!(text.starts_with("{\n  \"offlinePages\": [\n    {\n      \"onlineUrl\""));
    let offline = text.find("\"offlinePages\"").expect("pages key");
    let queued = text.find("\"savePageRequests\"").expect("requests key");
    assert!(offline < queued);
}

#[test]
fn empty_caches_dump_to_empty_lists() {
    let text = dump_as_json(&[], &[]).expect("dump");
    let parsed: Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(parsed, json!({"offlinePages": [], "savePageRequests": []}));
}

#[test]
fn transform_is_idempotent_on_date_strings() {
    let once = humanize_times(json!({"creationTime": 1_700_000_000_000_i64}));
    let twice = humanize_times(once.clone());
    assert_eq!(once, twice);
    assert_eq!(reformat_date_string(NOV_14_2023), NOV_14_2023);
}

#[test]
fn transform_handles_nested_and_odd_values() {
    let value = json!({
        "outer": {"innerTime": 0, "note": "keep"},
        "items": [{"startTime": null}, {"endTime": "not a date"}],
        "blobTime": {"a": 1},
        "Time": 1.9,
        "timeout": 5,
    });
    let transformed = humanize_times(value);

    assert_eq!(transformed["outer"]["innerTime"], json!(EPOCH));
    assert_eq!(transformed["outer"]["note"], json!("keep"));
    assert_eq!(transformed["items"][0]["startTime"], json!(EPOCH));
    assert_eq!(transformed["items"][1]["endTime"], json!(INVALID_DATE));
    assert_eq!(transformed["blobTime"], json!(INVALID_DATE));
    assert_eq!(transformed["Time"], json!(EPOCH));
    // Only the exact suffix counts.
    assert_eq!(transformed["timeout"], json!(5));
}

#[test]
fn rfc3339_strings_are_understood() {
    assert_eq!(reformat_date_string("2023-11-14T22:13:20Z"), NOV_14_2023);
    assert_eq!(reformat_date_string(""), INVALID_DATE);
}
