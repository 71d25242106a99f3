use std::fs;

use internals_host::{HostSeed, SeedError};
use tempfile::TempDir;

#[test]
fn seed_reads_dump_shaped_json_with_defaults() {
    let seed = HostSeed::from_json(
        r#"{
            "offlinePages": [
                {"id": "3", "onlineUrl": "https://a.com", "namespace": "bookmark", "size": 4096}
            ],
            "savePageRequests": [
                {"id": "7", "onlineUrl": "https://b.com", "creationTime": 1700000000000, "status": "available"}
            ],
            "eventLogs": ["boot"]
        }"#,
    )
    .expect("seed");

    assert_eq!(seed.offline_pages[0].size, 4096);
    assert_eq!(seed.offline_pages[0].access_count, 0);
    assert_eq!(seed.save_page_requests[0].creation_time, 1_700_000_000_000);
    assert_eq!(seed.event_logs, vec!["boot"]);
    assert_eq!(seed.network_status, "Connected");
    assert!(!seed.logging_state.model_is_logging);
}

#[test]
fn missing_and_malformed_files_are_reported() {
    let temp = TempDir::new().unwrap();

    let missing = HostSeed::load(&temp.path().join("absent.json")).unwrap_err();
    assert!(matches!(missing, SeedError::Io { .. }));

    let bad = temp.path().join("bad.json");
    fs::write(&bad, "{ not json").unwrap();
    let err = HostSeed::load(&bad).unwrap_err();
    assert!(matches!(err, SeedError::Parse { .. }));
    assert!(err.to_string().contains("bad.json"));
}
