use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use internals_core::OfflinePage;
use internals_host::{
    execute, Clock, HostCall, HostError, HostHandle, HostReply, HostSeed, HostServiceProxy,
    InMemoryHost,
};

const WAIT: Duration = Duration::from_secs(5);

fn host_with_pages(count: usize) -> Arc<InMemoryHost> {
    let seed = HostSeed {
        offline_pages: (0..count)
            .map(|i| OfflinePage {
                id: i.to_string(),
                online_url: format!("https://example.com/{i}"),
                ..OfflinePage::default()
            })
            .collect(),
        ..HostSeed::default()
    };
    Arc::new(InMemoryHost::new(seed))
}

#[tokio::test]
async fn execute_maps_calls_to_replies() {
    let host = host_with_pages(2);

    match execute(&*host, HostCall::GetStoredPages).await {
        Ok(HostReply::StoredPages(pages)) => assert_eq!(pages.len(), 2),
        other => panic!("unexpected reply: {other:?}"),
    }
    assert_eq!(
        execute(&*host, HostCall::AddToRequestQueue("https://a.com".into())).await,
        Ok(HostReply::Added(true))
    );
    assert_eq!(
        execute(&*host, HostCall::SetRecordPageModel(true)).await,
        Ok(HostReply::Done)
    );
    assert_eq!(
        execute(&*host, HostCall::GetOperation("nope".into())).await,
        Err(HostError::failed("Unknown operation: nope"))
    );
}

#[test]
fn every_submitted_call_completes_with_its_tag() {
    let host = host_with_pages(3);
    let (handle, events) = HostHandle::<u32>::spawn(host.clone()).expect("spawn");

    let calls = vec![
        HostCall::GetStoredPages,
        HostCall::GetRequestQueue,
        HostCall::GetNetworkStatus,
        HostCall::GetLimitlessPrefetchingEnabled,
        HostCall::GetEventLogs,
        HostCall::GetLoggingState,
    ];
    let expected = calls.len();
    for (tag, call) in calls.into_iter().enumerate() {
        assert!(handle.submit(tag as u32, call));
    }

    let mut results = BTreeMap::new();
    for _ in 0..expected {
        let event = events.recv_timeout(WAIT).expect("completion");
        results.insert(event.tag, event.result);
    }
    assert_eq!(results.len(), expected);
    assert!(matches!(results[&0], Ok(HostReply::StoredPages(ref p)) if p.len() == 3));
    assert!(matches!(results[&2], Ok(HostReply::NetworkStatus(ref s)) if s == "Connected"));
    assert!(events.try_recv().is_none());
}

#[test]
fn failures_come_back_as_events() {
    let host = host_with_pages(0);
    let (handle, events) = HostHandle::<&'static str>::spawn(host).expect("spawn");

    handle.submit("cancel", HostCall::CancelNwake);
    let event = events.recv_timeout(WAIT).expect("completion");
    assert_eq!(event.tag, "cancel");
    assert_eq!(event.result, Err(HostError::failed("No NWake is scheduled")));
}

#[test]
fn events_end_after_handles_are_dropped() {
    let host: Arc<dyn HostServiceProxy> = host_with_pages(1);
    let (handle, events) = HostHandle::<()>::spawn(host).expect("spawn");

    handle.submit((), HostCall::GetStoredPages);
    assert!(events.recv_timeout(WAIT).is_some());
    drop(handle);
    assert!(events.recv().is_none());
}

#[test]
fn dropping_the_handle_still_reports_submitted_calls() {
    let slow_clock: Clock = Arc::new(|| {
        std::thread::sleep(Duration::from_millis(200));
        1_700_000_000_000
    });
    let host: Arc<dyn HostServiceProxy> =
        Arc::new(InMemoryHost::with_clock(HostSeed::default(), slow_clock));
    let (handle, events) = HostHandle::<&str>::spawn(host).expect("spawn");

    for url in ["https://a.com", "https://b.com"] {
        assert!(handle.submit(url, HostCall::AddToRequestQueue(url.to_string())));
    }
    drop(handle);

    let mut tags = Vec::new();
    while let Some(event) = events.recv() {
        assert_eq!(event.result, Ok(HostReply::Added(true)));
        tags.push(event.tag);
    }
    tags.sort();
    assert_eq!(tags, vec!["https://a.com", "https://b.com"]);
}
