use npc_core::{NodeId, Status, TraceEvent, TraceLog};

#[test]
fn last_status_reports_most_recent_event() {
    let a = NodeId::next();
    let b = NodeId::next();

    let mut log = TraceLog::default();
    log.push(TraceEvent::new(1, a, Status::Running));
    log.push(TraceEvent::new(1, b, Status::Failed));
    log.push(TraceEvent::new(2, a, Status::Finished));

    assert_eq!(log.len(), 3);
    assert_eq!(log.last_status(a), Some(Status::Finished));
    assert_eq!(log.last_status(b), Some(Status::Failed));
    assert_eq!(log.last_status(NodeId::INVALID), None);
    assert_eq!(log.at_tick(1).count(), 2);
}

#[cfg(feature = "serde")]
#[test]
fn trace_log_json_roundtrip() {
    let node = NodeId::next();
    let log = TraceLog {
        events: vec![
            TraceEvent::new(1, node, Status::Running),
            TraceEvent::new(2, node, Status::Finished),
        ],
    };

    let json = serde_json::to_string(&log).expect("serialize");
    let roundtrip: TraceLog = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(roundtrip, log);
}
