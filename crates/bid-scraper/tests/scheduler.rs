use std::fs;

use bid_scraper::{
    Attachment, BidItem, FileMode, LogScheduler, RecordWriter, TaskRequest, TaskScheduler,
    TaskWriter,
};

fn road_salt() -> BidItem {
    BidItem {
        title: "BID NO FY 2025-11 Road Salt".into(),
        signal_source_unique_id: "FY 2025-11".into(),
        due_date: None,
        details_url_for_item: Some(
            "https://etowahcounty.org/department/purchasing//bids/123".into(),
        ),
        attachments: vec![Attachment::from_url("/docs/Addendum-1.pdf")],
        source_url: None,
    }
}

#[test]
fn task_request_only_for_linked_bids() {
    let bid = road_salt();
    let task = TaskRequest::for_bid("bid-details", &bid).unwrap();
    assert_eq!(
        serde_json::to_value(&task).unwrap(),
        serde_json::json!({
            "api": "bid-details",
            "parameters": {
                "bidFullUrl": "https://etowahcounty.org/department/purchasing//bids/123",
                "signal_source_unique_id": "FY 2025-11",
            }
        })
    );

    let unlinked = BidItem {
        details_url_for_item: None,
        ..bid
    };
    assert_eq!(TaskRequest::for_bid("bid-details", &unlinked), None);
}

#[test]
fn task_writer_writes_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.jsonl");

    let writer = TaskWriter::new(&path, FileMode::Create).unwrap();
    let task = TaskRequest::for_bid("bid-details", &road_salt()).unwrap();
    for _ in 0..3 {
        writer.enqueue(task.clone());
    }
    writer.finish().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines = content.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3);
    for line in lines {
        let parsed: TaskRequest = serde_json::from_str(line).unwrap();
        assert_eq!(parsed, task);
    }
}

#[test]
fn create_mode_refuses_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.jsonl");
    fs::write(&path, "").unwrap();

    assert!(TaskWriter::new(&path, FileMode::Create).is_err());
}

#[test]
fn record_writer_appends_bids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bids.json");

    for _ in 0..2 {
        let mut wtr = RecordWriter::open(Some(path.as_path()), FileMode::Append).unwrap();
        wtr.write_bids(&[road_salt()]).unwrap();
    }

    let content = fs::read_to_string(&path).unwrap();
    let docs = serde_json::Deserializer::from_str(&content)
        .into_iter::<Vec<BidItem>>()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(docs, vec![vec![road_salt()], vec![road_salt()]]);
}

#[test]
fn log_scheduler_accepts_tasks() {
    let task = TaskRequest::for_bid("bid-details", &road_salt()).unwrap();
    LogScheduler.enqueue(task);
}
