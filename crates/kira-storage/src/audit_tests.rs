// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;
use serde_json::json;

fn sample(ts: DateTime<Utc>) -> AuditRecord {
    AuditRecord {
        trace_id: "trace-1".to_string(),
        timestamp: ts,
        command: "task create".to_string(),
        args: json!({"title": "Write tests"}),
        result: json!({"status": "success"}),
        exit_code: 0,
    }
}

#[test]
fn record_appends_one_line_per_call() {
    let dir = tempfile::tempdir().unwrap();
    let logger = AuditLogger::new(dir.path());
    let ts = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();

    logger.record(&sample(ts)).unwrap();
    logger.record(&sample(ts)).unwrap();

    let records = logger.read_day(ts.date_naive()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].command, "task create");
}

#[test]
fn records_partition_by_utc_date() {
    let dir = tempfile::tempdir().unwrap();
    let logger = AuditLogger::new(dir.path());
    let day1 = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
    let day2 = Utc.with_ymd_and_hms(2025, 1, 16, 9, 0, 0).unwrap();

    logger.record(&sample(day1)).unwrap();
    logger.record(&sample(day2)).unwrap();

    assert_eq!(logger.read_day(day1.date_naive()).unwrap().len(), 1);
    assert_eq!(logger.read_day(day2.date_naive()).unwrap().len(), 1);
}

#[test]
fn trailing_partial_line_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let logger = AuditLogger::new(dir.path());
    let ts = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
    logger.record(&sample(ts)).unwrap();

    let path = logger.path_for(ts);
    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    file.write_all(b"{\"trace_id\":\"broken").unwrap();

    let records = logger.read_day(ts.date_naive()).unwrap();
    assert_eq!(records.len(), 1);
}

#[test]
fn read_missing_day_returns_empty() {
    let dir = tempfile::tempdir().unwrap();
    let logger = AuditLogger::new(dir.path());
    let day = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap().date_naive();
    assert!(logger.read_day(day).unwrap().is_empty());
}
