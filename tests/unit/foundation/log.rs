use super::*;

#[test]
fn memory_log_records_in_order() {
    let log = MemoryLog::new();
    log.info("first");
    log.warn("second");
    log.error("third");

    let records = log.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].level, LogLevel::Info);
    assert_eq!(records[1].message, "second");
    assert!(log.contains(LogLevel::Error, "thi"));
    assert!(!log.contains(LogLevel::Info, "third"));
    assert_eq!(log.count(LogLevel::Warn), 1);
}

#[test]
fn channel_log_delivers_to_receiver() {
    let (tx, rx) = std::sync::mpsc::channel();
    let log = ChannelLog::new(tx);
    log.info("hello");
    log.debug("details");

    let got: Vec<LogRecord> = rx.try_iter().collect();
    assert_eq!(got.len(), 2);
    assert_eq!(got[0].to_string(), "INFO: hello");
    assert_eq!(got[1].level, LogLevel::Debug);
}

#[test]
fn channel_log_ignores_closed_receiver() {
    let (tx, rx) = std::sync::mpsc::channel();
    drop(rx);
    let log = ChannelLog::new(tx);
    log.error("nobody listens");
}

#[test]
fn log_levels_order_by_severity() {
    assert!(LogLevel::Debug < LogLevel::Info);
    assert!(LogLevel::Warn < LogLevel::Error);
}
