use super::*;
use std::sync::{Arc, Mutex};

fn create_telemetry(is_verbose: bool) -> (Telemetry, Arc<Mutex<Vec<String>>>) {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = messages.clone();
    let logger: InfoLogger = Arc::new(move |msg: &str| sink.lock().unwrap().push(msg.to_string()));

    (Telemetry::new(logger, is_verbose), messages)
}

#[test]
fn can_log_progress_only_in_verbose_mode() {
    let (silent, silent_messages) = create_telemetry(false);
    let (verbose, verbose_messages) = create_telemetry(true);

    silent.log("round 1");
    verbose.log("round 1");

    assert!(silent_messages.lock().unwrap().is_empty());
    let verbose_messages = verbose_messages.lock().unwrap();
    assert_eq!(verbose_messages.len(), 1);
    assert!(verbose_messages[0].ends_with("ms] round 1"));
}

#[test]
fn can_always_write_warnings() {
    let (telemetry, messages) = create_telemetry(false);

    telemetry.warn("no convergence");

    let messages = messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with('['));
    assert!(messages[0].ends_with("warning: no convergence"));
    assert!(!telemetry.is_verbose());
}
