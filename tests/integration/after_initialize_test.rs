//! Integration tests for after_initialize callbacks

use railhead::Initializer;
use std::sync::{Arc, Mutex};

use crate::common::{RecordingHost, TestFixture};

fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> railhead::configs::Callback) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let handle = Arc::clone(&calls);
    let make = move |label: &'static str| -> railhead::configs::Callback {
        let calls = Arc::clone(&handle);
        Box::new(move || calls.lock().unwrap().push(label))
    };
    (calls, make)
}

#[test]
fn test_callbacks_fire_in_registration_order() {
    let fixture = TestFixture::new();
    let mut config = fixture.config();
    let (calls, callback) = recorder();
    config
        .after_initialize(Some(callback("first")))
        .after_initialize(Some(callback("second")))
        .after_initialize(Some(callback("third")));
    let mut host = RecordingHost::new();

    let mut initializer = Initializer::new().unwrap();
    initializer
        .run_step("after_initialize", &mut config, &mut host)
        .unwrap();

    assert_eq!(*calls.lock().unwrap(), ["first", "second", "third"]);
}

#[test]
fn test_registering_nothing_is_a_no_op() {
    let fixture = TestFixture::new();
    let mut config = fixture.config();
    config.after_initialize(None);
    let mut host = RecordingHost::new();

    let mut initializer = Initializer::new().unwrap();
    initializer
        .run_step("after_initialize", &mut config, &mut host)
        .unwrap();

    assert!(config.after_initialize_callbacks.is_empty());
}

#[test]
fn test_nothing_fires_when_dependencies_are_not_loaded() {
    let fixture = TestFixture::new();
    let mut config = fixture.config();
    let (calls, callback) = recorder();
    config.after_initialize(Some(callback("never")));
    let mut host = RecordingHost::new();
    host.dependencies_loaded = false;

    let mut initializer = Initializer::new().unwrap();
    initializer
        .run_step("after_initialize", &mut config, &mut host)
        .unwrap();

    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(config.after_initialize_callbacks.len(), 1);
}
