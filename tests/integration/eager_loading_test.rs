//! Integration tests for eager loading of application classes

use railhead::{BootError, Initializer, registry};
use serial_test::serial;

use crate::common::{RecordingHost, TestFixture};

fn load_classes(fixture: &TestFixture, cache_classes: bool) -> Result<(), BootError> {
    let mut config = fixture.config();
    config.cache_classes = cache_classes;
    let mut host = RecordingHost::new();

    let mut initializer = Initializer::new().unwrap();
    initializer.run_step("load_application_classes", &mut config, &mut host)
}

#[test]
#[serial]
fn test_nothing_loads_without_cache_classes() {
    registry::reset();
    let fixture = TestFixture::new();
    fixture.create_file("app/models/user.lua", r#"boot.define_class("User")"#);

    load_classes(&fixture, false).unwrap();

    assert!(registry::defined_classes().is_empty());
}

#[test]
#[serial]
fn test_subclass_sorting_before_parent_still_loads() {
    registry::reset();
    let fixture = TestFixture::new();
    fixture.create_file(
        "app/models/admin.lua",
        r#"boot.define_class("Admin", "User")"#,
    );
    fixture.create_file(
        "app/models/user.lua",
        r#"boot.define_class("User", "ApplicationRecord")"#,
    );
    fixture.create_file(
        "app/models/application_record.lua",
        r#"boot.define_class("ApplicationRecord")"#,
    );

    load_classes(&fixture, true).unwrap();

    assert_eq!(
        registry::defined_classes(),
        ["ApplicationRecord", "User", "Admin"]
    );
}

#[test]
#[serial]
fn test_nested_directories_load() {
    registry::reset();
    let fixture = TestFixture::new();
    fixture.create_file(
        "app/controllers/admin/users_controller.lua",
        r#"boot.define_class("Admin::UsersController")"#,
    );
    fixture.create_file(
        "app/helpers/application_helper.lua",
        r#"boot.define_class("ApplicationHelper")"#,
    );

    load_classes(&fixture, true).unwrap();

    assert_eq!(
        registry::defined_classes(),
        ["Admin::UsersController", "ApplicationHelper"]
    );
}

#[test]
#[serial]
fn test_unresolvable_superclass_fails() {
    registry::reset();
    let fixture = TestFixture::new();
    let file = fixture.create_file(
        "app/models/orphan.lua",
        r#"boot.define_class("Orphan", "Missing")"#,
    );

    let result = load_classes(&fixture, true);

    match result {
        Err(BootError::MissingConstant { name, file: failed }) => {
            assert_eq!(name, "Missing");
            assert_eq!(failed, file);
        }
        other => panic!("expected MissingConstant, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_files_load_once() {
    registry::reset();
    let fixture = TestFixture::new();
    fixture.create_file(
        "app/models/counter.lua",
        "LOADS = (LOADS or 0) + 1\nboot.define_class('Counter' .. LOADS)",
    );

    let mut config = fixture.config();
    config.cache_classes = true;
    let mut host = RecordingHost::new();
    let mut initializer = Initializer::new().unwrap();
    initializer
        .run_step("load_application_classes", &mut config, &mut host)
        .unwrap();
    initializer
        .run_step("load_application_classes", &mut config, &mut host)
        .unwrap();

    assert_eq!(registry::defined_classes(), ["Counter1"]);
}

#[test]
#[serial]
fn test_script_errors_are_not_retried() {
    registry::reset();
    let fixture = TestFixture::new();
    fixture.create_file("app/models/broken.lua", "this is not lua");

    let result = load_classes(&fixture, true);

    assert!(matches!(result, Err(BootError::Script { .. })));
}

#[test]
#[serial]
fn test_caught_define_class_failure_does_not_mask_later_errors() {
    registry::reset();
    let fixture = TestFixture::new();
    let file = fixture.create_file(
        "app/models/careful.lua",
        "pcall(boot.define_class, 'Careful', 'Missing')\nerror('broken model')",
    );

    let result = load_classes(&fixture, true);

    match result {
        Err(BootError::Script { path, .. }) => assert_eq!(path, file),
        other => panic!("expected Script error, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_caught_define_class_failure_lets_the_file_load() {
    registry::reset();
    let fixture = TestFixture::new();
    fixture.create_file(
        "app/models/fallback.lua",
        "if not pcall(boot.define_class, 'Fallback', 'Missing') then\n  boot.define_class('Fallback')\nend",
    );

    load_classes(&fixture, true).unwrap();

    assert_eq!(registry::defined_classes(), ["Fallback"]);
}
