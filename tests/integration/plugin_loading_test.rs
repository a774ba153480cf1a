//! Integration tests for plugin discovery, selection and loading

use railhead::{
    BootError, ConfigError, Initializer, PluginLocator,
    configs::selection,
    plugins::LocateError,
    registry,
};
use serial_test::serial;

use crate::common::{RecordingHost, TestFixture};

fn fixture_with_plugins() -> TestFixture {
    let fixture = TestFixture::new();
    fixture.create_plugin("a");
    fixture.create_plugin("acts_as_chunky_bacon");
    fixture.create_plugin("engine");
    fixture.create_plugin("gemlike");
    fixture.create_plugin("localized");
    fixture.create_plugin("stubby");
    fixture
}

fn load_with(fixture: &TestFixture, names: Option<&[&str]>) -> (Vec<String>, Result<(), BootError>) {
    registry::reset();
    let mut config = fixture.config();
    if let Some(names) = names {
        config.only_load_plugins(names.iter().copied());
    }
    let mut host = RecordingHost::new();

    let mut initializer = Initializer::new().unwrap();
    let result = initializer.run_step("load_plugins", &mut config, &mut host);
    (config.loaded_plugin_names(), result)
}

// ============================================================================
// Selection
// ============================================================================

#[test]
#[serial]
fn test_all_plugins_load_in_discovery_order_by_default() {
    let fixture = fixture_with_plugins();
    let (loaded, result) = load_with(&fixture, None);

    result.unwrap();
    assert_eq!(
        loaded,
        [
            "a",
            "acts_as_chunky_bacon",
            "engine",
            "gemlike",
            "localized",
            "stubby"
        ]
    );
}

#[test]
#[serial]
fn test_empty_selection_loads_nothing() {
    let fixture = fixture_with_plugins();
    let (loaded, result) = load_with(&fixture, Some(&[]));

    result.unwrap();
    assert!(loaded.is_empty());
}

#[test]
#[serial]
fn test_explicit_selection_loads_in_listed_order() {
    let fixture = fixture_with_plugins();
    let (loaded, result) = load_with(&fixture, Some(&["stubby", "acts_as_chunky_bacon"]));

    result.unwrap();
    assert_eq!(loaded, ["stubby", "acts_as_chunky_bacon"]);
}

#[test]
#[serial]
fn test_wildcard_expands_to_remaining_plugins() {
    let fixture = fixture_with_plugins();
    let (loaded, result) = load_with(&fixture, Some(&["stubby", "all", "acts_as_chunky_bacon"]));

    result.unwrap();
    assert_eq!(
        loaded,
        [
            "stubby",
            "a",
            "engine",
            "gemlike",
            "localized",
            "acts_as_chunky_bacon"
        ]
    );
}

#[test]
#[serial]
fn test_wildcard_alone_loads_everything() {
    let fixture = fixture_with_plugins();
    let (all, _) = load_with(&fixture, None);
    let (loaded, result) = load_with(&fixture, Some(&["all"]));

    result.unwrap();
    assert_eq!(loaded, all);
}

#[test]
#[serial]
fn test_missing_plugin_error_names_only_missing_plugins() {
    let fixture = fixture_with_plugins();
    let (loaded, result) = load_with(
        &fixture,
        Some(&["stubby", "non_existant_plugin1", "non_existant_plugin2"]),
    );

    let error = result.unwrap_err();
    let message = error.to_string();
    assert_eq!(
        message,
        "Could not locate the following plugins: non_existant_plugin1 and non_existant_plugin2"
    );
    assert!(!message.contains("stubby"));
    assert_eq!(loaded, ["stubby"]);
}

#[test]
#[serial]
fn test_repeated_wildcard_is_a_config_error() {
    let fixture = fixture_with_plugins();
    let (loaded, result) = load_with(&fixture, Some(&["all", "stubby", "all"]));

    assert!(matches!(
        result,
        Err(BootError::Config(ConfigError::RepeatedWildcard))
    ));
    assert!(loaded.is_empty());
}

#[test]
#[serial]
fn test_duplicate_plugin_name_is_a_config_error() {
    let fixture = fixture_with_plugins();
    let (_, result) = load_with(&fixture, Some(&["stubby", "stubby"]));

    assert!(matches!(
        result,
        Err(BootError::Config(ConfigError::DuplicatePlugin(name))) if name == "stubby"
    ));
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_nested_directories_are_searched() {
    let fixture = TestFixture::new();
    fixture.create_dir("vendor/plugins/group/inner_plugin/lib");
    fixture.create_file("vendor/plugins/group/README", "not a plugin");
    fixture.create_file("vendor/plugins/init_only/init.lua", "");

    let locator = PluginLocator::new(vec![fixture.path("vendor/plugins")]);
    let discovered = locator.discover().unwrap();

    let names: Vec<&str> = discovered.keys().map(String::as_str).collect();
    assert_eq!(names, ["inner_plugin", "init_only"]);
}

#[test]
fn test_first_plugin_with_a_name_wins() {
    let fixture = TestFixture::new();
    fixture.create_dir("vendor/plugins/shared/lib");
    fixture.create_dir("extra/shared/lib");

    let locator = PluginLocator::new(vec![fixture.path("vendor/plugins"), fixture.path("extra")]);
    let plugins = locator.locate(None).unwrap();

    assert_eq!(plugins.len(), 1);
    assert_eq!(plugins[0].directory, fixture.path("vendor/plugins/shared"));
}

#[test]
fn test_missing_search_path_is_skipped() {
    let fixture = TestFixture::new();
    fixture.create_dir("vendor/plugins/stubby/lib");

    let locator = PluginLocator::new(vec![fixture.path("nowhere"), fixture.path("vendor/plugins")]);
    let plugins = locator.locate(None).unwrap();

    assert_eq!(plugins.len(), 1);
}

#[test]
fn test_locator_reports_located_and_missing() {
    let fixture = TestFixture::new();
    fixture.create_dir("vendor/plugins/stubby/lib");

    let locator = PluginLocator::new(vec![fixture.path("vendor/plugins")]);
    let result = locator.locate(Some(selection(["ghost", "stubby"]).as_slice()));

    match result {
        Err(LocateError::Missing { located, missing }) => {
            assert_eq!(located.len(), 1);
            assert_eq!(located[0].name, "stubby");
            assert_eq!(missing, ["ghost"]);
        }
        other => panic!("expected Missing, got {:?}", other),
    }
}

// ============================================================================
// init.lua
// ============================================================================

#[test]
#[serial]
fn test_plugin_init_runs_with_plugin_context() {
    let fixture = TestFixture::new();
    fixture.create_plugin_with_init(
        "stubby",
        r#"boot.define_class("Stubby" .. string.upper(boot.plugin.name:sub(1, 1)))"#,
    );

    let (loaded, result) = load_with(&fixture, None);

    result.unwrap();
    assert_eq!(loaded, ["stubby"]);
    assert!(registry::is_class_defined("StubbyS"));
}

#[test]
#[serial]
fn test_plugin_init_error_stops_loading() {
    let fixture = TestFixture::new();
    fixture.create_plugin_with_init("a_broken", "error('boom')");
    fixture.create_plugin("b_fine");

    let (loaded, result) = load_with(&fixture, None);

    assert!(matches!(result, Err(BootError::Script { .. })));
    assert!(loaded.is_empty());
}

#[test]
#[serial]
fn test_plugins_load_once_per_configuration() {
    registry::reset();
    let fixture = TestFixture::new();
    fixture.create_plugin_with_init(
        "counter",
        "COUNT = (COUNT or 0) + 1\nboot.define_class('Counted' .. COUNT)",
    );
    let mut config = fixture.config();
    let mut host = RecordingHost::new();

    let mut initializer = Initializer::new().unwrap();
    initializer
        .run_step("load_plugins", &mut config, &mut host)
        .unwrap();
    initializer
        .run_step("load_plugins", &mut config, &mut host)
        .unwrap();

    assert_eq!(config.loaded_plugin_names(), ["counter"]);
    assert!(registry::is_class_defined("Counted1"));
    assert!(!registry::is_class_defined("Counted2"));
}
