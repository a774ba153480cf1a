use railhead::{
    ConfigError,
    configs::{PluginRef, selection, validate_selection},
};

#[test]
fn test_wildcard_token_parses_to_all() {
    assert_eq!(PluginRef::from("all"), PluginRef::All);
    assert_eq!(
        PluginRef::from("stubby"),
        PluginRef::Named("stubby".to_string())
    );
    assert_eq!(PluginRef::All.to_string(), "all");
}

#[test]
fn test_valid_selections() {
    assert!(validate_selection(&[]).is_ok());
    assert!(validate_selection(&selection(["a", "all", "b"])).is_ok());
}

#[test]
fn test_repeated_wildcard() {
    assert_eq!(
        validate_selection(&selection(["all", "a", "all"])),
        Err(ConfigError::RepeatedWildcard)
    );
}

#[test]
fn test_duplicate_name() {
    assert_eq!(
        validate_selection(&selection(["a", "b", "a"])),
        Err(ConfigError::DuplicatePlugin("a".to_string()))
    );
}

#[test]
fn test_selection_deserializes_from_strings() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        plugins: Vec<PluginRef>,
    }

    let wrapper: Wrapper = toml::from_str("plugins = [\"stubby\", \"all\"]").unwrap();
    assert_eq!(wrapper.plugins, selection(["stubby", "all"]));
}
