use railhead::configs::Framework;

#[test]
fn test_identifiers_round_trip() {
    for framework in Framework::ALL {
        assert_eq!(framework.as_str().parse::<Framework>(), Ok(framework));
        assert_eq!(framework.to_string(), framework.as_str());
    }
}

#[test]
fn test_unknown_identifier_is_returned_as_error() {
    assert_eq!(
        "action_smoke_signal".parse::<Framework>(),
        Err("action_smoke_signal".to_string())
    );
}

#[test]
fn test_library_dirs() {
    assert_eq!(Framework::ActiveRecord.library_dir(), "activerecord/lib");
    assert_eq!(Framework::ActionWebService.library_dir(), "actionwebservice/lib");
    assert_eq!(Framework::ActionController.library_dir(), "actionpack/lib");
    assert_eq!(Framework::ActionView.library_dir(), "actionpack/lib");
}

#[test]
fn test_deserializes_from_snake_case() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        framework: Framework,
    }

    let wrapper: Wrapper = toml::from_str("framework = \"action_mailer\"").unwrap();
    assert_eq!(wrapper.framework, Framework::ActionMailer);
}
