use railhead::{BootError, error::to_sentence};

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[test]
fn test_to_sentence() {
    assert_eq!(to_sentence(&[]), "");
    assert_eq!(to_sentence(&words(&["a"])), "a");
    assert_eq!(to_sentence(&words(&["a", "b"])), "a and b");
    assert_eq!(to_sentence(&words(&["a", "b", "c"])), "a, b, and c");
}

#[test]
fn test_missing_plugins_message() {
    let error = BootError::MissingPlugins {
        missing: words(&["non_existant_plugin1", "non_existant_plugin2"]),
    };
    assert_eq!(
        error.to_string(),
        "Could not locate the following plugins: non_existant_plugin1 and non_existant_plugin2"
    );
}
