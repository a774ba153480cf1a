use toml::{Table, Value};

/// Recursively merges `overlay` into `base`.
///
/// Keys present in both are merged when both values are tables; any other
/// collision is resolved in favor of `overlay`. Arrays are replaced, not
/// concatenated.
pub fn deep_merge(base: &mut Table, overlay: &Table) {
    for (key, value) in overlay {
        match (base.get_mut(key), value) {
            (Some(Value::Table(existing)), Value::Table(incoming)) => {
                deep_merge(existing, incoming);
            }
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Merges `settings` into the table stored under `namespace`, creating it
/// when absent. A non-table value already stored under `namespace` is
/// replaced.
pub fn merge_namespace(target: &mut Table, namespace: &str, settings: &Table) {
    let entry = target
        .entry(namespace.to_string())
        .or_insert(Value::Table(Table::new()));

    match entry {
        Value::Table(existing) => deep_merge(existing, settings),
        other => *other = Value::Table(settings.clone()),
    }
}
