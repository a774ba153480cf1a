use railhead::configs::{deep_merge, merge::merge_namespace};

use crate::common::table;

#[test]
fn test_disjoint_keys_are_combined() {
    let mut base = table("a = 1");
    deep_merge(&mut base, &table("b = 2"));
    assert_eq!(base, table("a = 1\nb = 2"));
}

#[test]
fn test_scalar_collision_takes_overlay_value() {
    let mut base = table("a = 1");
    deep_merge(&mut base, &table("a = 2"));
    assert_eq!(base, table("a = 2"));
}

#[test]
fn test_nested_tables_merge_at_every_level() {
    let mut base = table("[x.y]\na = 1\nb = 1");
    deep_merge(&mut base, &table("[x.y]\nb = 2\n[x.z]\nc = 3"));
    assert_eq!(base, table("[x.y]\na = 1\nb = 2\n[x.z]\nc = 3"));
}

#[test]
fn test_arrays_are_replaced() {
    let mut base = table("list = [1, 2]");
    deep_merge(&mut base, &table("list = [3]"));
    assert_eq!(base, table("list = [3]"));
}

#[test]
fn test_table_replaces_scalar_and_back() {
    let mut base = table("a = 1");
    deep_merge(&mut base, &table("[a]\nb = 2"));
    assert_eq!(base, table("[a]\nb = 2"));

    deep_merge(&mut base, &table("a = \"flat\""));
    assert_eq!(base, table("a = \"flat\""));
}

#[test]
fn test_merge_namespace_creates_missing_namespace() {
    let mut target = toml::Table::new();
    merge_namespace(&mut target, "x", &table("a = 1"));
    merge_namespace(&mut target, "x", &table("b = 2"));
    assert_eq!(target, table("[x]\na = 1\nb = 2"));
}
