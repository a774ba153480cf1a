mod deep_merge_test;
mod error_test;
mod framework_test;
mod plugin_selection_test;
