//! Integration tests for the Railhead boot pipeline and CLI
//!
//! These tests drive the public API and the binary the way an embedding
//! application would.

mod after_initialize_test;
mod eager_loading_test;
mod plugin_loading_test;
mod view_paths_test;
