//! Integration tests for view path reloading

use railhead::{Initializer, configs::Framework, initializer::ViewConsumer};

use crate::common::{RecordingHost, TestFixture};

fn reloads_for(frameworks: &[Framework]) -> Vec<ViewConsumer> {
    let fixture = TestFixture::new();
    let mut config = fixture.config();
    config.set_frameworks(frameworks.iter().copied());
    let mut host = RecordingHost::new();

    let mut initializer = Initializer::new().unwrap();
    initializer
        .run_step("load_view_paths", &mut config, &mut host)
        .unwrap();
    host.view_reloads
}

#[test]
fn test_without_view_layer_nothing_reloads() {
    assert!(reloads_for(&[Framework::ActionController, Framework::ActionMailer]).is_empty());
    assert!(reloads_for(&[]).is_empty());
}

#[test]
fn test_controller_and_mailer_views_reload() {
    assert_eq!(
        reloads_for(&[
            Framework::ActionView,
            Framework::ActionController,
            Framework::ActionMailer
        ]),
        [ViewConsumer::Controller, ViewConsumer::Mailer]
    );
}

#[test]
fn test_only_active_consumers_reload() {
    assert_eq!(
        reloads_for(&[Framework::ActionView, Framework::ActionMailer]),
        [ViewConsumer::Mailer]
    );
    assert!(reloads_for(&[Framework::ActionView]).is_empty());
}
