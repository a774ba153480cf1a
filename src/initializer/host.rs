use serde::Serialize;

use crate::{
    configs::{Configuration, Framework},
    error::LoadError,
};

/// Session store backed by the record layer. Database middleware goes in
/// front of it when it is the configured store.
pub const RECORD_SESSION_STORE: &str = "ActiveRecord::SessionStore";
pub const CONNECTION_MANAGEMENT: &str = "ActiveRecord::ConnectionAdapters::ConnectionManagement";
pub const QUERY_CACHE: &str = "ActiveRecord::QueryCache";

/// Framework components that keep a view-path cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewConsumer {
    Controller,
    Mailer,
}

/// The request middleware stack. Boot only ever adds to it.
pub trait Middleware {
    fn insert_before(&mut self, anchor: &str, component: &str);
    fn append(&mut self, component: &str);
}

/// Subsystems the boot pipeline configures but does not implement.
pub trait Host {
    /// Loads the library of a recognized framework.
    fn require_framework(&mut self, framework: Framework) -> Result<(), LoadError>;

    fn reload_view_paths(&mut self, consumer: ViewConsumer);

    /// Name of the configured session store.
    fn session_store(&self) -> &str;

    /// Whether every gem and plugin dependency is satisfied. Gates
    /// `after_initialize`.
    fn dependencies_loaded(&self) -> bool;

    fn middleware(&mut self) -> &mut dyn Middleware;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MiddlewareStack {
    components: Vec<String>,
}

impl MiddlewareStack {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }
}

impl Middleware for MiddlewareStack {
    fn insert_before(&mut self, anchor: &str, component: &str) {
        match self.components.iter().position(|existing| existing == anchor) {
            Some(index) => self.components.insert(index, component.to_string()),
            None => {
                tracing::warn!(
                    "Middleware anchor '{}' not in stack, appending '{}'",
                    anchor,
                    component
                );
                self.components.push(component.to_string());
            }
        }
    }

    fn append(&mut self, component: &str) {
        self.components.push(component.to_string());
    }
}

/// In-process host used by the CLI: framework libraries are linked in, view
/// reloads are recorded and the middleware stack starts with the
/// configured session store.
#[derive(Debug, Clone)]
pub struct StandaloneHost {
    session_store: String,
    middleware: MiddlewareStack,
    view_reloads: Vec<ViewConsumer>,
}

impl StandaloneHost {
    pub fn new(config: &Configuration) -> Self {
        Self {
            session_store: config.session_store.clone(),
            middleware: MiddlewareStack::new([config.session_store.as_str()]),
            view_reloads: Vec::new(),
        }
    }

    pub fn middleware_stack(&self) -> &MiddlewareStack {
        &self.middleware
    }

    pub fn view_reloads(&self) -> &[ViewConsumer] {
        &self.view_reloads
    }
}

impl Host for StandaloneHost {
    fn require_framework(&mut self, framework: Framework) -> Result<(), LoadError> {
        tracing::debug!("Requiring framework {}", framework);
        Ok(())
    }

    fn reload_view_paths(&mut self, consumer: ViewConsumer) {
        tracing::debug!("Reloading view paths for {:?}", consumer);
        self.view_reloads.push(consumer);
    }

    fn session_store(&self) -> &str {
        &self.session_store
    }

    fn dependencies_loaded(&self) -> bool {
        true
    }

    fn middleware(&mut self) -> &mut dyn Middleware {
        &mut self.middleware
    }
}
