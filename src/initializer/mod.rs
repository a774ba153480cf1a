//! The boot pipeline: an ordered registry of named steps run against one
//! [`Configuration`].
//!
//! Steps can run in full ([`Initializer::run`]), as an inclusive prefix
//! ([`Initializer::run_until`]) or one at a time ([`Initializer::run_step`]).
//! Running a single step never runs the steps before it; callers establish
//! its preconditions themselves.

mod eager_load;
mod host;
mod steps;

use std::collections::HashMap;

use mlua::Lua;

pub use eager_load::eager_load;
pub use host::{
    CONNECTION_MANAGEMENT, Host, Middleware, MiddlewareStack, QUERY_CACHE, RECORD_SESSION_STORE,
    StandaloneHost, ViewConsumer,
};

use crate::{
    configs::Configuration,
    error::{BootError, BootResult},
    lua::create_lua_vm,
};

pub type StepFn = Box<dyn Fn(&mut Boot<'_>) -> BootResult<()>>;

/// What a step receives: the configuration, the host collaborators and the
/// state shared by every step of this initializer.
pub struct Boot<'a> {
    pub config: &'a mut Configuration,
    pub host: &'a mut dyn Host,
    pub state: &'a mut BootState,
}

/// State accumulated across the steps of one initializer.
pub struct BootState {
    lua: Lua,
    environment_loaded: bool,
    completed: Vec<String>,
}

impl BootState {
    pub fn new() -> BootResult<Self> {
        Ok(Self {
            lua: create_lua_vm().map_err(BootError::Runtime)?,
            environment_loaded: false,
            completed: Vec::new(),
        })
    }

    /// Script runtime shared by environment, initializer, plugin and class
    /// files.
    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    pub fn environment_loaded(&self) -> bool {
        self.environment_loaded
    }

    /// Names of the steps that completed, in completion order.
    pub fn completed_steps(&self) -> &[String] {
        &self.completed
    }
}

struct Step {
    name: String,
    run: StepFn,
}

pub struct Initializer {
    steps: Vec<Step>,
    index: HashMap<String, usize>,
    state: BootState,
}

impl Initializer {
    /// An initializer with the built-in steps registered in boot order.
    pub fn new() -> BootResult<Self> {
        let mut initializer = Self::empty()?;
        for (name, step) in steps::DEFAULT_STEPS {
            initializer.register(name, step)?;
        }
        Ok(initializer)
    }

    pub fn empty() -> BootResult<Self> {
        Ok(Self {
            steps: Vec::new(),
            index: HashMap::new(),
            state: BootState::new()?,
        })
    }

    /// Appends a step to the end of the pipeline.
    pub fn register<F>(&mut self, name: &str, step: F) -> BootResult<&mut Self>
    where
        F: Fn(&mut Boot<'_>) -> BootResult<()> + 'static,
    {
        if self.index.contains_key(name) {
            return Err(BootError::DuplicateStep(name.to_string()));
        }

        self.index.insert(name.to_string(), self.steps.len());
        self.steps.push(Step {
            name: name.to_string(),
            run: Box::new(step),
        });
        Ok(self)
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name.as_str()).collect()
    }

    pub fn state(&self) -> &BootState {
        &self.state
    }

    /// Runs every step in registration order, stopping at the first failure.
    pub fn run(&mut self, config: &mut Configuration, host: &mut dyn Host) -> BootResult<()> {
        self.execute(0, self.steps.len(), config, host)
    }

    /// Runs exactly the step called `name`.
    pub fn run_step(
        &mut self,
        name: &str,
        config: &mut Configuration,
        host: &mut dyn Host,
    ) -> BootResult<()> {
        let position = self.position(name)?;
        self.execute(position, position + 1, config, host)
    }

    /// Runs every step from the start up to and including `name`.
    pub fn run_until(
        &mut self,
        name: &str,
        config: &mut Configuration,
        host: &mut dyn Host,
    ) -> BootResult<()> {
        let position = self.position(name)?;
        self.execute(0, position + 1, config, host)
    }

    fn position(&self, name: &str) -> BootResult<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| BootError::UnknownStep(name.to_string()))
    }

    fn execute(
        &mut self,
        start: usize,
        end: usize,
        config: &mut Configuration,
        host: &mut dyn Host,
    ) -> BootResult<()> {
        for step in &self.steps[start..end] {
            tracing::info!("Running initializer step {}", step.name);

            let mut boot = Boot {
                config: &mut *config,
                host: &mut *host,
                state: &mut self.state,
            };

            if let Err(error) = (step.run)(&mut boot) {
                tracing::error!("Initializer step {} failed: {}", step.name, error);
                return Err(error);
            }

            self.state.completed.push(step.name.clone());
        }

        Ok(())
    }
}
