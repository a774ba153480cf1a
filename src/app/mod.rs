mod report;
mod run;

pub use report::BootReport;
pub use run::run;

use crate::{
    configs::Configuration,
    error::BootResult,
    initializer::{Initializer, StandaloneHost},
};

/// How much of the pipeline a boot runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootTarget {
    All,
    Step(String),
    Until(String),
}

pub struct App {
    pub config: Configuration,
    pub host: StandaloneHost,
    pub initializer: Initializer,
}

impl App {
    pub fn new(config: Configuration) -> BootResult<App> {
        let host = StandaloneHost::new(&config);
        Ok(Self {
            config,
            host,
            initializer: Initializer::new()?,
        })
    }

    pub fn boot(&mut self, target: &BootTarget) -> BootResult<()> {
        match target {
            BootTarget::All => self.initializer.run(&mut self.config, &mut self.host),
            BootTarget::Step(name) => {
                self.initializer
                    .run_step(name, &mut self.config, &mut self.host)
            }
            BootTarget::Until(name) => {
                self.initializer
                    .run_until(name, &mut self.config, &mut self.host)
            }
        }
    }

    pub fn report(&self) -> BootReport {
        BootReport::collect(self)
    }
}
