use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "railhead")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Specify a custom config path to use with this instance
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Application root (overrides root_path from the config)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Environment name (overrides the config and RAILHEAD_ENV)
    #[arg(long, global = true, value_name = "NAME")]
    pub env: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Boot the application (default)
    Boot {
        /// Run only this step
        #[arg(long, value_name = "STEP", conflicts_with = "until")]
        step: Option<String>,

        /// Run every step up to and including this one
        #[arg(long, value_name = "STEP")]
        until: Option<String>,

        /// Print the boot report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the initializer steps in boot order
    Steps,
    /// List the plugins that would load, in load order
    Plugins,
    /// Validate a config file
    Validate {
        /// Config file to validate (defaults to the discovered one)
        #[arg(value_name = "PATH")]
        config: Option<PathBuf>,
    },
    /// Scaffold a new application
    Init {
        /// Directory to create the application in
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
