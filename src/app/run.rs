use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::{env, path::PathBuf};

use crate::{
    app::{App, BootTarget},
    cli::{
        Args, Commands, completions::generate_completions, init::create_app_scaffold,
        list_plugins, validate::validate_config_cli,
    },
    configs::{
        Configuration, expand_path, find_config_file, get_default_config_dir, load_config,
        paths::RAILHEAD_CONFIG_NAME, validate_config,
    },
    initializer::Initializer,
    logging::setup_logging,
};

/// Environment variable selecting the environment when `--env` is absent.
pub const ENV_VAR: &str = "RAILHEAD_ENV";

/// Main entry point for the Railhead binary.
///
/// Parses arguments, sets up logging, then either handles a subcommand that
/// needs no boot (`init`, `completions`, `validate`, `steps`, `plugins`) or
/// boots the application and prints a report. Running without a subcommand
/// is the same as `railhead boot`.
///
/// # Errors
///
/// Returns an error when the config cannot be found, parsed or validated, or
/// when a boot step fails. The failing step is logged before the error is
/// returned.
pub fn run() -> Result<()> {
    let cli_args = Args::parse();

    setup_logging(cli_args.verbose)?;

    if handle_cli_commands(&cli_args)? {
        return Ok(());
    }

    let (target, json) = match &cli_args.command {
        Some(Commands::Boot { step, until, json }) => (boot_target(step, until), *json),
        _ => (BootTarget::All, false),
    };

    boot_and_report(&cli_args, &target, json)
}

fn boot_target(step: &Option<String>, until: &Option<String>) -> BootTarget {
    match (step, until) {
        (Some(step), _) => BootTarget::Step(step.clone()),
        (None, Some(until)) => BootTarget::Until(until.clone()),
        (None, None) => BootTarget::All,
    }
}

fn boot_and_report(cli_args: &Args, target: &BootTarget, json: bool) -> Result<()> {
    let config = handle_config(cli_args)?;

    let mut app = App::new(config).context("Failed to create the boot pipeline")?;
    app.boot(target).context("Boot failed")?;

    let report = app.report();
    if json {
        let rendered =
            serde_json::to_string_pretty(&report).context("Failed to serialize boot report")?;
        println!("{}", rendered);
    } else {
        print!("{}", report.render());
    }

    Ok(())
}

// Loads the boot config and applies CLI overrides.
// Search order: --config, <root>/boot.toml, then the XDG config dir. Without
// any file the built-in defaults apply. --root wins over root_path, and
// --env over RAILHEAD_ENV over the file's environment.
fn handle_config(cli_args: &Args) -> Result<Configuration> {
    let root = match &cli_args.root {
        Some(root) => Some(expand_path(root.clone()).context("Failed to expand --root")?),
        None => None,
    };
    let search_root = root.clone().unwrap_or_else(|| PathBuf::from("."));

    let cli_config = match &cli_args.config {
        Some(path) => Some(expand_path(path.clone()).context("Failed to expand --config")?),
        None => None,
    };

    let mut config = match find_config_file(cli_config, &search_root)? {
        Some(path) => {
            tracing::info!("Using config {}", path.display());
            load_config(path)?
        }
        None => {
            tracing::info!("No {} found, using defaults", RAILHEAD_CONFIG_NAME);
            Configuration::default()
        }
    };

    if let Some(root) = root {
        config.root_path = root;
    }

    if let Some(environment) = &cli_args.env {
        config.environment = environment.clone();
    } else if let Ok(environment) = env::var(ENV_VAR)
        && !environment.is_empty()
    {
        config.environment = environment;
    }

    validate_config(&config)?;

    Ok(config)
}

// Handles subcommands that never boot.
// Returns Ok(true) if the subcommand was handled and the process should exit.
fn handle_cli_commands(cli_args: &Args) -> Result<bool> {
    let Some(command) = &cli_args.command else {
        return Ok(false);
    };

    match command {
        Commands::Boot { .. } => Ok(false),
        Commands::Steps => {
            let initializer = Initializer::new().context("Failed to create the boot pipeline")?;
            for (position, name) in initializer.step_names().iter().enumerate() {
                println!("{:>2}. {}", position + 1, name);
            }
            Ok(true)
        }
        Commands::Plugins => {
            let config = handle_config(cli_args)?;
            list_plugins(&config)?;
            Ok(true)
        }
        Commands::Validate { config } => {
            let explicit = config.clone().or_else(|| cli_args.config.clone());
            let search_root = cli_args.root.clone().unwrap_or_else(|| PathBuf::from("."));
            let config_path = match find_config_file(explicit, &search_root)? {
                Some(path) => path,
                None => {
                    let xdg_path = get_default_config_dir()?.join(RAILHEAD_CONFIG_NAME);
                    anyhow::bail!(
                        "No config file found to validate. Searched:\n  - {}\n  - {:?}",
                        search_root.join(RAILHEAD_CONFIG_NAME).display(),
                        xdg_path
                    );
                }
            };
            validate_config_cli(config_path)?;
            Ok(true)
        }
        Commands::Init { dir } => {
            let dir = expand_path(dir.clone()).context("Failed to expand directory")?;
            create_app_scaffold(&dir)?;
            Ok(true)
        }
        Commands::Completions { shell } => {
            generate_completions(*shell, &mut Args::command());
            Ok(true)
        }
    }
}
