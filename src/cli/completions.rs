use clap::Command;
use clap_complete::{Shell, generate};
use std::io;

const BIN_NAME: &str = "railhead";

/// Writes the completion script for `shell` to stdout.
///
/// ```bash
/// railhead completions zsh > ~/.zfunc/_railhead
/// railhead completions fish > ~/.config/fish/completions/railhead.fish
/// ```
pub fn generate_completions(shell: Shell, cmd: &mut Command) {
    generate(shell, cmd, BIN_NAME, &mut io::stdout());
}
