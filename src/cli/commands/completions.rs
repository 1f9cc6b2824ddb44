use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;

/// Execute the completions command: print a completion script to stdout.
pub fn execute(shell: Shell) {
    let mut command = Cli::command();
    generate(shell, &mut command, "ct", &mut std::io::stdout());
}
