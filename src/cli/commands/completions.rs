//! Completions command - print a shell completion script for kbindex

use crate::cli::Cli;
use clap::{Args, CommandFactory};
use clap_complete::Shell;

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the completions command
pub fn execute(args: CompletionsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();
    let mut stdout = std::io::stdout().lock();
    clap_complete::generate(args.shell, &mut command, bin_name, &mut stdout);
    Ok(())
}
