use clap::Parser as ClapParser;

#[path = "main/cli.rs"]
mod cli;
#[path = "main/commands.rs"]
mod commands;
#[path = "main/shared.rs"]
mod shared;

use cli::{Cli, Commands};

fn main() {
    shared::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rewrite {
            file,
            output,
            options,
        } => commands::cmd_rewrite(&file, output.as_deref(), options.into()),
        Commands::Check { file, options } => commands::cmd_check(&file, options.into()),
    }
}
