use anyhow::Result;
use clap::Parser;

mod cli_bin;

use cli_bin::args::{Cli, Commands};
use cli_bin::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Tag(args) => commands::tag_command(args)?,
        Commands::Get(args) => commands::get_command(args)?,
        Commands::TagOf(args) => commands::tag_of_command(args)?,
        Commands::Values(args) => commands::values_command(args)?,
        Commands::Keys(args) => commands::keys_command(args)?,
        Commands::Filter(args) => commands::filter_command(args)?,
        Commands::FilterValue(args) => commands::filter_value_command(args)?,
        Commands::Children(args) => commands::children_command(args)?,
    }
    Ok(())
}

/// RUST_LOG wins over the verbosity flags when set
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
