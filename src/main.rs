//! CLI entry point and command dispatch for dampener.

mod cli;
mod cmd;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

use cli::{Cli, Commands};
use cmd::ui::Output;

fn main() {
    let cli = Cli::parse();

    let config = match cmd::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            Output::new(cmd::ui::OutputMode::Human).error(&format!("{:#}", err));
            std::process::exit(2);
        }
    };

    let mode = cmd::output_mode(cli.quiet, cli.json, &config);
    let verbose = matches!(cli.command, Commands::Check { verbose: true, .. });
    let output = Output::new(mode).verbose(verbose);

    if let Err(err) = run(cli.command, &config, &output) {
        output.error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &dampener::config::Config, output: &Output) -> Result<()> {
    match command {
        Commands::Check {
            file,
            skip_invalid,
            budget,
            verbose: _,
        } => cmd::check::cmd_check(config, output, file.as_deref(), skip_invalid, &budget),
        Commands::Explain { levels, budget } => {
            cmd::explain::cmd_explain(config, output, levels, budget)
        }
        Commands::Distance { file } => cmd::distance::cmd_distance(config, output, file.as_deref()),
        Commands::Scan { file } => cmd::scan::cmd_scan(config, output, file.as_deref()),
        Commands::Completion { shell } => cmd_completion(shell),
        Commands::Version { verbose } => cmd_version(verbose),
    }
}

fn cmd_completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "dampener", &mut io::stdout());
    Ok(())
}

fn cmd_version(verbose: bool) -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    println!("dampener {}", VERSION);

    if verbose {
        const COMMIT: &str = env!("DAMPENER_COMMIT");
        const BUILD_DATE: &str = env!("DAMPENER_BUILD_DATE");
        println!("commit: {}", COMMIT);
        println!("built: {}", BUILD_DATE);
    }

    Ok(())
}
