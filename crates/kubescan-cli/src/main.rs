//! kubescan CLI binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kubescan_cli::cli::{Cli, Commands};
use kubescan_cli::commands::{CleanCommand, DiffCommand, HistoryCommand, ScanCommand};
use kubescan_cli::output::OutputFormat;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), kubescan_cli::CliError> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Scan(args) => {
            let cmd = ScanCommand::new(&cli.outdir);
            cmd.execute(&mut stdout, &format, &args).await?;
        }
        Commands::History => {
            let cmd = HistoryCommand::new(&cli.outdir);
            cmd.execute(&mut stdout, &format)?;
        }
        Commands::Diff(args) => {
            let cmd = DiffCommand::new(&cli.outdir);
            cmd.execute(&mut stdout, &format, &args)?;
        }
        Commands::Clean(args) => {
            let cmd = CleanCommand::new();
            cmd.execute(&mut stdout, &format, &args).await?;
        }
    }

    Ok(())
}
