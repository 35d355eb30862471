use clap::Parser;
use tracing_subscriber::EnvFilter;

use provex::cli::{self, Cli, Commands};
use provex::errors::ProvexError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    tracing::debug!(build = env!("BUILD_TIMESTAMP"), "provex starting");

    let result = match cli.command {
        Commands::Validate(args) => cli::validate::handle_validate(args).await,
        Commands::Scan(args) => cli::scan::handle_scan(args).await,
        Commands::Check(args) => cli::check::handle_check(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let exit_code = match &e {
            ProvexError::Config(_) => 2,
            ProvexError::MalformedInput(_) => 3,
            ProvexError::InvalidRange(_) => 4,
            ProvexError::OracleUnavailable(_) => 5,
            _ => 1,
        };
        std::process::exit(exit_code);
    }
}
