use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "provex",
    version,
    about = "AI-assisted vulnerability validation and exposure mapping"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate findings from a raw scanner report
    Validate(ValidateArgs),
    /// Map reachable hosts and services in a network range
    Scan(ScanArgs),
    /// Check a configuration file
    Check(CheckArgs),
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Raw scanner report (JSON)
    #[arg(short, long)]
    pub report: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output directory for sinks and the batch report
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also scan this network range and attach the exposure graph
    #[arg(long)]
    pub cidr: Option<String>,
}

#[derive(Args, Clone)]
pub struct ScanArgs {
    /// Network range to scan, e.g. 10.0.0.0/24
    #[arg(short, long)]
    pub cidr: String,

    /// YAML configuration file
    #[arg(short = 'C', long)]
    pub config: Option<String>,

    /// Write the exposure graph here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Args, Clone)]
pub struct CheckArgs {
    /// YAML configuration file to check
    pub config: String,
}
