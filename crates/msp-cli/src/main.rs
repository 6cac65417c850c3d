//! # msp CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber and
//! dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use msp_cli::inspect::{run_inspect, InspectArgs};
use msp_cli::principal::{run_check_principal, CheckPrincipalArgs};
use msp_cli::serialize::{run_serialize, SerializeArgs};
use msp_cli::validate::{run_validate, ValidateArgs};

/// Membership Service Provider toolchain.
///
/// Loads MSP directories, serializes identities, validates them against
/// their organization's trust anchors, and evaluates access principals.
#[derive(Parser, Debug)]
#[command(name = "msp", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// Ignored when RUST_LOG is set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the identity envelope of a certificate or the default signer.
    Serialize(SerializeArgs),

    /// Summarize an MSP directory.
    Inspect(InspectArgs),

    /// Deserialize and validate an identity envelope.
    Validate(ValidateArgs),

    /// Evaluate a principal against an identity envelope.
    CheckPrincipal(CheckPrincipalArgs),
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let result = match &cli.command {
        Commands::Serialize(args) => run_serialize(args),
        Commands::Inspect(args) => run_inspect(args),
        Commands::Validate(args) => run_validate(args),
        Commands::CheckPrincipal(args) => run_check_principal(args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
