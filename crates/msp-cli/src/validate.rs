//! # Validate Subcommand
//!
//! Routes an identity envelope to its MSP, validates it, and lists the
//! organizational units it is bound to.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::loader::{load_manager, MspSpec};
use crate::read_envelope;

/// Arguments for `msp validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// MSPs to register. Repeat for several organizations.
    #[arg(long = "msp", value_name = "ORG=DIR", required = true)]
    pub msp: Vec<MspSpec>,

    /// Identity envelope file, raw or hex.
    #[arg(value_name = "IDENTITY")]
    pub identity: PathBuf,
}

/// Execute `msp validate`.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let manager = load_manager(&args.msp)?;
    let bytes = read_envelope(&args.identity)?;

    let identity = match manager.deserialize_identity(&bytes) {
        Ok(identity) => identity,
        Err(e) => {
            println!("FAIL: {e}");
            return Ok(1);
        }
    };
    let msp = manager
        .msp(identity.organization_id().as_str())
        .context("identity was routed to an unregistered MSP")?;

    match msp.validate(&identity) {
        Ok(()) => {
            println!(
                "OK: \"{}\" is a valid identity of {}",
                identity.certificate().subject(),
                identity.organization_id()
            );
            if let Ok(units) = identity.organizational_units() {
                for unit in units {
                    println!(
                        "  OU {} certified by {}",
                        unit.unit_identifier, unit.certifiers_identifier
                    );
                }
            }
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {e}");
            Ok(1)
        }
    }
}
