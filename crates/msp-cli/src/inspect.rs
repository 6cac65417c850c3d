//! # Inspect Subcommand
//!
//! Summarizes what an MSP directory configures once it has been set up.

use anyhow::Result;
use clap::Args;

use crate::loader::{load_msp, MspSpec};

/// Arguments for `msp inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// MSP to inspect.
    #[arg(long = "msp", value_name = "ORG=DIR")]
    pub msp: MspSpec,
}

/// Execute `msp inspect`.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let msp = load_msp(&args.msp)?;

    println!("MSP:            {}", msp.organization_id());
    println!("Provider:       {}", msp.provider().provider_type());
    println!("Trust anchors:  {}", msp.trust_anchors().len());
    for cert in msp.trust_anchors() {
        println!("  - {}", cert.subject());
    }
    println!("Intermediates:  {}", msp.intermediates().len());
    for cert in msp.intermediates() {
        println!("  - {}", cert.subject());
    }
    println!("Admins:         {}", msp.admin_identities().len());
    println!(
        "OU restriction: {}",
        msp.organizational_unit_identifiers().len()
    );
    for ou in msp.organizational_unit_identifiers() {
        println!("  - {} ({})", ou.unit_identifier, ou.certifiers_identifier);
    }
    match msp.default_signing_identity() {
        Ok(signer) => println!(
            "Signer:         {}",
            signer.public_version().certificate().subject()
        ),
        Err(_) => println!("Signer:         none"),
    }
    Ok(0)
}
