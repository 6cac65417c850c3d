//! # Serialize Subcommand
//!
//! Prints the identity envelope `{organization id, certificate DER}` for a
//! certificate file or for the MSP's default signer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use msp_core::SerializedIdentity;

use crate::bytes_to_hex;
use crate::loader::{load_msp, MspSpec};

/// Arguments for `msp serialize`.
#[derive(Args, Debug)]
pub struct SerializeArgs {
    /// MSP to serialize for.
    #[arg(long = "msp", value_name = "ORG=DIR")]
    pub msp: MspSpec,

    /// PEM or DER certificate. Defaults to the MSP's signing certificate.
    #[arg(long, value_name = "FILE")]
    pub cert: Option<PathBuf>,

    /// Write the raw envelope to this file instead of printing hex.
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Execute `msp serialize`.
pub fn run_serialize(args: &SerializeArgs) -> Result<u8> {
    let msp = load_msp(&args.msp)?;

    let envelope = match &args.cert {
        Some(path) => {
            let material = std::fs::read(path)
                .with_context(|| format!("failed to read certificate: {}", path.display()))?;
            let certificate = msp
                .provider()
                .parse_certificate(&material)
                .with_context(|| format!("failed to parse certificate: {}", path.display()))?;
            SerializedIdentity::new(msp.organization_id().clone(), certificate.raw()).encode()
        }
        None => msp
            .default_signing_identity()
            .context("no --cert given and the MSP has no signing identity")?
            .serialize(),
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &envelope)
                .with_context(|| format!("failed to write identity: {}", path.display()))?;
            println!(
                "OK: wrote {}-byte identity envelope to {}",
                envelope.len(),
                path.display()
            );
        }
        None => println!("{}", bytes_to_hex(&envelope)),
    }
    Ok(0)
}
