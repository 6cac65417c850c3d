//! # Check-Principal Subcommand
//!
//! Evaluates a principal against an identity envelope.
//!
//! ## Principal Syntax
//!
//! | Form                    | Principal                                   |
//! |-------------------------|---------------------------------------------|
//! | `admin:ORG`             | `ADMIN` role of `ORG`                        |
//! | `role:ROLE:ORG`         | `ROLE` of `ORG`                              |
//! | `ou:UNIT:ORG:HEX`       | unit `UNIT` of `ORG`, certifiers digest `HEX`|
//! | `identity:FILE`         | exactly the envelope in `FILE`               |
//! | `encoded:HEX`           | a principal in its wire encoding             |

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use msp_core::{CertifiersId, OrganizationId, Principal};

use crate::loader::{load_manager, MspSpec};
use crate::{hex_to_bytes, read_envelope};

/// Arguments for `msp check-principal`.
#[derive(Args, Debug)]
pub struct CheckPrincipalArgs {
    /// MSPs to register. Repeat for several organizations.
    #[arg(long = "msp", value_name = "ORG=DIR", required = true)]
    pub msp: Vec<MspSpec>,

    /// Identity envelope file, raw or hex.
    #[arg(long, value_name = "FILE")]
    pub identity: PathBuf,

    /// Principal to evaluate.
    #[arg(long, value_name = "PRINCIPAL")]
    pub principal: String,
}

/// Execute `msp check-principal`.
pub fn run_check_principal(args: &CheckPrincipalArgs) -> Result<u8> {
    let manager = load_manager(&args.msp)?;
    let principal = parse_principal(&args.principal)?;
    let bytes = read_envelope(&args.identity)?;

    let identity = match manager.deserialize_identity(&bytes) {
        Ok(identity) => identity,
        Err(e) => {
            println!("FAIL: {e}");
            return Ok(1);
        }
    };

    match identity.satisfies_principal(&principal) {
        Ok(()) => {
            println!(
                "OK: \"{}\" satisfies {} principal",
                identity.certificate().subject(),
                principal.classification()
            );
            Ok(0)
        }
        Err(e) => {
            println!("FAIL: {e}");
            Ok(1)
        }
    }
}

/// Parse the textual principal syntax.
pub fn parse_principal(spec: &str) -> Result<Principal> {
    let (kind, rest) = spec
        .split_once(':')
        .with_context(|| format!("principal \"{spec}\" has no kind prefix"))?;

    match kind {
        "admin" => Ok(Principal::admin(organization(rest)?)),
        "role" => {
            let (role, org) = rest
                .split_once(':')
                .context("expected role:ROLE:ORG")?;
            Ok(Principal::Role {
                role: role.to_string(),
                organization_id: organization(org)?,
            })
        }
        "ou" => {
            let mut parts = rest.splitn(3, ':');
            let (Some(unit), Some(org), Some(hex)) = (parts.next(), parts.next(), parts.next())
            else {
                bail!("expected ou:UNIT:ORG:HEX");
            };
            Ok(Principal::OrganizationUnit {
                unit_identifier: unit.to_string(),
                organization_id: organization(org)?,
                certifiers_identifier: CertifiersId::new(hex_to_bytes(hex)?),
            })
        }
        "identity" => Ok(Principal::ExactIdentity(read_envelope(Path::new(rest))?)),
        "encoded" => Principal::decode(&hex_to_bytes(rest)?).context("invalid encoded principal"),
        other => bail!("unknown principal kind \"{other}\""),
    }
}

fn organization(id: &str) -> Result<OrganizationId> {
    OrganizationId::new(id).with_context(|| format!("invalid organization \"{id}\""))
}
