//! # Principal Evaluation
//!
//! Decides whether an identity satisfies a [`Principal`] under an MSP.
//!
//! | Principal        | Satisfied when                                                         |
//! |------------------|------------------------------------------------------------------------|
//! | `Role`           | same organization, role is `ADMIN`, envelope is in the admin list      |
//! | `OrganizationUnit` | same organization, a computed `(unit, certifiers)` matches exactly   |
//! | `ExactIdentity`  | envelope bytes are identical                                           |
//!
//! "Same organization" means the principal, the identity and the evaluating
//! MSP all name one organization. An MSP never vouches for another
//! organization's roles or units.
//!
//! Byte comparisons of envelopes and digests are constant time. Policy
//! failures are ordinary traffic and are logged at `debug`.

use std::sync::Arc;

use msp_core::{MspError, PolicyError, Principal, ADMIN_ROLE};
use subtle::ConstantTimeEq;

use crate::identity::Identity;
use crate::msp::MspContext;

/// Evaluate `principal` for `identity` under `context`.
pub(crate) fn evaluate(
    context: &Arc<MspContext>,
    identity: &Identity,
    principal: &Principal,
) -> Result<(), MspError> {
    let owned = identity.organization_id() == &context.organization_id;
    let result = match principal {
        Principal::Role {
            role,
            organization_id,
        } => {
            let is_admin = context
                .admins
                .iter()
                .any(|admin| bool::from(admin.as_slice().ct_eq(identity.as_serialized())));
            if owned
                && organization_id == &context.organization_id
                && role == ADMIN_ROLE
                && is_admin
            {
                Ok(())
            } else {
                Err(PolicyError::RoleNotSatisfied {
                    role: role.clone(),
                    organization: organization_id.to_string(),
                }
                .into())
            }
        }
        Principal::OrganizationUnit {
            unit_identifier,
            organization_id,
            certifiers_identifier,
        } => {
            if !owned || organization_id != &context.organization_id {
                Err(unit_not_satisfied(unit_identifier, organization_id.as_str()))
            } else {
                let units = identity.organizational_units_in(context)?;
                let found = units.iter().any(|unit| {
                    let digest_eq = &unit.certifiers_identifier == certifiers_identifier;
                    let name_eq = &unit.unit_identifier == unit_identifier;
                    digest_eq & name_eq
                });
                if found {
                    Ok(())
                } else {
                    Err(unit_not_satisfied(unit_identifier, organization_id.as_str()))
                }
            }
        }
        Principal::ExactIdentity(expected) => {
            if bool::from(expected.as_slice().ct_eq(identity.as_serialized())) {
                Ok(())
            } else {
                Err(PolicyError::IdentityMismatch.into())
            }
        }
    };

    if let Err(error) = &result {
        tracing::debug!(
            organization = %identity.organization_id(),
            subject = identity.certificate().subject(),
            classification = %principal.classification(),
            %error,
            "principal not satisfied"
        );
    }
    result
}

fn unit_not_satisfied(unit: &str, organization: &str) -> MspError {
    PolicyError::OrganizationalUnitNotSatisfied {
        unit: unit.to_string(),
        organization: organization.to_string(),
    }
    .into()
}
