// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! `genvalidators`: generate new validators.

use crate::config::HASH_LEN;
use crate::engine::Engine;
use crate::error::{AddressField, Context, Result, StateError};
use crate::mutation::{AnyPayload, Mutation, MutationType, SignedMutation, ValidatorList};
use crate::signing::verify_empty_sig;
use crate::types::address::Address;
use crate::types::cluster::{Cluster, Validator, ValidatorAddresses};
use crate::types::time::Clock;

/// Builds a generate validators mutation on top of `parent`.
///
/// The mutation carries no signer or signature; it is authorised by the
/// node approvals that accompany it in an `addvalidators` composite.
pub fn new_gen_validators(
    clock: &impl Clock,
    parent: &[u8],
    validators: &[ValidatorAddresses],
) -> Result<SignedMutation> {
    let validators = parse_validators(validators).step("verify validators")?;

    if parent.len() != HASH_LEN {
        return Err(StateError::InvalidParentLength {
            expected: HASH_LEN,
            found: parent.len(),
        });
    }

    let data = AnyPayload::pack(&ValidatorList { validators }).step("marshal validators")?;

    Ok(SignedMutation::unsigned(Mutation {
        parent: parent.to_vec(),
        kind: MutationType::GenValidators.to_string(),
        timestamp: clock.now(),
        data,
    }))
}

/// Validates a non-empty validator list and parses every address.
fn parse_validators(vals: &[ValidatorAddresses]) -> Result<Vec<Validator>> {
    if vals.is_empty() {
        return Err(StateError::EmptyValidators);
    }

    vals.iter()
        .enumerate()
        .map(|(index, v)| -> Result<Validator> {
            let parse = |field: AddressField, text: &str| {
                Address::from_0x_hex(text).map_err(|source| StateError::InvalidAddress { field, index, source })
            };
            Ok(Validator {
                fee_recipient: parse(AddressField::FeeRecipient, &v.fee_recipient_address)?,
                withdrawal: parse(AddressField::Withdrawal, &v.withdrawal_address)?,
            })
        })
        .collect()
}

pub fn transform_gen_validators(_engine: &Engine, cluster: &Cluster, signed: &SignedMutation) -> Result<Cluster> {
    verify_empty_sig(signed).step("verify empty sig")?;
    signed.mutation.expect_type(MutationType::GenValidators)?;

    let list: ValidatorList = signed.mutation.data.unpack().step("unmarshal validators")?;

    Ok(cluster.with_validators_appended(&list.validators))
}
