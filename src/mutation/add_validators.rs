// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! `addvalidators`: composite of a `genvalidators` mutation and the
//! `nodeapprovals` that authorise it.
//!
//! # Linkage
//! ```text
//! composite.parent == gen.parent
//! approvals.parent == hash(gen)
//! ```
//! The approvals therefore attest to exactly the generated validators, and
//! neither child can be swapped out or reordered without breaking the chain.

use crate::engine::Engine;
use crate::error::{Context, Result, StateError};
use crate::hash;
use crate::mutation::{AnyPayload, Mutation, MutationType, SignedMutation, SignedMutationList};
use crate::signing::verify_empty_sig;
use crate::types::cluster::Cluster;
use crate::types::time::Clock;

/// Number of children in an `addvalidators` composite.
const ADD_VALIDATORS_LEN: usize = 2;

/// Builds a composite add validators mutation from the provided gen validators
/// and node approvals.
pub fn new_add_validators(
    clock: &impl Clock,
    gen_validators: &SignedMutation,
    node_approvals: &SignedMutation,
) -> Result<SignedMutation> {
    gen_validators
        .mutation
        .expect_type(MutationType::GenValidators)
        .step("gen validators")?;
    node_approvals
        .mutation
        .expect_type(MutationType::NodeApprovals)
        .step("node approvals")?;

    let data = AnyPayload::pack(&SignedMutationList {
        mutations: vec![gen_validators.clone(), node_approvals.clone()],
    })
    .step("marshal signed mutation list")?;

    // Composite mutations have no signer or signature.
    Ok(SignedMutation::unsigned(Mutation {
        parent: gen_validators.mutation.parent.clone(),
        kind: MutationType::AddValidators.to_string(),
        timestamp: clock.now(),
        data,
    }))
}

pub fn transform_add_validators(engine: &Engine, cluster: &Cluster, signed: &SignedMutation) -> Result<Cluster> {
    verify_empty_sig(signed).step("verify empty sig")?;
    signed.mutation.expect_type(MutationType::AddValidators)?;

    let list: SignedMutationList = signed.mutation.data.unpack().step("unmarshal signed mutation list")?;
    let [gen_validators, node_approvals] = <&[SignedMutation; ADD_VALIDATORS_LEN]>::try_from(list.mutations.as_slice())
        .map_err(|_| StateError::InvalidListLength {
            expected: ADD_VALIDATORS_LEN,
            found: list.mutations.len(),
        })?;

    gen_validators
        .mutation
        .expect_type(MutationType::GenValidators)
        .step("gen validators")?;
    if signed.parent() != gen_validators.parent() {
        return Err(StateError::parent_mismatch(signed.parent(), gen_validators.parent()))
            .step("invalid gen validators parent");
    }

    node_approvals
        .mutation
        .expect_type(MutationType::NodeApprovals)
        .step("node approvals")?;

    let gen_hash = hash::hash(gen_validators).step("hash gen validators")?;
    if gen_hash.as_slice() != node_approvals.parent() {
        return Err(StateError::parent_mismatch(&gen_hash, node_approvals.parent()))
            .step("invalid node approvals parent");
    }

    let next = engine
        .transform(cluster, gen_validators)
        .step("transform gen validators")?;
    engine
        .transform(&next, node_approvals)
        .step("transform node approvals")
}
