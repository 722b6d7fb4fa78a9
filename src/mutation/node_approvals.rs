// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Operator approvals.
//!
//! A `nodeapproval` is a single operator's signed attestation to its parent
//! hash. A `nodeapprovals` composite bundles the approvals of many operators
//! over the same parent and is itself unsigned. Neither changes the cluster
//! configuration; they gate the mutations they attest to.

use rustc_hash::FxHashSet;

use crate::config::HASH_LEN;
use crate::engine::Engine;
use crate::error::{Context, Result, StateError};
use crate::mutation::{AnyPayload, Empty, Mutation, MutationType, SignedMutation, SignedMutationList};
use crate::signing::{verify_empty_sig, verify_signature};
use crate::types::cluster::Cluster;
use crate::types::time::Clock;

/// Builds an unsigned node approval of `parent`.
///
/// The operator signs `hash::hash(&approval)` with its own key and attaches
/// the result with [`SignedMutation::with_signature`].
pub fn new_node_approval(clock: &impl Clock, parent: &[u8]) -> Result<SignedMutation> {
    if parent.len() != HASH_LEN {
        return Err(StateError::InvalidParentLength {
            expected: HASH_LEN,
            found: parent.len(),
        });
    }

    let data = AnyPayload::pack(&Empty).step("marshal empty")?;

    Ok(SignedMutation::unsigned(Mutation {
        parent: parent.to_vec(),
        kind: MutationType::NodeApproval.to_string(),
        timestamp: clock.now(),
        data,
    }))
}

/// Bundles signed node approvals of one parent into a composite.
pub fn new_node_approvals(clock: &impl Clock, approvals: &[SignedMutation]) -> Result<SignedMutation> {
    let first = approvals.first().ok_or(StateError::EmptyApprovals)?;

    for approval in approvals {
        approval
            .mutation
            .expect_type(MutationType::NodeApproval)
            .step("node approval")?;
        if approval.parent() != first.parent() {
            return Err(StateError::parent_mismatch(first.parent(), approval.parent()))
                .step("invalid node approval parent");
        }
    }

    let data = AnyPayload::pack(&SignedMutationList {
        mutations: approvals.to_vec(),
    })
    .step("marshal signed mutation list")?;

    Ok(SignedMutation::unsigned(Mutation {
        parent: first.mutation.parent.clone(),
        kind: MutationType::NodeApprovals.to_string(),
        timestamp: clock.now(),
        data,
    }))
}

pub fn transform_node_approval(engine: &Engine, cluster: &Cluster, signed: &SignedMutation) -> Result<Cluster> {
    signed.mutation.expect_type(MutationType::NodeApproval)?;

    if signed.signer.is_empty() || signed.signature.is_empty() {
        return Err(StateError::MissingSignature).step("verify signature");
    }
    if cluster.operator_by_key(&signed.signer).is_none() {
        return Err(StateError::UnknownSigner(hex::encode(&signed.signer)));
    }
    verify_signature(engine.verifier(), signed).step("verify signature")?;

    let _: Empty = signed.mutation.data.unpack().step("unmarshal empty")?;

    Ok(cluster.clone())
}

pub fn transform_node_approvals(engine: &Engine, cluster: &Cluster, signed: &SignedMutation) -> Result<Cluster> {
    verify_empty_sig(signed).step("verify empty sig")?;
    signed.mutation.expect_type(MutationType::NodeApprovals)?;

    let list: SignedMutationList = signed.mutation.data.unpack().step("unmarshal signed mutation list")?;
    if list.mutations.is_empty() {
        return Err(StateError::EmptyApprovals);
    }

    let mut signers = FxHashSet::default();
    for approval in &list.mutations {
        approval
            .mutation
            .expect_type(MutationType::NodeApproval)
            .step("node approval")?;
        if approval.parent() != signed.parent() {
            return Err(StateError::parent_mismatch(signed.parent(), approval.parent()))
                .step("invalid node approval parent");
        }
        if !signers.insert(approval.signer.as_slice()) {
            return Err(StateError::DuplicateSigner(hex::encode(&approval.signer)));
        }
    }

    let required = engine
        .config()
        .required_approvals(cluster.operators.len(), cluster.threshold);
    if signers.len() < required {
        return Err(StateError::InsufficientApprovals {
            required,
            found: signers.len(),
        });
    }

    let mut next = cluster.clone();
    for approval in &list.mutations {
        next = engine.transform(&next, approval).step("transform node approval")?;
    }

    Ok(next)
}
