// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Signature presence rules and the verification seam.

use crate::error::{Result, StateError};
use crate::hash::{self, Hash};
use crate::mutation::SignedMutation;

/// Verifies a signer's signature over a mutation hash.
///
/// The signature scheme lives outside this crate; the engine only decides
/// when a signature is required and what digest it must cover.
pub trait SignatureVerifier: Send + Sync {
    /// Returns `true` if `signature` by `signer` over `digest` is valid.
    fn verify(&self, signer: &[u8], digest: &Hash, signature: &[u8]) -> bool;
}

impl<F> SignatureVerifier for F
where
    F: Fn(&[u8], &Hash, &[u8]) -> bool + Send + Sync,
{
    fn verify(&self, signer: &[u8], digest: &Hash, signature: &[u8]) -> bool {
        self(signer, digest, signature)
    }
}

/// Generation and composite mutations derive their authority from their
/// children and must not carry a signer or signature.
pub fn verify_empty_sig(signed: &SignedMutation) -> Result<()> {
    if signed.is_signed() {
        return Err(StateError::UnexpectedSignature);
    }
    Ok(())
}

/// Checks that an attestation carries a signer and a valid signature over its
/// hash. Returns the verified hash.
pub fn verify_signature(verifier: &dyn SignatureVerifier, signed: &SignedMutation) -> Result<Hash> {
    if signed.signer.is_empty() || signed.signature.is_empty() {
        return Err(StateError::MissingSignature);
    }

    let digest = hash::hash(signed)?;
    if !verifier.verify(&signed.signer, &digest, &signed.signature) {
        return Err(StateError::InvalidSignature(hex::encode(&signed.signer)));
    }

    Ok(digest)
}
