// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use std::fmt;

use thiserror::Error;

use crate::types::address::AddressError;

/// Which address of a validator record failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    FeeRecipient,
    Withdrawal,
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressField::FeeRecipient => f.write_str("fee recipient"),
            AddressField::Withdrawal => f.write_str("withdrawal"),
        }
    }
}

/// Coarse classification of a [`StateError`], independent of step wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    TypeMismatch,
    SignaturePresence,
    Linkage,
    Decode,
    UnknownType,
    Authorization,
}

#[derive(Error, Debug)]
pub enum StateError {
    #[error("no validators")]
    EmptyValidators,

    #[error("no node approvals")]
    EmptyApprovals,

    #[error("invalid {field} address at index {index}: {source}")]
    InvalidAddress {
        field: AddressField,
        index: usize,
        #[source]
        source: AddressError,
    },

    #[error("invalid parent hash: expected {expected} bytes, found {found}")]
    InvalidParentLength { expected: usize, found: usize },

    #[error("invalid mutation list length: expected {expected}, found {found}")]
    InvalidListLength { expected: usize, found: usize },

    #[error("invalid mutation type: expected {expected}, found {found:?}")]
    TypeMismatch { expected: &'static str, found: String },

    #[error("unexpected signer or signature on unsigned mutation")]
    UnexpectedSignature,

    #[error("missing signer or signature")]
    MissingSignature,

    #[error("parent mismatch: expected {expected}, found {found}")]
    ParentMismatch { expected: String, found: String },

    #[error("unknown mutation type: {0:?}")]
    UnknownType(String),

    #[error("signer {0} is not a cluster operator")]
    UnknownSigner(String),

    #[error("duplicate approval from signer {0}")]
    DuplicateSigner(String),

    #[error("invalid signature from signer {0}")]
    InvalidSignature(String),

    #[error("insufficient approvals: required {required}, found {found}")]
    InsufficientApprovals { required: usize, found: usize },

    #[error("encode error: {0}")]
    Encode(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid mutation log: {0}")]
    InvalidLog(String),

    #[error("checksum mismatch: expected {expected:#018x}, found {found:#018x}")]
    ChecksumMismatch { expected: u64, found: u64 },

    #[error("unsupported mutation log version {0}")]
    UnsupportedLogVersion(u32),

    #[error("mutation {index}: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<StateError>,
    },

    #[error("{step}: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: Box<StateError>,
    },
}

impl StateError {
    pub(crate) fn parent_mismatch(expected: &[u8], found: &[u8]) -> Self {
        StateError::ParentMismatch {
            expected: format!("0x{}", hex::encode(expected)),
            found: format!("0x{}", hex::encode(found)),
        }
    }

    fn wrapped(&self) -> Option<&StateError> {
        match self {
            StateError::Step { source, .. } | StateError::AtIndex { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }

    /// The innermost error, with all step and index wrapping removed.
    pub fn root(&self) -> &StateError {
        let mut err = self;
        while let Some(inner) = err.wrapped() {
            err = inner;
        }
        err
    }

    /// Step names from outermost to innermost.
    pub fn steps(&self) -> Vec<&'static str> {
        let mut steps = Vec::new();
        let mut err = Some(self);
        while let Some(e) = err {
            if let StateError::Step { step, .. } = e {
                steps.push(*step);
            }
            err = e.wrapped();
        }
        steps
    }

    pub fn kind(&self) -> ErrorKind {
        match self.root() {
            StateError::EmptyValidators
            | StateError::EmptyApprovals
            | StateError::InvalidAddress { .. }
            | StateError::InvalidParentLength { .. }
            | StateError::InvalidListLength { .. } => ErrorKind::Validation,
            StateError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            StateError::UnexpectedSignature | StateError::MissingSignature => {
                ErrorKind::SignaturePresence
            }
            StateError::ParentMismatch { .. } => ErrorKind::Linkage,
            StateError::UnknownType(_) => ErrorKind::UnknownType,
            StateError::UnknownSigner(_)
            | StateError::DuplicateSigner(_)
            | StateError::InvalidSignature(_)
            | StateError::InsufficientApprovals { .. } => ErrorKind::Authorization,
            StateError::Encode(_)
            | StateError::Decode(_)
            | StateError::InvalidLog(_)
            | StateError::ChecksumMismatch { .. }
            | StateError::UnsupportedLogVersion(_) => ErrorKind::Decode,
            // root() never returns a wrapper
            StateError::Step { source, .. } | StateError::AtIndex { source, .. } => source.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StateError>;

/// Wraps an error with the name of the validation step that produced it.
pub trait Context<T> {
    fn step(self, step: &'static str) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    fn step(self, step: &'static str) -> Result<T> {
        self.map_err(|source| StateError::Step {
            step,
            source: Box::new(source),
        })
    }
}
