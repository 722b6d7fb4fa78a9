// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Execution-layer addresses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ADDRESS_LEN;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AddressError {
    #[error("missing 0x prefix")]
    MissingPrefix,
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("invalid length: expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },
}

/// A 20-byte address, written externally as `0x`-prefixed hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    pub fn from_0x_hex(s: &str) -> Result<Self, AddressError> {
        let digits = s.strip_prefix("0x").ok_or(AddressError::MissingPrefix)?;
        let bytes = hex::decode(digits)?;
        let raw: [u8; ADDRESS_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::InvalidLength {
                expected: ADDRESS_LEN,
                found: bytes.len(),
            })?;
        Ok(Address(raw))
    }

    pub fn to_0x_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_0x_hex(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_0x_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_0x_hex())
    }
}
