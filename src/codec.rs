// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canonical binary encoding.
//!
//! Every byte that is hashed or exchanged between participants goes through
//! these two functions so that all implementations agree on one layout:
//! bincode 2 with the standard configuration (little endian, varint lengths).

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StateError};

pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    bincode::serde::encode_to_vec(value, bincode::config::standard())
        .map_err(|e| StateError::Encode(e.to_string()))
}

/// Decodes a value that must occupy the whole of `bytes`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let (value, read) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
        .map_err(|e| StateError::Decode(e.to_string()))?;
    if read != bytes.len() {
        return Err(StateError::Decode(format!(
            "{} trailing bytes",
            bytes.len() - read
        )));
    }
    Ok(value)
}
