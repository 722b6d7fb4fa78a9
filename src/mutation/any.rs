// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Self-describing mutation payloads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::{Result, StateError};
use crate::mutation::SignedMutation;
use crate::types::cluster::Validator;

/// A payload type that can be carried in [`AnyPayload`].
pub trait Payload: Serialize + DeserializeOwned {
    /// Stable identifier written next to the encoded bytes.
    const TYPE_URL: &'static str;
}

/// Type-tagged payload envelope: the payload's type identifier plus its
/// canonical encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnyPayload {
    pub type_url: String,
    pub value: Vec<u8>,
}

impl AnyPayload {
    pub fn pack<T: Payload>(payload: &T) -> Result<Self> {
        Ok(Self {
            type_url: T::TYPE_URL.to_string(),
            value: codec::encode(payload)?,
        })
    }

    pub fn is<T: Payload>(&self) -> bool {
        self.type_url == T::TYPE_URL
    }

    pub fn unpack<T: Payload>(&self) -> Result<T> {
        if !self.is::<T>() {
            return Err(StateError::Decode(format!(
                "payload type {:?}, expected {:?}",
                self.type_url,
                T::TYPE_URL
            )));
        }
        codec::decode(&self.value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorList {
    pub validators: Vec<Validator>,
}

impl Payload for ValidatorList {
    const TYPE_URL: &'static str = "cluster.state.v1/ValidatorList";
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMutationList {
    pub mutations: Vec<SignedMutation>,
}

impl Payload for SignedMutationList {
    const TYPE_URL: &'static str = "cluster.state.v1/SignedMutationList";
}

/// Payload of mutations that carry no data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty;

impl Payload for Empty {
    const TYPE_URL: &'static str = "cluster.state.v1/Empty";
}
