// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Mutation Log Encoding
//!
//! Byte encoding of an ordered mutation sequence, used to hand a chain's
//! history from one participant to another.
//!
//! # Format
//! ```text
//! [Header: 16 bytes][Entry][Entry]...
//! ```
//!
//! Header:
//! - magic: [u8; 4] ("CLST")
//! - version: u32 LE
//! - count: u64 LE
//!
//! Entry:
//! - len: u32 LE
//! - checksum: u64 LE (CRC64 over len + payload)
//! - payload: canonical encoding of a `SignedMutation`

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use crc64fast::Digest;

use crate::codec;
use crate::config::{LOG_MAGIC, LOG_VERSION};
use crate::error::{Result, StateError};
use crate::mutation::SignedMutation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub count: u64,
}

impl LogHeader {
    pub const SIZE: usize = 4 + 4 + 8;

    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader
            .read_exact(&mut magic)
            .map_err(|_| StateError::InvalidLog("truncated header".into()))?;
        if magic != LOG_MAGIC {
            return Err(StateError::InvalidLog("invalid magic bytes".into()));
        }

        let version = reader
            .read_u32::<LittleEndian>()
            .map_err(|_| StateError::InvalidLog("truncated header".into()))?;
        if version != LOG_VERSION {
            return Err(StateError::UnsupportedLogVersion(version));
        }

        let count = reader
            .read_u64::<LittleEndian>()
            .map_err(|_| StateError::InvalidLog("truncated header".into()))?;

        Ok(Self { magic, version, count })
    }
}

fn entry_checksum(len: u32, payload: &[u8]) -> u64 {
    let mut digest = Digest::new();
    digest.write(&len.to_le_bytes());
    digest.write(payload);
    digest.sum64()
}

/// An ordered sequence of top-level mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationLog {
    pub mutations: Vec<SignedMutation>,
}

impl MutationLog {
    pub fn new(mutations: Vec<SignedMutation>) -> Self {
        Self { mutations }
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(LogHeader::SIZE);
        buf.extend_from_slice(&LOG_MAGIC);
        buf.extend_from_slice(&LOG_VERSION.to_le_bytes());
        buf.extend_from_slice(&(self.mutations.len() as u64).to_le_bytes());

        for signed in &self.mutations {
            let payload = codec::encode(signed)?;
            let len = u32::try_from(payload.len())
                .map_err(|_| StateError::Encode(format!("entry of {} bytes too large", payload.len())))?;

            buf.extend_from_slice(&len.to_le_bytes());
            buf.extend_from_slice(&entry_checksum(len, &payload).to_le_bytes());
            buf.extend_from_slice(&payload);
        }

        Ok(buf)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);
        let header = LogHeader::read_from(&mut cursor)?;

        let mut mutations = Vec::new();
        for index in 0..header.count {
            let truncated = || StateError::InvalidLog(format!("truncated entry {}", index));

            let len = cursor.read_u32::<LittleEndian>().map_err(|_| truncated())?;
            let checksum = cursor.read_u64::<LittleEndian>().map_err(|_| truncated())?;

            let start = cursor.position() as usize;
            let end = start
                .checked_add(len as usize)
                .filter(|end| *end <= bytes.len())
                .ok_or_else(truncated)?;
            let payload = &bytes[start..end];
            cursor.set_position(end as u64);

            let found = entry_checksum(len, payload);
            if found != checksum {
                return Err(StateError::ChecksumMismatch {
                    expected: checksum,
                    found,
                });
            }

            mutations.push(codec::decode(payload)?);
        }

        let consumed = cursor.position() as usize;
        if consumed != bytes.len() {
            return Err(StateError::InvalidLog(format!(
                "{} trailing bytes",
                bytes.len() - consumed
            )));
        }

        tracing::debug!("Decoded mutation log with {} entries", mutations.len());

        Ok(Self { mutations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::{new_node_approval, MutationType};
    use crate::types::time::{FixedClock, Timestamp};

    fn sample_log() -> MutationLog {
        let clock = FixedClock(Timestamp::new(1_700_000_000, 0));
        let a = new_node_approval(&clock, &[1; 32]).unwrap().with_signature(vec![1], vec![2]);
        let b = new_node_approval(&clock, &[2; 32]).unwrap();
        MutationLog::new(vec![a, b])
    }

    #[test]
    fn test_log_roundtrip() {
        let log = sample_log();
        let bytes = log.encode().unwrap();
        assert_eq!(&bytes[0..4], b"CLST");

        let decoded = MutationLog::decode(&bytes).unwrap();
        assert_eq!(decoded, log);
        assert!(decoded.mutations[0].mutation.is(MutationType::NodeApproval));
    }

    #[test]
    fn test_empty_log() {
        let bytes = MutationLog::default().encode().unwrap();
        assert_eq!(bytes.len(), LogHeader::SIZE);
        assert!(MutationLog::decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_corrupted_payload_detected() {
        let mut bytes = sample_log().encode().unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        assert!(matches!(
            MutationLog::decode(&bytes),
            Err(StateError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_bad_header_rejected() {
        let mut bytes = sample_log().encode().unwrap();
        bytes[0] = b'X';
        assert!(matches!(MutationLog::decode(&bytes), Err(StateError::InvalidLog(_))));

        let mut bytes = sample_log().encode().unwrap();
        bytes[4..8].copy_from_slice(&2u32.to_le_bytes());
        assert!(matches!(
            MutationLog::decode(&bytes),
            Err(StateError::UnsupportedLogVersion(2))
        ));
    }

    #[test]
    fn test_truncated_and_trailing_bytes_rejected() {
        let bytes = sample_log().encode().unwrap();
        assert!(matches!(
            MutationLog::decode(&bytes[..bytes.len() - 3]),
            Err(StateError::InvalidLog(_))
        ));

        let mut bytes = bytes;
        bytes.push(0);
        assert!(matches!(MutationLog::decode(&bytes), Err(StateError::InvalidLog(_))));
    }
}
