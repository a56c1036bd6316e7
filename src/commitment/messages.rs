use crypto_bigint::U256;
use serde::{Deserialize, Serialize};

use crate::crypto::field::{decode_be, encode_be};
use crate::wire::{put_block, FieldReader};
use crate::{Error, Result};

/// Commitment-phase message: the committer-chosen id and the commitment `c`
/// in its sendable form.
///
/// Wire layout: `<id: i64 BE> <c bytes>`. The element bytes run to the end of
/// the frame, so the format needs no inner length field.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CommitmentMsg {
    id: i64,
    commitment: Vec<u8>,
}

impl CommitmentMsg {
    /// Builds a message from an id and a serialized element.
    pub fn new(id: i64, commitment: Vec<u8>) -> Self {
        Self { id, commitment }
    }

    /// The committer-chosen commitment id.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The commitment in sendable form.
    pub fn commitment(&self) -> &[u8] {
        &self.commitment
    }

    /// Encodes the message for the channel.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + self.commitment.len());
        out.extend_from_slice(&self.id.to_be_bytes());
        out.extend_from_slice(&self.commitment);
        out
    }

    /// Decodes a message read from the channel.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = FieldReader::new(bytes);
        let id_bytes = reader.take(8)?;
        let id = i64::from_be_bytes(
            id_bytes
                .try_into()
                .map_err(|_| Error::InvalidInput("commitment id truncated".to_string()))?,
        );
        let commitment = reader.rest().to_vec();
        if commitment.is_empty() {
            return Err(Error::InvalidInput(
                "commitment message carries no element".to_string(),
            ));
        }
        Ok(Self { id, commitment })
    }
}

/// Decommitment-phase message: the committed value `x` and the randomness `r`.
///
/// Wire layout: two `(len: u32 BE, bytes)` fields, each a big-endian unsigned
/// integer of at most 32 bytes; the encoder always emits the canonical
/// 32-byte form.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DecommitmentMsg {
    x: U256,
    r: U256,
}

impl DecommitmentMsg {
    /// Builds a decommitment from the opening pair.
    pub fn new(x: U256, r: U256) -> Self {
        Self { x, r }
    }

    /// The committed value.
    pub fn x(&self) -> &U256 {
        &self.x
    }

    /// The commitment randomness.
    pub fn r(&self) -> &U256 {
        &self.r
    }

    /// Encodes the message for the channel.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 * (4 + 32));
        put_block(&mut out, &encode_be(&self.x));
        put_block(&mut out, &encode_be(&self.r));
        out
    }

    /// Decodes a message read from the channel.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = FieldReader::new(bytes);
        let x = decode_be(reader.block(32)?)?;
        let r = decode_be(reader.block(32)?)?;
        reader.finish()?;
        Ok(Self { x, r })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_msg_round_trips() {
        let msg = CommitmentMsg::new(-7, vec![0xaa; 32]);
        let decoded = CommitmentMsg::from_bytes(&msg.to_bytes()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn commitment_msg_requires_element_bytes() {
        let msg = CommitmentMsg::new(3, vec![]);
        assert!(CommitmentMsg::from_bytes(&msg.to_bytes()).is_err());
        assert!(CommitmentMsg::from_bytes(&[0u8; 4]).is_err());
    }

    #[test]
    fn decommitment_msg_round_trips() {
        let msg = DecommitmentMsg::new(U256::from_u64(42), U256::from_u64(99));
        let decoded = DecommitmentMsg::from_bytes(&msg.to_bytes()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn decommitment_msg_accepts_short_fields() {
        // a minimal-length encoder is a legal peer
        let mut bytes = Vec::new();
        put_block(&mut bytes, &[42]);
        put_block(&mut bytes, &[1, 0]);
        let decoded = DecommitmentMsg::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.x(), &U256::from_u64(42));
        assert_eq!(decoded.r(), &U256::from_u64(256));
    }

    #[test]
    fn decommitment_msg_rejects_trailing_bytes() {
        let mut bytes = DecommitmentMsg::new(U256::ONE, U256::ONE).to_bytes();
        bytes.push(0);
        assert!(DecommitmentMsg::from_bytes(&bytes).is_err());
    }

    #[test]
    fn decommitment_msg_rejects_oversize_field() {
        let mut bytes = Vec::new();
        put_block(&mut bytes, &[1u8; 33]);
        put_block(&mut bytes, &[1u8; 32]);
        assert!(DecommitmentMsg::from_bytes(&bytes).is_err());
    }
}
