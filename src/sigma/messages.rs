use crypto_bigint::U256;
use serde::{Deserialize, Serialize};

use crate::crypto::field::{decode_be, encode_be};
use crate::wire::{put_block, FieldReader};
use crate::Result;

/// Largest sendable element this codec will accept (the MODP backend's
/// 2048-bit residues).
const MAX_ELEMENT_LEN: usize = 256;

/// First prover message: `a = g^r` and `b = h^r` in sendable form.
///
/// Wire layout: `(len_a: u32 BE, a, len_b: u32 BE, b)` — binary framing, so
/// element encodings may contain any byte.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SigmaDhFirstMsg {
    a: Vec<u8>,
    b: Vec<u8>,
}

impl SigmaDhFirstMsg {
    /// Builds the message from two serialized elements.
    pub fn new(a: Vec<u8>, b: Vec<u8>) -> Self {
        Self { a, b }
    }

    /// Serialized `a = g^r`.
    pub fn a(&self) -> &[u8] {
        &self.a
    }

    /// Serialized `b = h^r`.
    pub fn b(&self) -> &[u8] {
        &self.b
    }

    /// Encodes the message for the channel.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + self.a.len() + self.b.len());
        put_block(&mut out, &self.a);
        put_block(&mut out, &self.b);
        out
    }

    /// Decodes a message read from the channel.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = FieldReader::new(bytes);
        let a = reader.block(MAX_ELEMENT_LEN)?.to_vec();
        let b = reader.block(MAX_ELEMENT_LEN)?.to_vec();
        reader.finish()?;
        Ok(Self { a, b })
    }
}

/// Second prover message: the response `z = (r + e*w) mod q`.
///
/// Wire layout: one `(len: u32 BE, bytes)` big-endian integer field, emitted
/// in its canonical 32-byte form.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SigmaDhSecondMsg {
    z: U256,
}

impl SigmaDhSecondMsg {
    /// Wraps a response scalar.
    pub fn new(z: U256) -> Self {
        Self { z }
    }

    /// The response scalar.
    pub fn z(&self) -> &U256 {
        &self.z
    }

    /// Encodes the message for the channel.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + 32);
        put_block(&mut out, &encode_be(&self.z));
        out
    }

    /// Decodes a message read from the channel.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = FieldReader::new(bytes);
        let z = decode_be(reader.block(32)?)?;
        reader.finish()?;
        Ok(Self { z })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_msg_round_trips() {
        let msg = SigmaDhFirstMsg::new(vec![1; 32], vec![2; 256]);
        assert_eq!(SigmaDhFirstMsg::from_bytes(&msg.to_bytes()).unwrap(), msg);
    }

    #[test]
    fn first_msg_rejects_oversize_element() {
        let msg = SigmaDhFirstMsg::new(vec![1; 257], vec![2; 32]);
        assert!(SigmaDhFirstMsg::from_bytes(&msg.to_bytes()).is_err());
    }

    #[test]
    fn first_msg_rejects_trailing_bytes() {
        let mut bytes = SigmaDhFirstMsg::new(vec![1; 4], vec![2; 4]).to_bytes();
        bytes.push(0);
        assert!(SigmaDhFirstMsg::from_bytes(&bytes).is_err());
    }

    #[test]
    fn second_msg_round_trips() {
        let msg = SigmaDhSecondMsg::new(U256::from_u64(123456));
        assert_eq!(SigmaDhSecondMsg::from_bytes(&msg.to_bytes()).unwrap(), msg);
    }

    #[test]
    fn second_msg_rejects_truncation() {
        let bytes = SigmaDhSecondMsg::new(U256::MAX).to_bytes();
        assert!(SigmaDhSecondMsg::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }
}
