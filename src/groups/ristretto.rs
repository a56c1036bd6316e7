use crypto_bigint::{NonZero, RandomMod, U256};
use curve25519_dalek::constants::RISTRETTO_BASEPOINT_TABLE;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar as DalekScalar;
use curve25519_dalek::traits::Identity;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::crypto::DlogGroup;
use crate::{Error, Result};

/// Byte width of a compressed element.
const ELEMENT_BYTES: usize = 32;

/// The Ristretto255 prime-order group.
///
/// Considerably faster than the MODP backend. The order `l` is exposed as a
/// [`U256`] so MODP and elliptic backends share one exponent domain; an
/// exponent is mapped into the curve scalar field by reduction mod `l`.
/// Decompression is the membership test: every byte string that decodes at
/// all decodes to a group member, so [`DlogGroup::is_member`] is total.
#[derive(Clone, Debug)]
pub struct Ristretto255Group;

/// Ristretto group element.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Element(RistrettoPoint);

impl Element {
    /// Wraps a point.
    pub fn new(value: RistrettoPoint) -> Self {
        Self(value)
    }

    /// Returns the inner point.
    pub fn inner(&self) -> &RistrettoPoint {
        &self.0
    }
}

/// `l = 2^252 + 27742317777372353535851937790883648493`.
fn group_order() -> NonZero<U256> {
    NonZero::new(U256::from_be_hex(
        "1000000000000000000000000000000014DEF9DEA2F79CD65812631A5CF5D3ED",
    ))
    .expect("ristretto order is non-zero")
}

/// Reduces a 256-bit exponent into the scalar field.
fn to_scalar(exponent: &U256) -> DalekScalar {
    DalekScalar::from_bytes_mod_order(exponent.to_le_bytes())
}

impl DlogGroup for Ristretto255Group {
    type Element = Element;

    fn name(&self) -> &'static str {
        "Ristretto255"
    }

    fn order(&self) -> U256 {
        *group_order()
    }

    fn generator(&self) -> Self::Element {
        Element(RISTRETTO_BASEPOINT_TABLE.basepoint())
    }

    fn identity(&self) -> Self::Element {
        Element(RistrettoPoint::identity())
    }

    fn is_member(&self, _element: &Self::Element) -> bool {
        // decompression already proves membership
        true
    }

    fn validate_group(&self) -> bool {
        true
    }

    fn is_ddh_secure(&self) -> bool {
        true
    }

    fn exponentiate(&self, base: &Self::Element, exponent: &U256) -> Self::Element {
        Element(base.0 * to_scalar(exponent))
    }

    fn multiply(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Element(a.0 + b.0)
    }

    fn element_to_bytes(&self, element: &Self::Element) -> Vec<u8> {
        element.0.compress().to_bytes().to_vec()
    }

    fn reconstruct(&self, bytes: &[u8], _validate: bool) -> Result<Self::Element> {
        if bytes.len() != ELEMENT_BYTES {
            return Err(Error::InvalidElement(format!(
                "expected {ELEMENT_BYTES} bytes, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; ELEMENT_BYTES];
        arr.copy_from_slice(bytes);
        match CompressedRistretto(arr).decompress() {
            Some(point) => Ok(Element(point)),
            None => Err(Error::InvalidElement(
                "bytes do not decode to a ristretto point".to_string(),
            )),
        }
    }

    fn random_scalar<R: CryptoRngCore>(&self, rng: &mut R) -> U256 {
        U256::random_mod(rng, &group_order())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SecureRng;

    #[test]
    fn exponent_homomorphism() {
        let dlog = Ristretto255Group;
        let g = dlog.generator();
        let g2 = dlog.exponentiate(&g, &U256::from_u64(2));
        let g3 = dlog.exponentiate(&g, &U256::from_u64(3));
        let g5 = dlog.exponentiate(&g, &U256::from_u64(5));
        assert_eq!(dlog.multiply(&g2, &g3), g5);
    }

    #[test]
    fn order_annihilates_generator() {
        let dlog = Ristretto255Group;
        let g = dlog.generator();
        assert_eq!(dlog.exponentiate(&g, &dlog.order()), dlog.identity());
    }

    #[test]
    fn reconstruct_round_trips() {
        let dlog = Ristretto255Group;
        let mut rng = SecureRng::new();
        let e = dlog.exponentiate(&dlog.generator(), &dlog.random_scalar(&mut rng));
        let bytes = dlog.element_to_bytes(&e);
        assert_eq!(bytes.len(), ELEMENT_BYTES);
        assert_eq!(dlog.reconstruct(&bytes, true).unwrap(), e);
    }

    #[test]
    fn reconstruct_rejects_invalid_encoding() {
        let dlog = Ristretto255Group;
        // 0xFF.. is not a canonical field element encoding
        assert!(dlog.reconstruct(&[0xffu8; 32], false).is_err());
    }

    #[test]
    fn random_scalar_below_order() {
        let dlog = Ristretto255Group;
        let mut rng = SecureRng::new();
        for _ in 0..16 {
            assert!(dlog.random_scalar(&mut rng) < dlog.order());
        }
    }
}
