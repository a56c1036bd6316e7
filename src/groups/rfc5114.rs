use crypto_bigint::{Encoding, NonZero, RandomMod, Zero, U2048, U256};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::{Choice, ConstantTimeEq};

use crate::crypto::field::mod_pow;
use crate::crypto::DlogGroup;
use crate::{Error, Result};

/// Byte width of a serialized element (2048-bit modulus).
const ELEMENT_BYTES: usize = 256;

/// The RFC 5114 2048-bit MODP group with 256-bit prime-order subgroup.
///
/// Exponentiation runs in the order-`q` subgroup of `Z_p^*` generated by the
/// RFC constant `g`. The subgroup is believed DDH-secure, which is what the
/// commitment and sigma protocols require of their group handle.
#[derive(Clone, Debug)]
pub struct Rfc5114Group {
    p: NonZero<U2048>,
    q: NonZero<U256>,
    g: U2048,
}

/// Subgroup member, stored as its canonical residue mod `p`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Element(U2048);

impl Element {
    /// Wraps a raw residue. No membership check is performed; use
    /// [`DlogGroup::reconstruct`] for untrusted bytes.
    pub fn new(value: U2048) -> Self {
        Self(value)
    }

    /// Returns the inner residue.
    pub fn inner(&self) -> &U2048 {
        &self.0
    }
}

impl ConstantTimeEq for Element {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Serialize for Element {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.0.to_be_bytes())
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        if bytes.len() != ELEMENT_BYTES {
            return Err(serde::de::Error::invalid_length(
                bytes.len(),
                &"256 bytes",
            ));
        }
        let mut arr = [0u8; ELEMENT_BYTES];
        arr.copy_from_slice(&bytes);
        Ok(Element(U2048::from_be_bytes(arr)))
    }
}

impl Rfc5114Group {
    /// Builds the group handle from the RFC 5114 constants.
    pub fn new() -> Self {
        Self {
            p: NonZero::new(rfc5114_p()).expect("RFC 5114 p is non-zero"),
            q: NonZero::new(rfc5114_q()).expect("RFC 5114 q is non-zero"),
            g: rfc5114_g(),
        }
    }

    fn pow(&self, base: &U2048, exp: &U2048) -> U2048 {
        mod_pow(base, exp, &self.p)
            .unwrap_or_else(|_| unreachable!("RFC 5114 modulus p is odd"))
    }

    /// Raises a residue to a subgroup exponent, widening it to the modulus
    /// width first.
    fn pow_scalar(&self, base: &U2048, exp: &U256) -> U2048 {
        self.pow(base, &widen(exp))
    }
}

impl Default for Rfc5114Group {
    fn default() -> Self {
        Self::new()
    }
}

fn widen(value: &U256) -> U2048 {
    let mut bytes = [0u8; ELEMENT_BYTES];
    bytes[ELEMENT_BYTES - 32..].copy_from_slice(&value.to_be_bytes());
    U2048::from_be_bytes(bytes)
}

impl DlogGroup for Rfc5114Group {
    type Element = Element;

    fn name(&self) -> &'static str {
        "RFC5114-2048-256"
    }

    fn order(&self) -> U256 {
        *self.q
    }

    fn generator(&self) -> Self::Element {
        Element(self.g)
    }

    fn identity(&self) -> Self::Element {
        Element(U2048::ONE)
    }

    fn is_member(&self, element: &Self::Element) -> bool {
        if bool::from(element.0.is_zero()) || element.0 >= *self.p {
            return false;
        }
        // e is in the order-q subgroup iff e^q = 1 mod p
        let check = self.pow_scalar(&element.0, &self.q);
        bool::from(check.ct_eq(&U2048::ONE))
    }

    fn validate_group(&self) -> bool {
        if bool::from(self.g.is_zero())
            || bool::from(self.g.ct_eq(&U2048::ONE))
            || self.g >= *self.p
        {
            return false;
        }
        // q must divide p - 1, and g must generate an order-q subgroup
        let p_minus_one = self.p.wrapping_sub(&U2048::ONE);
        let q_wide = NonZero::new(widen(&self.q)).expect("q is non-zero");
        if !bool::from(p_minus_one.rem(&q_wide).is_zero()) {
            return false;
        }
        bool::from(self.pow_scalar(&self.g, &self.q).ct_eq(&U2048::ONE))
    }

    fn is_ddh_secure(&self) -> bool {
        true
    }

    fn exponentiate(&self, base: &Self::Element, exponent: &U256) -> Self::Element {
        Element(self.pow_scalar(&base.0, exponent))
    }

    fn multiply(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Element(a.0.mul_mod(&b.0, &self.p))
    }

    fn element_to_bytes(&self, element: &Self::Element) -> Vec<u8> {
        element.0.to_be_bytes().to_vec()
    }

    fn reconstruct(&self, bytes: &[u8], validate: bool) -> Result<Self::Element> {
        if bytes.len() != ELEMENT_BYTES {
            return Err(Error::InvalidElement(format!(
                "expected {ELEMENT_BYTES} bytes, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; ELEMENT_BYTES];
        arr.copy_from_slice(bytes);
        let value = U2048::from_be_bytes(arr);

        if bool::from(value.is_zero()) || value >= *self.p {
            return Err(Error::InvalidElement(
                "residue out of range for modulus".to_string(),
            ));
        }

        let element = Element(value);
        if validate && !self.is_member(&element) {
            return Err(Error::InvalidElement(
                "value is not in the prime-order subgroup".to_string(),
            ));
        }
        Ok(element)
    }

    fn random_scalar<R: CryptoRngCore>(&self, rng: &mut R) -> U256 {
        U256::random_mod(rng, &self.q)
    }
}

fn rfc5114_p() -> U2048 {
    U2048::from_be_hex(
        "87A8E61DB4B6663CFFBBD19C651959998CEEF608660DD0F25D2CEED4435E3B00E00DF8F1D61957D4FAF7DF4561B2AA3016C3D91134096FAA3BF4296D830E9A7C209E0C6497517ABD5A8A9D306BCF67ED91F9E6725B4758C022E0B1EF4275BF7B6C5BFC11D45F9088B941F54EB1E59BB8BC39A0BF12307F5C4FDB70C581B23F76B63ACAE1CAA6B7902D52526735488A0EF13C6D9A51BFA4AB3AD8347796524D8EF6A167B5A41825D967E144E5140564251CCACB83E6B486F6B3CA3F7971506026C0B857F689962856DED4010ABD0BE621C3A3960A54E710C375F26375D7014103A4B54330C198AF126116D2276E11715F693877FAD7EF09CADB094AE91E1A1597",
    )
}

fn rfc5114_q() -> U256 {
    U256::from_be_hex("8CF83642A709A097B447997640129DA299B1A47D1EB3750BA308B0FE64F5FBD3")
}

fn rfc5114_g() -> U2048 {
    U2048::from_be_hex(
        "3FB32C9B73134D0B2E77506660EDBD484CA7B18F21EF205407F4793A1A0BA12510DBC15077BE463FFF4FED4AAC0BB555BE3A6C1B0C6B47B1BC3773BF7E8C6F62901228F8C28CBB18A55AE31341000A650196F931C77A57F2DDF463E5E9EC144B777DE62AAAB8A8628AC376D282D6ED3864E67982428EBC831D14348F6F2F9193B5045AF2767164E1DFC967C1FB3F2E55A4BD1BFFE83B9C80D052B985D182EA0ADB2A3B7313D3FE14C8484B1E052588B9B7D2BBD2DF016199ECD06E1557CD0915B3353BBB64E0EC377FD028370DF92B52C7891428CDC67EB6184B523D1DB246C32F63078490F00EF8D647D148D47954515E2327CFEF98C582664B4C0F6CC41659",
    )
}
