use core::fmt::Debug;

use crypto_bigint::U256;
use rand_core::CryptoRngCore;

use crate::Result;

/// A cyclic group of prime order `q` with a distinguished generator.
///
/// This is the contract every protocol in the crate consumes. A value
/// implementing it is a cheap, cloneable handle; sessions hold one for their
/// whole lifetime. Exponents are arbitrary-precision integers taken modulo
/// `q` — all supported orders fit in a [`U256`], so that type is the shared
/// scalar domain across backends. A negative exponent `-e` is expressed by
/// its representative `q - e`, which `exponentiate` reduces like any other.
///
/// Elements carry a *sendable form*: a fixed-width byte encoding produced by
/// [`element_to_bytes`](Self::element_to_bytes) and consumed by
/// [`reconstruct`](Self::reconstruct). Reconstruction with `validate = true`
/// must fail for bytes that decode to a value outside the group.
pub trait DlogGroup: Clone + Debug + Send + Sync + 'static {
    /// An opaque group member, comparable by value.
    type Element: Clone + Debug + Eq + PartialEq + Send + Sync;

    /// Human-readable name of the group.
    fn name(&self) -> &'static str;

    /// The prime order `q`.
    fn order(&self) -> U256;

    /// The distinguished generator `g`.
    fn generator(&self) -> Self::Element;

    /// The identity element.
    fn identity(&self) -> Self::Element;

    /// Whether `element` lies in the group.
    fn is_member(&self, element: &Self::Element) -> bool;

    /// Structural sanity of the group parameters. Protocol constructors
    /// refuse to run when this returns false.
    fn validate_group(&self) -> bool;

    /// Whether the group is believed DDH-secure. Protocol constructors
    /// refuse to run when this returns false.
    fn is_ddh_secure(&self) -> bool;

    /// Computes `base^exponent`, with the exponent taken modulo `q`.
    fn exponentiate(&self, base: &Self::Element, exponent: &U256) -> Self::Element;

    /// Computes the group product `a * b`.
    fn multiply(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Serializes `element` into its sendable form.
    fn element_to_bytes(&self, element: &Self::Element) -> Vec<u8>;

    /// Deserializes an element from its sendable form.
    ///
    /// Always enforces the structural shape of the encoding; when `validate`
    /// is true, additionally enforces group membership. Fails with
    /// [`Error::InvalidElement`](crate::Error::InvalidElement).
    fn reconstruct(&self, bytes: &[u8], validate: bool) -> Result<Self::Element>;

    /// Samples a scalar uniformly from `[0, q)`.
    fn random_scalar<R: CryptoRngCore>(&self, rng: &mut R) -> U256;
}
