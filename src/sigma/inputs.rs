use crypto_bigint::U256;
use zeroize::Zeroize;

/// Public statement of the Diffie-Hellman relation: the claim is
/// `u = g^w` and `v = h^w` for some witness `w` (the generator `g` is
/// implicit in the group handle).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SigmaDhCommonInput<E> {
    h: E,
    u: E,
    v: E,
}

impl<E> SigmaDhCommonInput<E> {
    /// Builds the statement from its three elements.
    pub fn new(h: E, u: E, v: E) -> Self {
        Self { h, u, v }
    }

    /// The second generator `h`.
    pub fn h(&self) -> &E {
        &self.h
    }

    /// The element claimed to be `g^w`.
    pub fn u(&self) -> &E {
        &self.u
    }

    /// The element claimed to be `h^w`.
    pub fn v(&self) -> &E {
        &self.v
    }
}

/// Prover input: the statement plus the witness `w`.
///
/// The witness is wiped when the input is dropped.
#[derive(Clone, Debug)]
pub struct SigmaDhProverInput<E> {
    common: SigmaDhCommonInput<E>,
    w: U256,
}

impl<E> SigmaDhProverInput<E> {
    /// Pairs a statement with its witness.
    pub fn new(common: SigmaDhCommonInput<E>, w: U256) -> Self {
        Self { common, w }
    }

    /// The public statement.
    pub fn common(&self) -> &SigmaDhCommonInput<E> {
        &self.common
    }

    /// The secret witness.
    pub fn w(&self) -> &U256 {
        &self.w
    }
}

impl<E> Drop for SigmaDhProverInput<E> {
    fn drop(&mut self) {
        self.w.zeroize();
    }
}
