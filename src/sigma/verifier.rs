use crypto_bigint::{NonZero, U256};
use tracing::debug;
use zeroize::Zeroize;

use super::inputs::SigmaDhCommonInput;
use super::messages::{SigmaDhFirstMsg, SigmaDhSecondMsg};
use super::soundness_holds;
use crate::crypto::field::decode_be;
use crate::crypto::{DlogGroup, SecureRng};
use crate::{Error, Result};

/// Verifier computation of the Diffie-Hellman sigma protocol.
///
/// The challenge is single-use: [`verify`](Self::verify) consumes whatever
/// [`sample_challenge`](Self::sample_challenge) or
/// [`set_challenge`](Self::set_challenge) installed, wiping the buffer, so a
/// second verification needs a fresh challenge.
pub struct SigmaDhVerifier<G: DlogGroup> {
    dlog: G,
    t: usize,
    rng: SecureRng,
    q: NonZero<U256>,
    challenge: Vec<u8>,
}

impl<G: DlogGroup> SigmaDhVerifier<G> {
    /// Creates a verifier with soundness parameter `t` (in bits).
    ///
    /// Fails with [`Error::InvalidGroup`] when the group does not validate
    /// and [`Error::InvalidSoundness`] unless `2^t < q`.
    pub fn new(dlog: G, t: usize) -> Result<Self> {
        if !dlog.validate_group() {
            return Err(Error::InvalidGroup(format!(
                "{} failed structural validation",
                dlog.name()
            )));
        }
        let q: NonZero<U256> = Option::from(NonZero::new(dlog.order()))
            .ok_or_else(|| Error::InvalidGroup("group order is zero".to_string()))?;
        if !soundness_holds(t, q.as_ref()) {
            return Err(Error::InvalidSoundness);
        }
        Ok(Self {
            dlog,
            t,
            rng: SecureRng::new(),
            q,
            challenge: Vec::new(),
        })
    }

    /// Second move: samples and retains a fresh `t`-bit challenge, returning
    /// a copy for the caller to send.
    pub fn sample_challenge(&mut self) -> Vec<u8> {
        let mut challenge = vec![0u8; self.t / 8];
        self.rng.fill(&mut challenge);
        self.challenge.zeroize();
        self.challenge = challenge.clone();
        challenge
    }

    /// Installs an externally chosen challenge instead of sampling one.
    ///
    /// Fails with [`Error::InvalidInput`] on a length mismatch.
    pub fn set_challenge(&mut self, challenge: &[u8]) -> Result<()> {
        if challenge.len() * 8 != self.t {
            return Err(Error::InvalidInput(
                "challenge length differs from the soundness parameter".to_string(),
            ));
        }
        self.challenge.zeroize();
        self.challenge = challenge.to_vec();
        Ok(())
    }

    /// The currently retained challenge.
    pub fn challenge(&self) -> &[u8] {
        &self.challenge
    }

    /// Final move: checks the two verification equations against the
    /// retained challenge.
    ///
    /// Accepts iff `h` is a group member, `g^z == a * u^e` and
    /// `h^z == b * v^e`. Rejection is `Ok(false)`; an `Err` means the
    /// transcript was malformed (unparseable elements) or no challenge was
    /// installed. The challenge is wiped either way.
    pub fn verify(
        &mut self,
        common: &SigmaDhCommonInput<G::Element>,
        first: &SigmaDhFirstMsg,
        second: &SigmaDhSecondMsg,
    ) -> Result<bool> {
        let result = self.try_verify(common, first, second);
        self.challenge.zeroize();
        self.challenge.clear();
        result
    }

    fn try_verify(
        &mut self,
        common: &SigmaDhCommonInput<G::Element>,
        first: &SigmaDhFirstMsg,
        second: &SigmaDhSecondMsg,
    ) -> Result<bool> {
        if self.challenge.len() * 8 != self.t {
            return Err(Error::InvalidInput(
                "no challenge of the right length is installed".to_string(),
            ));
        }
        let e = decode_be(&self.challenge)?;

        let a = self.dlog.reconstruct(first.a(), true)?;
        let b = self.dlog.reconstruct(first.b(), true)?;

        let mut verified = self.dlog.is_member(common.h());

        // g^z == a * u^e
        let left = self.dlog.exponentiate(&self.dlog.generator(), second.z());
        let u_to_e = self.dlog.exponentiate(common.u(), &e);
        verified = verified && left == self.dlog.multiply(&a, &u_to_e);

        // h^z == b * v^e
        let left = self.dlog.exponentiate(common.h(), second.z());
        let v_to_e = self.dlog.exponentiate(common.v(), &e);
        verified = verified && left == self.dlog.multiply(&b, &v_to_e);

        debug!(verified, "sigma transcript checked");
        Ok(verified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::Ristretto255Group;

    #[test]
    fn rejects_oversized_soundness_parameter() {
        assert!(matches!(
            SigmaDhVerifier::new(Ristretto255Group, 260),
            Err(Error::InvalidSoundness)
        ));
    }

    #[test]
    fn challenge_has_t_bits() {
        let mut verifier = SigmaDhVerifier::new(Ristretto255Group, 80).unwrap();
        assert_eq!(verifier.sample_challenge().len(), 10);
        assert_eq!(verifier.challenge().len(), 10);
    }

    #[test]
    fn set_challenge_checks_length() {
        let mut verifier = SigmaDhVerifier::new(Ristretto255Group, 80).unwrap();
        assert!(verifier.set_challenge(&[0u8; 10]).is_ok());
        assert!(verifier.set_challenge(&[0u8; 11]).is_err());
    }

    #[test]
    fn verify_without_challenge_fails() {
        let dlog = Ristretto255Group;
        let mut verifier = SigmaDhVerifier::new(dlog.clone(), 80).unwrap();
        let g = dlog.generator();
        let common = SigmaDhCommonInput::new(g.clone(), g.clone(), g.clone());
        let first = SigmaDhFirstMsg::new(dlog.element_to_bytes(&g), dlog.element_to_bytes(&g));
        let second = SigmaDhSecondMsg::new(U256::ONE);
        assert!(verifier.verify(&common, &first, &second).is_err());
    }
}
