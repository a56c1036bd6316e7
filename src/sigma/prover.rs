use crypto_bigint::{NonZero, U256};
use tracing::debug;
use zeroize::Zeroize;

use super::inputs::SigmaDhProverInput;
use super::messages::{SigmaDhFirstMsg, SigmaDhSecondMsg};
use super::soundness_holds;
use crate::crypto::field::{add_mod_q, decode_be, mul_mod_q};
use crate::crypto::{DlogGroup, SecureRng};
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ProverState {
    Fresh,
    AwaitChallenge,
    Done,
}

/// Prover computation of the Diffie-Hellman sigma protocol.
///
/// A one-shot state machine: [`compute_first_msg`](Self::compute_first_msg)
/// then [`compute_second_msg`](Self::compute_second_msg), once each, in that
/// order. Running another proof requires a fresh prover. The nonce `r` lives
/// only between the two calls and is wiped when the response is computed,
/// when an error ends the run, and on drop.
pub struct SigmaDhProver<G: DlogGroup> {
    dlog: G,
    t: usize,
    rng: SecureRng,
    q: NonZero<U256>,
    input: Option<SigmaDhProverInput<G::Element>>,
    nonce: U256,
    state: ProverState,
}

impl<G: DlogGroup> SigmaDhProver<G> {
    /// Creates a prover with soundness parameter `t` (in bits).
    ///
    /// Fails with [`Error::InvalidSoundness`] unless `2^t < q`.
    pub fn new(dlog: G, t: usize) -> Result<Self> {
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
            input: None,
            nonce: U256::ZERO,
            state: ProverState::Fresh,
        })
    }

    /// First move: samples `r` uniform in `[0, q)` and returns
    /// `a = g^r`, `b = h^r`.
    pub fn compute_first_msg(
        &mut self,
        input: SigmaDhProverInput<G::Element>,
    ) -> Result<SigmaDhFirstMsg> {
        if self.state != ProverState::Fresh {
            return Err(Error::InvalidInput(
                "prover already produced its first message".to_string(),
            ));
        }
        let r = self.dlog.random_scalar(&mut self.rng);
        let a = self.dlog.exponentiate(&self.dlog.generator(), &r);
        let b = self.dlog.exponentiate(input.common().h(), &r);

        self.nonce = r;
        self.input = Some(input);
        self.state = ProverState::AwaitChallenge;
        debug!(group = self.dlog.name(), "sigma first message computed");

        Ok(SigmaDhFirstMsg::new(
            self.dlog.element_to_bytes(&a),
            self.dlog.element_to_bytes(&b),
        ))
    }

    /// Third move: checks the challenge length against `t` and returns
    /// `z = (r + e*w) mod q`.
    ///
    /// Fails with [`Error::CheatAttempt`] on a challenge whose bit length is
    /// not `t`. Success and failure both consume the prover.
    pub fn compute_second_msg(&mut self, challenge: &[u8]) -> Result<SigmaDhSecondMsg> {
        if self.state != ProverState::AwaitChallenge {
            return Err(Error::InvalidInput(
                "prover has no pending first message".to_string(),
            ));
        }
        match self.try_compute_second_msg(challenge) {
            Ok(msg) => Ok(msg),
            Err(err) => {
                self.finish();
                Err(err)
            }
        }
    }

    fn try_compute_second_msg(&mut self, challenge: &[u8]) -> Result<SigmaDhSecondMsg> {
        if challenge.len() * 8 != self.t {
            return Err(Error::CheatAttempt(
                "challenge length differs from the soundness parameter".to_string(),
            ));
        }
        let input = self
            .input
            .as_ref()
            .ok_or_else(|| Error::InvalidInput("prover input missing".to_string()))?;

        let e = decode_be(challenge)?;
        let ew = mul_mod_q(&e, input.w(), &self.q);
        let z = add_mod_q(&self.nonce, &ew, &self.q);

        self.finish();
        debug!("sigma second message computed");
        Ok(SigmaDhSecondMsg::new(z))
    }

    fn finish(&mut self) {
        self.nonce.zeroize();
        self.input = None;
        self.state = ProverState::Done;
    }
}

impl<G: DlogGroup> Drop for SigmaDhProver<G> {
    fn drop(&mut self) {
        self.nonce.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::Ristretto255Group;
    use crate::sigma::SigmaDhCommonInput;

    fn sample_input() -> SigmaDhProverInput<<Ristretto255Group as DlogGroup>::Element> {
        let dlog = Ristretto255Group;
        let w = U256::from_u64(5);
        let g = dlog.generator();
        let h = dlog.exponentiate(&g, &U256::from_u64(7));
        let u = dlog.exponentiate(&g, &w);
        let v = dlog.exponentiate(&h, &w);
        SigmaDhProverInput::new(SigmaDhCommonInput::new(h, u, v), w)
    }

    #[test]
    fn rejects_oversized_soundness_parameter() {
        assert!(matches!(
            SigmaDhProver::new(Ristretto255Group, 253),
            Err(Error::InvalidSoundness)
        ));
        assert!(SigmaDhProver::new(Ristretto255Group, 252).is_ok());
    }

    #[test]
    fn is_one_shot() {
        let mut prover = SigmaDhProver::new(Ristretto255Group, 80).unwrap();
        prover.compute_first_msg(sample_input()).unwrap();
        assert!(prover.compute_first_msg(sample_input()).is_err());

        prover.compute_second_msg(&[0u8; 10]).unwrap();
        assert!(prover.compute_second_msg(&[0u8; 10]).is_err());
    }

    #[test]
    fn second_msg_before_first_is_rejected() {
        let mut prover = SigmaDhProver::new(Ristretto255Group, 80).unwrap();
        assert!(prover.compute_second_msg(&[0u8; 10]).is_err());
    }

    #[test]
    fn wrong_challenge_length_is_a_cheat_and_consumes_the_prover() {
        let mut prover = SigmaDhProver::new(Ristretto255Group, 80).unwrap();
        prover.compute_first_msg(sample_input()).unwrap();
        assert!(matches!(
            prover.compute_second_msg(&[0u8; 9]),
            Err(Error::CheatAttempt(_))
        ));
        assert!(matches!(
            prover.compute_second_msg(&[0u8; 10]),
            Err(Error::InvalidInput(_))
        ));
    }
}
