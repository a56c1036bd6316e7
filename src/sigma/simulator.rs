use crypto_bigint::{NonZero, U256};
use tracing::debug;

use super::inputs::SigmaDhCommonInput;
use super::messages::{SigmaDhFirstMsg, SigmaDhSecondMsg};
use super::soundness_holds;
use crate::crypto::field::decode_be;
use crate::crypto::{DlogGroup, SecureRng};
use crate::{Error, Result};

/// A full transcript `((a, b), e, z)` produced by the simulator.
#[derive(Clone, Debug)]
pub struct SimulatedTranscript {
    first: SigmaDhFirstMsg,
    challenge: Vec<u8>,
    second: SigmaDhSecondMsg,
}

impl SimulatedTranscript {
    /// The simulated first message `(a, b)`.
    pub fn first(&self) -> &SigmaDhFirstMsg {
        &self.first
    }

    /// The challenge the transcript is conditioned on.
    pub fn challenge(&self) -> &[u8] {
        &self.challenge
    }

    /// The simulated response `z`.
    pub fn second(&self) -> &SigmaDhSecondMsg {
        &self.second
    }
}

/// Transcript simulator for the Diffie-Hellman sigma protocol.
///
/// Works the proof backwards: picks the response `z` first, then solves the
/// verification equations for the first message, `a = g^z * u^(q-e)` and
/// `b = h^z * v^(q-e)`. Conditioned on the challenge, the output distribution
/// is identical to an honest prover's, which is the honest-verifier
/// zero-knowledge property. Used only in security arguments; it never touches
/// a channel.
pub struct SigmaDhSimulator<G: DlogGroup> {
    dlog: G,
    t: usize,
    rng: SecureRng,
    q: NonZero<U256>,
}

impl<G: DlogGroup> SigmaDhSimulator<G> {
    /// Creates a simulator with soundness parameter `t` (in bits).
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
        })
    }

    /// Simulates a transcript conditioned on the supplied challenge.
    ///
    /// Fails with [`Error::CheatAttempt`] on a challenge whose bit length is
    /// not `t`.
    pub fn simulate(
        &mut self,
        common: &SigmaDhCommonInput<G::Element>,
        challenge: &[u8],
    ) -> Result<SimulatedTranscript> {
        if challenge.len() * 8 != self.t {
            return Err(Error::CheatAttempt(
                "challenge length differs from the soundness parameter".to_string(),
            ));
        }

        let z = self.dlog.random_scalar(&mut self.rng);
        let e = decode_be(challenge)?;
        // -e mod q, written as q - e like the verification equations expect
        let neg_e = self.q.wrapping_sub(&e);

        let g_to_z = self.dlog.exponentiate(&self.dlog.generator(), &z);
        let u_to_neg_e = self.dlog.exponentiate(common.u(), &neg_e);
        let a = self.dlog.multiply(&g_to_z, &u_to_neg_e);

        let h_to_z = self.dlog.exponentiate(common.h(), &z);
        let v_to_neg_e = self.dlog.exponentiate(common.v(), &neg_e);
        let b = self.dlog.multiply(&h_to_z, &v_to_neg_e);

        debug!(group = self.dlog.name(), "transcript simulated");
        Ok(SimulatedTranscript {
            first: SigmaDhFirstMsg::new(
                self.dlog.element_to_bytes(&a),
                self.dlog.element_to_bytes(&b),
            ),
            challenge: challenge.to_vec(),
            second: SigmaDhSecondMsg::new(z),
        })
    }

    /// Simulates a transcript on a freshly sampled `t`-bit challenge.
    pub fn simulate_with_fresh_challenge(
        &mut self,
        common: &SigmaDhCommonInput<G::Element>,
    ) -> Result<SimulatedTranscript> {
        let mut challenge = vec![0u8; self.t / 8];
        self.rng.fill(&mut challenge);
        self.simulate(common, &challenge)
    }
}
