//! Sigma protocol for the Diffie-Hellman relation.
//!
//! Proves, in three public-coin moves, that a tuple `(g, h, u, v)` satisfies
//! `u = g^w` and `v = h^w` for a witness `w` the prover holds:
//!
//! 1. prover sends `a = g^r`, `b = h^r` for fresh uniform `r`;
//! 2. verifier sends a random `t`-bit challenge `e`;
//! 3. prover sends `z = (r + e*w) mod q`; the verifier accepts iff
//!    `h` is in the group, `g^z == a * u^e` and `h^z == b * v^e`.
//!
//! Soundness error is `2^-t` per run, which is why every constructor insists
//! on `2^t < q`. The [`simulator`] produces transcripts with the same
//! distribution as honest runs conditioned on the challenge, which is the
//! honest-verifier zero-knowledge argument.

/// Executors driving the three moves over a channel.
pub mod execute;
/// Common and prover inputs.
pub mod inputs;
/// Wire messages of the three moves.
pub mod messages;
/// Prover computation (one-shot state machine).
pub mod prover;
/// Transcript simulator for the zero-knowledge argument.
pub mod simulator;
/// Verifier computation.
pub mod verifier;

pub use execute::{run_prover, run_verifier};
pub use inputs::{SigmaDhCommonInput, SigmaDhProverInput};
pub use messages::{SigmaDhFirstMsg, SigmaDhSecondMsg};
pub use prover::SigmaDhProver;
pub use simulator::{SigmaDhSimulator, SimulatedTranscript};
pub use verifier::SigmaDhVerifier;

use crypto_bigint::U256;

/// Whether the soundness parameter satisfies `2^t < q`.
///
/// For a prime `q > 2` this is exactly `t < bitlen(q)`.
pub(crate) fn soundness_holds(t: usize, q: &U256) -> bool {
    (t as u32) < q.bits()
}
