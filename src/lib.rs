//! # Interactive Discrete-Log Protocols
//!
//! ## Overview
//!
//! Two-party cryptographic protocols over a prime-order cyclic group with a
//! DDH-secure generator, exchanged over a reliable length-prefixed byte
//! channel:
//!
//! - **Pedersen commitments** — a perfectly-hiding, computationally-binding
//!   commitment scheme. The receiver publishes `h = g^trapdoor`; the
//!   committer answers commit requests with `c = g^r * h^x` and later opens
//!   them by revealing `(x, r)`. A trapdoor variant exposes the receiver's
//!   secret, which permits equivocation in simulation-based proofs.
//! - **Sigma protocol for the Diffie-Hellman relation** — a three-move
//!   honest-verifier zero-knowledge proof that a tuple `(g, h, u, v)`
//!   satisfies `u = g^w` and `v = h^w`, together with the simulator used to
//!   argue zero knowledge.
//!
//! ## Quick Start
//!
//! ```rust
//! use dlog_protocols::{
//!     DlogGroup, Ristretto255Group, SigmaDhCommonInput, SigmaDhProver,
//!     SigmaDhProverInput, SigmaDhVerifier,
//! };
//! use crypto_bigint::U256;
//!
//! let dlog = Ristretto255Group;
//! let w = U256::from_u64(5);
//! let g = dlog.generator();
//! let h = dlog.exponentiate(&g, &U256::from_u64(7));
//! let u = dlog.exponentiate(&g, &w);
//! let v = dlog.exponentiate(&h, &w);
//!
//! let common = SigmaDhCommonInput::new(h, u, v);
//! let mut prover = SigmaDhProver::new(dlog.clone(), 80).unwrap();
//! let mut verifier = SigmaDhVerifier::new(dlog, 80).unwrap();
//!
//! let first = prover
//!     .compute_first_msg(SigmaDhProverInput::new(common.clone(), w))
//!     .unwrap();
//! let challenge = verifier.sample_challenge();
//! let second = prover.compute_second_msg(&challenge).unwrap();
//! assert!(verifier.verify(&common, &first, &second).unwrap());
//! ```
//!
//! ## Security Considerations
//!
//! - **Group selection**: the group handle must report DDH security and pass
//!   structural validation; both are enforced at session construction.
//! - **Randomness**: all secrets are sampled from [`SecureRng`], an OS-entropy
//!   CSPRNG. Callers must not depend on reproducibility.
//! - **Secret hygiene**: trapdoors, commitment openings and sigma nonces are
//!   zeroized as soon as the protocol no longer needs them, including on
//!   session abort.
//! - **Adversarial peers**: elements received from the counterparty are
//!   reconstructed with membership validation; a decommitment that fails to
//!   open is rejected with `None`, a proof that fails to verify with `false`.
//!
//! ## Out of Scope
//!
//! Network transport (the [`Channel`] trait is a blocking byte abstraction),
//! authentication, key management, and non-interactive (Fiat-Shamir)
//! transforms.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::all)]

/// Length-prefixed byte channel between the two parties.
pub mod channel;
/// Pedersen commitment scheme (committer, receiver, trapdoor variants).
pub mod commitment;
/// Cryptographic primitives: group contract, modular arithmetic, RNG.
pub mod crypto;
/// Error types for the library.
pub mod error;
/// Dlog group implementations satisfying the [`DlogGroup`] contract.
pub mod groups;
/// Sigma protocol for the Diffie-Hellman relation.
pub mod sigma;

pub(crate) mod wire;

pub use channel::{Channel, LocalChannel, StreamChannel};
pub use commitment::{
    CommitPhaseOutput, CommitmentMsg, DecommitmentMsg, PedersenCommitter, PedersenReceiver,
    TrapdoorCommitter, TrapdoorReceiver,
};
pub use crypto::{DlogGroup, SecureRng};
pub use error::Error;
pub use groups::{Rfc5114Group, Ristretto255Group};
pub use sigma::{
    run_prover, run_verifier, SigmaDhCommonInput, SigmaDhFirstMsg, SigmaDhProver,
    SigmaDhProverInput, SigmaDhSecondMsg, SigmaDhSimulator, SigmaDhVerifier, SimulatedTranscript,
};

/// A specialized Result type for protocol operations.
pub type Result<T> = core::result::Result<T, Error>;
