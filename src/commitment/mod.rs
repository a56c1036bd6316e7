//! Pedersen commitment scheme over a DDH-secure dlog group.
//!
//! The receiver samples a secret trapdoor, publishes `h = g^trapdoor`, and
//! thereafter accepts commitments `c = g^r * h^x` keyed by a committer-chosen
//! 64-bit id. Hiding is perfect (`r` is uniform in `Z_q`); binding holds for
//! anyone who does not know `log_g h`. The [`trapdoor`] variants expose that
//! discrete log on purpose, for protocols whose simulator must equivocate.

/// Committer role.
pub mod committer;
/// Wire messages of the commit and decommit phases.
pub mod messages;
/// Receiver role.
pub mod receiver;
/// Variants exposing the commitment trapdoor.
pub mod trapdoor;

pub use committer::PedersenCommitter;
pub use messages::{CommitmentMsg, DecommitmentMsg};
pub use receiver::{CommitPhaseOutput, PedersenReceiver};
pub use trapdoor::{TrapdoorCommitter, TrapdoorReceiver};
