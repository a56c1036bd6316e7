use crypto_bigint::U256;

use super::messages::{CommitmentMsg, DecommitmentMsg};
use super::{CommitPhaseOutput, PedersenCommitter, PedersenReceiver};
use crate::channel::Channel;
use crate::crypto::DlogGroup;
use crate::Result;

/// Pedersen committer that can check a candidate trapdoor.
///
/// In protocols built on trapdoor commitments the receiver eventually reveals
/// its trapdoor; [`validate`](Self::validate) lets the committer confirm the
/// claim by checking `g^trapdoor == h` before relying on it.
pub struct TrapdoorCommitter<G: DlogGroup, C: Channel> {
    inner: PedersenCommitter<G, C>,
}

impl<G: DlogGroup, C: Channel> TrapdoorCommitter<G, C> {
    /// Creates the committer; identical to [`PedersenCommitter::new`].
    pub fn new(dlog: G, channel: C) -> Result<Self> {
        Ok(Self {
            inner: PedersenCommitter::new(dlog, channel)?,
        })
    }

    /// Checks that `trapdoor` really is the discrete log of the commitment
    /// key: `g^trapdoor == h`.
    pub fn validate(&self, trapdoor: &U256) -> bool {
        let dlog = self.inner.group();
        let g_to_trap = dlog.exponentiate(&dlog.generator(), trapdoor);
        g_to_trap == *self.inner.h()
    }

    /// See [`PedersenCommitter::generate_commitment`].
    pub fn generate_commitment(&mut self, x: &U256, id: i64) -> Result<CommitmentMsg> {
        self.inner.generate_commitment(x, id)
    }

    /// See [`PedersenCommitter::generate_decommitment`].
    pub fn generate_decommitment(&mut self, id: i64) -> Result<DecommitmentMsg> {
        self.inner.generate_decommitment(id)
    }

    /// See [`PedersenCommitter::commit`].
    pub fn commit(&mut self, x: &U256, id: i64) -> Result<()> {
        self.inner.commit(x, id)
    }

    /// See [`PedersenCommitter::decommit`].
    pub fn decommit(&mut self, id: i64) -> Result<()> {
        self.inner.decommit(id)
    }

    /// The receiver's public commitment key `h`.
    pub fn h(&self) -> &G::Element {
        self.inner.h()
    }
}

/// Pedersen receiver that exposes the trapdoor it holds.
///
/// Knowledge of `trapdoor = log_g h` permits equivocation: a commitment
/// `c = g^r * h^x` can be opened to any `x'` by whoever can solve
/// `r' = r + trapdoor * (x - x') mod q`. The plain [`PedersenReceiver`] never
/// reveals the scalar; this variant is for protocols whose security argument
/// needs it.
pub struct TrapdoorReceiver<G: DlogGroup, C: Channel> {
    inner: PedersenReceiver<G, C>,
}

impl<G: DlogGroup, C: Channel> TrapdoorReceiver<G, C> {
    /// Creates the receiver; identical to [`PedersenReceiver::new`].
    pub fn new(dlog: G, channel: C) -> Result<Self> {
        Ok(Self {
            inner: PedersenReceiver::new(dlog, channel)?,
        })
    }

    /// The trapdoor scalar: the discrete log of the published `h`.
    pub fn trapdoor(&self) -> U256 {
        self.inner.trapdoor_scalar()
    }

    /// See [`PedersenReceiver::receive_commitment`].
    pub fn receive_commitment(&mut self) -> Result<CommitPhaseOutput> {
        self.inner.receive_commitment()
    }

    /// See [`PedersenReceiver::receive_decommitment`].
    pub fn receive_decommitment(&mut self, id: i64) -> Result<Option<U256>> {
        self.inner.receive_decommitment(id)
    }

    /// The public commitment key `h = g^trapdoor`.
    pub fn h(&self) -> &G::Element {
        self.inner.h()
    }
}
