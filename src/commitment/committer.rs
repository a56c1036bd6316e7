use std::collections::HashMap;

use crypto_bigint::{NonZero, U256};
use tracing::debug;
use zeroize::Zeroize;

use super::messages::{CommitmentMsg, DecommitmentMsg};
use crate::channel::Channel;
use crate::crypto::{DlogGroup, SecureRng};
use crate::{Error, Result};

/// A pending opening: the value, the randomness and the computed commitment.
///
/// The scalar pair is the secret; it is wiped when the entry goes away.
struct PendingOpening<E> {
    x: U256,
    r: U256,
    commitment: E,
}

impl<E> Drop for PendingOpening<E> {
    fn drop(&mut self) {
        self.x.zeroize();
        self.r.zeroize();
    }
}

/// Committer side of the Pedersen commitment scheme.
///
/// Construction runs the preprocess phase: it reads the receiver's published
/// `h` and refuses to proceed unless `h` is a member of the group (anything
/// else is a cheating receiver). Commitments are `c = g^r * h^x` with fresh
/// uniform `r` per commitment, stored under a caller-chosen id until the
/// decommitment is generated.
///
/// Any operation that returns an error leaves the session in a terminal
/// state; later calls fail with [`Error::SessionAborted`]. Stored openings
/// are wiped on abort and on drop.
pub struct PedersenCommitter<G: DlogGroup, C: Channel> {
    dlog: G,
    channel: C,
    rng: SecureRng,
    q: NonZero<U256>,
    h: G::Element,
    openings: HashMap<i64, PendingOpening<G::Element>>,
    aborted: bool,
}

impl<G: DlogGroup, C: Channel> PedersenCommitter<G, C> {
    /// Creates the committer and performs the preprocess phase.
    ///
    /// Fails with [`Error::SecurityLevel`] / [`Error::InvalidGroup`] on an
    /// unsuitable group, with [`Error::Io`] when the channel fails, and with
    /// [`Error::CheatAttempt`] when the received `h` is not a group member.
    pub fn new(dlog: G, mut channel: C) -> Result<Self> {
        if !dlog.is_ddh_secure() {
            return Err(Error::SecurityLevel(format!(
                "{} does not provide DDH security",
                dlog.name()
            )));
        }
        if !dlog.validate_group() {
            return Err(Error::InvalidGroup(format!(
                "{} failed structural validation",
                dlog.name()
            )));
        }
        let q = Option::from(NonZero::new(dlog.order()))
            .ok_or_else(|| Error::InvalidGroup("group order is zero".to_string()))?;

        let mut raw = Vec::new();
        channel.read_with_size_into(&mut raw)?;
        let h = dlog.reconstruct(&raw, false)?;
        if !dlog.is_member(&h) {
            return Err(Error::CheatAttempt(
                "h element is not a member of the group".to_string(),
            ));
        }
        debug!(group = dlog.name(), "committer preprocess complete");

        Ok(Self {
            dlog,
            channel,
            rng: SecureRng::new(),
            q,
            h,
            openings: HashMap::new(),
            aborted: false,
        })
    }

    /// Computes a commitment to `x` under the caller-chosen `id` and returns
    /// the wire message; the caller (or [`commit`](Self::commit)) sends it.
    ///
    /// Requires `x <= q`, inclusive: `x = q` is admitted and wraps to `0` in
    /// the exponent. Reusing an id replaces the stored opening.
    pub fn generate_commitment(&mut self, x: &U256, id: i64) -> Result<CommitmentMsg> {
        self.ensure_active()?;
        match self.try_generate_commitment(x, id) {
            Ok(msg) => Ok(msg),
            Err(err) => {
                self.abort();
                Err(err)
            }
        }
    }

    fn try_generate_commitment(&mut self, x: &U256, id: i64) -> Result<CommitmentMsg> {
        if *x > *self.q {
            return Err(Error::InvalidInput(
                "committed value must lie in Zq".to_string(),
            ));
        }
        let r = self.dlog.random_scalar(&mut self.rng);
        let g_to_r = self.dlog.exponentiate(&self.dlog.generator(), &r);
        let h_to_x = self.dlog.exponentiate(&self.h, x);
        let commitment = self.dlog.multiply(&g_to_r, &h_to_x);

        let msg = CommitmentMsg::new(id, self.dlog.element_to_bytes(&commitment));
        self.openings.insert(
            id,
            PendingOpening {
                x: *x,
                r,
                commitment,
            },
        );
        debug!(id, "commitment generated");
        Ok(msg)
    }

    /// Returns the decommitment message for `id`.
    ///
    /// The opening stays stored; releasing it is permitted but not required,
    /// and keeping it lets a caller decommit the same id again.
    pub fn generate_decommitment(&mut self, id: i64) -> Result<DecommitmentMsg> {
        self.ensure_active()?;
        match self.try_generate_decommitment(id) {
            Ok(msg) => Ok(msg),
            Err(err) => {
                self.abort();
                Err(err)
            }
        }
    }

    fn try_generate_decommitment(&mut self, id: i64) -> Result<DecommitmentMsg> {
        let opening = self.openings.get(&id).ok_or(Error::UnknownId(id))?;
        Ok(DecommitmentMsg::new(opening.x, opening.r))
    }

    /// Generates a commitment to `x` under `id` and sends it.
    pub fn commit(&mut self, x: &U256, id: i64) -> Result<()> {
        let msg = self.generate_commitment(x, id)?;
        self.send(&msg.to_bytes())
    }

    /// Generates the decommitment for `id` and sends it.
    pub fn decommit(&mut self, id: i64) -> Result<()> {
        let msg = self.generate_decommitment(id)?;
        self.send(&msg.to_bytes())
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        if let Err(err) = self.channel.write_with_size(bytes) {
            self.abort();
            return Err(err.into());
        }
        Ok(())
    }

    /// Samples a uniform value in `[0, q)`, suitable for committing to.
    pub fn sample_random_commit_value(&mut self) -> U256 {
        self.dlog.random_scalar(&mut self.rng)
    }

    /// The receiver's public commitment key `h`.
    pub fn h(&self) -> &G::Element {
        &self.h
    }

    /// The group handle this session runs over.
    pub fn group(&self) -> &G {
        &self.dlog
    }

    fn ensure_active(&self) -> Result<()> {
        if self.aborted {
            return Err(Error::SessionAborted);
        }
        Ok(())
    }

    fn abort(&mut self) {
        // PendingOpening::drop wipes the scalars
        self.openings.clear();
        self.aborted = true;
    }
}
