use std::collections::HashMap;

use crypto_bigint::{NonZero, U256};
use tracing::debug;
use zeroize::Zeroize;

use super::messages::{CommitmentMsg, DecommitmentMsg};
use crate::channel::Channel;
use crate::crypto::{DlogGroup, SecureRng};
use crate::{Error, Result};

/// Output of one commit phase: the id the committer chose for it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CommitPhaseOutput {
    id: i64,
}

impl CommitPhaseOutput {
    /// The committer-chosen commitment id.
    pub fn id(&self) -> i64 {
        self.id
    }
}

/// Receiver side of the Pedersen commitment scheme.
///
/// Construction runs the preprocess phase: the receiver samples the secret
/// trapdoor, computes `h = g^trapdoor` and publishes it over the channel.
/// Afterwards it accepts any number of commitments, keyed by committer-chosen
/// ids, and opens them in whatever order the committer decommits.
///
/// Any operation that returns an error leaves the session in a terminal
/// state; later calls fail with [`Error::SessionAborted`]. The trapdoor is
/// zeroized on abort and on drop.
pub struct PedersenReceiver<G: DlogGroup, C: Channel> {
    dlog: G,
    channel: C,
    q: NonZero<U256>,
    trapdoor: U256,
    h: G::Element,
    commitments: HashMap<i64, CommitmentMsg>,
    aborted: bool,
}

impl<G: DlogGroup, C: Channel> PedersenReceiver<G, C> {
    /// Creates the receiver and performs the preprocess phase.
    ///
    /// Fails with [`Error::SecurityLevel`] when the group lacks DDH, with
    /// [`Error::InvalidGroup`] when it fails structural validation, and with
    /// [`Error::Io`] when publishing `h` fails.
    pub fn new(dlog: G, channel: C) -> Result<Self> {
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

        let mut rng = SecureRng::new();
        let trapdoor = dlog.random_scalar(&mut rng);
        let h = dlog.exponentiate(&dlog.generator(), &trapdoor);

        let mut receiver = Self {
            dlog,
            channel,
            q,
            trapdoor,
            h,
            commitments: HashMap::new(),
            aborted: false,
        };
        let h_bytes = receiver.dlog.element_to_bytes(&receiver.h);
        receiver.channel.write_with_size(&h_bytes)?;
        debug!(group = receiver.dlog.name(), "receiver preprocess published");
        Ok(receiver)
    }

    /// Reads one commitment message and records it.
    ///
    /// A commitment reusing an id overwrites the earlier entry.
    pub fn receive_commitment(&mut self) -> Result<CommitPhaseOutput> {
        self.ensure_active()?;
        match self.try_receive_commitment() {
            Ok(out) => Ok(out),
            Err(err) => {
                self.abort();
                Err(err)
            }
        }
    }

    fn try_receive_commitment(&mut self) -> Result<CommitPhaseOutput> {
        let mut raw = Vec::new();
        self.channel.read_with_size_into(&mut raw)?;
        let msg = CommitmentMsg::from_bytes(&raw)?;
        let id = msg.id();
        self.commitments.insert(id, msg);
        debug!(id, "commitment received");
        Ok(CommitPhaseOutput { id })
    }

    /// Reads one decommitment message and verifies it against the stored
    /// commitment `id`.
    ///
    /// Returns `Ok(Some(x))` when the opening is valid and `Ok(None)` when it
    /// is not (an out-of-range `x` or a commitment mismatch is a rejection,
    /// not an error). Fails with [`Error::UnknownId`] when `id` was never
    /// committed to.
    pub fn receive_decommitment(&mut self, id: i64) -> Result<Option<U256>> {
        self.ensure_active()?;
        match self.try_receive_decommitment(id) {
            Ok(out) => Ok(out),
            Err(err) => {
                self.abort();
                Err(err)
            }
        }
    }

    fn try_receive_decommitment(&mut self, id: i64) -> Result<Option<U256>> {
        let mut raw = Vec::new();
        self.channel.read_with_size_into(&mut raw)?;
        let msg = DecommitmentMsg::from_bytes(&raw)?;
        let stored = self.commitments.get(&id).ok_or(Error::UnknownId(id))?;
        let commitment = self.dlog.reconstruct(stored.commitment(), true)?;
        let accepted = self.verify_decommitment(&commitment, &msg);
        debug!(id, accepted = accepted.is_some(), "decommitment verified");
        Ok(accepted)
    }

    /// Checks one opening against a reconstructed commitment.
    ///
    /// The range check is `x > q`, strictly greater: `x = q` is admitted and
    /// opens as the value `q` (which is `0 mod q` in the exponent).
    fn verify_decommitment(
        &self,
        commitment: &G::Element,
        msg: &DecommitmentMsg,
    ) -> Option<U256> {
        if *msg.x() > *self.q {
            return None;
        }
        let g_to_r = self.dlog.exponentiate(&self.dlog.generator(), msg.r());
        let h_to_x = self.dlog.exponentiate(&self.h, msg.x());
        if self.dlog.multiply(&g_to_r, &h_to_x) == *commitment {
            Some(*msg.x())
        } else {
            None
        }
    }

    /// The public commitment key `h = g^trapdoor` published at preprocess.
    pub fn h(&self) -> &G::Element {
        &self.h
    }

    /// Reconstructs the stored commitment for `id`, with validation.
    pub fn commitment_value(&self, id: i64) -> Result<G::Element> {
        let stored = self.commitments.get(&id).ok_or(Error::UnknownId(id))?;
        self.dlog.reconstruct(stored.commitment(), true)
    }

    /// The group handle this session runs over.
    pub fn group(&self) -> &G {
        &self.dlog
    }

    pub(crate) fn trapdoor_scalar(&self) -> U256 {
        self.trapdoor
    }

    fn ensure_active(&self) -> Result<()> {
        if self.aborted {
            return Err(Error::SessionAborted);
        }
        Ok(())
    }

    fn abort(&mut self) {
        self.trapdoor.zeroize();
        self.aborted = true;
    }
}

impl<G: DlogGroup, C: Channel> Drop for PedersenReceiver<G, C> {
    fn drop(&mut self) {
        self.trapdoor.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::LocalChannel;
    use crate::groups::Ristretto255Group;

    #[test]
    fn preprocess_publishes_h() {
        let (ours, mut theirs) = LocalChannel::pair();
        let receiver = PedersenReceiver::new(Ristretto255Group, ours).unwrap();

        let mut raw = Vec::new();
        theirs.read_with_size_into(&mut raw).unwrap();
        let published = Ristretto255Group.reconstruct(&raw, true).unwrap();
        assert_eq!(&published, receiver.h());
    }

    #[test]
    fn construction_fails_on_dead_channel() {
        let (ours, theirs) = LocalChannel::pair();
        drop(theirs);
        assert!(matches!(
            PedersenReceiver::new(Ristretto255Group, ours),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn channel_failure_is_terminal() {
        let (ours, theirs) = LocalChannel::pair();
        let mut receiver = PedersenReceiver::new(Ristretto255Group, ours).unwrap();
        drop(theirs);
        assert!(matches!(receiver.receive_commitment(), Err(Error::Io(_))));
        assert!(matches!(
            receiver.receive_commitment(),
            Err(Error::SessionAborted)
        ));
    }
}
