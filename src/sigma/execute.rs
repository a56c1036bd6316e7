use tracing::debug;

use super::inputs::{SigmaDhCommonInput, SigmaDhProverInput};
use super::messages::{SigmaDhFirstMsg, SigmaDhSecondMsg};
use super::prover::SigmaDhProver;
use super::verifier::SigmaDhVerifier;
use crate::channel::Channel;
use crate::crypto::DlogGroup;
use crate::Result;

/// Drives the prover side of the three moves over a channel: sends the first
/// message, reads the challenge, sends the response.
///
/// The prover is consumed either way; errors (including a bad challenge from
/// the peer) propagate after the prover has wiped its nonce.
pub fn run_prover<G: DlogGroup, C: Channel>(
    channel: &mut C,
    prover: &mut SigmaDhProver<G>,
    input: SigmaDhProverInput<G::Element>,
) -> Result<()> {
    let first = prover.compute_first_msg(input)?;
    channel.write_with_size(&first.to_bytes())?;

    let mut challenge = Vec::new();
    channel.read_with_size_into(&mut challenge)?;
    debug!(bytes = challenge.len(), "challenge received");

    let second = prover.compute_second_msg(&challenge)?;
    channel.write_with_size(&second.to_bytes())?;
    Ok(())
}

/// Drives the verifier side of the three moves over a channel: reads the
/// first message, samples and sends the challenge, reads the response,
/// verifies.
pub fn run_verifier<G: DlogGroup, C: Channel>(
    channel: &mut C,
    verifier: &mut SigmaDhVerifier<G>,
    common: &SigmaDhCommonInput<G::Element>,
) -> Result<bool> {
    let mut raw = Vec::new();
    channel.read_with_size_into(&mut raw)?;
    let first = SigmaDhFirstMsg::from_bytes(&raw)?;

    let challenge = verifier.sample_challenge();
    channel.write_with_size(&challenge)?;

    channel.read_with_size_into(&mut raw)?;
    let second = SigmaDhSecondMsg::from_bytes(&raw)?;

    verifier.verify(common, &first, &second)
}
