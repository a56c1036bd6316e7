/// Errors surfaced by protocol sessions and computations.
///
/// Verification failures are deliberately not errors: a Pedersen decommitment
/// that does not open returns `Ok(None)` and a sigma proof that does not
/// verify returns `Ok(false)`. Every `Err` returned by a session operation is
/// terminal for that session.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The group handle does not provide the required security level.
    #[error("group does not provide DDH security: {0}")]
    SecurityLevel(String),

    /// Structural validation of the group failed.
    #[error("invalid dlog group: {0}")]
    InvalidGroup(String),

    /// The soundness parameter does not satisfy `2^t < q`.
    #[error("soundness parameter t does not satisfy 2^t < q")]
    InvalidSoundness,

    /// A scalar out of range, a malformed message, or an operation invoked
    /// out of protocol order.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Bytes that do not deserialize to a group element, or deserialize to a
    /// value outside the group.
    #[error("invalid group element: {0}")]
    InvalidElement(String),

    /// The counterparty sent data only a cheating peer would send.
    #[error("cheat attempt: {0}")]
    CheatAttempt(String),

    /// A decommitment referenced a commitment id that was never received.
    #[error("no commitment with id {0}")]
    UnknownId(i64),

    /// The underlying channel failed; propagated unchanged.
    #[error("channel i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The session already failed; no further operations are possible.
    #[error("session aborted")]
    SessionAborted,
}
