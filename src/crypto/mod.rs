/// The prime-order group contract consumed by every protocol.
pub mod dlog;
/// Modular arithmetic primitives.
pub mod field;
/// Cryptographically secure random number generation.
pub mod rng;

pub use dlog::DlogGroup;
pub use rng::SecureRng;
