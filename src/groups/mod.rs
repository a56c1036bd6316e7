mod rfc5114;
mod ristretto;

pub use rfc5114::Rfc5114Group;
pub use ristretto::Ristretto255Group;
