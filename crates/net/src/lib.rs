//! UDP plumbing: the receiving endpoint and a small transmitter for feeding it.

pub mod endpoint;
pub mod receiver;
pub mod transmitter;

pub use endpoint::Endpoint;
pub use receiver::{Datagram, Receiver};
pub use transmitter::Transmitter;
