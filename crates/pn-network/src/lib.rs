//! Property containers for pore-network transport.
//!
//! The transport core reads geometric and physical properties from these
//! containers but never computes them: pore volumes come from whatever
//! generated the network, phase properties from whatever characterized the
//! fluid. Both are plain validated data holders.

pub mod network;
pub mod phase;

pub use network::Network;
pub use phase::Phase;
