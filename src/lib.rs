// src/lib.rs
//! hashport — the engine-integration core.
//!
//! Two pieces, one contract:
//!
//! - [`registry::HashRegistry`]: deterministic 64-bit string hashing with a
//!   process-wide reverse-lookup registry. `hash` never fails; `reverse`
//!   never fails either, answering unregistered values with the
//!   [`registry::UNKNOWN`] sentinel.
//! - [`port::MessagePort`]: a fire-and-forget send of a
//!   (receiver, name, payload) triple into the host's dispatch subsystem.
//!
//! The registry is the interesting half. Identifiers are hashed for
//! performance throughout the host, and the registry keeps them recoverable
//! for logs, tooling, and debuggers without ever making the caller handle a
//! lookup failure.

pub mod hash;
pub mod port;
pub mod registry;

pub use port::{channel, ChannelDispatch, Dispatch, DispatchReceiver, Envelope, MessagePort};
pub use registry::{hash_bytes, hash_str, reverse, HashRegistry, UNKNOWN};
