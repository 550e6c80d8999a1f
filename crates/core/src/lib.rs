//! Transport-agnostic core of a small replicated key-value store.
//!
//! Three cooperating pieces live here: [`Node`] (one in-memory replica),
//! [`Router`] (liveness tracking and placement for a fixed node set) and
//! [`Frontend`] (quorum fan-out across nodes). None of them know about
//! networking — callers plug in their own [`NodeClient`]/[`RouterClient`]
//! implementations (gRPC, in-process, or mocked in tests) and a
//! [`NodesFinder`] for placement.

mod client;
mod constants;
mod error;
mod finder;
mod frontend;
mod node;
mod router;
mod types;

pub use client::{NodeClient, RouterClient};
pub use constants::{INIT_TIMEOUT, MIN_REDUNDANCY, REPLICATION_FACTOR};
pub use error::{Error, Result};
pub use finder::{NodesFinder, RendezvousFinder};
pub use frontend::{Frontend, FrontendOptions};
pub use node::{Node, NodeOptions};
pub use router::{Router, RouterOptions};
pub use types::{Payload, RecordID, ServiceAddr};
