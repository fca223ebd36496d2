//! valkey-router library crate
//!
//! Routes individual read/write operations against a standalone or clustered
//! Valkey deployment to the endpoint best suited to serve them, taking into
//! account hash-slot ownership, primary/replica role preferences, and whether
//! a candidate endpoint shares the caller's availability zone.
//!
//! The crate is deliberately narrow: it consumes immutable topology snapshots
//! and two injected capability traits ([`Eligibility`] and [`Locality`]) and
//! answers "which endpoint should this command go to". Connection handling,
//! topology discovery/refresh, and health tracking belong to the embedding
//! client; absence of any eligible endpoint is reported as `None`, never as
//! an error.
//!
//! # Example
//!
//! ```
//! use valkey_router::{
//!     AlwaysEligible, CommandFlags, CommandId, NoLocality, SelectionEngine, ServerKind,
//!     SlotRange, TopologyBuilder, hash_slot,
//! };
//!
//! let mut builder = TopologyBuilder::clustered();
//! let p = builder.add_primary("10.0.0.1:6379".parse()?)?;
//! builder.add_replica("10.0.1.1:6379".parse()?, p)?;
//! builder.assign_slots(SlotRange::new(0, 16383), p)?;
//! let snapshot = builder.build();
//!
//! let engine = SelectionEngine::new(ServerKind::Cluster, AlwaysEligible, NoLocality);
//! let slot = hash_slot(b"user:1000");
//! let endpoint = engine.select_for_slot(
//!     &snapshot,
//!     Some(slot),
//!     CommandFlags::PREFER_REPLICA,
//!     CommandId::new(0),
//!     false,
//! );
//! assert_eq!(endpoint.map(|e| e.addr().port()), Some(6379));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod locality;
pub mod selection;
pub mod slots;
pub mod topology;

pub use error::{LocalityConfigError, TopologyError};
pub use locality::{Ipv4Block, Locality, LocalityResult, NoLocality, SubnetLocality};
pub use selection::{
    AlwaysEligible, CommandFlags, CommandId, Eligibility, RoleIntent, RotationCounter,
    SelectionEngine,
};
pub use slots::{SLOT_COUNT, SlotRange, hash_slot};
pub use topology::{
    Endpoint, EndpointAddr, EndpointId, Role, ServerKind, TopologyBuilder, TopologySnapshot,
};
