//! Topology data model: endpoints, roles, and immutable snapshots.
//!
//! A [`TopologySnapshot`] is a point-in-time view of a deployment, produced
//! wholesale by the embedding client's discovery layer and never mutated by
//! the selection engine. Endpoints live in an arena owned by the snapshot;
//! primary back-references and replica lists are arena indices, which keeps
//! the structure immutable and cycle-free.

mod endpoint;
mod snapshot;

pub use endpoint::{Endpoint, EndpointAddr, Role, ServerKind};
pub use snapshot::{EndpointId, TopologyBuilder, TopologySnapshot};
