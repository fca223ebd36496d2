//! Error types for topology construction and locality configuration.
//!
//! The selection engine itself never fails: "no endpoint available" is a
//! normal outcome represented as `None`. Errors only arise when building a
//! topology snapshot that violates a structural invariant, or when parsing a
//! zone/subnet configuration.

use thiserror::Error;

use crate::topology::EndpointAddr;

/// Error type for topology snapshot construction.
#[derive(Error, Debug)]
pub enum TopologyError {
    /// The same address was registered twice in one snapshot.
    #[error("duplicate endpoint address: {0}")]
    DuplicateEndpoint(EndpointAddr),

    /// A replica was attached to an endpoint that is not a primary.
    #[error("cannot attach replica to non-primary endpoint: {0}")]
    ReplicaOfReplica(EndpointAddr),

    /// A hash slot was assigned to an endpoint that is not a primary.
    #[error("slot owner must be a primary endpoint: {0}")]
    SlotOwnerNotPrimary(EndpointAddr),

    /// A slot index outside the 0..16384 slot space.
    #[error("slot {0} is out of range (slot space is 0..16384)")]
    SlotOutOfRange(u16),

    /// Slot assignment attempted on a standalone (non-clustered) topology.
    #[error("standalone topologies have no slot map")]
    NotClustered,

    /// An endpoint handle from a different or stale builder.
    #[error("unknown endpoint handle (index {0})")]
    UnknownEndpoint(u32),

    /// An address that does not parse as `host:port`.
    #[error("invalid endpoint address: {0}")]
    InvalidAddress(String),
}

/// Error type for zone/subnet locality configuration.
#[derive(Error, Debug)]
pub enum LocalityConfigError {
    /// A CIDR block that does not parse as `a.b.c.d/prefix`.
    #[error("invalid CIDR block: {0}")]
    InvalidCidr(String),

    /// A CIDR prefix length greater than 32.
    #[error("CIDR prefix length {0} exceeds 32")]
    PrefixTooLong(u8),
}
