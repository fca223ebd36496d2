//! Test fixtures: snapshot builders and mock oracles.

use std::collections::{HashMap, HashSet};

use valkey_router::{
    CommandId, Eligibility, Endpoint, EndpointAddr, Locality, LocalityResult, SlotRange,
    TopologyBuilder, TopologySnapshot,
};

/// Command token used throughout the functional tests.
pub const CMD: CommandId = CommandId::new(0);

/// Parse a `host:port` literal.
pub fn addr(s: &str) -> EndpointAddr {
    s.parse().unwrap()
}

/// Builder for single-shard cluster snapshots.
///
/// # Example
/// ```ignore
/// let snapshot = ShardBuilder::new("10.0.0.1:6379")
///     .replica("10.0.1.1:6379")
///     .replica("10.0.2.1:6379")
///     .build();
/// ```
pub struct ShardBuilder {
    primary: EndpointAddr,
    replicas: Vec<EndpointAddr>,
}

impl ShardBuilder {
    /// Start a shard with the given primary address.
    pub fn new(primary: &str) -> Self {
        Self {
            primary: addr(primary),
            replicas: Vec::new(),
        }
    }

    /// Attach a replica to the shard's primary.
    pub fn replica(mut self, replica: &str) -> Self {
        self.replicas.push(addr(replica));
        self
    }

    /// Build a cluster snapshot where the primary owns every slot.
    pub fn build(self) -> TopologySnapshot {
        let mut builder = TopologyBuilder::clustered();
        let p = builder.add_primary(self.primary).unwrap();
        for replica in self.replicas {
            builder.add_replica(replica, p).unwrap();
        }
        builder.assign_slots(SlotRange::new(0, 16383), p).unwrap();
        builder.build()
    }
}

/// Standalone snapshot with one primary and the given replicas.
pub fn standalone(primary: &str, replicas: &[&str]) -> TopologySnapshot {
    let mut builder = TopologyBuilder::standalone();
    let p = builder.add_primary(addr(primary)).unwrap();
    for replica in replicas {
        builder.add_replica(addr(replica), p).unwrap();
    }
    builder.build()
}

/// Locality oracle answering from a fixed per-address table; addresses not
/// in the table are `Unknown`.
pub struct ZoneTable(HashMap<EndpointAddr, LocalityResult>);

impl ZoneTable {
    pub fn new(entries: &[(&str, LocalityResult)]) -> Self {
        Self(entries.iter().map(|&(a, r)| (addr(a), r)).collect())
    }
}

impl Locality for ZoneTable {
    fn is_same_locality(&self, a: &EndpointAddr) -> LocalityResult {
        self.0.get(a).copied().unwrap_or(LocalityResult::Unknown)
    }
}

/// Eligibility oracle with a deny-list of addresses.
pub struct DenyList(HashSet<EndpointAddr>);

impl DenyList {
    pub fn new(denied: &[&str]) -> Self {
        Self(denied.iter().map(|&a| addr(a)).collect())
    }
}

impl Eligibility for DenyList {
    fn is_selectable(&self, e: &Endpoint, _: CommandId, _: bool) -> bool {
        !self.0.contains(e.addr())
    }
}
