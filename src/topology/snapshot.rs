//! Immutable topology snapshots and their validating builder.

use std::collections::HashMap;

use tracing::debug;

use crate::error::TopologyError;
use crate::slots::{SLOT_COUNT, SlotRange};

use super::endpoint::{Endpoint, EndpointAddr, Role, ServerKind};

/// Opaque handle to an endpoint registered with a [`TopologyBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointId(pub(crate) u32);

/// An immutable, point-in-time view of a deployment's endpoints.
///
/// Snapshots are produced wholesale by the discovery layer and swapped
/// atomically; the selection engine only ever reads one for the duration of
/// a single call. Cluster snapshots additionally carry the slot-to-primary
/// map.
#[derive(Debug, Clone)]
pub struct TopologySnapshot {
    endpoints: Vec<Endpoint>,
    /// Arena index of the owning primary per slot; empty for standalone.
    slots: Vec<Option<u32>>,
}

impl TopologySnapshot {
    /// All endpoints in the snapshot, in registration order.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Number of endpoints in the snapshot.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Check if the snapshot has no endpoints.
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Check if this snapshot carries a slot map.
    pub fn is_clustered(&self) -> bool {
        !self.slots.is_empty()
    }

    /// The primary owning a hash slot, if the slot map has an entry for it.
    ///
    /// Returns `None` for standalone snapshots, unassigned slots, and slot
    /// indexes outside the slot space.
    pub fn slot_owner(&self, slot: u16) -> Option<&Endpoint> {
        let id = (*self.slots.get(slot as usize)?)?;
        self.endpoint(id)
    }

    /// Look up an endpoint by address.
    pub fn get(&self, addr: &EndpointAddr) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.addr() == addr)
    }

    /// The owning primary of a replica endpoint.
    ///
    /// Returns `None` for primaries and for replicas whose primary reference
    /// is stale; such replicas stay reachable through unscoped selection.
    pub fn primary_of(&self, endpoint: &Endpoint) -> Option<&Endpoint> {
        self.endpoint(endpoint.primary?)
    }

    /// Iterate over the replicas of a primary endpoint, in attachment order.
    pub fn replicas_of<'a>(
        &'a self,
        endpoint: &'a Endpoint,
    ) -> impl Iterator<Item = &'a Endpoint> {
        endpoint
            .replicas
            .iter()
            .filter_map(|&id| self.endpoint(id))
    }

    pub(crate) fn endpoint(&self, id: u32) -> Option<&Endpoint> {
        self.endpoints.get(id as usize)
    }
}

/// Builder for [`TopologySnapshot`] that enforces structural invariants:
/// slot entries reference primaries only, replicas attach to primaries only,
/// and addresses are unique within a snapshot.
///
/// # Example
///
/// ```
/// use valkey_router::{SlotRange, TopologyBuilder};
///
/// let mut builder = TopologyBuilder::clustered();
/// let p0 = builder.add_primary("10.0.0.1:6379".parse()?)?;
/// let p1 = builder.add_primary("10.0.0.2:6379".parse()?)?;
/// builder.add_replica("10.0.1.1:6379".parse()?, p0)?;
/// builder.assign_slots(SlotRange::new(0, 8191), p0)?;
/// builder.assign_slots(SlotRange::new(8192, 16383), p1)?;
/// let snapshot = builder.build();
/// assert!(snapshot.is_clustered());
/// assert_eq!(snapshot.slot_owner(100).map(|e| e.addr().port()), Some(6379));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct TopologyBuilder {
    endpoints: Vec<Endpoint>,
    slots: Vec<Option<u32>>,
    by_addr: HashMap<EndpointAddr, u32>,
    kind: ServerKind,
}

impl TopologyBuilder {
    /// Start a standalone (non-clustered) topology.
    pub fn standalone() -> Self {
        Self::with_kind(ServerKind::Standalone)
    }

    /// Start a clustered topology with an empty 16384-entry slot map.
    pub fn clustered() -> Self {
        Self::with_kind(ServerKind::Cluster)
    }

    fn with_kind(kind: ServerKind) -> Self {
        let slots = match kind {
            ServerKind::Standalone => Vec::new(),
            ServerKind::Cluster => vec![None; SLOT_COUNT as usize],
        };
        Self {
            endpoints: Vec::new(),
            slots,
            by_addr: HashMap::new(),
            kind,
        }
    }

    /// Register a primary endpoint.
    pub fn add_primary(&mut self, addr: EndpointAddr) -> Result<EndpointId, TopologyError> {
        self.add(addr, Role::Primary)
    }

    /// Register a replica endpoint attached to `primary`.
    pub fn add_replica(
        &mut self,
        addr: EndpointAddr,
        primary: EndpointId,
    ) -> Result<EndpointId, TopologyError> {
        let owner = self
            .endpoints
            .get(primary.0 as usize)
            .ok_or(TopologyError::UnknownEndpoint(primary.0))?;
        if !owner.is_primary() {
            return Err(TopologyError::ReplicaOfReplica(owner.addr().clone()));
        }
        let id = self.add(addr, Role::Replica)?;
        if let Some(replica) = self.endpoints.get_mut(id.0 as usize) {
            replica.primary = Some(primary.0);
        }
        if let Some(owner) = self.endpoints.get_mut(primary.0 as usize) {
            owner.replicas.push(id.0);
        }
        Ok(id)
    }

    /// Assign a range of hash slots to a primary endpoint.
    ///
    /// Ranges owned by the same primary need not be contiguous; later
    /// assignments overwrite earlier ones slot by slot.
    pub fn assign_slots(
        &mut self,
        range: SlotRange,
        owner: EndpointId,
    ) -> Result<(), TopologyError> {
        if self.kind != ServerKind::Cluster {
            return Err(TopologyError::NotClustered);
        }
        let endpoint = self
            .endpoints
            .get(owner.0 as usize)
            .ok_or(TopologyError::UnknownEndpoint(owner.0))?;
        if !endpoint.is_primary() {
            return Err(TopologyError::SlotOwnerNotPrimary(endpoint.addr().clone()));
        }
        if range.end() >= SLOT_COUNT {
            return Err(TopologyError::SlotOutOfRange(range.end()));
        }
        for slot in range.iter() {
            if let Some(entry) = self.slots.get_mut(slot as usize) {
                *entry = Some(owner.0);
            }
        }
        Ok(())
    }

    /// Finalize the snapshot.
    pub fn build(self) -> TopologySnapshot {
        debug!(
            endpoints = self.endpoints.len(),
            kind = %self.kind,
            "built topology snapshot"
        );
        TopologySnapshot {
            endpoints: self.endpoints,
            slots: self.slots,
        }
    }

    fn add(&mut self, addr: EndpointAddr, role: Role) -> Result<EndpointId, TopologyError> {
        if self.by_addr.contains_key(&addr) {
            return Err(TopologyError::DuplicateEndpoint(addr));
        }
        let id = self.endpoints.len() as u32;
        self.by_addr.insert(addr.clone(), id);
        self.endpoints.push(Endpoint::new(addr, role, self.kind));
        Ok(EndpointId(id))
    }
}
