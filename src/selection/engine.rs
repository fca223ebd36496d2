//! The endpoint selection engine.
//!
//! One consolidated algorithm serves both standalone and clustered
//! deployments, parameterized entirely by the injected [`Eligibility`] and
//! [`Locality`] oracles. The engine holds no mutable state besides its two
//! rotation counters, so it is safe for unbounded concurrent use against
//! immutable snapshot references.

use tracing::{debug, trace};

use crate::locality::Locality;
use crate::topology::{Endpoint, Role, ServerKind, TopologySnapshot};

use super::eligibility::{CommandId, Eligibility};
use super::flags::{CommandFlags, RoleIntent};
use super::rotation::RotationCounter;

/// Picks the endpoint best suited to serve one operation.
///
/// Ranking, in order: the role the intent asks for, then zone locality, then
/// fair rotation among remaining ties. Soft (`Prefer*`) intents may
/// substitute the opposite role when the preferred one is unavailable; hard
/// (`Demand*`) intents never do. Absence of any eligible endpoint is a
/// normal outcome (`None`), not an error.
#[derive(Debug)]
pub struct SelectionEngine<E, L> {
    eligibility: E,
    locality: L,
    kind: ServerKind,
    any_rotation: RotationCounter,
    replica_rotation: RotationCounter,
}

impl<E, L> SelectionEngine<E, L>
where
    E: Eligibility,
    L: Locality,
{
    /// Create an engine for a deployment kind with its two oracles.
    pub fn new(kind: ServerKind, eligibility: E, locality: L) -> Self {
        Self {
            eligibility,
            locality,
            kind,
            any_rotation: RotationCounter::new(),
            replica_rotation: RotationCounter::new(),
        }
    }

    /// The deployment kind this engine routes for.
    pub fn kind(&self) -> ServerKind {
        self.kind
    }

    /// Pick an endpoint for a hash slot.
    ///
    /// With no slot (standalone deployments) or no slot-map entry, this
    /// degrades to [`select_any`](Self::select_any). Otherwise the slot's
    /// primary anchors the search and the intent decides how far the engine
    /// may stray from it.
    pub fn select_for_slot<'a>(
        &self,
        snapshot: &'a TopologySnapshot,
        slot: Option<u16>,
        flags: CommandFlags,
        command: CommandId,
        allow_degraded: bool,
    ) -> Option<&'a Endpoint> {
        let intent = flags.role_intent();
        let Some(primary) = slot.and_then(|s| snapshot.slot_owner(s)) else {
            return self.any_scan(snapshot, intent, command, allow_degraded);
        };

        match intent {
            RoleIntent::DemandPrimary => {
                if self.selectable(primary, command, allow_degraded) {
                    return Some(primary);
                }
                trace!(slot = ?slot, "slot primary not selectable, widening primary search");
                self.any_scan(snapshot, intent, command, allow_degraded)
            }
            RoleIntent::PreferPrimary => {
                if self.selectable(primary, command, allow_degraded) {
                    return Some(primary);
                }
                if let Some(replica) =
                    self.scan_replicas(snapshot, primary, command, allow_degraded)
                {
                    debug!(primary = %primary.addr(), replica = %replica.addr(),
                        "slot primary unavailable, substituting replica");
                    return Some(replica);
                }
                self.any_scan(snapshot, intent, command, allow_degraded)
            }
            RoleIntent::DemandReplica => self
                .scan_replicas(snapshot, primary, command, allow_degraded)
                .or_else(|| self.any_scan(snapshot, intent, command, allow_degraded)),
            RoleIntent::PreferReplica => {
                if let Some(replica) =
                    self.scan_replicas(snapshot, primary, command, allow_degraded)
                {
                    return Some(replica);
                }
                if self.selectable(primary, command, allow_degraded) {
                    debug!(primary = %primary.addr(), "no eligible replica, substituting primary");
                    return Some(primary);
                }
                self.any_scan(snapshot, intent, command, allow_degraded)
            }
            RoleIntent::Any => {
                if self.selectable(primary, command, allow_degraded) {
                    return Some(primary);
                }
                self.any_scan(snapshot, intent, command, allow_degraded)
            }
        }
    }

    /// Pick any endpoint of the engine's deployment kind.
    ///
    /// Scans the full endpoint snapshot in rotated order, honoring the role
    /// intent of `flags` the same way slot-scoped selection does.
    pub fn select_any<'a>(
        &self,
        snapshot: &'a TopologySnapshot,
        flags: CommandFlags,
        command: CommandId,
        allow_degraded: bool,
    ) -> Option<&'a Endpoint> {
        self.any_scan(snapshot, flags.role_intent(), command, allow_degraded)
    }

    /// Scan a primary's replica list for the best eligible replica.
    ///
    /// The scan starts at a rotated offset so that, absent a locality match,
    /// load spreads evenly across the replicas. A locality-matching eligible
    /// replica anywhere in the list is always returned; otherwise the first
    /// eligible replica encountered in rotated order wins.
    fn scan_replicas<'a>(
        &self,
        snapshot: &'a TopologySnapshot,
        primary: &'a Endpoint,
        command: CommandId,
        allow_degraded: bool,
    ) -> Option<&'a Endpoint> {
        let replicas = primary.replica_ids();
        let len = replicas.len();
        let offset = self.replica_rotation.next_offset(len);

        let mut fallback: Option<&Endpoint> = None;
        for i in 0..len {
            let Some(candidate) = replicas
                .get((i + offset) % len)
                .and_then(|&id| snapshot.endpoint(id))
            else {
                continue;
            };
            if !candidate.is_replica() || !self.selectable(candidate, command, allow_degraded) {
                continue;
            }
            if self.locality.is_same_locality(candidate.addr()).is_same() {
                trace!(replica = %candidate.addr(), "locality-matching replica selected");
                return Some(candidate);
            }
            if fallback.is_none() {
                fallback = Some(candidate);
            }
        }
        fallback
    }

    /// Rotated scan over the flat endpoint list.
    ///
    /// Ranking after an immediate same-role locality match: a zone-local
    /// endpoint of the opposite role, then the first same-role endpoint in
    /// rotated order, then the first opposite-role endpoint as a last
    /// resort. Opposite-role tiers only apply to soft preferences; hard
    /// demands restrict the scan to the demanded role and return `None`
    /// when it is absent.
    fn any_scan<'a>(
        &self,
        snapshot: &'a TopologySnapshot,
        intent: RoleIntent,
        command: CommandId,
        allow_degraded: bool,
    ) -> Option<&'a Endpoint> {
        let pool = snapshot.endpoints();
        let len = pool.len();
        let offset = self.any_rotation.next_offset(len);

        let mut role_fallback: Option<&Endpoint> = None;
        let mut locality_fallback: Option<&Endpoint> = None;
        let mut last_resort: Option<&Endpoint> = None;
        for i in 0..len {
            let Some(candidate) = pool.get((i + offset) % len) else {
                continue;
            };
            if candidate.kind() != self.kind
                || !self.selectable(candidate, command, allow_degraded)
            {
                continue;
            }
            match (candidate.role(), intent) {
                // Preferred role: a locality match ends the scan.
                (Role::Replica, RoleIntent::DemandReplica | RoleIntent::PreferReplica)
                | (Role::Primary, RoleIntent::DemandPrimary | RoleIntent::PreferPrimary) => {
                    if self.locality.is_same_locality(candidate.addr()).is_same() {
                        return Some(candidate);
                    }
                    if role_fallback.is_none() {
                        role_fallback = Some(candidate);
                    }
                }
                // Opposite role under a soft preference: zone-locality
                // promotes it over a remote same-role candidate, otherwise
                // it is only a last resort.
                (Role::Replica, RoleIntent::PreferPrimary)
                | (Role::Primary, RoleIntent::PreferReplica) => {
                    if self.locality.is_same_locality(candidate.addr()).is_same() {
                        if locality_fallback.is_none() {
                            locality_fallback = Some(candidate);
                        }
                    } else if last_resort.is_none() {
                        last_resort = Some(candidate);
                    }
                }
                // No preference: first locality match wins, else first
                // eligible in rotated order.
                (_, RoleIntent::Any) => {
                    if self.locality.is_same_locality(candidate.addr()).is_same() {
                        return Some(candidate);
                    }
                    if role_fallback.is_none() {
                        role_fallback = Some(candidate);
                    }
                }
                // Opposite role under a hard demand: never acceptable here.
                (Role::Replica, RoleIntent::DemandPrimary)
                | (Role::Primary, RoleIntent::DemandReplica) => {}
            }
        }

        if let Some(endpoint) = locality_fallback {
            debug!(endpoint = %endpoint.addr(), intent = ?intent,
                "using zone-local endpoint of non-preferred role");
            return Some(endpoint);
        }
        let picked = role_fallback.or(last_resort);
        if picked.is_none() {
            trace!(intent = ?intent, "no eligible endpoint in snapshot");
        }
        picked
    }

    fn selectable(&self, endpoint: &Endpoint, command: CommandId, allow_degraded: bool) -> bool {
        self.eligibility
            .is_selectable(endpoint, command, allow_degraded)
    }
}
