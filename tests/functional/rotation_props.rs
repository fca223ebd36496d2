//! Property-based tests for rotation fairness and role purity.

use std::collections::HashSet;

use proptest::prelude::*;

use valkey_router::{
    AlwaysEligible, CommandFlags, Endpoint, EndpointAddr, LocalityResult, NoLocality,
    SelectionEngine, ServerKind, TopologyBuilder,
};

use crate::fixtures::{CMD, ShardBuilder, ZoneTable, addr};

/// Strategy for pool sizes worth rotating over.
fn pool_size() -> impl Strategy<Value = usize> {
    2..=8usize
}

/// Strategy for replica counts per shard.
fn replica_count() -> impl Strategy<Value = usize> {
    1..=6usize
}

fn primary_pool(n: usize) -> valkey_router::TopologySnapshot {
    let mut builder = TopologyBuilder::standalone();
    for i in 0..n {
        builder
            .add_primary(addr(&format!("10.0.0.{}:6379", i + 1)))
            .unwrap();
    }
    builder.build()
}

proptest! {
    /// With all candidates eligible and no locality signal, n consecutive
    /// unscoped selections over a pool of size n return each endpoint
    /// exactly once.
    #[test]
    fn prop_unscoped_rotation_is_fair(n in pool_size()) {
        let snapshot = primary_pool(n);
        let engine = SelectionEngine::new(ServerKind::Standalone, AlwaysEligible, NoLocality);

        let mut seen = HashSet::new();
        for _ in 0..n {
            let picked = engine
                .select_any(&snapshot, CommandFlags::NONE, CMD, false)
                .unwrap();
            seen.insert(picked.addr().clone());
        }
        prop_assert_eq!(seen.len(), n);
    }

    /// Replica scans distribute evenly too: n consecutive DEMAND_REPLICA
    /// calls against n indistinguishable replicas hit each exactly once.
    #[test]
    fn prop_replica_rotation_is_fair(n in replica_count()) {
        let mut shard = ShardBuilder::new("10.0.0.1:6379");
        for i in 0..n {
            shard = shard.replica(&format!("10.0.1.{}:6379", i + 1));
        }
        let snapshot = shard.build();
        let engine = SelectionEngine::new(ServerKind::Cluster, AlwaysEligible, NoLocality);

        let mut seen = HashSet::new();
        for _ in 0..n {
            let picked = engine
                .select_for_slot(&snapshot, Some(100), CommandFlags::DEMAND_REPLICA, CMD, false)
                .unwrap();
            seen.insert(picked.addr().clone());
        }
        prop_assert_eq!(seen.len(), n);
    }

    /// A single locality-matching replica is always selected, no matter how
    /// far the rotation counters have advanced beforehand.
    #[test]
    fn prop_locality_match_is_rotation_independent(
        n in replica_count(),
        local in 0..6usize,
        warmup in 0..20usize,
        demand in any::<bool>(),
    ) {
        let local = local % n;
        let mut shard = ShardBuilder::new("10.0.0.1:6379");
        let mut zones: Vec<(String, LocalityResult)> = Vec::new();
        for i in 0..n {
            let replica = format!("10.0.1.{}:6379", i + 1);
            shard = shard.replica(&replica);
            let result = if i == local {
                LocalityResult::Same
            } else {
                LocalityResult::Different
            };
            zones.push((replica, result));
        }
        let snapshot = shard.build();
        let zone_refs: Vec<(&str, LocalityResult)> =
            zones.iter().map(|(a, r)| (a.as_str(), *r)).collect();
        let engine = SelectionEngine::new(
            ServerKind::Cluster,
            AlwaysEligible,
            ZoneTable::new(&zone_refs),
        );

        let flags = if demand {
            CommandFlags::DEMAND_REPLICA
        } else {
            CommandFlags::PREFER_REPLICA
        };
        // Advance the rotation counters an arbitrary amount first.
        for _ in 0..warmup {
            let _ = engine.select_for_slot(&snapshot, Some(5), flags, CMD, false);
        }
        let picked = engine
            .select_for_slot(&snapshot, Some(5), flags, CMD, false)
            .unwrap();
        prop_assert_eq!(picked.addr(), &addr(&format!("10.0.1.{}:6379", local + 1)));
    }

    /// Hard demands never substitute the opposite role, whatever subset of
    /// endpoints is eligible and whatever the zone layout looks like.
    #[test]
    fn prop_hard_demands_preserve_role_purity(
        replicas in replica_count(),
        denied_mask in any::<u8>(),
        zone_mask in any::<u8>(),
        demand_primary in any::<bool>(),
    ) {
        let mut shard = ShardBuilder::new("10.0.0.1:6379");
        let mut zones: Vec<(String, LocalityResult)> = Vec::new();
        for i in 0..replicas {
            let replica = format!("10.0.1.{}:6379", i + 1);
            shard = shard.replica(&replica);
            let result = if zone_mask & (1 << i) != 0 {
                LocalityResult::Same
            } else {
                LocalityResult::Different
            };
            zones.push((replica, result));
        }
        let snapshot = shard.build();
        let zone_refs: Vec<(&str, LocalityResult)> =
            zones.iter().map(|(a, r)| (a.as_str(), *r)).collect();

        let denied: HashSet<EndpointAddr> = (0..replicas)
            .filter(|i| denied_mask & (1 << i) != 0)
            .map(|i| addr(&format!("10.0.1.{}:6379", i + 1)))
            .collect();
        let eligibility = move |e: &Endpoint, _: valkey_router::CommandId, _: bool| {
            !denied.contains(e.addr())
        };
        let engine = SelectionEngine::new(
            ServerKind::Cluster,
            eligibility,
            ZoneTable::new(&zone_refs),
        );

        let flags = if demand_primary {
            CommandFlags::DEMAND_PRIMARY
        } else {
            CommandFlags::DEMAND_REPLICA
        };
        if let Some(picked) = engine.select_for_slot(&snapshot, Some(9), flags, CMD, false) {
            if demand_primary {
                prop_assert!(picked.is_primary());
            } else {
                prop_assert!(picked.is_replica());
            }
        }
    }
}
