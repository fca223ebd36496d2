//! End-to-end routing scenarios across zones and roles.

use valkey_router::{
    AlwaysEligible, CommandFlags, LocalityResult, NoLocality, SelectionEngine, ServerKind,
};

use crate::fixtures::{CMD, DenyList, ShardBuilder, ZoneTable, addr, standalone};

/// Primary X with replicas Y (same zone) and Z (different zone):
/// DEMAND_REPLICA returns Y on every call, regardless of rotation offset.
#[test]
fn test_scenario_a_demand_replica_stays_local() {
    let snapshot = ShardBuilder::new("10.0.0.1:6379")
        .replica("10.0.1.1:6379")
        .replica("10.0.2.1:6379")
        .build();
    let locality = ZoneTable::new(&[
        ("10.0.1.1:6379", LocalityResult::Same),
        ("10.0.2.1:6379", LocalityResult::Different),
    ]);
    let engine = SelectionEngine::new(ServerKind::Cluster, AlwaysEligible, locality);

    for _ in 0..10 {
        let picked = engine
            .select_for_slot(&snapshot, Some(1234), CommandFlags::DEMAND_REPLICA, CMD, false)
            .unwrap();
        assert_eq!(picked.addr(), &addr("10.0.1.1:6379"));
    }
}

/// Standalone deployment with primary X disconnected and replica Y up:
/// PREFER_PRIMARY returns Y rather than nothing.
#[test]
fn test_scenario_b_prefer_primary_rescued_by_replica() {
    let snapshot = standalone("10.0.0.1:6379", &["10.0.1.1:6379"]);
    let engine = SelectionEngine::new(
        ServerKind::Standalone,
        DenyList::new(&["10.0.0.1:6379"]),
        NoLocality,
    );

    let picked = engine
        .select_for_slot(&snapshot, None, CommandFlags::PREFER_PRIMARY, CMD, false)
        .unwrap();
    assert_eq!(picked.addr(), &addr("10.0.1.1:6379"));
}

/// Two-endpoint pool with no locality differentiation: four sequential
/// unscoped selections split 2-and-2 across the endpoints.
#[test]
fn test_scenario_c_rotation_splits_evenly() {
    let mut builder = valkey_router::TopologyBuilder::standalone();
    builder.add_primary(addr("10.0.0.1:6379")).unwrap();
    builder.add_primary(addr("10.0.0.2:6379")).unwrap();
    let snapshot = builder.build();
    let engine = SelectionEngine::new(ServerKind::Standalone, AlwaysEligible, NoLocality);

    let mut first = 0;
    let mut second = 0;
    for _ in 0..4 {
        let picked = engine
            .select_any(&snapshot, CommandFlags::NONE, CMD, false)
            .unwrap();
        if picked.addr() == &addr("10.0.0.1:6379") {
            first += 1;
        } else {
            second += 1;
        }
    }
    assert_eq!(first, 2);
    assert_eq!(second, 2);
}
