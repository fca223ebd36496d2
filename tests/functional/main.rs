// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

//! Functional tests for endpoint selection.
//!
//! These tests drive the selection engine against hand-built topology
//! snapshots with mock eligibility and locality oracles. No network or live
//! server is involved.
//!
//! ```bash
//! # Run all functional tests
//! cargo test --test functional
//!
//! # Run a specific test
//! cargo test --test functional test_scenario_a_demand_replica_stays_local
//! ```

mod fixtures;
mod rotation_props;
mod scenario_tests;
