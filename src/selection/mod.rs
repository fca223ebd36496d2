//! The selection engine and its supporting pieces.
//!
//! [`SelectionEngine`] answers two queries against an immutable topology
//! snapshot: "pick an endpoint for this hash slot" and "pick any endpoint".
//! Role preferences arrive as [`CommandFlags`] and normalize to a
//! [`RoleIntent`]; eligibility and locality come from injected oracles; ties
//! between equally-ranked candidates are broken by [`RotationCounter`]s so
//! load spreads evenly over repeated calls.

mod eligibility;
mod engine;
mod flags;
mod rotation;

pub use eligibility::{AlwaysEligible, CommandId, Eligibility};
pub use engine::SelectionEngine;
pub use flags::{CommandFlags, RoleIntent};
pub use rotation::RotationCounter;
