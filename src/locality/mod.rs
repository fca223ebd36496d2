//! Locality (availability-zone) awareness.
//!
//! The selection engine consults a [`Locality`] oracle to decide whether a
//! candidate endpoint shares the caller's placement group. The answer is
//! deliberately tri-state: a resolution failure is [`LocalityResult::Unknown`],
//! which ranks like a non-match but is not an error.
//!
//! [`SubnetLocality`] is a shipped implementation that maps zones to IPv4
//! CIDR blocks, the way cloud deployments usually carve their VPC address
//! space per availability zone.

mod subnet;

pub use subnet::{Ipv4Block, SubnetLocality};

use crate::topology::EndpointAddr;

/// Whether an endpoint shares the caller's placement group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalityResult {
    /// Confirmed same placement group.
    Same,
    /// Confirmed different placement group.
    Different,
    /// Placement could not be determined (e.g. DNS failure). Ranks like
    /// [`Different`](LocalityResult::Different) but is not an error.
    Unknown,
}

impl LocalityResult {
    /// Check if this is a confirmed locality match.
    pub fn is_same(self) -> bool {
        self == LocalityResult::Same
    }
}

/// Capability for answering locality questions about endpoints.
///
/// Implementations may perform blocking resolution (e.g. DNS); the engine
/// calls [`is_same_locality`](Locality::is_same_locality) at most once per
/// candidate per scan and does not cache results. Caching, if desired, is
/// the oracle's responsibility.
pub trait Locality {
    /// Whether `addr` shares the caller's placement group.
    fn is_same_locality(&self, addr: &EndpointAddr) -> LocalityResult;

    /// The caller's own locality identifier, if known.
    fn client_locality(&self) -> Option<&str> {
        None
    }
}

/// Oracle for deployments without placement information.
///
/// Answers [`LocalityResult::Unknown`] for every endpoint, so selection
/// degrades to pure rotation-based load balancing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocality;

impl Locality for NoLocality {
    fn is_same_locality(&self, _addr: &EndpointAddr) -> LocalityResult {
        LocalityResult::Unknown
    }
}

impl<F> Locality for F
where
    F: Fn(&EndpointAddr) -> LocalityResult,
{
    fn is_same_locality(&self, addr: &EndpointAddr) -> LocalityResult {
        self(addr)
    }
}
