//! Subnet-based zone resolution.
//!
//! Cloud VPCs usually allocate one or more CIDR blocks per availability
//! zone, so an endpoint's zone can be derived from its IPv4 address alone.
//! [`SubnetLocality`] holds that zone-to-block table plus the client's own
//! zone and implements [`Locality`] on top of it.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::error::LocalityConfigError;
use crate::topology::EndpointAddr;

use super::{Locality, LocalityResult};

/// An IPv4 CIDR block, e.g. `172.16.208.0/20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Ipv4Block {
    base: Ipv4Addr,
    prefix: u8,
}

impl Ipv4Block {
    /// Create a block from a base address and prefix length (0..=32).
    pub fn new(base: Ipv4Addr, prefix: u8) -> Result<Self, LocalityConfigError> {
        if prefix > 32 {
            return Err(LocalityConfigError::PrefixTooLong(prefix));
        }
        Ok(Self { base, prefix })
    }

    /// Check if this block contains an address.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        if self.prefix == 0 {
            return true;
        }
        let mask = u32::MAX << (32 - self.prefix);
        (u32::from(self.base) & mask) == (u32::from(ip) & mask)
    }
}

impl FromStr for Ipv4Block {
    type Err = LocalityConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((base_str, prefix_str)) = s.split_once('/') else {
            return Err(LocalityConfigError::InvalidCidr(s.to_string()));
        };
        let base = base_str
            .parse()
            .map_err(|_| LocalityConfigError::InvalidCidr(s.to_string()))?;
        let prefix = prefix_str
            .parse()
            .map_err(|_| LocalityConfigError::InvalidCidr(s.to_string()))?;
        Ipv4Block::new(base, prefix)
    }
}

impl TryFrom<String> for Ipv4Block {
    type Error = LocalityConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for Ipv4Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix)
    }
}

/// [`Locality`] oracle backed by a zone-to-CIDR table.
///
/// Endpoint hosts that are IP literals are matched directly; DNS names are
/// resolved first (a blocking lookup). Resolution failures and addresses
/// outside every configured block answer [`LocalityResult::Unknown`].
///
/// The configuration shape deserializes from the embedding application's
/// config file:
///
/// ```
/// use valkey_router::SubnetLocality;
///
/// let oracle: SubnetLocality = serde_json::from_str(r#"{
///     "client_zone": "us-east-1d",
///     "zones": {
///         "us-east-1b": ["172.16.208.0/20"],
///         "us-east-1d": ["172.16.224.0/20"],
///         "us-east-1e": ["172.16.240.0/20"]
///     }
/// }"#)?;
/// assert_eq!(oracle.zone_of_ip("172.16.224.9".parse()?), Some("us-east-1d"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SubnetLocality {
    client_zone: String,
    zones: HashMap<String, Vec<Ipv4Block>>,
}

impl SubnetLocality {
    /// Create an oracle with the client's own zone and no blocks yet.
    pub fn new(client_zone: impl Into<String>) -> Self {
        Self {
            client_zone: client_zone.into(),
            zones: HashMap::new(),
        }
    }

    /// Add CIDR blocks for a zone.
    pub fn with_zone(
        mut self,
        zone: impl Into<String>,
        blocks: impl IntoIterator<Item = Ipv4Block>,
    ) -> Self {
        self.zones
            .entry(zone.into())
            .or_default()
            .extend(blocks);
        self
    }

    /// The zone whose CIDR blocks contain `ip`, if any.
    pub fn zone_of_ip(&self, ip: Ipv4Addr) -> Option<&str> {
        self.zones
            .iter()
            .find(|(_, blocks)| blocks.iter().any(|b| b.contains(ip)))
            .map(|(zone, _)| zone.as_str())
    }

    /// The zone of an endpoint address, resolving DNS names when needed.
    pub fn zone_of(&self, addr: &EndpointAddr) -> Option<&str> {
        let ip = resolve_v4(addr)?;
        self.zone_of_ip(ip)
    }
}

impl Locality for SubnetLocality {
    fn is_same_locality(&self, addr: &EndpointAddr) -> LocalityResult {
        let Some(ip) = resolve_v4(addr) else {
            debug!(endpoint = %addr, "could not resolve endpoint address, locality unknown");
            return LocalityResult::Unknown;
        };
        match self.zone_of_ip(ip) {
            Some(zone) if zone == self.client_zone => LocalityResult::Same,
            Some(_) => LocalityResult::Different,
            None => LocalityResult::Unknown,
        }
    }

    fn client_locality(&self) -> Option<&str> {
        Some(&self.client_zone)
    }
}

/// Resolve an endpoint host to an IPv4 address.
///
/// IP literals short-circuit; DNS names go through the system resolver and
/// the first IPv4 answer wins. Any failure yields `None`.
fn resolve_v4(addr: &EndpointAddr) -> Option<Ipv4Addr> {
    if let Ok(ip) = addr.host().parse::<Ipv4Addr>() {
        return Some(ip);
    }
    let mut answers = (addr.host(), addr.port()).to_socket_addrs().ok()?;
    answers.find_map(|a| match a.ip() {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(_) => None,
    })
}
