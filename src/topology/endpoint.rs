//! Endpoint addresses, roles, and per-endpoint topology metadata.

use std::str::FromStr;

use crate::error::TopologyError;

/// Network address of an endpoint (`host:port`).
///
/// The host may be an IP literal or a DNS name; resolution is the locality
/// oracle's concern, not the topology's.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointAddr {
    host: String,
    port: u16,
}

impl EndpointAddr {
    /// Create an address from host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host portion (IP literal or DNS name).
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Client port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl FromStr for EndpointAddr {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((host, port_str)) = s.rsplit_once(':') else {
            return Err(TopologyError::InvalidAddress(s.to_string()));
        };
        let port = port_str
            .parse()
            .map_err(|_| TopologyError::InvalidAddress(s.to_string()))?;
        if host.is_empty() {
            return Err(TopologyError::InvalidAddress(s.to_string()));
        }
        Ok(EndpointAddr::new(host, port))
    }
}

impl std::fmt::Display for EndpointAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Role of an endpoint within its shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Authoritative endpoint for its hash slots.
    Primary,
    /// Read-scaling mirror of a primary.
    Replica,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Primary => write!(f, "primary"),
            Role::Replica => write!(f, "replica"),
        }
    }
}

/// Deployment kind an endpoint belongs to.
///
/// Unscoped scans only consider endpoints of the engine's own kind, so a
/// snapshot that mixes kinds (e.g. during a migration) never routes a
/// cluster command to a standalone server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerKind {
    /// Non-clustered deployment (no slot map).
    Standalone,
    /// Clustered deployment with hash-slot ownership.
    Cluster,
}

impl std::fmt::Display for ServerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerKind::Standalone => write!(f, "standalone"),
            ServerKind::Cluster => write!(f, "cluster"),
        }
    }
}

/// An endpoint in a topology snapshot.
///
/// Replicas carry an index back to their owning primary; primaries carry the
/// ordered list of their replicas (never including themselves). Both are
/// arena indices into the owning [`TopologySnapshot`](super::TopologySnapshot).
#[derive(Debug, Clone)]
pub struct Endpoint {
    addr: EndpointAddr,
    role: Role,
    kind: ServerKind,
    pub(crate) primary: Option<u32>,
    pub(crate) replicas: Vec<u32>,
}

impl Endpoint {
    pub(crate) fn new(addr: EndpointAddr, role: Role, kind: ServerKind) -> Self {
        Self {
            addr,
            role,
            kind,
            primary: None,
            replicas: Vec::new(),
        }
    }

    /// Network address of this endpoint.
    pub fn addr(&self) -> &EndpointAddr {
        &self.addr
    }

    /// Role of this endpoint.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Deployment kind of this endpoint.
    pub fn kind(&self) -> ServerKind {
        self.kind
    }

    /// Check if this is a primary endpoint.
    pub fn is_primary(&self) -> bool {
        self.role == Role::Primary
    }

    /// Check if this is a replica endpoint.
    pub fn is_replica(&self) -> bool {
        self.role == Role::Replica
    }

    /// Number of replicas attached to this endpoint (primaries only).
    pub fn replica_count(&self) -> usize {
        self.replicas.len()
    }

    pub(crate) fn replica_ids(&self) -> &[u32] {
        &self.replicas
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.addr, self.role)
    }
}
