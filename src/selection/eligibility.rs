//! The eligibility capability consumed by the selection engine.

use crate::topology::Endpoint;

/// Opaque token identifying the command being routed.
///
/// The engine never interprets it; it is passed through to the
/// [`Eligibility`] oracle, which may use it to veto role/command
/// combinations (e.g. a write against a replica).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(u16);

impl CommandId {
    /// Create a command token.
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// The raw token value.
    pub const fn get(self) -> u16 {
        self.0
    }
}

/// Capability for answering whether an endpoint may serve a command.
///
/// Covers both reachability and command/role compatibility. Implementations
/// must be side-effect-free and fast: the engine calls this once per
/// candidate per scan. `allow_degraded` widens the answer to endpoints that
/// are connected but not fully confirmed healthy.
pub trait Eligibility {
    /// Whether `endpoint` may currently serve `command`.
    fn is_selectable(&self, endpoint: &Endpoint, command: CommandId, allow_degraded: bool)
    -> bool;
}

/// Oracle that accepts every endpoint; useful for tests and for embedders
/// that track reachability elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysEligible;

impl Eligibility for AlwaysEligible {
    fn is_selectable(&self, _: &Endpoint, _: CommandId, _: bool) -> bool {
        true
    }
}

impl<F> Eligibility for F
where
    F: Fn(&Endpoint, CommandId, bool) -> bool,
{
    fn is_selectable(
        &self,
        endpoint: &Endpoint,
        command: CommandId,
        allow_degraded: bool,
    ) -> bool {
        self(endpoint, command, allow_degraded)
    }
}
