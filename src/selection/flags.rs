//! Caller-facing command flags and their normalized role intent.

/// Flags a caller attaches to an individual operation.
///
/// Only the primary/replica preference bits influence routing; the rest
/// (e.g. [`FIRE_AND_FORGET`](CommandFlags::FIRE_AND_FORGET)) are carried for
/// the embedding client and ignored by the selection engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandFlags(u16);

impl CommandFlags {
    /// No flags; routing defaults to [`RoleIntent::Any`].
    pub const NONE: Self = Self(0);
    /// Use the primary if possible, fall back when it is unavailable.
    pub const PREFER_PRIMARY: Self = Self(1);
    /// Only a primary may serve this operation.
    pub const DEMAND_PRIMARY: Self = Self(1 << 1);
    /// Use a replica if possible, fall back when none is available.
    pub const PREFER_REPLICA: Self = Self(1 << 2);
    /// Only a replica may serve this operation.
    pub const DEMAND_REPLICA: Self = Self(1 << 3);
    /// Do not wait for the reply (no routing effect).
    pub const FIRE_AND_FORGET: Self = Self(1 << 4);
    /// Do not follow redirections (no routing effect).
    pub const NO_REDIRECT: Self = Self(1 << 5);

    /// Check if all bits of `other` are set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// The normalized role intent of these flags.
    pub fn role_intent(self) -> RoleIntent {
        RoleIntent::from_flags(self)
    }
}

impl std::ops::BitOr for CommandFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for CommandFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Normalized role preference of an operation.
///
/// `Demand` intents are hard constraints: the engine never substitutes the
/// opposite role for them. `Prefer` intents allow cross-role fallback when
/// the preferred role yields no eligible candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleIntent {
    /// No role preference.
    #[default]
    Any,
    /// Primary preferred, replica acceptable.
    PreferPrimary,
    /// Primary required.
    DemandPrimary,
    /// Replica preferred, primary acceptable.
    PreferReplica,
    /// Replica required.
    DemandReplica,
}

impl RoleIntent {
    /// Collapse a flag set to its role intent.
    ///
    /// Hard demands win over soft preferences, primary over replica when
    /// both are set; flags with no primary/replica-specific bits normalize
    /// to [`RoleIntent::Any`].
    pub fn from_flags(flags: CommandFlags) -> Self {
        if flags.contains(CommandFlags::DEMAND_PRIMARY) {
            RoleIntent::DemandPrimary
        } else if flags.contains(CommandFlags::DEMAND_REPLICA) {
            RoleIntent::DemandReplica
        } else if flags.contains(CommandFlags::PREFER_PRIMARY) {
            RoleIntent::PreferPrimary
        } else if flags.contains(CommandFlags::PREFER_REPLICA) {
            RoleIntent::PreferReplica
        } else {
            RoleIntent::Any
        }
    }

    /// Check if this intent is a hard role constraint.
    pub fn is_demand(self) -> bool {
        matches!(self, RoleIntent::DemandPrimary | RoleIntent::DemandReplica)
    }
}
