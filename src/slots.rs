//! Hash slot space and key-to-slot mapping.
//!
//! Clustered deployments partition the key space into 16384 hash slots.
//! [`hash_slot`] computes the slot for a key (honoring the `{hashtag}` rule)
//! and [`SlotRange`] describes a contiguous run of slots owned by one
//! primary.

/// Total number of hash slots in a clustered deployment.
pub const SLOT_COUNT: u16 = 16384;

/// A contiguous range of hash slots [start, end] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRange {
    start: u16,
    end: u16,
}

impl SlotRange {
    /// Create a new slot range.
    ///
    /// # Panics
    /// Debug-only assertions check that start <= end and end < SLOT_COUNT.
    pub fn new(start: u16, end: u16) -> Self {
        debug_assert!(start <= end, "start ({}) must be <= end ({})", start, end);
        debug_assert!(
            end < SLOT_COUNT,
            "end ({}) must be < SLOT_COUNT ({})",
            end,
            SLOT_COUNT
        );
        Self { start, end }
    }

    /// Create a single-slot range.
    pub fn single(slot: u16) -> Self {
        Self {
            start: slot,
            end: slot,
        }
    }

    /// Start of the range (inclusive).
    pub fn start(&self) -> u16 {
        self.start
    }

    /// End of the range (inclusive).
    pub fn end(&self) -> u16 {
        self.end
    }

    /// Get the number of slots in this range.
    pub fn count(&self) -> u16 {
        self.end - self.start + 1
    }

    /// Check if this range contains a specific slot.
    pub fn contains(&self, slot: u16) -> bool {
        slot >= self.start && slot <= self.end
    }

    /// Iterate over all slots in this range.
    pub fn iter(&self) -> impl Iterator<Item = u16> {
        self.start..=self.end
    }
}

impl From<std::ops::RangeInclusive<u16>> for SlotRange {
    fn from(range: std::ops::RangeInclusive<u16>) -> Self {
        SlotRange::new(*range.start(), *range.end())
    }
}

impl std::fmt::Display for SlotRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Compute the hash slot for a key.
///
/// Uses CRC16/XMODEM over the key bytes, reduced mod 16384. If the key
/// contains a `{...}` hashtag, only the first non-empty brace pair is
/// hashed, so related keys can be pinned to the same slot:
///
/// ```
/// use valkey_router::slots::hash_slot;
///
/// assert_eq!(
///     hash_slot(b"{user1000}.following"),
///     hash_slot(b"{user1000}.followers"),
/// );
/// ```
pub fn hash_slot(key: &[u8]) -> u16 {
    crc16(hashtag(key)) % SLOT_COUNT
}

/// Extract the hashtag portion of a key, if any.
///
/// The tag is the content of the first `{...}` pair, and only applies when
/// it is non-empty. `{}` and an unterminated `{` fall back to the whole key.
fn hashtag(key: &[u8]) -> &[u8] {
    let Some(open) = key.iter().position(|&b| b == b'{') else {
        return key;
    };
    let rest = key.get(open + 1..).unwrap_or_default();
    match rest.iter().position(|&b| b == b'}') {
        Some(close) if close > 0 => rest.get(..close).unwrap_or(key),
        _ => key,
    }
}

/// CRC16/XMODEM (polynomial 0x1021, init 0), the cluster key-hashing CRC.
fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}
