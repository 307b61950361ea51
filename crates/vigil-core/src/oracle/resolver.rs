use crate::types::beacon::ChainTiming;
use thiserror::Error;

/// Read-only view of the chain's beacon-roots ring buffer.
///
/// The buffer maps a timestamp to the root of the block that is the
/// *parent* of that timestamp's block, retains only the most recent
/// `history_buffer_length` entries, and is keyed by a 32-byte big-endian
/// timestamp — that key width is part of the oracle's wire contract and is
/// preserved at this boundary.
pub trait BeaconRootOracle {
    /// The parent block root recorded at `timestamp_be`, or None if the
    /// buffer holds no entry for that exact timestamp.
    fn parent_block_root(&self, timestamp_be: &[u8; 32]) -> Option<[u8; 32]>;
}

/// Errors locating a historical block root.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error(
        "Slot {slot} timestamp {timestamp} has aged out of the ring buffer (earliest retained is {earliest})"
    )]
    TimestampOutOfRange {
        slot: u64,
        timestamp: u64,
        earliest: u64,
    },

    #[error("No block root found for slot {slot} scanning forward to {horizon}")]
    NoBlockRootFound { slot: u64, horizon: u64 },
}

/// Encode a timestamp as the oracle's 32-byte big-endian key.
pub fn timestamp_key(timestamp: u64) -> [u8; 32] {
    let mut key = [0u8; 32];
    key[24..].copy_from_slice(&timestamp.to_be_bytes());
    key
}

/// Locate the block root for `slot` in the ring buffer.
///
/// The oracle answers for the *parent* of a given timestamp, so the first
/// candidate is the timestamp of `slot + 1`. If that candidate has already
/// aged out of the buffer the search fails before any probe. Otherwise the
/// scan walks forward one slot width at a time — timestamps with no entry
/// are slots where no block was produced — and gives up once the candidate
/// timestamp passes `now`.
pub fn find_block_root<O: BeaconRootOracle + ?Sized>(
    oracle: &O,
    genesis_timestamp: u64,
    slot: u64,
    now: u64,
    timing: &ChainTiming,
) -> Result<[u8; 32], ResolveError> {
    let first = timing.slot_timestamp(genesis_timestamp, slot.saturating_add(1));
    let earliest = now.saturating_sub(
        timing
            .history_buffer_length
            .saturating_mul(timing.seconds_per_slot),
    );
    if first <= earliest {
        return Err(ResolveError::TimestampOutOfRange {
            slot,
            timestamp: first,
            earliest,
        });
    }

    let mut candidate = first;
    loop {
        if let Some(root) = oracle.parent_block_root(&timestamp_key(candidate)) {
            return Ok(root);
        }
        candidate = candidate.saturating_add(timing.seconds_per_slot);
        if candidate > now {
            return Err(ResolveError::NoBlockRootFound { slot, horizon: now });
        }
    }
}
