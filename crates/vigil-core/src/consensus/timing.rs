use crate::types::beacon::ChainTiming;
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock capability.
///
/// Injected rather than read ambiently so that the freshness checks and the
/// ring-buffer range check are deterministic under test.
pub trait Clock {
    /// Current unix timestamp in seconds.
    fn now_unix(&self) -> u64;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Expected wall-clock timestamp of the first slot of `epoch`.
///
/// Pure and total: `genesis + epoch * slots_per_epoch * seconds_per_slot`,
/// saturating at the top of the u64 range.
pub fn expected_timestamp(genesis_timestamp: u64, epoch: u64, timing: &ChainTiming) -> u64 {
    timing.slot_timestamp(genesis_timestamp, timing.epoch_start_slot(epoch))
}

/// Whether more than `permissible_timespan_secs` have elapsed since
/// `expected`. An expected timestamp in the future has elapsed zero seconds.
pub fn timespan_lapsed(now: u64, expected: u64, permissible_timespan_secs: u64) -> bool {
    now.saturating_sub(expected) > permissible_timespan_secs
}
