use serde::{Deserialize, Serialize};

/// Slots per epoch on the tracked beacon chain (mainnet value).
pub const SLOTS_PER_EPOCH: u64 = 32;

/// Seconds per slot on the tracked beacon chain (mainnet value).
pub const SECONDS_PER_SLOT: u64 = 12;

/// Depth of the beacon-roots ring buffer: 8191 entries, ~27 hours of
/// history at 12-second slots. Entries older than this are overwritten.
pub const HISTORY_BUFFER_LENGTH: u64 = 8191;

/// serde adapter for 32-byte values encoded as hex strings.
/// Accepts an optional `0x` prefix on input, emits bare hex on output.
pub mod hex32 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        let bytes = hex::decode(s).map_err(serde::de::Error::custom)?;
        if bytes.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "Expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(out)
    }
}

/// Timing parameters of the tracked chain.
///
/// The mainnet values are the defaults, but every algorithm in this crate
/// takes them from here rather than assuming them — a deployment against a
/// testnet with different timing only changes this struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainTiming {
    /// Slots per epoch.
    pub slots_per_epoch: u64,
    /// Seconds per slot.
    pub seconds_per_slot: u64,
    /// Entries retained by the beacon-roots ring buffer.
    pub history_buffer_length: u64,
}

impl Default for ChainTiming {
    fn default() -> Self {
        Self {
            slots_per_epoch: SLOTS_PER_EPOCH,
            seconds_per_slot: SECONDS_PER_SLOT,
            history_buffer_length: HISTORY_BUFFER_LENGTH,
        }
    }
}

impl ChainTiming {
    /// Wall-clock timestamp of the start of `slot`.
    pub fn slot_timestamp(&self, genesis_timestamp: u64, slot: u64) -> u64 {
        genesis_timestamp.saturating_add(slot.saturating_mul(self.seconds_per_slot))
    }

    /// First slot of `epoch`.
    pub fn epoch_start_slot(&self, epoch: u64) -> u64 {
        epoch.saturating_mul(self.slots_per_epoch)
    }
}

/// A specific beacon block at an epoch boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Epoch this checkpoint belongs to.
    pub epoch: u64,
    /// Root of the block at the epoch boundary.
    #[serde(with = "hex32")]
    pub root: [u8; 32],
}

/// The tracked protocol's justified/finalized checkpoint pair.
///
/// Exactly one value is current at any moment; it is replaced atomically
/// when a transition commits. The finalized checkpoint is the one the
/// protocol guarantees will never revert; the justified checkpoint has
/// provisional support only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusState {
    /// The checkpoint with provisional (not yet irreversible) support.
    pub current_justified_checkpoint: Checkpoint,
    /// The checkpoint the protocol guarantees will not be reverted.
    pub finalized_checkpoint: Checkpoint,
}

/// Pad a 20-byte execution-layer address into the 32-byte universal form
/// used for cross-chain sender identities and principals.
pub fn universal_address(addr: &[u8; 20]) -> [u8; 32] {
    let mut padded = [0u8; 32];
    padded[12..].copy_from_slice(addr);
    padded
}
