//! Deterministic doubles for the injected capabilities, shared across the
//! module test suites.

use crate::auth::{Action, Authorizer, Principal};
use crate::config::ReceiverConfig;
use crate::consensus::timing::Clock;
use crate::gates::proof::{SealError, SealVerifier};
use crate::gates::transport::{MessageTransport, ParsedEnvelope, TransportError};
use crate::oracle::resolver::BeaconRootOracle;
use crate::types::beacon::{ChainTiming, Checkpoint, ConsensusState};
use crate::types::journal::Journal;
use std::collections::HashMap;

/// Clock pinned to a single instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_unix(&self) -> u64 {
        self.0
    }
}

/// Ring-buffer oracle backed by a timestamp -> root map.
#[derive(Clone, Debug, Default)]
pub struct MapOracle {
    entries: HashMap<u64, [u8; 32]>,
}

impl MapOracle {
    pub fn with_entry(timestamp: u64, root: [u8; 32]) -> Self {
        let mut entries = HashMap::new();
        entries.insert(timestamp, root);
        Self { entries }
    }
}

impl BeaconRootOracle for MapOracle {
    fn parent_block_root(&self, timestamp_be: &[u8; 32]) -> Option<[u8; 32]> {
        if timestamp_be[..24].iter().any(|&b| b != 0) {
            return None;
        }
        let tail: [u8; 8] = timestamp_be[24..].try_into().ok()?;
        self.entries.get(&u64::from_be_bytes(tail)).copied()
    }
}

/// Oracle that must never be reached.
pub struct PanicOracle;

impl BeaconRootOracle for PanicOracle {
    fn parent_block_root(&self, _timestamp_be: &[u8; 32]) -> Option<[u8; 32]> {
        panic!("oracle probed when the range check should have failed first");
    }
}

/// Verifier that accepts every seal.
pub struct AcceptAll;

impl SealVerifier for AcceptAll {
    fn verify(&self, _: &[u8], _: [u8; 32], _: [u8; 32]) -> Result<(), SealError> {
        Ok(())
    }
}

/// Verifier that rejects every seal.
pub struct RejectAll;

impl SealVerifier for RejectAll {
    fn verify(&self, _: &[u8], _: [u8; 32], _: [u8; 32]) -> Result<(), SealError> {
        Err(SealError::new("seal does not verify"))
    }
}

/// Transport that returns one fixed parsed envelope for any input.
#[derive(Clone, Debug)]
pub struct StaticTransport {
    envelope: ParsedEnvelope,
}

impl StaticTransport {
    pub fn new(envelope: ParsedEnvelope) -> Self {
        Self { envelope }
    }
}

impl MessageTransport for StaticTransport {
    fn parse_and_verify(&self, _envelope: &[u8]) -> Result<ParsedEnvelope, TransportError> {
        Ok(self.envelope.clone())
    }
}

/// Transport that rejects every envelope with a fixed reason.
#[derive(Clone, Debug)]
pub struct FailTransport {
    reason: String,
}

impl FailTransport {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl MessageTransport for FailTransport {
    fn parse_and_verify(&self, _envelope: &[u8]) -> Result<ParsedEnvelope, TransportError> {
        Err(TransportError::new(self.reason.clone()))
    }
}

/// Authorizer granting every action.
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn can_perform(&self, _: &Principal, _: Action) -> bool {
        true
    }
}

/// Authorizer granting nothing.
pub struct DenyAll;

impl Authorizer for DenyAll {
    fn can_perform(&self, _: &Principal, _: Action) -> bool {
        false
    }
}

/// A config with mainnet timing and fixed identities.
pub fn make_config() -> ReceiverConfig {
    ReceiverConfig {
        image_id: [0x01; 32],
        permissible_timespan_secs: 86_400,
        emitter_chain_id: 2,
        emitter_address: [0x02; 32],
        genesis_timestamp: 1_606_824_000,
        timing: ChainTiming::default(),
    }
}

fn epoch_root(epoch: u64) -> [u8; 32] {
    [epoch as u8; 32]
}

/// A consensus state with roots derived deterministically from the epochs.
pub fn make_state(justified_epoch: u64, finalized_epoch: u64) -> ConsensusState {
    ConsensusState {
        current_justified_checkpoint: Checkpoint {
            epoch: justified_epoch,
            root: epoch_root(justified_epoch),
        },
        finalized_checkpoint: Checkpoint {
            epoch: finalized_epoch,
            root: epoch_root(finalized_epoch),
        },
    }
}

pub fn make_journal(pre: ConsensusState, post: ConsensusState, finalized_slot: u64) -> Journal {
    Journal {
        pre_state: pre,
        post_state: post,
        finalized_slot,
    }
}
