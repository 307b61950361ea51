use crate::config::ReceiverConfig;
use crate::consensus::timing::{expected_timestamp, timespan_lapsed};
use crate::gates::proof::{verify_journal_seal, SealError, SealVerifier};
use crate::types::beacon::ConsensusState;
use crate::types::journal::{Journal, JournalError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Errors advancing the tracked consensus state.
/// Each variant names a specific, actionable failure — never a generic
/// "invalid" error.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Journal pre-state does not match the tracked consensus state")]
    InvalidPreState {
        expected: ConsensusState,
        got: ConsensusState,
    },

    #[error(
        "Permissible timespan lapsed: finalized epoch {epoch} was expected at {expected_timestamp}, now is {now}, permitted lag is {permissible_timespan_secs}s"
    )]
    PermissibleTimespanLapsed {
        epoch: u64,
        expected_timestamp: u64,
        now: u64,
        permissible_timespan_secs: u64,
    },

    #[error(transparent)]
    Journal(#[from] JournalError),

    #[error(transparent)]
    Seal(#[from] SealError),

    #[error("Principal is not authorized to transition consensus state manually")]
    Unauthorized,
}

/// Record emitted when a transition commits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transitioned {
    /// Finalized root before the transition.
    #[serde(with = "crate::types::beacon::hex32")]
    pub pre_finalized_root: [u8; 32],
    /// Finalized root after the transition.
    #[serde(with = "crate::types::beacon::hex32")]
    pub post_finalized_root: [u8; 32],
    /// Full state before the transition.
    pub pre_state: ConsensusState,
    /// Full state after the transition.
    pub post_state: ConsensusState,
}

/// Process an ordinary, proof-backed transition.
///
/// The complete pipeline, in order:
/// 1. Causal linkage: the journal's pre-state must equal the tracked state
///    exactly, both checkpoints, both fields.
/// 2. Freshness: the post-state's finalized epoch must not be further in
///    the past than the permissible timespan allows.
/// 3. External verification — THE CORE TRUST OPERATION: the seal must bind
///    the raw journal bytes to the configured program identifier. Nothing
///    is mutated before this returns.
/// 4. Commit: the tracked state is replaced atomically.
///
/// Callers confirm `(journal.finalized_slot, post finalized root)` in the
/// attestation ledger after a successful return.
pub fn process_transition<V: SealVerifier + ?Sized>(
    state: &mut ConsensusState,
    journal: &Journal,
    raw_journal: &[u8],
    seal: &[u8],
    now: u64,
    config: &ReceiverConfig,
    verifier: &V,
) -> Result<Transitioned, TransitionError> {
    if journal.pre_state != *state {
        return Err(TransitionError::InvalidPreState {
            expected: *state,
            got: journal.pre_state,
        });
    }

    check_freshness(journal, now, config)?;

    verify_journal_seal(verifier, seal, config.image_id, raw_journal)?;

    Ok(commit(state, journal))
}

/// Privileged operator escape hatch.
///
/// Performs the same state update as an ordinary transition but skips the
/// pre-state linkage check and the proof verification; the freshness check
/// still applies. This is the only path that advances state without
/// cryptographic evidence — authorization is the caller's responsibility
/// and must be evaluated before invoking.
pub fn manual_transition(
    state: &mut ConsensusState,
    journal: &Journal,
    now: u64,
    config: &ReceiverConfig,
) -> Result<Transitioned, TransitionError> {
    check_freshness(journal, now, config)?;
    Ok(commit(state, journal))
}

fn check_freshness(
    journal: &Journal,
    now: u64,
    config: &ReceiverConfig,
) -> Result<(), TransitionError> {
    let epoch = journal.post_state.finalized_checkpoint.epoch;
    let expected = expected_timestamp(config.genesis_timestamp, epoch, &config.timing);
    if timespan_lapsed(now, expected, config.permissible_timespan_secs) {
        return Err(TransitionError::PermissibleTimespanLapsed {
            epoch,
            expected_timestamp: expected,
            now,
            permissible_timespan_secs: config.permissible_timespan_secs,
        });
    }
    Ok(())
}

fn commit(state: &mut ConsensusState, journal: &Journal) -> Transitioned {
    let pre = *state;
    *state = journal.post_state;

    info!(
        pre_epoch = pre.finalized_checkpoint.epoch,
        post_epoch = journal.post_state.finalized_checkpoint.epoch,
        post_root = %hex::encode(journal.post_state.finalized_checkpoint.root),
        "Consensus state transitioned"
    );

    Transitioned {
        pre_finalized_root: pre.finalized_checkpoint.root,
        post_finalized_root: journal.post_state.finalized_checkpoint.root,
        pre_state: pre,
        post_state: journal.post_state,
    }
}
