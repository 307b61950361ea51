use crate::attestation::ledger::{AttestationLedger, Confirmed, LedgerError, RootConfirmation};
use crate::attestation::level::{ConfirmationLevel, ConfirmationSource};
use crate::auth::{Action, Authorizer, Principal};
use crate::config::ReceiverConfig;
use crate::consensus::timing::Clock;
use crate::consensus::tracker::{
    manual_transition, process_transition, TransitionError, Transitioned,
};
use crate::gates::proof::SealVerifier;
use crate::gates::transport::{accept_envelope, GateError, MessageTransport};
use crate::oracle::resolver::{find_block_root, BeaconRootOracle, ResolveError};
use crate::types::beacon::{Checkpoint, ConsensusState};
use crate::types::journal::Journal;
use thiserror::Error;
use tracing::info;

/// Errors from the privileged configuration updates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminError {
    #[error("Principal is not authorized for this update")]
    Unauthorized,

    #[error("Update requests a value identical to the current one")]
    InvalidArgument,
}

/// The finality receiver: tracks the source chain's justified/finalized
/// state and the dual-source attestation ledger behind one operation
/// surface.
///
/// Every external effect — proof verification, message transport, the
/// beacon-roots buffer, authorization, the wall clock — enters through an
/// injected capability, so the receiver itself is deterministic and fully
/// testable with doubles.
///
/// Operations are single-writer and all-or-nothing: local precondition
/// checks run first, then at most one external call, then effects; a
/// failure at any point leaves no observable state change.
pub struct FinalityReceiver<V, T, O, A, C> {
    config: ReceiverConfig,
    state: ConsensusState,
    ledger: AttestationLedger,
    verifier: V,
    transport: T,
    oracle: O,
    authorizer: A,
    clock: C,
}

impl<V, T, O, A, C> FinalityReceiver<V, T, O, A, C>
where
    V: SealVerifier,
    T: MessageTransport,
    O: BeaconRootOracle,
    A: Authorizer,
    C: Clock,
{
    /// Construct a receiver from a validated config, a trusted initial
    /// state, and the external capabilities.
    pub fn new(
        config: ReceiverConfig,
        initial_state: ConsensusState,
        verifier: V,
        transport: T,
        oracle: O,
        authorizer: A,
        clock: C,
    ) -> Self {
        Self {
            config,
            state: initial_state,
            ledger: AttestationLedger::new(),
            verifier,
            transport,
            oracle,
            authorizer,
            clock,
        }
    }

    /// Submit a proof-backed transition.
    ///
    /// On success the tracked state advances to the journal's post-state
    /// and the finalized (slot, root) gains a proof-side confirmation.
    pub fn submit_transition(
        &mut self,
        raw_journal: &[u8],
        seal: &[u8],
    ) -> Result<Transitioned, TransitionError> {
        let journal = Journal::decode(raw_journal)?;
        let record = process_transition(
            &mut self.state,
            &journal,
            raw_journal,
            seal,
            self.clock.now_unix(),
            &self.config,
            &self.verifier,
        )?;
        self.ledger.confirm(
            journal.finalized_slot,
            record.post_finalized_root,
            ConfirmationSource::Proof,
        );
        Ok(record)
    }

    /// Privileged operator escape hatch: advance state from a journal
    /// without pre-state linkage or a proof.
    pub fn manual_transition(
        &mut self,
        principal: &Principal,
        journal: &Journal,
    ) -> Result<Transitioned, TransitionError> {
        if !self
            .authorizer
            .can_perform(principal, Action::ManualTransition)
        {
            return Err(TransitionError::Unauthorized);
        }
        let record = manual_transition(
            &mut self.state,
            journal,
            self.clock.now_unix(),
            &self.config,
        )?;
        self.ledger.confirm(
            journal.finalized_slot,
            record.post_finalized_root,
            ConfirmationSource::Proof,
        );
        Ok(record)
    }

    /// Accept a cross-chain confirmation message.
    ///
    /// The transport authenticates the envelope, the gate checks its
    /// origin, and the carried (slot, root) gains a transport-side
    /// confirmation.
    pub fn receive_message(&mut self, envelope: &[u8]) -> Result<Confirmed, GateError> {
        let (slot, root) = accept_envelope(
            &self.transport,
            envelope,
            self.config.emitter_chain_id,
            &self.config.emitter_address,
        )?;
        Ok(self
            .ledger
            .confirm(slot, root, ConfirmationSource::Transport))
    }

    /// The root confirmed for `slot`, checked against a required level.
    pub fn block_root(
        &self,
        slot: u64,
        level: ConfirmationLevel,
    ) -> Result<RootConfirmation, LedgerError> {
        self.ledger.query(slot, level)
    }

    /// The current finalized checkpoint from proof-only state — distinct
    /// from the ledger's cross-source-confirmed view.
    pub fn consensus_checkpoint(&self) -> Checkpoint {
        self.state.finalized_checkpoint
    }

    /// The full tracked state.
    pub fn consensus_state(&self) -> &ConsensusState {
        &self.state
    }

    /// Locate `slot`'s block root in the beacon-roots ring buffer.
    pub fn resolve_block_root(&self, slot: u64) -> Result<[u8; 32], ResolveError> {
        find_block_root(
            &self.oracle,
            self.config.genesis_timestamp,
            slot,
            self.clock.now_unix(),
            &self.config.timing,
        )
    }

    /// Replace the program identifier proofs are checked against.
    /// A no-op update is rejected rather than silently accepted.
    pub fn update_image_id(
        &mut self,
        principal: &Principal,
        new_id: [u8; 32],
    ) -> Result<(), AdminError> {
        if !self.authorizer.can_perform(principal, Action::UpdateImageId) {
            return Err(AdminError::Unauthorized);
        }
        if new_id == self.config.image_id {
            return Err(AdminError::InvalidArgument);
        }
        self.config.image_id = new_id;
        info!(image_id = %hex::encode(new_id), "Image id updated");
        Ok(())
    }

    /// Replace the permissible transition timespan.
    /// A no-op update is rejected rather than silently accepted.
    pub fn update_permissible_timespan(
        &mut self,
        principal: &Principal,
        new_span_secs: u64,
    ) -> Result<(), AdminError> {
        if !self
            .authorizer
            .can_perform(principal, Action::UpdatePermissibleTimespan)
        {
            return Err(AdminError::Unauthorized);
        }
        if new_span_secs == self.config.permissible_timespan_secs {
            return Err(AdminError::InvalidArgument);
        }
        self.config.permissible_timespan_secs = new_span_secs;
        info!(permissible_timespan_secs = new_span_secs, "Permissible timespan updated");
        Ok(())
    }

    /// The active configuration.
    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }
}
