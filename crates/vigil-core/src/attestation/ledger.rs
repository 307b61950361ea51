use crate::attestation::level::{ConfirmationLevel, ConfirmationSource};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{info, warn};

/// Errors answering a confirmation query.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("No attested root bound for slot {slot}")]
    UnknownSlot { slot: u64 },
}

/// Record emitted for every confirmation merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmed {
    /// Slot the attestation is for.
    pub slot: u64,
    /// Root the attestation is for.
    #[serde(with = "crate::types::beacon::hex32")]
    pub root: [u8; 32],
    /// The merged bitmask after this confirmation.
    pub confirmations: ConfirmationLevel,
}

/// Answer to a level-checked query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfirmation {
    /// The root bound to the queried slot (first writer wins).
    #[serde(with = "crate::types::beacon::hex32")]
    pub root: [u8; 32],
    /// Every source that has attested to this (slot, root) pair.
    pub confirmations: ConfirmationLevel,
    /// Whether the caller's required level is fully present.
    pub satisfied: bool,
}

/// The dual-source attestation ledger.
///
/// Maps each (slot, root) pair to a bitmask of the sources that have
/// attested to it, and each slot to the first root any source attested for
/// it. Bits are only ever OR-merged in — confirmation is monotone
/// non-decreasing, and the two sources commute.
#[derive(Clone, Debug, Default)]
pub struct AttestationLedger {
    /// (slot, root) binding key -> merged source bitmask.
    confirmations: HashMap<[u8; 32], u8>,
    /// slot -> first attested root. Immutable once written.
    bound_roots: HashMap<u64, [u8; 32]>,
}

impl AttestationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key binding a (slot, root) pair in the confirmation store.
    fn binding_key(slot: u64, root: &[u8; 32]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(slot.to_be_bytes());
        hasher.update(root);
        let result = hasher.finalize();
        let mut key = [0u8; 32];
        key.copy_from_slice(&result);
        key
    }

    /// Merge `source`'s bit into the mask for (slot, root).
    ///
    /// The first attestation for a slot also binds its root as canonical
    /// for that slot. A later attestation for the same slot with a
    /// different root keeps its own mask under its own key but does not
    /// change the binding.
    pub fn confirm(
        &mut self,
        slot: u64,
        root: [u8; 32],
        source: ConfirmationSource,
    ) -> Confirmed {
        let key = Self::binding_key(slot, &root);
        let mask = self.confirmations.entry(key).or_insert(0);
        *mask |= source.bit();
        let mask = *mask;

        match self.bound_roots.get(&slot) {
            None => {
                self.bound_roots.insert(slot, root);
            }
            Some(bound) if *bound != root => {
                warn!(
                    slot,
                    bound = %hex::encode(bound),
                    conflicting = %hex::encode(root),
                    "Conflicting root attested for already-bound slot; binding unchanged"
                );
            }
            Some(_) => {}
        }

        info!(
            slot,
            root = %hex::encode(root),
            source = ?source,
            confirmations = mask,
            "Attestation recorded"
        );

        Confirmed {
            slot,
            root,
            confirmations: ConfirmationLevel::from_bits(mask),
        }
    }

    /// Look up the root bound to `slot` and check it against a required
    /// confirmation level. Every bit in `level` must be present for the
    /// result to be satisfied; level [`ConfirmationLevel::NONE`] is
    /// trivially satisfied once any attestation exists.
    pub fn query(
        &self,
        slot: u64,
        level: ConfirmationLevel,
    ) -> Result<RootConfirmation, LedgerError> {
        let root = *self
            .bound_roots
            .get(&slot)
            .ok_or(LedgerError::UnknownSlot { slot })?;
        let mask = self
            .confirmations
            .get(&Self::binding_key(slot, &root))
            .copied()
            .unwrap_or(0);
        let confirmations = ConfirmationLevel::from_bits(mask);

        Ok(RootConfirmation {
            root,
            confirmations,
            satisfied: level.satisfied_by(confirmations),
        })
    }

    /// The root bound to `slot`, if any source has attested for it.
    pub fn bound_root(&self, slot: u64) -> Option<[u8; 32]> {
        self.bound_roots.get(&slot).copied()
    }
}
