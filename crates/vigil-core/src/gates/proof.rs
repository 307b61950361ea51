use crate::types::journal::journal_digest;
use thiserror::Error;

/// Failure reported by the external seal verifier, carried through
/// unchanged — this crate never reinterprets a rejected proof.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Seal rejected by verifier: {reason}")]
pub struct SealError {
    pub reason: String,
}

impl SealError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// External succinct-proof verifier capability.
///
/// Checks that `seal` proves an execution of the program identified by
/// `image_id` that committed to exactly `journal_digest`. The verification
/// algorithm itself lives behind this seam; the core only decides what to
/// hand it.
pub trait SealVerifier {
    fn verify(
        &self,
        seal: &[u8],
        image_id: [u8; 32],
        journal_digest: [u8; 32],
    ) -> Result<(), SealError>;
}

/// Bind `seal` to the raw journal bytes and delegate to the verifier.
///
/// The digest is computed over the still-encoded bytes as received, never a
/// re-encoding — a proof commits to bytes, not to a parsed structure.
pub fn verify_journal_seal<V: SealVerifier + ?Sized>(
    verifier: &V,
    seal: &[u8],
    image_id: [u8; 32],
    raw_journal: &[u8],
) -> Result<(), SealError> {
    verifier.verify(seal, image_id, journal_digest(raw_journal))
}
