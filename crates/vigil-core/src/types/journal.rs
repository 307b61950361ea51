use crate::types::beacon::{Checkpoint, ConsensusState};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Size of one wire word. Every integer field occupies a full word,
/// big-endian, left-padded with zeros.
pub(crate) const WORD: usize = 32;

/// Encoded journal size: 9 words (4 checkpoints of 2 words each, plus the
/// finalized slot).
pub const JOURNAL_ENCODED_LEN: usize = 9 * WORD;

/// Errors decoding a journal from caller-supplied bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JournalError {
    #[error("Journal length mismatch: expected {expected} bytes, got {got}")]
    Length { expected: usize, got: usize },

    #[error("Integer word at byte offset {offset} does not fit in u64")]
    Overflow { offset: usize },
}

/// The claim bound by a succinct proof: "the protocol state moved from
/// `pre_state` to `post_state`, and `post_state`'s finalized checkpoint
/// corresponds to `finalized_slot`".
///
/// Ephemeral — decoded from input bytes, never persisted. The proof digest
/// is computed over the exact encoded bytes received (see
/// [`journal_digest`]), so field order and widths are part of the wire
/// contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    /// The state the transition departs from.
    pub pre_state: ConsensusState,
    /// The state the transition arrives at.
    pub post_state: ConsensusState,
    /// Slot of `post_state`'s finalized checkpoint.
    pub finalized_slot: u64,
}

impl Journal {
    /// Decode a journal from its 288-byte wire encoding.
    pub fn decode(raw: &[u8]) -> Result<Self, JournalError> {
        if raw.len() != JOURNAL_ENCODED_LEN {
            return Err(JournalError::Length {
                expected: JOURNAL_ENCODED_LEN,
                got: raw.len(),
            });
        }

        Ok(Self {
            pre_state: ConsensusState {
                current_justified_checkpoint: decode_checkpoint(raw, 0)?,
                finalized_checkpoint: decode_checkpoint(raw, 2)?,
            },
            post_state: ConsensusState {
                current_justified_checkpoint: decode_checkpoint(raw, 4)?,
                finalized_checkpoint: decode_checkpoint(raw, 6)?,
            },
            finalized_slot: decode_u64_at(raw, 8)?,
        })
    }

    /// Encode this journal into its wire form — the exact inverse of
    /// [`Journal::decode`].
    pub fn encode(&self) -> [u8; JOURNAL_ENCODED_LEN] {
        let mut out = [0u8; JOURNAL_ENCODED_LEN];
        encode_checkpoint(&mut out, 0, &self.pre_state.current_justified_checkpoint);
        encode_checkpoint(&mut out, 2, &self.pre_state.finalized_checkpoint);
        encode_checkpoint(&mut out, 4, &self.post_state.current_justified_checkpoint);
        encode_checkpoint(&mut out, 6, &self.post_state.finalized_checkpoint);
        out[8 * WORD..9 * WORD].copy_from_slice(&encode_u64_word(self.finalized_slot));
        out
    }
}

/// SHA-256 digest binding a proof to the journal bytes.
///
/// Computed over the raw, still-encoded bytes as received — never over a
/// re-encoding of the decoded structure.
pub fn journal_digest(raw: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(raw);
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

/// Encode a u64 as a 32-byte big-endian word.
pub(crate) fn encode_u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Decode a u64 from a 32-byte big-endian word.
/// Returns None if any of the 24 high bytes is non-zero.
pub(crate) fn decode_u64_word(word: &[u8]) -> Option<u64> {
    if word.len() != WORD || word[..24].iter().any(|&b| b != 0) {
        return None;
    }
    let tail: [u8; 8] = word[24..].try_into().ok()?;
    Some(u64::from_be_bytes(tail))
}

fn decode_u64_at(raw: &[u8], word_index: usize) -> Result<u64, JournalError> {
    let offset = word_index * WORD;
    decode_u64_word(&raw[offset..offset + WORD]).ok_or(JournalError::Overflow { offset })
}

fn decode_checkpoint(raw: &[u8], word_index: usize) -> Result<Checkpoint, JournalError> {
    let mut root = [0u8; 32];
    let root_offset = (word_index + 1) * WORD;
    root.copy_from_slice(&raw[root_offset..root_offset + WORD]);
    Ok(Checkpoint {
        epoch: decode_u64_at(raw, word_index)?,
        root,
    })
}

fn encode_checkpoint(out: &mut [u8], word_index: usize, checkpoint: &Checkpoint) {
    let offset = word_index * WORD;
    out[offset..offset + WORD].copy_from_slice(&encode_u64_word(checkpoint.epoch));
    out[offset + WORD..offset + 2 * WORD].copy_from_slice(&checkpoint.root);
}
