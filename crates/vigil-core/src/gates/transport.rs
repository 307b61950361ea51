use crate::types::journal::{decode_u64_word, encode_u64_word, WORD};
use thiserror::Error;

/// Encoded payload size: one slot word plus one root word.
pub const PAYLOAD_ENCODED_LEN: usize = 2 * WORD;

/// A parsed, authenticity-checked cross-chain envelope.
///
/// Produced by the external transport after its own signature checks; the
/// gate only inspects origin fields and the payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedEnvelope {
    /// Identifier of the chain the message was emitted on.
    pub source_chain_id: u16,
    /// Identity of the emitting contract, in 32-byte universal form.
    pub sender: [u8; 32],
    /// Opaque application payload.
    pub payload: Vec<u8>,
}

/// Failure reported by the external transport, carried through with its
/// own reason — never reinterpreted here.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Transport rejected envelope: {reason}")]
pub struct TransportError {
    pub reason: String,
}

impl TransportError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// External cross-chain message transport capability.
///
/// Parses an opaque encoded envelope and checks its authenticity (the
/// signature scheme lives behind this seam).
pub trait MessageTransport {
    fn parse_and_verify(&self, envelope: &[u8]) -> Result<ParsedEnvelope, TransportError>;
}

/// Errors decoding a confirmation payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Payload length mismatch: expected {expected} bytes, got {got}")]
    Length { expected: usize, got: usize },

    #[error("Payload slot word does not fit in u64")]
    SlotOverflow,
}

/// Errors accepting a cross-chain confirmation message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Unauthorized emitter chain id {got} (expected {expected})")]
    UnauthorizedEmitterChainId { got: u16, expected: u16 },

    #[error("Unauthorized emitter address {got} (expected {expected})")]
    UnauthorizedEmitterAddress { got: String, expected: String },

    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Decode a confirmation payload into its (slot, root) pair.
pub fn decode_payload(payload: &[u8]) -> Result<(u64, [u8; 32]), PayloadError> {
    if payload.len() != PAYLOAD_ENCODED_LEN {
        return Err(PayloadError::Length {
            expected: PAYLOAD_ENCODED_LEN,
            got: payload.len(),
        });
    }
    let slot = decode_u64_word(&payload[..WORD]).ok_or(PayloadError::SlotOverflow)?;
    let mut root = [0u8; 32];
    root.copy_from_slice(&payload[WORD..]);
    Ok((slot, root))
}

/// Encode a (slot, root) pair as a confirmation payload — the exact
/// inverse of [`decode_payload`].
pub fn encode_payload(slot: u64, root: &[u8; 32]) -> [u8; PAYLOAD_ENCODED_LEN] {
    let mut out = [0u8; PAYLOAD_ENCODED_LEN];
    out[..WORD].copy_from_slice(&encode_u64_word(slot));
    out[WORD..].copy_from_slice(root);
    out
}

/// Validate an inbound envelope's origin and extract its (slot, root) pair.
///
/// The transport's own verdict comes first and is propagated as-is; then
/// the envelope must originate from the configured chain and the configured
/// emitter before the payload is even decoded.
pub fn accept_envelope<T: MessageTransport + ?Sized>(
    transport: &T,
    envelope: &[u8],
    expected_chain_id: u16,
    expected_sender: &[u8; 32],
) -> Result<(u64, [u8; 32]), GateError> {
    let parsed = transport.parse_and_verify(envelope)?;

    if parsed.source_chain_id != expected_chain_id {
        return Err(GateError::UnauthorizedEmitterChainId {
            got: parsed.source_chain_id,
            expected: expected_chain_id,
        });
    }

    if parsed.sender != *expected_sender {
        return Err(GateError::UnauthorizedEmitterAddress {
            got: hex::encode(parsed.sender),
            expected: hex::encode(expected_sender),
        });
    }

    Ok(decode_payload(&parsed.payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FailTransport, StaticTransport};

    const CHAIN_ID: u16 = 2;
    const SENDER: [u8; 32] = [0x55; 32];
    const ROOT: [u8; 32] = [0xAB; 32];

    fn envelope_with(chain_id: u16, sender: [u8; 32], payload: Vec<u8>) -> StaticTransport {
        StaticTransport::new(ParsedEnvelope {
            source_chain_id: chain_id,
            sender,
            payload,
        })
    }

    #[test]
    fn test_accepts_configured_origin() {
        let transport = envelope_with(CHAIN_ID, SENDER, encode_payload(3200, &ROOT).to_vec());
        let (slot, root) = accept_envelope(&transport, b"raw", CHAIN_ID, &SENDER).unwrap();
        assert_eq!(slot, 3200);
        assert_eq!(root, ROOT);
    }

    #[test]
    fn test_rejects_wrong_chain_id() {
        let transport = envelope_with(5, SENDER, encode_payload(3200, &ROOT).to_vec());
        let result = accept_envelope(&transport, b"raw", CHAIN_ID, &SENDER);
        assert_eq!(
            result,
            Err(GateError::UnauthorizedEmitterChainId {
                got: 5,
                expected: CHAIN_ID
            })
        );
    }

    #[test]
    fn test_rejects_wrong_sender() {
        let transport = envelope_with(CHAIN_ID, [0x66; 32], encode_payload(3200, &ROOT).to_vec());
        let result = accept_envelope(&transport, b"raw", CHAIN_ID, &SENDER);
        assert!(matches!(
            result,
            Err(GateError::UnauthorizedEmitterAddress { .. })
        ));
    }

    #[test]
    fn test_transport_failure_propagates_with_reason() {
        let transport = FailTransport::new("guardian quorum not met");
        let result = accept_envelope(&transport, b"raw", CHAIN_ID, &SENDER);
        assert_eq!(
            result,
            Err(GateError::Transport(TransportError::new(
                "guardian quorum not met"
            )))
        );
    }

    #[test]
    fn test_rejects_short_payload() {
        let transport = envelope_with(CHAIN_ID, SENDER, vec![0u8; 40]);
        let result = accept_envelope(&transport, b"raw", CHAIN_ID, &SENDER);
        assert_eq!(
            result,
            Err(GateError::Payload(PayloadError::Length {
                expected: PAYLOAD_ENCODED_LEN,
                got: 40
            }))
        );
    }

    #[test]
    fn test_rejects_overflowing_slot_word() {
        let mut payload = encode_payload(1, &ROOT).to_vec();
        payload[0] = 0xFF;
        let transport = envelope_with(CHAIN_ID, SENDER, payload);
        let result = accept_envelope(&transport, b"raw", CHAIN_ID, &SENDER);
        assert_eq!(result, Err(GateError::Payload(PayloadError::SlotOverflow)));
    }

    #[test]
    fn test_payload_roundtrip() {
        let encoded = encode_payload(u64::MAX, &ROOT);
        assert_eq!(decode_payload(&encoded), Ok((u64::MAX, ROOT)));
    }
}
