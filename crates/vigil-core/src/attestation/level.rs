use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// The closed set of attestation sources.
///
/// Each source owns one bit position in the confirmation bitmask. The bit a
/// source contributes is `1 << exponent`, never the exponent itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ConfirmationSource {
    /// A succinct proof bound a verified state transition to this root.
    Proof = 0,
    /// A cross-chain message carried this root directly from the source chain.
    Transport = 1,
}

impl ConfirmationSource {
    /// Every source, in bit-position order.
    pub const ALL: [ConfirmationSource; 2] = [Self::Proof, Self::Transport];

    /// The bitmask bit this source contributes.
    pub fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A caller-specified combination of attestation sources — "which sources
/// must have attested before I trust this root".
///
/// Also used for the merged bitmask itself: a level is just a mask whose
/// bits are all required.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfirmationLevel(u8);

impl ConfirmationLevel {
    /// No confirmation required; trivially satisfied.
    pub const NONE: Self = Self(0);

    /// Proof-side confirmation only.
    pub const PROOF: Self = Self(1 << ConfirmationSource::Proof as u8);

    /// Transport-side confirmation only.
    pub const TRANSPORT: Self = Self(1 << ConfirmationSource::Transport as u8);

    /// Both sources. Computed as the OR of the per-source bit values
    /// (0b01 | 0b10), not of their raw exponents.
    pub const FULL: Self = Self(Self::PROOF.0 | Self::TRANSPORT.0);

    /// Level requiring exactly one source.
    pub fn from_source(source: ConfirmationSource) -> Self {
        Self(source.bit())
    }

    /// Wrap a raw bitmask.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw bitmask value.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether every bit this level requires is present in `mask`.
    pub fn satisfied_by(self, mask: ConfirmationLevel) -> bool {
        mask.0 & self.0 == self.0
    }

    /// Whether a specific source has its bit set in this mask.
    pub fn includes(self, source: ConfirmationSource) -> bool {
        self.0 & source.bit() != 0
    }
}

impl From<ConfirmationSource> for ConfirmationLevel {
    fn from(source: ConfirmationSource) -> Self {
        Self::from_source(source)
    }
}

impl BitOr for ConfirmationLevel {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<ConfirmationSource> for ConfirmationLevel {
    type Output = Self;

    fn bitor(self, rhs: ConfirmationSource) -> Self {
        Self(self.0 | rhs.bit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_bits_are_shifted_exponents() {
        assert_eq!(ConfirmationSource::Proof.bit(), 0b01);
        assert_eq!(ConfirmationSource::Transport.bit(), 0b10);
    }

    #[test]
    fn test_full_level_is_or_of_bits_not_exponents() {
        // OR of the raw exponents (0 | 1) would collapse to 1 — the
        // proof-only level. The combined level must be 3.
        assert_eq!(ConfirmationLevel::FULL.bits(), 0b11);
        assert_ne!(ConfirmationLevel::FULL, ConfirmationLevel::PROOF);
        assert_eq!(
            ConfirmationLevel::FULL,
            ConfirmationLevel::PROOF | ConfirmationLevel::TRANSPORT
        );
    }

    #[test]
    fn test_satisfied_by_requires_bit_superset() {
        let proof_only = ConfirmationLevel::PROOF;
        let both = ConfirmationLevel::FULL;

        assert!(proof_only.satisfied_by(both));
        assert!(!both.satisfied_by(proof_only));
        assert!(both.satisfied_by(both));
    }

    #[test]
    fn test_none_is_always_satisfied() {
        assert!(ConfirmationLevel::NONE.satisfied_by(ConfirmationLevel::NONE));
        assert!(ConfirmationLevel::NONE.satisfied_by(ConfirmationLevel::PROOF));
        assert!(ConfirmationLevel::NONE.satisfied_by(ConfirmationLevel::FULL));
    }

    #[test]
    fn test_includes() {
        assert!(ConfirmationLevel::FULL.includes(ConfirmationSource::Proof));
        assert!(ConfirmationLevel::FULL.includes(ConfirmationSource::Transport));
        assert!(!ConfirmationLevel::TRANSPORT.includes(ConfirmationSource::Proof));
    }

    #[test]
    fn test_from_source() {
        for source in ConfirmationSource::ALL {
            assert_eq!(ConfirmationLevel::from_source(source).bits(), source.bit());
        }
    }
}
