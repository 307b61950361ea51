//! # Vigil Core
//!
//! Pure Rust dual-source beacon finality confirmation tracking.
//!
//! This crate contains **no networking code** and **no proof-system
//! dependencies**. It tracks the justified/finalized state of a beacon
//! chain and answers, for downstream consumers, "is block root R confirmed
//! for slot S, and how strongly" — where "how strongly" is a caller-chosen
//! combination of two independent attestation sources.
//!
//! ## Trust Model
//!
//! - **Proof-side confirmation** (`consensus` module): a succinct proof
//!   binds a state transition journal to a verified computation. The proof
//!   system itself lives behind the [`SealVerifier`] capability; this crate
//!   decides only what digest and program identifier to hand it, and what a
//!   successful verification is allowed to change.
//!
//! - **Transport-side confirmation** (`gates` module): a cross-chain
//!   message carries a (slot, root) pair read directly from the source
//!   chain. The signature scheme lives behind the [`MessageTransport`]
//!   capability; this crate checks only that the envelope originates from
//!   the configured chain and emitter.
//!
//! Either source alone, or both together, can be demanded at query time —
//! a 2-of-2 attestation scheme in which the sources commute and arrival
//! order never matters.
//!
//! ## Usage
//!
//! ```ignore
//! use vigil_core::{ConfirmationLevel, FinalityReceiver};
//!
//! let mut receiver = FinalityReceiver::new(config, state, verifier, transport, oracle, auth, clock);
//! receiver.submit_transition(&journal_bytes, &seal)?;
//! let confirmed = receiver.block_root(slot, ConfirmationLevel::FULL)?;
//! ```

pub mod attestation;
pub mod auth;
pub mod config;
pub mod consensus;
pub mod gates;
pub mod oracle;
pub mod receiver;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types for convenience
pub use attestation::{
    ledger::{AttestationLedger, Confirmed, LedgerError, RootConfirmation},
    level::{ConfirmationLevel, ConfirmationSource},
};
pub use auth::{Action, Authorizer, Principal};
pub use config::{ConfigError, ReceiverConfig};
pub use consensus::{
    timing::{expected_timestamp, Clock, SystemClock},
    tracker::{manual_transition, process_transition, TransitionError, Transitioned},
};
pub use gates::{
    proof::{verify_journal_seal, SealError, SealVerifier},
    transport::{
        accept_envelope, decode_payload, encode_payload, GateError, MessageTransport,
        ParsedEnvelope, PayloadError, TransportError,
    },
};
pub use oracle::resolver::{find_block_root, timestamp_key, BeaconRootOracle, ResolveError};
pub use receiver::{AdminError, FinalityReceiver};
pub use types::{beacon::*, journal::*};
