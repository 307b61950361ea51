use crate::types::beacon::universal_address;
use serde::{Deserialize, Serialize};

/// Identity of a caller, in 32-byte universal form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal(#[serde(with = "crate::types::beacon::hex32")] pub [u8; 32]);

impl Principal {
    /// A principal from a 20-byte execution-layer address.
    pub fn from_evm_address(addr: &[u8; 20]) -> Self {
        Self(universal_address(addr))
    }
}

/// The privileged operations gated by the external authorizer.
///
/// Specific role identifiers never appear in core logic — mapping roles to
/// these actions is entirely the authorizer's business.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Change the program identifier proofs are checked against.
    UpdateImageId,
    /// Change the permissible transition timespan.
    UpdatePermissibleTimespan,
    /// Advance consensus state without cryptographic evidence.
    ManualTransition,
}

/// Role-based authorization capability: "does this principal hold a role
/// permitting this action?". Evaluated before any privileged mutation.
pub trait Authorizer {
    fn can_perform(&self, principal: &Principal, action: Action) -> bool;
}
