//! Immutable value types for the forwarding engine.

use serde::{Deserialize, Serialize};

/// A single denomination and amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Denomination identifier.
    pub denom: String,
    /// Amount in base units.
    pub amount: u128,
}

impl Coin {
    /// Create a new coin.
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

/// Per-destination-domain statistics. Monotone, never decremented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainStats {
    /// Accounts registered for this domain.
    pub accounts: u64,
    /// Transfers executed toward this domain.
    pub transfers: u64,
    /// Total value forwarded to this domain.
    pub total_transferred: u64,
}
