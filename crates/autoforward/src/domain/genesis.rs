//! Genesis import/export of the durable counters.
//!
//! Only the per-domain statistics are durable; the pending-transfer queue
//! is block-scoped and never part of genesis.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Exported durable state of the forwarding engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    /// Accounts registered per destination domain.
    pub num_of_accounts: BTreeMap<u32, u64>,
    /// Transfers executed per destination domain.
    pub num_of_transfers: BTreeMap<u32, u64>,
    /// Total value forwarded per destination domain.
    pub total_transferred: BTreeMap<u32, u64>,
}
