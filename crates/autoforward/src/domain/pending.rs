//! # Pending-Transfer Ledger
//!
//! Block-scoped queue of accounts awaiting end-of-block settlement.
//!
//! The queue is intentionally transient: it is drained (and discarded)
//! once per block and carries no cross-block ordering guarantee. It only
//! coordinates "a deposit happened" with "settle at end of block" and is
//! always rebuildable from deposit events alone.

use super::account::ForwardingAccount;
use super::errors::Address;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// A single queued settlement, keyed by account address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingTransfer {
    /// Forwarding account address.
    pub address: Address,
    /// Target domain identifier.
    pub destination_domain: u32,
    /// Destination-chain mint recipient.
    pub mint_recipient: Vec<u8>,
    /// Optional destination caller restriction.
    pub destination_caller: Vec<u8>,
}

impl PendingTransfer {
    /// Build a queue entry from a forwarding account.
    pub fn from_account(account: &ForwardingAccount) -> Self {
        Self {
            address: account.address(),
            destination_domain: account.destination_domain,
            mint_recipient: account.mint_recipient.clone(),
            destination_caller: account.destination_caller.clone(),
        }
    }
}

/// Keyed, block-scoped collection of pending transfers.
///
/// Ordered by address for deterministic drain order; correctness does not
/// depend on the ordering.
#[derive(Default)]
pub struct PendingTransfers {
    entries: RwLock<BTreeMap<Address, PendingTransfer>>,
}

impl PendingTransfers {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a transfer, overwriting any entry already queued for the
    /// same address this block.
    pub fn enqueue(&self, transfer: PendingTransfer) {
        self.entries.write().insert(transfer.address, transfer);
    }

    /// Take every queued entry, leaving the queue empty.
    pub fn drain(&self) -> Vec<PendingTransfer> {
        let mut entries = self.entries.write();
        let drained = entries.values().cloned().collect();
        entries.clear();
        drained
    }

    /// Whether an address is queued for this block.
    pub fn contains(&self, address: &Address) -> bool {
        self.entries.read().contains_key(address)
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
