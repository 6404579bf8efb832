//! In-memory account directory.
//!
//! Implements the `AccountDirectory` port for tests and single-process
//! hosts. Production hosts back this with their own account store.

use crate::domain::{AccountRecord, Address};
use crate::ports::outbound::AccountDirectory;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Keyed in-memory account store.
#[derive(Default)]
pub struct InMemoryAccountDirectory {
    accounts: RwLock<HashMap<Address, AccountRecord>>,
    next_number: AtomicU64,
}

impl InMemoryAccountDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

impl AccountDirectory for InMemoryAccountDirectory {
    fn has_account(&self, address: &Address) -> bool {
        self.accounts.read().contains_key(address)
    }

    fn get_account(&self, address: &Address) -> Option<AccountRecord> {
        self.accounts.read().get(address).cloned()
    }

    fn set_account(&self, account: AccountRecord) {
        self.accounts.write().insert(account.address(), account);
    }

    fn next_account_number(&self) -> u64 {
        self.next_number.fetch_add(1, Ordering::Relaxed)
    }
}
