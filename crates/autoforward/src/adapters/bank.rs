//! In-memory balance ledger.
//!
//! Implements the `Bank` port and mirrors the host-ledger contract the
//! engine relies on: every transfer consults the registered send
//! restriction before committing, and the whole transfer is atomic.

use crate::domain::{Address, Coin, ForwardingError};
use crate::ports::outbound::{Bank, SendRestriction};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Keyed in-memory balance store with a send-restriction slot.
#[derive(Default)]
pub struct InMemoryBank {
    balances: RwLock<HashMap<(Address, String), u128>>,
    restriction: RwLock<Option<Arc<dyn SendRestriction>>>,
}

impl InMemoryBank {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the send restriction consulted on every transfer.
    ///
    /// Wired after construction because the restriction (the forwarding
    /// engine) itself holds a handle to the bank.
    pub fn set_send_restriction(&self, restriction: Arc<dyn SendRestriction>) {
        *self.restriction.write() = Some(restriction);
    }

    /// Credit an address directly, bypassing the restriction. Test setup
    /// and genesis funding only.
    pub fn set_balance(&self, address: Address, denom: &str, amount: u128) {
        self.balances
            .write()
            .insert((address, denom.to_string()), amount);
    }

    /// Remove coins from an address, as the burn protocol would.
    pub fn burn_coins(&self, address: &Address, coin: &Coin) -> Result<(), ForwardingError> {
        let mut balances = self.balances.write();
        let key = (*address, coin.denom.clone());
        let balance = balances.get(&key).copied().unwrap_or_default();

        if balance < coin.amount {
            return Err(ForwardingError::Bank(format!(
                "insufficient funds: have {balance}, need {}",
                coin.amount
            )));
        }

        balances.insert(key, balance - coin.amount);
        Ok(())
    }
}

impl Bank for InMemoryBank {
    fn balance(&self, address: &Address, denom: &str) -> u128 {
        self.balances
            .read()
            .get(&(*address, denom.to_string()))
            .copied()
            .unwrap_or_default()
    }

    fn send_coins(
        &self,
        from: &Address,
        to: &Address,
        coins: &[Coin],
    ) -> Result<(), ForwardingError> {
        if let Some(restriction) = self.restriction.read().as_ref() {
            restriction.check_send(from, to, coins)?;
        }

        let mut balances = self.balances.write();

        // Validate the whole transfer before touching any balance.
        for coin in coins {
            let from_balance = balances
                .get(&(*from, coin.denom.clone()))
                .copied()
                .unwrap_or_default();
            if from_balance < coin.amount {
                return Err(ForwardingError::Bank(format!(
                    "insufficient funds: have {from_balance}, need {}",
                    coin.amount
                )));
            }
        }

        for coin in coins {
            let from_key = (*from, coin.denom.clone());
            let to_key = (*to, coin.denom.clone());

            let from_balance = balances.get(&from_key).copied().unwrap_or_default();
            balances.insert(from_key, from_balance - coin.amount);

            let to_balance = balances.get(&to_key).copied().unwrap_or_default();
            balances.insert(to_key, to_balance + coin.amount);
        }

        Ok(())
    }
}
