//! Mock burn-and-mint protocol.
//!
//! Records every burn call, debits the in-memory bank like the real
//! protocol would, and can be paused to simulate a halted bridge.

use super::bank::InMemoryBank;
use crate::domain::{Coin, ForwardingError};
use crate::ports::outbound::{BurnRouter, DepositForBurnRequest};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// A recorded burn call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedBurn {
    /// Request as received.
    pub request: DepositForBurnRequest,
    /// Destination caller, empty for the plain entry point.
    pub destination_caller: Vec<u8>,
    /// Nonce returned to the caller.
    pub nonce: u64,
}

/// Recording burn router over an in-memory bank.
pub struct MockBurnRouter {
    bank: Arc<InMemoryBank>,
    burns: RwLock<Vec<RecordedBurn>>,
    next_nonce: AtomicU64,
    paused: AtomicBool,
}

impl MockBurnRouter {
    /// Create a router burning from the given bank.
    pub fn new(bank: Arc<InMemoryBank>) -> Self {
        Self {
            bank,
            burns: RwLock::new(Vec::new()),
            next_nonce: AtomicU64::new(1),
            paused: AtomicBool::new(false),
        }
    }

    /// Pause or resume the protocol; paused burns always fail.
    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    /// Every burn recorded so far.
    pub fn burns(&self) -> Vec<RecordedBurn> {
        self.burns.read().clone()
    }

    fn execute(
        &self,
        request: DepositForBurnRequest,
        destination_caller: Vec<u8>,
    ) -> Result<u64, ForwardingError> {
        if self.paused.load(Ordering::Relaxed) {
            return Err(ForwardingError::Burn("burning is paused".to_string()));
        }
        if request.amount == 0 {
            return Err(ForwardingError::Burn("amount must be positive".to_string()));
        }

        self.bank.burn_coins(
            &request.from,
            &Coin::new(request.burn_token.clone(), request.amount),
        )?;

        let nonce = self.next_nonce.fetch_add(1, Ordering::Relaxed);
        debug!(
            "[autoforward] mock burn of {} {} toward domain {} (nonce {})",
            request.amount, request.burn_token, request.destination_domain, nonce
        );

        self.burns.write().push(RecordedBurn {
            request,
            destination_caller,
            nonce,
        });

        Ok(nonce)
    }
}

impl BurnRouter for MockBurnRouter {
    fn deposit_for_burn(&self, request: DepositForBurnRequest) -> Result<u64, ForwardingError> {
        self.execute(request, Vec::new())
    }

    fn deposit_for_burn_with_caller(
        &self,
        request: DepositForBurnRequest,
        destination_caller: Vec<u8>,
    ) -> Result<u64, ForwardingError> {
        if destination_caller.is_empty() {
            return Err(ForwardingError::Burn(
                "destination caller cannot be empty".to_string(),
            ));
        }
        self.execute(request, destination_caller)
    }
}
