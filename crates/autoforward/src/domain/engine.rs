//! # Forwarding Engine
//!
//! The state machine at the core of the module: account registration and
//! upgrade, the deposit interceptor, end-of-block settlement, manual
//! clearing, per-domain counters and genesis import/export.
//!
//! Execution is single-threaded and deterministic per block; the engine
//! never blocks or retries internally. Every failure either surfaces as an
//! error to the caller or, inside the end-block executor, is logged and
//! left for a later deposit- or clearing-triggered retry.

use super::account::{
    validate_destination_caller, validate_mint_recipient, AccountProperties, AccountRecord,
    BaseAccount, ForwardingAccount,
};
use super::errors::{Address, ForwardingError};
use super::events::ForwardingEvent;
use super::genesis::GenesisState;
use super::pending::{PendingTransfer, PendingTransfers};
use super::value_objects::{Coin, DomainStats};
use crate::algorithms::derive_forwarding_address;
use crate::ports::inbound::{
    ForwardingService, MsgClearAccount, MsgRegisterAccount, MsgRegisterAccountResponse,
    MsgRegisterAccountSignerlessly, QueryAddress, QueryAddressResponse,
};
use crate::ports::outbound::{
    AccountDirectory, AddressCodec, Bank, BurnRouter, DenomSource, DepositForBurnRequest,
    EventSink, SendRestriction,
};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Engine configuration.
#[derive(Clone, Debug)]
pub struct ForwardingConfig {
    /// Smallest deposit the protocol will forward.
    pub minimum_transfer_amount: u128,
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            minimum_transfer_amount: 1,
        }
    }
}

/// External collaborators wired into the engine.
///
/// Grouped to keep the constructor readable; every field is a port.
pub struct ForwardingDeps {
    /// Account directory.
    pub accounts: Arc<dyn AccountDirectory>,
    /// Balance ledger.
    pub bank: Arc<dyn Bank>,
    /// External burn-and-mint protocol.
    pub burn_router: Arc<dyn BurnRouter>,
    /// Token factory providing the canonical denom.
    pub denom_source: Arc<dyn DenomSource>,
    /// Native address codec.
    pub codec: Arc<dyn AddressCodec>,
    /// Host event manager.
    pub events: Arc<dyn EventSink>,
}

/// The account lifecycle and transfer-settlement engine.
pub struct ForwardingEngine {
    config: ForwardingConfig,

    accounts: Arc<dyn AccountDirectory>,
    bank: Arc<dyn Bank>,
    burn_router: Arc<dyn BurnRouter>,
    denom_source: Arc<dyn DenomSource>,
    codec: Arc<dyn AddressCodec>,
    events: Arc<dyn EventSink>,

    // Durable counters, keyed by destination domain. Mutated under the
    // host's single-writer block execution.
    num_of_accounts: RwLock<BTreeMap<u32, u64>>,
    num_of_transfers: RwLock<BTreeMap<u32, u64>>,
    total_transferred: RwLock<BTreeMap<u32, u64>>,

    // Block-scoped queue, discarded every end block.
    pending: PendingTransfers,
}

impl ForwardingEngine {
    /// Create an engine over the given collaborators.
    pub fn new(config: ForwardingConfig, deps: ForwardingDeps) -> Self {
        Self {
            config,
            accounts: deps.accounts,
            bank: deps.bank,
            burn_router: deps.burn_router,
            denom_source: deps.denom_source,
            codec: deps.codec,
            events: deps.events,
            num_of_accounts: RwLock::new(BTreeMap::new()),
            num_of_transfers: RwLock::new(BTreeMap::new()),
            total_transferred: RwLock::new(BTreeMap::new()),
            pending: PendingTransfers::new(),
        }
    }

    /// Smallest deposit the protocol will forward.
    pub fn minimum_transfer_amount(&self) -> u128 {
        self.config.minimum_transfer_amount
    }

    /// Canonical-denom balance of an address.
    pub fn canonical_balance(&self, address: &Address) -> u128 {
        self.bank.balance(address, &self.denom_source.minting_denom())
    }

    /// Render an address in the native string format.
    pub fn native_address(&self, address: &Address) -> String {
        self.codec.bytes_to_string(address)
    }

    /// Number of transfers queued for this block. Test and host
    /// introspection only; settlement goes through [`Self::end_block`].
    pub fn pending_transfers(&self) -> usize {
        self.pending.len()
    }

    /// Validate account properties.
    ///
    /// Destination-domain routability is deliberately not checked here;
    /// the caller-facing parsing layer owns that rule.
    pub fn validate_account_properties(
        &self,
        properties: &AccountProperties,
    ) -> Result<(), ForwardingError> {
        validate_mint_recipient(&properties.mint_recipient)?;

        self.codec
            .string_to_bytes(&properties.fallback_recipient)
            .map_err(|err| ForwardingError::InvalidFallbackRecipient(err.to_string()))?;

        validate_destination_caller(&properties.destination_caller)?;

        Ok(())
    }

    /// Register a forwarding account.
    ///
    /// CONTRACT: `properties` have already been validated.
    fn register(&self, properties: AccountProperties) -> Result<String, ForwardingError> {
        let address = derive_forwarding_address(&properties);
        let destination_domain = properties.destination_domain;

        let account = match self.accounts.get_account(&address) {
            None => {
                // Fresh address: create and upgrade in one step. No balance
                // requirement; an unfunded account may be registered.
                let base = BaseAccount::new(address, self.accounts.next_account_number());
                ForwardingAccount::new(base, properties)
            }
            Some(AccountRecord::Base(base)) => {
                if !base.is_eligible_for_upgrade(&address) {
                    return Err(ForwardingError::ExistingAccountNotEligible(
                        self.codec.bytes_to_string(&address),
                    ));
                }
                ForwardingAccount::new(base, properties)
            }
            Some(AccountRecord::Forwarding(_)) => {
                return Err(ForwardingError::AlreadyRegistered);
            }
            Some(other) => {
                return Err(ForwardingError::UnsupportedAccountType(format!(
                    "{other:?}"
                )));
            }
        };

        self.accounts
            .set_account(AccountRecord::Forwarding(account.clone()));
        self.increment_num_of_accounts(destination_domain);

        // Funds may have arrived before registration, whether or not a
        // plain account existed at the address: queue the account so they
        // settle at this block's end.
        if self.canonical_balance(&address) >= self.config.minimum_transfer_amount {
            self.pending.enqueue(PendingTransfer::from_account(&account));
        }

        Ok(self.codec.bytes_to_string(&address))
    }

    /// End-of-block hook draining the pending-transfer queue.
    ///
    /// Never fails the block: burn errors are logged and the funds stay in
    /// the account for a future deposit- or clearing-triggered retry.
    pub fn end_block(&self) {
        let transfers = self.pending.drain();
        if transfers.is_empty() {
            return;
        }

        info!(
            "[autoforward] executing {} automatic transfer(s)",
            transfers.len()
        );

        let denom = self.denom_source.minting_denom();
        for transfer in transfers {
            let amount = self.bank.balance(&transfer.address, &denom);
            if amount == 0 {
                // Already drained earlier in this block, e.g. by a
                // fallback clearing.
                continue;
            }

            let request = DepositForBurnRequest {
                from: transfer.address,
                amount,
                destination_domain: transfer.destination_domain,
                mint_recipient: transfer.mint_recipient.clone(),
                burn_token: denom.clone(),
            };

            let result = if transfer.destination_caller.is_empty() {
                self.burn_router.deposit_for_burn(request)
            } else {
                self.burn_router
                    .deposit_for_burn_with_caller(request, transfer.destination_caller.clone())
            };

            match result {
                Ok(nonce) => {
                    debug!(
                        "[autoforward] burned {} {} from {} (nonce {})",
                        amount,
                        denom,
                        hex::encode(transfer.address),
                        nonce
                    );
                    self.increment_num_of_transfers(transfer.destination_domain);
                    self.increment_total_transferred(transfer.destination_domain, amount);
                }
                Err(err) => {
                    error!(
                        "[autoforward] unable to execute automatic transfer from {} to domain {}: {}",
                        hex::encode(transfer.address),
                        transfer.destination_domain,
                        err
                    );
                }
            }
        }
    }

    // Counter increments. Read-modify-write under the host's single-writer
    // discipline; failures to persist would be logged, never unwound.

    fn increment_num_of_accounts(&self, destination_domain: u32) {
        *self
            .num_of_accounts
            .write()
            .entry(destination_domain)
            .or_insert(0) += 1;
    }

    fn increment_num_of_transfers(&self, destination_domain: u32) {
        *self
            .num_of_transfers
            .write()
            .entry(destination_domain)
            .or_insert(0) += 1;
    }

    fn increment_total_transferred(&self, destination_domain: u32, amount: u128) {
        let Ok(amount) = u64::try_from(amount) else {
            error!(
                "[autoforward] cannot record total transferred: amount {} overflows counter for domain {}",
                amount, destination_domain
            );
            return;
        };

        *self
            .total_transferred
            .write()
            .entry(destination_domain)
            .or_insert(0) += amount;
    }

    /// Import durable counters at genesis.
    pub fn init_genesis(&self, genesis: GenesisState) {
        *self.num_of_accounts.write() = genesis.num_of_accounts;
        *self.num_of_transfers.write() = genesis.num_of_transfers;
        *self.total_transferred.write() = genesis.total_transferred;
    }

    /// Export durable counters.
    pub fn export_genesis(&self) -> GenesisState {
        GenesisState {
            num_of_accounts: self.num_of_accounts.read().clone(),
            num_of_transfers: self.num_of_transfers.read().clone(),
            total_transferred: self.total_transferred.read().clone(),
        }
    }
}

impl SendRestriction for ForwardingEngine {
    /// Deposit interceptor: invoked by the bank on every transfer.
    ///
    /// Non-forwarding recipients pass through untouched. Deposits into a
    /// forwarding account are restricted to exactly one coin of the
    /// canonical denom, at or above the protocol minimum; violations fail
    /// the triggering transfer itself.
    fn check_send(
        &self,
        _from: &Address,
        to: &Address,
        coins: &[Coin],
    ) -> Result<(), ForwardingError> {
        let Some(AccountRecord::Forwarding(account)) = self.accounts.get_account(to) else {
            return Ok(());
        };

        let denom = self.denom_source.minting_denom();
        let [coin] = coins else {
            return Err(ForwardingError::UnsupportedDeposit(
                "forwarding accounts accept exactly one coin".to_string(),
            ));
        };
        if coin.denom != denom {
            return Err(ForwardingError::UnsupportedDeposit(format!(
                "forwarding accounts only accept {denom}"
            )));
        }
        if coin.amount < self.config.minimum_transfer_amount {
            return Err(ForwardingError::UnsupportedDeposit(format!(
                "amount is below the protocol minimum of {}",
                self.config.minimum_transfer_amount
            )));
        }

        // Idempotent: re-enqueueing overwrites this block's entry.
        self.pending.enqueue(PendingTransfer::from_account(&account));

        Ok(())
    }
}

impl ForwardingService for ForwardingEngine {
    fn register_account(
        &self,
        msg: &MsgRegisterAccount,
    ) -> Result<MsgRegisterAccountResponse, ForwardingError> {
        let properties = msg.account_properties();
        self.validate_account_properties(&properties)?;

        let address = self.register(properties)?;

        self.events.emit(ForwardingEvent::AccountRegistered {
            address: address.clone(),
            destination_domain: msg.destination_domain,
            mint_recipient: msg.mint_recipient.clone(),
            fallback_recipient: msg.fallback_recipient.clone(),
            destination_caller: msg.destination_caller.clone(),
            signerlessly: false,
        });

        Ok(MsgRegisterAccountResponse { address })
    }

    fn register_account_signerlessly(
        &self,
        msg: &MsgRegisterAccountSignerlessly,
    ) -> Result<MsgRegisterAccountResponse, ForwardingError> {
        let properties = msg.account_properties();
        self.validate_account_properties(&properties)?;

        // The signerless path only ever self-registers the derived address.
        let derived = self
            .codec
            .bytes_to_string(&derive_forwarding_address(&properties));
        if msg.signer != derived {
            return Err(ForwardingError::Unauthorized(
                "signer of a signerless registration must be the derived address".to_string(),
            ));
        }

        let address = self.register(properties)?;

        self.events.emit(ForwardingEvent::AccountRegistered {
            address: address.clone(),
            destination_domain: msg.destination_domain,
            mint_recipient: msg.mint_recipient.clone(),
            fallback_recipient: msg.fallback_recipient.clone(),
            destination_caller: msg.destination_caller.clone(),
            signerlessly: true,
        });

        Ok(MsgRegisterAccountResponse { address })
    }

    fn clear_account(&self, msg: &MsgClearAccount) -> Result<(), ForwardingError> {
        let address = self.codec.string_to_bytes(&msg.address)?;

        let Some(AccountRecord::Forwarding(account)) = self.accounts.get_account(&address) else {
            return Err(ForwardingError::NotForwardingAccount(msg.address.clone()));
        };

        let denom = self.denom_source.minting_denom();
        let balance = self.bank.balance(&address, &denom);

        if msg.fallback {
            // Only the designated fallback recipient may bypass the burn
            // protocol.
            if msg.signer != account.fallback_recipient {
                return Err(ForwardingError::Unauthorized(
                    "only the fallback recipient can clear to fallback".to_string(),
                ));
            }
            if balance == 0 {
                return Err(ForwardingError::NothingToClear);
            }

            let receiver = self.codec.string_to_bytes(&account.fallback_recipient)?;
            self.bank
                .send_coins(&address, &receiver, &[Coin::new(denom, balance)])?;

            self.events.emit(ForwardingEvent::AccountCleared {
                address: msg.address.clone(),
                receiver: account.fallback_recipient.clone(),
            });

            Ok(())
        } else {
            if balance == 0 {
                return Err(ForwardingError::NothingToClear);
            }

            // Force a retry through the normal settlement path. No event:
            // the retry can still fail at end block.
            self.pending.enqueue(PendingTransfer::from_account(&account));

            Ok(())
        }
    }

    fn address(&self, query: &QueryAddress) -> Result<QueryAddressResponse, ForwardingError> {
        let properties = query.account_properties();
        self.validate_account_properties(&properties)?;

        let address = derive_forwarding_address(&properties);
        let exists = matches!(
            self.accounts.get_account(&address),
            Some(AccountRecord::Forwarding(_))
        );

        Ok(QueryAddressResponse {
            address: self.codec.bytes_to_string(&address),
            exists,
        })
    }

    fn stats(&self) -> BTreeMap<u32, DomainStats> {
        let num_of_accounts = self.num_of_accounts.read();
        let num_of_transfers = self.num_of_transfers.read();
        let total_transferred = self.total_transferred.read();

        // Any counter map may know a domain the others do not, e.g. after
        // importing historical transfer counters at genesis.
        let domains: BTreeSet<u32> = num_of_accounts
            .keys()
            .chain(num_of_transfers.keys())
            .chain(total_transferred.keys())
            .copied()
            .collect();

        domains
            .into_iter()
            .map(|domain| {
                (
                    domain,
                    DomainStats {
                        accounts: num_of_accounts.get(&domain).copied().unwrap_or_default(),
                        transfers: num_of_transfers.get(&domain).copied().unwrap_or_default(),
                        total_transferred: total_transferred
                            .get(&domain)
                            .copied()
                            .unwrap_or_default(),
                    },
                )
            })
            .collect()
    }

    fn stats_by_destination_domain(&self, destination_domain: u32) -> DomainStats {
        DomainStats {
            accounts: self
                .num_of_accounts
                .read()
                .get(&destination_domain)
                .copied()
                .unwrap_or_default(),
            transfers: self
                .num_of_transfers
                .read()
                .get(&destination_domain)
                .copied()
                .unwrap_or_default(),
            total_transferred: self
                .total_transferred
                .read()
                .get(&destination_domain)
                .copied()
                .unwrap_or_default(),
        }
    }
}
