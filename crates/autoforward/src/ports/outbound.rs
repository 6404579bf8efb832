//! # Outbound Ports
//!
//! Traits for the external collaborators of the forwarding engine: the
//! account directory, the balance ledger, the burn-and-mint protocol, the
//! token factory, the native address codec and the event manager. Each is
//! consumed at its interface boundary only; hosts supply the real
//! implementations and the `adapters` module supplies in-memory ones.

use crate::domain::{AccountRecord, Address, Coin, ForwardingError, ForwardingEvent};

/// Account directory - create, fetch and store generic accounts.
pub trait AccountDirectory: Send + Sync {
    /// Whether any account exists at the address.
    fn has_account(&self, address: &Address) -> bool;

    /// Fetch the account stored at the address.
    fn get_account(&self, address: &Address) -> Option<AccountRecord>;

    /// Store an account, overwriting any previous record at its address.
    fn set_account(&self, account: AccountRecord);

    /// Allocate the next directory-wide account number.
    fn next_account_number(&self) -> u64;
}

/// Balance ledger - deposit, withdraw and query balances atomically.
pub trait Bank: Send + Sync {
    /// Current balance of `denom` held at `address`.
    fn balance(&self, address: &Address, denom: &str) -> u128;

    /// Atomically move coins between two accounts.
    ///
    /// Implementations must consult the registered send restriction before
    /// committing, so deposits into forwarding accounts are intercepted.
    fn send_coins(
        &self,
        from: &Address,
        to: &Address,
        coins: &[Coin],
    ) -> Result<(), ForwardingError>;
}

/// Hook consulted by the bank on every transfer, keyed on the recipient.
///
/// The forwarding engine implements this to intercept deposits into
/// auto-forwarding accounts.
pub trait SendRestriction: Send + Sync {
    /// Approve or reject a transfer before it commits.
    fn check_send(
        &self,
        from: &Address,
        to: &Address,
        coins: &[Coin],
    ) -> Result<(), ForwardingError>;
}

/// Outbound burn call parameters shared by both protocol entry points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositForBurnRequest {
    /// Account whose balance is burned.
    pub from: Address,
    /// Amount to burn.
    pub amount: u128,
    /// Target domain identifier.
    pub destination_domain: u32,
    /// Destination-chain mint recipient.
    pub mint_recipient: Vec<u8>,
    /// Denomination being burned.
    pub burn_token: String,
}

/// The external burn-and-mint transfer protocol.
///
/// Message format, attestation and relaying are foreign concerns; the
/// engine only issues these two calls and consumes the returned nonce.
pub trait BurnRouter: Send + Sync {
    /// Burn `amount` of `burn_token`, minting to the recipient on the
    /// destination domain. Returns the protocol nonce.
    fn deposit_for_burn(&self, request: DepositForBurnRequest) -> Result<u64, ForwardingError>;

    /// Same as [`BurnRouter::deposit_for_burn`], restricted so only
    /// `destination_caller` may finalize the transfer.
    fn deposit_for_burn_with_caller(
        &self,
        request: DepositForBurnRequest,
        destination_caller: Vec<u8>,
    ) -> Result<u64, ForwardingError>;
}

/// Token-factory collaborator providing the canonical mint denomination.
pub trait DenomSource: Send + Sync {
    /// The single token type this engine forwards.
    fn minting_denom(&self) -> String;
}

/// Codec for chain-native address strings.
pub trait AddressCodec: Send + Sync {
    /// Parse a native address string into raw bytes.
    fn string_to_bytes(&self, address: &str) -> Result<Address, ForwardingError>;

    /// Render raw bytes as a native address string.
    fn bytes_to_string(&self, address: &Address) -> String;
}

/// Host event manager.
pub trait EventSink: Send + Sync {
    /// Emit a typed event.
    fn emit(&self, event: ForwardingEvent);
}
