//! # Domain Errors
//!
//! Error types for the forwarding engine.

use thiserror::Error;

/// Ledger-native account identifier (20-byte).
pub type Address = [u8; 20];

/// Forwarding error types.
#[derive(Debug, Error)]
pub enum ForwardingError {
    /// Mint recipient is not exactly 32 non-zero bytes.
    #[error("invalid mint recipient: {0}")]
    InvalidMintRecipient(String),

    /// Fallback recipient is not a valid native address.
    #[error("invalid fallback recipient: {0}")]
    InvalidFallbackRecipient(String),

    /// Destination caller is non-empty but not exactly 32 non-zero bytes.
    #[error("invalid destination caller: {0}")]
    InvalidDestinationCaller(String),

    /// Destination domain is unknown or is the local chain.
    #[error("destination domain {0} is not supported")]
    InvalidDestinationDomain(u32),

    /// The derived address already holds a forwarding account.
    #[error("account has already been registered")]
    AlreadyRegistered,

    /// An existing plain account is not eligible for the upgrade.
    #[error("attempting to register an existing user account with address: {0}")]
    ExistingAccountNotEligible(String),

    /// The account at the derived address is of a non-upgradable kind.
    #[error("unsupported account type: {0}")]
    UnsupportedAccountType(String),

    /// A deposit into a forwarding account violates the deposit restriction.
    #[error("unsupported deposit: {0}")]
    UnsupportedDeposit(String),

    /// Target of a clearing request is not a forwarding account.
    #[error("account {0} is not a forwarding account")]
    NotForwardingAccount(String),

    /// Signer is not allowed to perform the request.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Clearing requested on an account with a zero balance.
    #[error("nothing to clear: account balance is zero")]
    NothingToClear,

    /// Packet memo is not exactly one forwarding instruction.
    #[error("malformed memo")]
    MalformedMemo,

    /// Partial forward amount specified without a fee recipient.
    #[error("specified amount without a fee recipient")]
    MissingFeeRecipient,

    /// Fee left over by a partial forward amount is not strictly positive.
    #[error("specified amount must be strictly less than packet amount")]
    InvalidFeeAmount,

    /// Decimal amount string could not be decoded.
    #[error("failed to decode amount: {0}")]
    InvalidAmount(String),

    /// Native address string could not be decoded.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Balance ledger failure.
    #[error("bank error: {0}")]
    Bank(String),

    /// External burn protocol failure.
    #[error("burn protocol error: {0}")]
    Burn(String),
}
