//! # Destination Domains
//!
//! Routable destination domains and the caller-facing parsing layer that
//! turns user-supplied recipient strings into the 32-byte form used by the
//! burn protocol. The registrar itself never checks routability; that is
//! this layer's job.

use super::account::AccountProperties;
use super::errors::ForwardingError;
use crate::ports::outbound::AddressCodec;

/// Destination domains supported by the burn protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Ethereum mainnet (domain 0).
    Ethereum,
    /// Avalanche C-Chain (domain 1).
    Avalanche,
    /// Optimism (domain 2).
    Optimism,
    /// Arbitrum One (domain 3).
    Arbitrum,
    /// This chain (domain 4). Never a routable destination.
    Local,
    /// Solana (domain 5).
    Solana,
    /// Base (domain 6).
    Base,
    /// Polygon PoS (domain 7).
    Polygon,
    /// Sui (domain 8).
    Sui,
    /// Aptos (domain 9).
    Aptos,
    /// Unichain (domain 10).
    Unichain,
}

impl Domain {
    /// Numeric identifier used on the wire.
    pub fn id(&self) -> u32 {
        match self {
            Domain::Ethereum => 0,
            Domain::Avalanche => 1,
            Domain::Optimism => 2,
            Domain::Arbitrum => 3,
            Domain::Local => 4,
            Domain::Solana => 5,
            Domain::Base => 6,
            Domain::Polygon => 7,
            Domain::Sui => 8,
            Domain::Aptos => 9,
            Domain::Unichain => 10,
        }
    }

    fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Domain::Ethereum),
            1 => Some(Domain::Avalanche),
            2 => Some(Domain::Optimism),
            3 => Some(Domain::Arbitrum),
            4 => Some(Domain::Local),
            5 => Some(Domain::Solana),
            6 => Some(Domain::Base),
            7 => Some(Domain::Polygon),
            8 => Some(Domain::Sui),
            9 => Some(Domain::Aptos),
            10 => Some(Domain::Unichain),
            _ => None,
        }
    }

    /// Parse an encoded destination-chain address into the padded 32-byte
    /// form used in cross-chain transfers.
    pub fn parse_address(&self, address: &str) -> Result<Vec<u8>, ForwardingError> {
        let bytes = match self {
            Domain::Solana => {
                let decoded = bs58::decode(address).into_vec().map_err(|_| {
                    ForwardingError::InvalidAddress("address not valid base58".to_string())
                })?;
                if decoded.is_empty() {
                    return Err(ForwardingError::InvalidAddress(
                        "address not valid base58".to_string(),
                    ));
                }
                decoded
            }
            Domain::Local => {
                return Err(ForwardingError::InvalidDestinationDomain(self.id()));
            }
            _ => {
                let stripped = address
                    .strip_prefix("0x")
                    .or_else(|| address.strip_prefix("0X"))
                    .ok_or_else(|| {
                        ForwardingError::InvalidAddress("address not in hex format".to_string())
                    })?;
                hex::decode(stripped).map_err(|_| {
                    ForwardingError::InvalidAddress("address not in hex format".to_string())
                })?
            }
        };

        left_pad_32(&bytes)
    }
}

/// Validate that a raw destination domain is known and routable.
pub fn validate_destination_domain(destination_domain: u32) -> Result<Domain, ForwardingError> {
    let domain = Domain::from_id(destination_domain)
        .ok_or(ForwardingError::InvalidDestinationDomain(destination_domain))?;

    if domain == Domain::Local {
        return Err(ForwardingError::InvalidDestinationDomain(destination_domain));
    }

    Ok(domain)
}

/// Left-pad a byte slice to 32 bytes.
pub fn left_pad_32(bytes: &[u8]) -> Result<Vec<u8>, ForwardingError> {
    if bytes.len() > 32 {
        return Err(ForwardingError::InvalidAddress(format!(
            "padding error, expected less than 32 bytes, got {}",
            bytes.len()
        )));
    }

    let mut padded = vec![0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(bytes);
    Ok(padded)
}

/// Parse user-facing registration fields into validated account properties.
///
/// This is the front door for CLI and query inputs; the resulting
/// properties satisfy the registrar's pre-validation contract.
pub fn validate_and_parse_account_fields(
    destination_domain: u32,
    mint_recipient: &str,
    fallback_recipient: &str,
    destination_caller: &str,
    codec: &dyn AddressCodec,
) -> Result<AccountProperties, ForwardingError> {
    let domain = validate_destination_domain(destination_domain)?;

    if mint_recipient.is_empty() {
        return Err(ForwardingError::InvalidMintRecipient(
            "cannot be empty".to_string(),
        ));
    }
    let recipient = domain.parse_address(mint_recipient)?;

    codec
        .string_to_bytes(fallback_recipient)
        .map_err(|err| ForwardingError::InvalidFallbackRecipient(err.to_string()))?;

    let caller = if destination_caller.is_empty() {
        Vec::new()
    } else {
        domain.parse_address(destination_caller)?
    };

    Ok(AccountProperties {
        destination_domain: domain.id(),
        mint_recipient: recipient,
        fallback_recipient: fallback_recipient.to_string(),
        destination_caller: caller,
    })
}
