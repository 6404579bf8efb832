//! Hex-based native address codec.
//!
//! Native addresses render as a human prefix followed by 40 lowercase hex
//! characters. The codec is a port so hosts with a different native
//! format can substitute their own.

use crate::domain::{Address, ForwardingError};
use crate::ports::outbound::AddressCodec;

const DEFAULT_PREFIX: &str = "fwd1";

/// Prefix + hex codec for 20-byte native addresses.
#[derive(Clone, Debug)]
pub struct HexAddressCodec {
    prefix: &'static str,
}

impl Default for HexAddressCodec {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX,
        }
    }
}

impl HexAddressCodec {
    /// Codec with the default `fwd1` prefix.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AddressCodec for HexAddressCodec {
    fn string_to_bytes(&self, address: &str) -> Result<Address, ForwardingError> {
        let payload = address.strip_prefix(self.prefix).ok_or_else(|| {
            ForwardingError::InvalidAddress(format!("missing {} prefix", self.prefix))
        })?;

        let bytes = hex::decode(payload)
            .map_err(|_| ForwardingError::InvalidAddress("not valid hex".to_string()))?;

        let decoded: Address = bytes.try_into().map_err(|_| {
            ForwardingError::InvalidAddress("expected a 20-byte address".to_string())
        })?;

        Ok(decoded)
    }

    fn bytes_to_string(&self, address: &Address) -> String {
        format!("{}{}", self.prefix, hex::encode(address))
    }
}
