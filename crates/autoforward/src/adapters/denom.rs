//! Fixed canonical denomination.

use crate::ports::outbound::DenomSource;

/// Denom source returning a fixed denomination, standing in for the
/// host's token factory.
#[derive(Clone, Debug)]
pub struct FixedDenomSource {
    denom: String,
}

impl FixedDenomSource {
    /// Source always returning `denom`.
    pub fn new(denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
        }
    }
}

impl DenomSource for FixedDenomSource {
    fn minting_denom(&self) -> String {
        self.denom.clone()
    }
}
