//! # Packet Memo
//!
//! Wire format of the forwarding instruction carried in the memo field of
//! an inbound transfer packet. Exactly one of the two instruction shapes
//! must be present; anything else is a malformed memo.

use super::errors::ForwardingError;
use serde::Deserialize;
use serde_with::{base64::Base64, serde_as};

/// `deposit_for_burn` instruction body.
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
pub struct DepositForBurnMemo {
    /// Target domain identifier.
    pub destination_domain: u32,
    /// Destination-chain mint recipient, raw bytes.
    #[serde_as(as = "Base64")]
    pub mint_recipient: Vec<u8>,
    /// Optional partial forward amount, decimal string.
    #[serde(default)]
    pub amount: Option<String>,
    /// Native address receiving the fee skim, required when `amount` is set.
    #[serde(default)]
    pub fee_recipient: Option<String>,
}

/// `deposit_for_burn_with_caller` instruction body.
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
pub struct DepositForBurnWithCallerMemo {
    /// Shared instruction fields.
    #[serde(flatten)]
    pub deposit_for_burn: DepositForBurnMemo,
    /// Destination caller restriction, raw bytes.
    #[serde_as(as = "Base64")]
    pub destination_caller: Vec<u8>,
}

/// Top-level memo document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Memo {
    /// Plain burn instruction.
    #[serde(default)]
    pub deposit_for_burn: Option<DepositForBurnMemo>,
    /// Burn instruction carrying a destination caller.
    #[serde(default)]
    pub deposit_for_burn_with_caller: Option<DepositForBurnWithCallerMemo>,
}

/// The single instruction extracted from a well-formed memo.
#[derive(Clone, Debug)]
pub enum MemoInstruction {
    /// Burn without a destination caller.
    Burn(DepositForBurnMemo),
    /// Burn restricted to a destination caller.
    BurnWithCaller(DepositForBurnWithCallerMemo),
}

impl MemoInstruction {
    /// Shared instruction fields, regardless of shape.
    pub fn deposit_for_burn(&self) -> &DepositForBurnMemo {
        match self {
            MemoInstruction::Burn(memo) => memo,
            MemoInstruction::BurnWithCaller(memo) => &memo.deposit_for_burn,
        }
    }

    /// Destination caller bytes, empty for the plain shape.
    pub fn destination_caller(&self) -> &[u8] {
        match self {
            MemoInstruction::Burn(_) => &[],
            MemoInstruction::BurnWithCaller(memo) => &memo.destination_caller,
        }
    }
}

impl Memo {
    /// Parse a raw memo string.
    pub fn parse(raw: &str) -> Result<Self, ForwardingError> {
        serde_json::from_str(raw).map_err(|_| ForwardingError::MalformedMemo)
    }

    /// Extract the instruction, enforcing that exactly one shape is present.
    pub fn instruction(self) -> Result<MemoInstruction, ForwardingError> {
        match (self.deposit_for_burn, self.deposit_for_burn_with_caller) {
            (Some(memo), None) => Ok(MemoInstruction::Burn(memo)),
            (None, Some(memo)) => Ok(MemoInstruction::BurnWithCaller(memo)),
            _ => Err(ForwardingError::MalformedMemo),
        }
    }
}
