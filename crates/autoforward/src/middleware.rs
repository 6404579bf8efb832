//! # Packet Middleware
//!
//! Wraps a transfer packet module and turns memo-carrying inbound packets
//! addressed to the module holding address into immediate cross-chain
//! burns. Packets the middleware does not recognize pass through with the
//! inner module's acknowledgement untouched.

use crate::algorithms::{derive_packet_sender, module_address};
use crate::domain::{
    validate_destination_caller, validate_destination_domain, validate_mint_recipient, Coin,
    ForwardingError, Memo,
};
use crate::ports::outbound::{AddressCodec, Bank, BurnRouter, DepositForBurnRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Inbound transfer packet, as delivered by the host's channel layer.
#[derive(Clone, Debug)]
pub struct Packet {
    /// Port the packet left from on the counterparty chain.
    pub source_port: String,
    /// Channel the packet left from on the counterparty chain.
    pub source_channel: String,
    /// Local port receiving the packet.
    pub destination_port: String,
    /// Local channel receiving the packet.
    pub destination_channel: String,
    /// Opaque application payload.
    pub data: Vec<u8>,
}

/// Fungible-token packet payload.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FungibleTokenPacketData {
    /// Denom as written by the sending chain.
    pub denom: String,
    /// Transfer amount, decimal string.
    pub amount: String,
    /// Sender address on the counterparty chain.
    pub sender: String,
    /// Receiver address on this chain.
    pub receiver: String,
    /// Free-form memo; the forwarding instruction lives here.
    #[serde(default)]
    pub memo: String,
}

/// Packet acknowledgement returned to the counterparty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Acknowledgement {
    /// Application-level success payload.
    Result(Vec<u8>),
    /// Application-level failure description.
    Error(String),
}

impl Acknowledgement {
    /// Whether the acknowledgement reports success.
    pub fn success(&self) -> bool {
        matches!(self, Acknowledgement::Result(_))
    }
}

/// A packet-handling application module.
pub trait PacketModule: Send + Sync {
    /// Handle an inbound packet and produce an acknowledgement.
    fn on_recv_packet(&self, packet: &Packet) -> Acknowledgement;
}

/// Inner module standing in for the host's transfer application. Always
/// acknowledges success; tests credit the voucher mint out of band.
#[derive(Default)]
pub struct PassthroughPacketModule;

impl PacketModule for PassthroughPacketModule {
    fn on_recv_packet(&self, _packet: &Packet) -> Acknowledgement {
        Acknowledgement::Result(br#"{"result":"AQ=="}"#.to_vec())
    }
}

/// Memo-driven forwarding middleware over a packet module.
pub struct PacketMiddleware<M: PacketModule> {
    inner: M,
    bank: Arc<dyn Bank>,
    burn_router: Arc<dyn BurnRouter>,
    codec: Arc<dyn AddressCodec>,
}

impl<M: PacketModule> PacketMiddleware<M> {
    /// Wrap an inner packet module.
    pub fn new(
        inner: M,
        bank: Arc<dyn Bank>,
        burn_router: Arc<dyn BurnRouter>,
        codec: Arc<dyn AddressCodec>,
    ) -> Self {
        Self {
            inner,
            bank,
            burn_router,
            codec,
        }
    }

    /// Handle an inbound packet.
    ///
    /// The inner module runs first; its acknowledgement is final unless the
    /// packet is a foreign voucher addressed to the module holding address
    /// with a well-formed forwarding memo.
    pub fn on_recv_packet(&self, packet: &Packet) -> Acknowledgement {
        let ack = self.inner.on_recv_packet(packet);
        if !ack.success() {
            return ack;
        }

        let Ok(data) = serde_json::from_slice::<FungibleTokenPacketData>(&packet.data) else {
            return ack;
        };

        let module = module_address();
        if data.receiver != self.codec.bytes_to_string(&module) {
            return ack;
        }

        // A denom prefixed with the inbound route is a voucher minted here
        // returning home; unwinding it is the transfer app's business.
        let return_prefix = format!("{}/{}/", packet.source_port, packet.source_channel);
        if data.denom.starts_with(&return_prefix) {
            debug!(
                "[autoforward] passing through returning voucher {}",
                data.denom
            );
            return ack;
        }

        match self.forward(packet, &data, &module) {
            Ok(nonce) => {
                let body = serde_json::json!({ "nonce": nonce });
                Acknowledgement::Result(body.to_string().into_bytes())
            }
            Err(err) => {
                warn!(
                    "[autoforward] failed to forward packet on {}: {}",
                    packet.destination_channel, err
                );
                Acknowledgement::Error(err.to_string())
            }
        }
    }

    fn forward(
        &self,
        packet: &Packet,
        data: &FungibleTokenPacketData,
        module: &[u8; 20],
    ) -> Result<u64, ForwardingError> {
        let instruction = Memo::parse(&data.memo)?.instruction()?;
        let body = instruction.deposit_for_burn();

        validate_destination_domain(body.destination_domain)?;
        validate_mint_recipient(&body.mint_recipient)?;
        validate_destination_caller(instruction.destination_caller())?;

        let packet_amount: u128 = data
            .amount
            .parse()
            .map_err(|_| ForwardingError::InvalidAmount(data.amount.clone()))?;

        // Voucher funds live under the local denom trace, not the denom the
        // counterparty wrote on the wire.
        let local_denom = format!(
            "{}/{}/{}",
            packet.destination_port, packet.destination_channel, data.denom
        );

        // A synthetic account tied to (channel, sender), so burn receipts
        // attribute funds to the original sender and never mix channels.
        let sender = derive_packet_sender(&packet.destination_channel, &data.sender);

        let forward_amount = match (&body.amount, &body.fee_recipient) {
            (None, _) => packet_amount,
            (Some(_), None) => return Err(ForwardingError::MissingFeeRecipient),
            (Some(amount), Some(fee_recipient)) => {
                let amount: u128 = amount
                    .parse()
                    .map_err(|_| ForwardingError::InvalidAmount(amount.clone()))?;
                if amount >= packet_amount {
                    return Err(ForwardingError::InvalidFeeAmount);
                }

                let fee_recipient = self.codec.string_to_bytes(fee_recipient)?;
                let fee = packet_amount - amount;
                self.bank
                    .send_coins(
                        module,
                        &fee_recipient,
                        &[Coin::new(local_denom.clone(), fee)],
                    )
                    .map_err(|err| {
                        ForwardingError::Bank(format!("failed to execute fee transfer: {err}"))
                    })?;

                amount
            }
        };

        self.bank.send_coins(
            module,
            &sender,
            &[Coin::new(local_denom.clone(), forward_amount)],
        )?;

        let request = DepositForBurnRequest {
            from: sender,
            amount: forward_amount,
            destination_domain: body.destination_domain,
            mint_recipient: body.mint_recipient.clone(),
            burn_token: local_denom,
        };

        let caller = instruction.destination_caller();
        if caller.is_empty() {
            self.burn_router.deposit_for_burn(request)
        } else {
            self.burn_router
                .deposit_for_burn_with_caller(request, caller.to_vec())
        }
    }
}
