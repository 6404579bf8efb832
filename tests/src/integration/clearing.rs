//! Recovery flows when the burn protocol is unavailable.

#[cfg(test)]
mod tests {
    use crate::{Harness, DENOM};
    use autoforward::ports::outbound::{AddressCodec, Bank};
    use autoforward::{
        Coin, ForwardingError, ForwardingEvent, ForwardingService, MsgClearAccount,
        MsgRegisterAccount,
    };

    /// Register an account and leave a deposit stranded by a paused
    /// protocol. Returns (account address bytes, native string, fallback
    /// address bytes).
    fn stranded_deposit(harness: &Harness, amount: u128) -> ([u8; 20], String, [u8; 20]) {
        let fallback = [0x11u8; 20];
        let msg = MsgRegisterAccount {
            signer: harness.engine.native_address(&[0x22; 20]),
            destination_domain: 0,
            mint_recipient: vec![0xAB; 32],
            fallback_recipient: harness.engine.native_address(&fallback),
            destination_caller: Vec::new(),
        };
        let response = harness.engine.register_account(&msg).unwrap();
        let address = harness.codec.string_to_bytes(&response.address).unwrap();

        let depositor = [0x77u8; 20];
        harness.bank.set_balance(depositor, DENOM, amount);
        harness
            .bank
            .send_coins(&depositor, &address, &[Coin::new(DENOM, amount)])
            .unwrap();

        harness.burn_router.set_paused(true);
        harness.engine.end_block();

        (address, response.address, fallback)
    }

    #[test]
    fn test_failed_settlement_keeps_funds() {
        let harness = Harness::new();
        let (address, _, _) = stranded_deposit(&harness, 1_000_000);

        // The block completed; the funds simply stayed put.
        assert!(harness.burn_router.burns().is_empty());
        assert_eq!(harness.bank.balance(&address, DENOM), 1_000_000);
        assert_eq!(harness.engine.stats_by_destination_domain(0).transfers, 0);
    }

    #[test]
    fn test_clear_to_fallback() {
        let harness = Harness::new();
        let (address, native, fallback) = stranded_deposit(&harness, 1_000_000);

        let msg = MsgClearAccount {
            signer: harness.engine.native_address(&fallback),
            address: native.clone(),
            fallback: true,
        };
        harness.engine.clear_account(&msg).unwrap();

        assert_eq!(harness.bank.balance(&address, DENOM), 0);
        assert_eq!(harness.bank.balance(&fallback, DENOM), 1_000_000);

        let stats = harness.engine.stats_by_destination_domain(0);
        assert_eq!(stats.accounts, 1);
        assert_eq!(stats.transfers, 0);
        assert_eq!(stats.total_transferred, 0);

        assert!(harness.events.events().iter().any(|event| matches!(
            event,
            ForwardingEvent::AccountCleared { address, .. } if address == &native
        )));
    }

    #[test]
    fn test_clear_to_fallback_requires_fallback_signer() {
        let harness = Harness::new();
        let (address, native, _) = stranded_deposit(&harness, 1_000_000);

        let msg = MsgClearAccount {
            signer: harness.engine.native_address(&[0x99; 20]),
            address: native,
            fallback: true,
        };
        assert!(matches!(
            harness.engine.clear_account(&msg),
            Err(ForwardingError::Unauthorized(_))
        ));
        assert_eq!(harness.bank.balance(&address, DENOM), 1_000_000);
    }

    #[test]
    fn test_retry_clears_once_protocol_resumes() {
        let harness = Harness::new();
        let (address, native, _) = stranded_deposit(&harness, 1_000_000);

        harness.burn_router.set_paused(false);

        // Anyone may request a retry through the settlement path.
        let msg = MsgClearAccount {
            signer: harness.engine.native_address(&[0x99; 20]),
            address: native,
            fallback: false,
        };
        harness.engine.clear_account(&msg).unwrap();
        assert_eq!(harness.engine.pending_transfers(), 1);

        harness.engine.end_block();

        assert_eq!(harness.bank.balance(&address, DENOM), 0);
        assert_eq!(harness.burn_router.burns().len(), 1);
        let stats = harness.engine.stats_by_destination_domain(0);
        assert_eq!(stats.transfers, 1);
        assert_eq!(stats.total_transferred, 1_000_000);
    }

    #[test]
    fn test_clear_empty_account_fails() {
        let harness = Harness::new();
        let msg = MsgRegisterAccount {
            signer: harness.engine.native_address(&[0x22; 20]),
            destination_domain: 0,
            mint_recipient: vec![0xAB; 32],
            fallback_recipient: harness.engine.native_address(&[0x11; 20]),
            destination_caller: Vec::new(),
        };
        let response = harness.engine.register_account(&msg).unwrap();

        for fallback in [true, false] {
            let clear = MsgClearAccount {
                signer: msg.fallback_recipient.clone(),
                address: response.address.clone(),
                fallback,
            };
            assert!(matches!(
                harness.engine.clear_account(&clear),
                Err(ForwardingError::NothingToClear)
            ));
        }
    }

    #[test]
    fn test_clear_non_forwarding_account_fails() {
        let harness = Harness::new();

        let msg = MsgClearAccount {
            signer: harness.engine.native_address(&[0x11; 20]),
            address: harness.engine.native_address(&[0x42; 20]),
            fallback: true,
        };
        assert!(matches!(
            harness.engine.clear_account(&msg),
            Err(ForwardingError::NotForwardingAccount(_))
        ));
    }

    #[test]
    fn test_cleared_account_skipped_at_end_block() {
        let harness = Harness::new();
        let (address, native, fallback) = stranded_deposit(&harness, 1_000_000);
        harness.burn_router.set_paused(false);

        // Queue a retry, then drain the balance to fallback in the same
        // block. The executor must skip the now-empty account.
        harness
            .engine
            .clear_account(&MsgClearAccount {
                signer: harness.engine.native_address(&[0x99; 20]),
                address: native.clone(),
                fallback: false,
            })
            .unwrap();
        harness
            .engine
            .clear_account(&MsgClearAccount {
                signer: harness.engine.native_address(&fallback),
                address: native,
                fallback: true,
            })
            .unwrap();

        harness.engine.end_block();

        assert!(harness.burn_router.burns().is_empty());
        assert_eq!(harness.bank.balance(&fallback, DENOM), 1_000_000);
        assert_eq!(harness.bank.balance(&address, DENOM), 0);
    }
}
