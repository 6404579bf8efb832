//! Account lifecycle: registration, deposit interception and end-of-block
//! settlement.

#[cfg(test)]
mod tests {
    use crate::{Harness, DENOM};
    use autoforward::ports::outbound::{AccountDirectory, AddressCodec, Bank};
    use autoforward::{
        derive_forwarding_address, AccountRecord, BaseAccount, Coin, ForwardingConfig,
        ForwardingError, ForwardingEvent, ForwardingService, MsgRegisterAccount, QueryAddress,
    };

    const MINT_RECIPIENT: [u8; 32] = [0xAB; 32];

    fn register_msg(harness: &Harness) -> MsgRegisterAccount {
        MsgRegisterAccount {
            signer: harness.engine.native_address(&[0x22; 20]),
            destination_domain: 0,
            mint_recipient: MINT_RECIPIENT.to_vec(),
            fallback_recipient: harness.engine.native_address(&[0x11; 20]),
            destination_caller: Vec::new(),
        }
    }

    /// Fund a depositor and move coins into the forwarding account through
    /// the bank, so the interceptor fires like it would on a live ledger.
    fn deposit(harness: &Harness, to: [u8; 20], amount: u128) -> Result<(), ForwardingError> {
        let depositor = [0x77u8; 20];
        harness.bank.set_balance(depositor, DENOM, amount);
        harness
            .bank
            .send_coins(&depositor, &to, &[Coin::new(DENOM, amount)])
    }

    #[test]
    fn test_register_deposit_settle() {
        let harness = Harness::new();
        let msg = register_msg(&harness);

        let response = harness.engine.register_account(&msg).unwrap();
        let address = harness.codec.string_to_bytes(&response.address).unwrap();
        assert_eq!(address, derive_forwarding_address(&msg.account_properties()));

        deposit(&harness, address, 1_000_000).unwrap();
        assert_eq!(harness.engine.pending_transfers(), 1);

        harness.engine.end_block();

        let burns = harness.burn_router.burns();
        assert_eq!(burns.len(), 1);
        assert_eq!(burns[0].request.amount, 1_000_000);
        assert_eq!(burns[0].request.destination_domain, 0);
        assert_eq!(burns[0].request.mint_recipient, MINT_RECIPIENT.to_vec());
        assert_eq!(harness.bank.balance(&address, DENOM), 0);

        let stats = harness.engine.stats_by_destination_domain(0);
        assert_eq!(stats.accounts, 1);
        assert_eq!(stats.transfers, 1);
        assert_eq!(stats.total_transferred, 1_000_000);
    }

    #[test]
    fn test_multiple_deposits_one_settlement() {
        let harness = Harness::new();
        let msg = register_msg(&harness);
        let response = harness.engine.register_account(&msg).unwrap();
        let address = harness.codec.string_to_bytes(&response.address).unwrap();

        deposit(&harness, address, 300).unwrap();
        deposit(&harness, address, 700).unwrap();
        // The queue keys on the address; two deposits, one entry.
        assert_eq!(harness.engine.pending_transfers(), 1);

        harness.engine.end_block();

        let burns = harness.burn_router.burns();
        assert_eq!(burns.len(), 1);
        assert_eq!(burns[0].request.amount, 1_000);
    }

    #[test]
    fn test_registration_is_not_repeatable() {
        let harness = Harness::new();
        let msg = register_msg(&harness);

        harness.engine.register_account(&msg).unwrap();
        assert!(matches!(
            harness.engine.register_account(&msg),
            Err(ForwardingError::AlreadyRegistered)
        ));

        // The failed attempt must not inflate the counter.
        assert_eq!(harness.engine.stats_by_destination_domain(0).accounts, 1);
    }

    #[test]
    fn test_deposit_before_registration_settles_on_register() {
        let harness = Harness::new();
        let msg = register_msg(&harness);
        let address = derive_forwarding_address(&msg.account_properties());

        // Funds sent to the derived address while no account exists there
        // at all; the deposit passes through the interceptor untouched.
        deposit(&harness, address, 1_000_000).unwrap();
        assert_eq!(harness.engine.pending_transfers(), 0);

        harness.engine.register_account(&msg).unwrap();
        assert_eq!(harness.engine.pending_transfers(), 1);

        harness.engine.end_block();

        let burns = harness.burn_router.burns();
        assert_eq!(burns.len(), 1);
        assert_eq!(burns[0].request.amount, 1_000_000);
        assert_eq!(harness.bank.balance(&address, DENOM), 0);
    }

    #[test]
    fn test_prefunded_base_account_upgrade_queues_transfer() {
        let harness = Harness::new();
        let msg = register_msg(&harness);
        let address = derive_forwarding_address(&msg.account_properties());

        // Funds arrived before registration, leaving a plain account.
        harness.accounts.set_account(AccountRecord::Base(BaseAccount::new(address, 7)));
        harness.bank.set_balance(address, DENOM, 5_000);

        harness.engine.register_account(&msg).unwrap();
        assert_eq!(harness.engine.pending_transfers(), 1);

        harness.engine.end_block();
        assert_eq!(harness.burn_router.burns()[0].request.amount, 5_000);
    }

    #[test]
    fn test_used_account_is_not_upgradable() {
        let harness = Harness::new();
        let msg = register_msg(&harness);
        let address = derive_forwarding_address(&msg.account_properties());

        let mut base = BaseAccount::new(address, 7);
        base.sequence = 3;
        harness.accounts.set_account(AccountRecord::Base(base));

        assert!(matches!(
            harness.engine.register_account(&msg),
            Err(ForwardingError::ExistingAccountNotEligible(_))
        ));
        assert_eq!(harness.engine.stats_by_destination_domain(0).accounts, 0);
    }

    #[test]
    fn test_deposit_restriction_rejects_wrong_denom() {
        let harness = Harness::new();
        let msg = register_msg(&harness);
        let response = harness.engine.register_account(&msg).unwrap();
        let address = harness.codec.string_to_bytes(&response.address).unwrap();

        let depositor = [0x77u8; 20];
        harness.bank.set_balance(depositor, "uatom", 1_000);

        let result = harness
            .bank
            .send_coins(&depositor, &address, &[Coin::new("uatom", 1_000)]);
        assert!(matches!(
            result,
            Err(ForwardingError::UnsupportedDeposit(_))
        ));
        // The transfer itself failed, funds never moved.
        assert_eq!(harness.bank.balance(&depositor, "uatom"), 1_000);
        assert_eq!(harness.engine.pending_transfers(), 0);
    }

    #[test]
    fn test_deposit_restriction_rejects_multi_coin() {
        let harness = Harness::new();
        let msg = register_msg(&harness);
        let response = harness.engine.register_account(&msg).unwrap();
        let address = harness.codec.string_to_bytes(&response.address).unwrap();

        let depositor = [0x77u8; 20];
        harness.bank.set_balance(depositor, DENOM, 1_000);
        harness.bank.set_balance(depositor, "uatom", 1_000);

        let result = harness.bank.send_coins(
            &depositor,
            &address,
            &[Coin::new(DENOM, 500), Coin::new("uatom", 500)],
        );
        assert!(matches!(
            result,
            Err(ForwardingError::UnsupportedDeposit(_))
        ));
    }

    #[test]
    fn test_deposit_restriction_rejects_below_minimum() {
        let harness = Harness::with_config(ForwardingConfig {
            minimum_transfer_amount: 1_000,
        });
        let msg = register_msg(&harness);
        let response = harness.engine.register_account(&msg).unwrap();
        let address = harness.codec.string_to_bytes(&response.address).unwrap();

        assert!(deposit(&harness, address, 999).is_err());
        assert!(deposit(&harness, address, 1_000).is_ok());
    }

    #[test]
    fn test_deposits_to_other_accounts_pass_through() {
        let harness = Harness::new();

        let depositor = [0x77u8; 20];
        let receiver = [0x78u8; 20];
        harness.bank.set_balance(depositor, "uatom", 1_000);

        harness
            .bank
            .send_coins(&depositor, &receiver, &[Coin::new("uatom", 1_000)])
            .unwrap();
        assert_eq!(harness.bank.balance(&receiver, "uatom"), 1_000);
        assert_eq!(harness.engine.pending_transfers(), 0);
    }

    #[test]
    fn test_registration_emits_event() {
        let harness = Harness::new();
        let msg = register_msg(&harness);
        let response = harness.engine.register_account(&msg).unwrap();

        let events = harness.events.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            ForwardingEvent::AccountRegistered {
                address,
                destination_domain,
                signerlessly,
                ..
            } => {
                assert_eq!(address, &response.address);
                assert_eq!(*destination_domain, 0);
                assert!(!signerlessly);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_address_query_tracks_registration() {
        let harness = Harness::new();
        let msg = register_msg(&harness);

        let query = QueryAddress {
            destination_domain: msg.destination_domain,
            mint_recipient: msg.mint_recipient.clone(),
            fallback_recipient: msg.fallback_recipient.clone(),
            destination_caller: msg.destination_caller.clone(),
        };

        let before = harness.engine.address(&query).unwrap();
        assert!(!before.exists);

        let response = harness.engine.register_account(&msg).unwrap();

        let after = harness.engine.address(&query).unwrap();
        assert!(after.exists);
        assert_eq!(after.address, response.address);
        assert_eq!(before.address, after.address);
    }

    #[test]
    fn test_distinct_properties_distinct_accounts() {
        let harness = Harness::new();

        let mut first = register_msg(&harness);
        first.destination_domain = 0;
        let mut second = register_msg(&harness);
        second.destination_domain = 1;

        let a = harness.engine.register_account(&first).unwrap();
        let b = harness.engine.register_account(&second).unwrap();
        assert_ne!(a.address, b.address);

        let stats = harness.engine.stats();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[&0].accounts, 1);
        assert_eq!(stats[&1].accounts, 1);
    }

    #[test]
    fn test_end_block_with_empty_queue_is_noop() {
        let harness = Harness::new();
        harness.engine.end_block();
        assert!(harness.burn_router.burns().is_empty());
    }
}
