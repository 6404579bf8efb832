//! Funded signerless registration, end to end through the signature gate.

#[cfg(test)]
mod tests {
    use crate::{Harness, DENOM};
    use autoforward::{
        derive_forwarding_address, ForwardingError, ForwardingEvent, ForwardingService,
        MsgRegisterAccountSignerlessly, SignerlessGate, Tx, TxMessage, TxVerifier,
    };

    /// Underlying verifier standing in for real signature checks; always
    /// rejects, so any admitted transaction went through the bypass.
    struct RejectAll;

    impl TxVerifier for RejectAll {
        fn verify(&self, _tx: &Tx) -> Result<(), ForwardingError> {
            Err(ForwardingError::Unauthorized(
                "signature verification failed".to_string(),
            ))
        }
    }

    fn signerless_msg(harness: &Harness) -> MsgRegisterAccountSignerlessly {
        let mut msg = MsgRegisterAccountSignerlessly {
            signer: String::new(),
            destination_domain: 0,
            mint_recipient: vec![0xAB; 32],
            fallback_recipient: harness.engine.native_address(&[0x11; 20]),
            destination_caller: Vec::new(),
        };
        msg.signer = harness
            .engine
            .native_address(&derive_forwarding_address(&msg.account_properties()));
        msg
    }

    #[test]
    fn test_funded_signerless_registration_settles() {
        let harness = Harness::new();
        let msg = signerless_msg(&harness);
        let derived = derive_forwarding_address(&msg.account_properties());

        // Funds arrived before any account existed at the address.
        harness.bank.set_balance(derived, DENOM, 1_000_000);

        // The gate admits the unsigned transaction.
        let gate = SignerlessGate::new(harness.engine.clone(), RejectAll);
        let tx = Tx {
            messages: vec![TxMessage::RegisterAccountSignerlessly(msg.clone())],
        };
        gate.verify(&tx).unwrap();

        // Execution registers the account and queues the pre-existing
        // balance, so the funds settle at this block's end.
        let response = harness.engine.register_account_signerlessly(&msg).unwrap();
        assert_eq!(response.address, msg.signer);
        assert_eq!(harness.engine.pending_transfers(), 1);

        harness.engine.end_block();
        assert_eq!(harness.burn_router.burns().len(), 1);
        assert_eq!(harness.burn_router.burns()[0].request.amount, 1_000_000);

        assert!(harness.events.events().iter().any(|event| matches!(
            event,
            ForwardingEvent::AccountRegistered { signerlessly, .. } if *signerlessly
        )));
    }

    #[test]
    fn test_unfunded_signerless_transaction_is_rejected() {
        let harness = Harness::new();
        let msg = signerless_msg(&harness);

        let gate = SignerlessGate::new(harness.engine.clone(), RejectAll);
        let tx = Tx {
            messages: vec![TxMessage::RegisterAccountSignerlessly(msg)],
        };
        assert!(gate.verify(&tx).is_err());
    }

    #[test]
    fn test_signerless_execution_rejects_foreign_signer() {
        let harness = Harness::new();
        let mut msg = signerless_msg(&harness);
        msg.signer = harness.engine.native_address(&[0x99; 20]);

        assert!(matches!(
            harness.engine.register_account_signerlessly(&msg),
            Err(ForwardingError::Unauthorized(_))
        ));
    }
}
