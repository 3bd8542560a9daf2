//! Record editor scenarios.

use crate::test_utils::*;
use tondns_client::{ClientError, Severity};
use tondns_core::{FormatError, RecordChange, RecordKind, RecordValue};
use tondns_workflow::{DnsError, ResolverPhase, SaveOutcome, SaveState, ValidationError, SENT_MESSAGE};

const ADNL_HEX: &str = "a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1a1";
const ADNL_FRIENDLY: &str = "wq2dinbugq2dinbugq2dinbugq2dinbugq2dinbugq2dinbugq2cf7e";
const BAG_ID: &str = "e8d44050873dba865aa7c170ab4cce64d90839a34dcfd6cf71d14e0205443b1b";

async fn verified() -> Harness {
    let harness = Harness::new().with_resolver();
    harness.app.records().set_resolver_input(RESOLVER);
    harness.app.records().verify_resolver().await.unwrap();
    harness
}

#[tokio::test]
async fn test_failing_dnsresolve_stays_unverified() {
    let harness = Harness::new();
    harness.chain.add_resolver(RESOLVER, 11);
    let editor = harness.app.records();

    editor.set_resolver_input(RESOLVER);
    let err = editor.verify_resolver().await.unwrap_err();

    assert_eq!(err, DnsError::NotAResolver { address: addr(RESOLVER) });
    assert_eq!(editor.phase(), ResolverPhase::Unverified);
    assert!(editor.resolver().is_none());
    assert_eq!(harness.notifier.count(Severity::Error), 1);
    assert_eq!(harness.chain.calls(), vec!["dnsresolve"]);
}

#[tokio::test]
async fn test_malformed_and_empty_resolver_input() {
    let harness = Harness::new();
    let editor = harness.app.records();

    editor.set_resolver_input("   ");
    assert_eq!(
        editor.verify_resolver().await,
        Err(DnsError::from(ValidationError::Empty("a DNS address")))
    );

    editor.set_resolver_input("EQnotanaddress");
    assert!(matches!(
        editor.verify_resolver().await,
        Err(DnsError::MalformedAddress(_))
    ));
    assert!(harness.chain.calls().is_empty());
}

#[tokio::test]
async fn test_display_falls_back_to_placeholder() {
    let harness = verified().await;
    let resolver = harness.app.records().resolver().unwrap();
    assert_eq!(resolver.display.title, "EQC3...z0Bz");
    assert_eq!(resolver.display.owner_address, RESOLVER);
    assert_eq!(
        harness.chain.calls(),
        vec!["dnsresolve", "nft_item", "nft_collection"]
    );
}

#[tokio::test]
async fn test_display_prefers_item_metadata() {
    let harness = Harness::new().with_resolver();
    harness
        .chain
        .add_item(addr(RESOLVER), nft("gradosphera.ton", Some(ALICE_WALLET_RAW)));
    let resolver = harness.app.records().open(RESOLVER).await.unwrap();
    assert_eq!(resolver.display.title, "gradosphera.ton");
    assert_eq!(resolver.display.owner_address, ALICE_WALLET_RAW);
    assert!(!harness.chain.calls().contains(&"nft_collection".to_string()));
}

#[tokio::test]
async fn test_chain_outage_is_network_error() {
    let harness = Harness::new().with_resolver();
    let editor = harness.app.records();
    editor.set_resolver_input(RESOLVER);

    harness.chain.set_unavailable(true);
    let err = editor.verify_resolver().await.unwrap_err();
    assert!(matches!(err, DnsError::Network(ClientError::Transport(_))));
    assert_eq!(editor.phase(), ResolverPhase::Unverified);
}

#[tokio::test]
async fn test_save_valid_values_sends_set_payloads() {
    let harness = verified().await;
    let editor = harness.app.records();

    editor.set_field(RecordKind::Site, ADNL_FRIENDLY);
    editor.set_site_in_storage(true);
    editor.set_field(RecordKind::Storage, BAG_ID);
    editor.set_field(RecordKind::Wallet, ALICE_WALLET);
    editor.set_field(RecordKind::NextResolver, RESOLVER);

    for kind in RecordKind::ALL {
        editor.save(kind).await.unwrap();
        assert_eq!(editor.last_outcome(kind), Some(SaveOutcome::Confirmed));
    }

    let changes = harness.records.changes();
    assert_eq!(changes.len(), 4);
    match &changes[0] {
        RecordChange::Set(RecordValue::Site { adnl, in_storage }) => {
            assert_eq!(adnl.to_hex(), ADNL_HEX);
            assert!(*in_storage);
        }
        other => panic!("unexpected change {:?}", other),
    }
    assert!(changes.iter().all(|change| !change.is_delete()));

    let sent = harness.wallet.sent();
    assert_eq!(sent.len(), 4);
    assert!(sent.iter().all(|tx| tx.destination == addr(RESOLVER)));
    assert!(sent.iter().all(|tx| tx.payload.body[0] == OP_SET));
    assert_eq!(harness.notifier.last().unwrap().message, SENT_MESSAGE);
}

#[tokio::test]
async fn test_empty_field_sends_delete() {
    let harness = verified().await;
    let editor = harness.app.records();

    editor.set_field(RecordKind::Wallet, "   ");
    let change = editor.save(RecordKind::Wallet).await.unwrap();

    assert_eq!(change, RecordChange::Delete(RecordKind::Wallet));
    let sent = harness.wallet.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].payload.body[0], OP_DELETE);
    assert_eq!(&sent[0].payload.body[1..], &RecordKind::Wallet.category_key());
}

#[tokio::test]
async fn test_invalid_values_never_reach_the_wallet() {
    let harness = verified().await;
    let editor = harness.app.records();

    editor.set_field(RecordKind::Site, "zz");
    editor.set_field(RecordKind::Storage, "1234");
    editor.set_field(RecordKind::Wallet, "not-an-address");

    assert!(matches!(
        editor.save(RecordKind::Site).await,
        Err(DnsError::Format(FormatError::Adnl(_)))
    ));
    assert!(matches!(
        editor.save(RecordKind::Storage).await,
        Err(DnsError::Format(FormatError::StorageBag(_)))
    ));
    assert!(matches!(
        editor.save(RecordKind::Wallet).await,
        Err(DnsError::Format(FormatError::Address {
            kind: RecordKind::Wallet,
            ..
        }))
    ));

    assert!(harness.records.changes().is_empty());
    assert!(harness.wallet.sent().is_empty());
    assert_eq!(editor.save_state(RecordKind::Site), SaveState::Idle);
}

#[tokio::test]
async fn test_rejected_transaction_is_reported() {
    let harness = verified().await;
    let editor = harness.app.records();
    harness
        .wallet
        .reject_with(Some(ClientError::Rejected("user declined".into())));

    editor.set_field(RecordKind::Storage, BAG_ID);
    let err = editor.save(RecordKind::Storage).await.unwrap_err();

    assert!(matches!(err, DnsError::Network(ClientError::Rejected(_))));
    assert_eq!(editor.save_state(RecordKind::Storage), SaveState::Idle);
    assert!(matches!(
        editor.last_outcome(RecordKind::Storage),
        Some(SaveOutcome::Failed(_))
    ));
    assert_eq!(harness.notifier.last().unwrap().severity, Severity::Error);
    assert_eq!(editor.phase(), ResolverPhase::Verified);
}

#[tokio::test]
async fn test_changing_resolver_input_disables_forms() {
    let harness = verified().await;
    let editor = harness.app.records();

    editor.set_resolver_input(MALLORY);
    assert_eq!(editor.phase(), ResolverPhase::Unverified);
    assert!(matches!(
        editor.save(RecordKind::Site).await,
        Err(DnsError::Validation(ValidationError::NotReady(_)))
    ));
}

#[tokio::test]
async fn test_deep_link_opens_and_verifies() {
    let harness = Harness::new().with_resolver();
    harness
        .app
        .open_path("/manage?address=0%3Ab774d95eb20543f186c06b371ab88ad704f7e256130caf96189368a7d0cb6ccf")
        .await;

    let editor = harness.app.records();
    assert_eq!(editor.resolver_input(), RESOLVER);
    assert_eq!(editor.phase(), ResolverPhase::Verified);
    assert_eq!(harness.notifier.last().unwrap().severity, Severity::Success);
}
