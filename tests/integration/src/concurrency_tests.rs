//! Overlapping actions on shared workflows.

use std::time::Duration;

use crate::test_utils::*;
use tondns_core::RecordKind;
use tondns_workflow::{AllocatorPhase, DeployerPhase, DnsError, ResolverPhase, SaveState};

/// Run `check` on another task and fail instead of hanging if it never returns.
async fn within_deadline<T, F>(check: F) -> T
where
    F: std::future::Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tokio::time::timeout(Duration::from_secs(5), tokio::spawn(check))
        .await
        .expect("call did not return")
        .unwrap()
}

#[tokio::test]
async fn test_double_save_is_busy() {
    let harness = Harness::new().with_resolver();
    let app = harness.app.clone();
    app.records().open(RESOLVER).await.unwrap();
    app.records().set_field(RecordKind::Wallet, ALICE_WALLET);

    let gate = Gate::new();
    harness.wallet.gate_sends(gate.clone());

    let first = {
        let app = app.clone();
        tokio::spawn(async move { app.records().save(RecordKind::Wallet).await })
    };
    gate.entered().await;
    assert_eq!(app.records().save_state(RecordKind::Wallet), SaveState::Saving);

    let second = app.records().save(RecordKind::Wallet).await;
    assert!(matches!(second, Err(DnsError::Busy(_))));

    // Other record kinds are independent.
    app.records().save(RecordKind::Storage).await.unwrap();

    gate.release();
    first.await.unwrap().unwrap();

    assert_eq!(app.records().save_state(RecordKind::Wallet), SaveState::Idle);
    assert_eq!(harness.wallet.sent().len(), 2);
}

#[tokio::test]
async fn test_stale_verification_is_discarded() {
    let harness = Harness::new().with_resolver();
    let app = harness.app.clone();

    let gate = Gate::new();
    harness.chain.gate_next_call(gate.clone());

    app.records().set_resolver_input(RESOLVER);
    let check = {
        let app = app.clone();
        tokio::spawn(async move { app.records().verify_resolver().await })
    };
    gate.entered().await;
    assert_eq!(app.records().phase(), ResolverPhase::Verifying);
    assert!(matches!(
        app.records().verify_resolver().await,
        Err(DnsError::Busy(_))
    ));

    app.records().set_resolver_input(MALLORY);
    gate.release();

    // The check itself succeeded, but for an input that is gone.
    assert!(check.await.unwrap().is_ok());
    assert_eq!(app.records().phase(), ResolverPhase::Unverified);
    assert!(app.records().resolver().is_none());
    assert_eq!(app.records().resolver_input(), MALLORY);
}

#[tokio::test]
async fn test_double_deploy_is_busy() {
    let harness = Harness::new().with_collection(ALICE_WALLET);
    let app = harness.app.clone();
    let subdomains = app.subdomains();
    subdomains.set_collection_input(COLLECTION);
    subdomains.check_collection().await.unwrap();
    subdomains.set_name_input("alice");
    subdomains.check_name().await.unwrap();

    let gate = Gate::new();
    harness.wallet.gate_sends(gate.clone());
    let first = {
        let app = app.clone();
        tokio::spawn(async move { app.subdomains().deploy().await })
    };
    gate.entered().await;
    assert_eq!(subdomains.phase(), AllocatorPhase::Deploying);
    assert_eq!(
        subdomains.deploy().await,
        Err(DnsError::Busy("Subdomain deployment"))
    );

    gate.release();
    first.await.unwrap().unwrap();
    assert_eq!(harness.wallet.sent().len(), 1);
    assert_eq!(subdomains.phase(), AllocatorPhase::Deployed);
}

#[tokio::test]
async fn test_name_edited_during_deploy_is_kept() {
    let harness = Harness::new().with_collection(ALICE_WALLET);
    let app = harness.app.clone();
    let subdomains = app.subdomains();
    subdomains.set_collection_input(COLLECTION);
    subdomains.check_collection().await.unwrap();
    subdomains.set_name_input("alice");
    subdomains.check_name().await.unwrap();

    let gate = Gate::new();
    harness.wallet.gate_sends(gate.clone());
    let first = {
        let app = app.clone();
        tokio::spawn(async move { app.subdomains().deploy().await })
    };
    gate.entered().await;
    subdomains.set_name_input("bob");
    gate.release();

    first.await.unwrap().unwrap();
    assert_eq!(subdomains.name_input(), "bob");
    assert_eq!(subdomains.phase(), AllocatorPhase::CollectionSet);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_busy_notice_can_read_workflow_state() {
    let harness = Harness::new().with_resolver().with_collection(ALICE_WALLET);
    harness
        .chain
        .add_domain(DOMAIN, nft("gradosphera", Some(ALICE_WALLET)));
    let app = harness.app.clone();
    harness.notifier.render_from(&app);

    app.records().set_resolver_input(RESOLVER);
    app.subdomains().set_collection_input(COLLECTION);
    app.collections().set_domain_input(DOMAIN);

    // Resolver verification.
    let gate = Gate::new();
    harness.chain.gate_next_call(gate.clone());
    let first = {
        let app = app.clone();
        tokio::spawn(async move { app.records().verify_resolver().await })
    };
    gate.entered().await;
    let second = {
        let app = app.clone();
        within_deadline(async move { app.records().verify_resolver().await }).await
    };
    assert_eq!(second, Err(DnsError::Busy("Resolver verification")));
    let (records, _, _) = *harness.notifier.rendered().last().unwrap();
    assert_eq!(records, ResolverPhase::Verifying);
    gate.release();
    first.await.unwrap().unwrap();

    // Collection check.
    let gate = Gate::new();
    harness.chain.gate_next_call(gate.clone());
    let first = {
        let app = app.clone();
        tokio::spawn(async move { app.subdomains().check_collection().await })
    };
    gate.entered().await;
    let second = {
        let app = app.clone();
        within_deadline(async move { app.subdomains().check_collection().await }).await
    };
    assert_eq!(second, Err(DnsError::Busy("Collection check")));
    let (_, subdomains, _) = *harness.notifier.rendered().last().unwrap();
    assert_eq!(subdomains, AllocatorPhase::CollectionChecking);
    gate.release();
    first.await.unwrap().unwrap();

    // Domain check.
    let gate = Gate::new();
    harness.chain.gate_next_call(gate.clone());
    let first = {
        let app = app.clone();
        tokio::spawn(async move { app.collections().check_domain().await })
    };
    gate.entered().await;
    let second = {
        let app = app.clone();
        within_deadline(async move { app.collections().check_domain().await }).await
    };
    assert_eq!(second, Err(DnsError::Busy("Domain check")));
    let (_, _, collections) = *harness.notifier.rendered().last().unwrap();
    assert_eq!(collections, DeployerPhase::Checking);
    gate.release();
    first.await.unwrap().unwrap();

    assert_eq!(
        *harness.notifier.rendered().last().unwrap(),
        (
            ResolverPhase::Verified,
            AllocatorPhase::CollectionSet,
            DeployerPhase::Verified
        )
    );
}
