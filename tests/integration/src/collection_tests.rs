//! Collection deployer scenarios.

use crate::test_utils::*;
use tondns_client::Severity;
use tondns_core::{Config, Network};
use tondns_workflow::{DeployerPhase, DnsError};

#[tokio::test]
async fn test_deploy_collection_on_mainnet() {
    let harness = Harness::new();
    harness
        .chain
        .add_domain(DOMAIN, nft("gradosphera", Some(ALICE_WALLET_RAW)));
    let deployer = harness.app.collections();

    deployer.set_domain_input(DOMAIN);
    let domain = deployer.check_domain().await.unwrap();
    assert_eq!(domain.preview.title, "Gradosphera DNS Domains");
    assert_eq!(domain.preview.subtitle, "Domains *.gradosphera.ton");
    assert_eq!(
        domain.preview.image,
        "https://dns.gradosphera.org/api/ton/gradosphera.png"
    );

    let config = Config::default_config();
    assert_eq!(
        harness.chain.domain_lookups(),
        vec![(addr(DOMAIN), config.mainnet.dns_collection)]
    );

    let destination = deployer.deploy().await.unwrap();
    assert_eq!(destination, MockCollectionBuilder::DESTINATION);

    let params = harness.collections.params();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].domain_title, "gradosphera");
    assert_eq!(params[0].domain_address, addr(DOMAIN));

    let sent = harness.wallet.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].payload.state_init.is_some());

    assert_eq!(deployer.phase(), DeployerPhase::Unverified);
    assert_eq!(deployer.domain_input(), "");
    assert_eq!(harness.notifier.last().unwrap().severity, Severity::Sent);
}

#[tokio::test]
async fn test_owner_and_royalty_are_distinct_on_mainnet() {
    let harness = Harness::build(
        MockWallet::connected(MALLORY, Network::Mainnet),
        Config::default_config(),
    );
    harness.chain.add_domain(DOMAIN, nft("gradosphera", Some(MALLORY)));
    let deployer = harness.app.collections();

    deployer.set_domain_input(DOMAIN);
    deployer.check_domain().await.unwrap();
    deployer.deploy().await.unwrap();

    let config = Config::default_config();
    let params = harness.collections.params();
    assert_eq!(params[0].owner, addr(MALLORY));
    assert_eq!(params[0].royalty, config.mainnet.royalty_address);
    assert_eq!(params[0].royalty, addr(ALICE_WALLET));
    assert_ne!(params[0].owner, params[0].royalty);
}

#[tokio::test]
async fn test_testnet_uses_testnet_profile() {
    let harness = Harness::build(
        MockWallet::connected(ALICE_WALLET, Network::Testnet),
        Config::default_config(),
    );
    harness.chain.add_domain(DOMAIN, nft("sandbox", Some(ALICE_WALLET)));
    let deployer = harness.app.collections();
    assert!(harness.app.session().is_testnet());

    deployer.set_domain_input(DOMAIN);
    deployer.check_domain().await.unwrap();
    deployer.deploy().await.unwrap();

    let config = Config::default_config();
    assert_eq!(
        harness.chain.domain_lookups()[0].1,
        config.testnet.dns_collection
    );
    let params = harness.collections.params();
    assert_eq!(params[0].owner, addr(ALICE_WALLET));
    assert_eq!(params[0].royalty, config.testnet.royalty_address);
    assert_eq!(params[0].royalty, addr(MALLORY));
}

#[tokio::test]
async fn test_domain_owned_by_someone_else() {
    let harness = Harness::new();
    harness.chain.add_domain(DOMAIN, nft("gradosphera", Some(MALLORY)));
    let deployer = harness.app.collections();

    deployer.set_domain_input(DOMAIN);
    let err = deployer.check_domain().await.unwrap_err();

    assert!(matches!(err, DnsError::NotOwned { owner: Some(_), .. }));
    assert!(deployer.preview().is_none());
    assert!(matches!(deployer.deploy().await, Err(DnsError::Validation(_))));
    assert!(harness.wallet.sent().is_empty());
}

#[tokio::test]
async fn test_unknown_domain_and_missing_owner() {
    let harness = Harness::new();
    let deployer = harness.app.collections();

    deployer.set_domain_input(DOMAIN);
    assert_eq!(
        deployer.check_domain().await,
        Err(DnsError::NotFound {
            address: addr(DOMAIN)
        })
    );

    harness.chain.add_domain(DOMAIN, nft("gradosphera", None));
    assert!(matches!(
        deployer.check_domain().await,
        Err(DnsError::NotOwned { owner: None, .. })
    ));
}

#[tokio::test]
async fn test_clear_returns_to_unverified() {
    let harness = Harness::new();
    harness
        .chain
        .add_domain(DOMAIN, nft("gradosphera", Some(ALICE_WALLET)));
    let deployer = harness.app.collections();

    deployer.set_domain_input(DOMAIN);
    deployer.check_domain().await.unwrap();
    assert_eq!(deployer.phase(), DeployerPhase::Verified);

    deployer.clear();
    assert_eq!(deployer.phase(), DeployerPhase::Unverified);
    assert!(deployer.domain().is_none());
}
