//! Network profile tests

use nyc_consensus::network::*;
use nyc_consensus::*;

#[test]
fn test_profiles_are_separated() {
    let main = Network::Mainnet.params();
    let test = Network::Testnet.params();

    assert_ne!(main.magic, test.magic);
    assert_ne!(main.port, test.port);
    assert_ne!(main.rpc_port, test.rpc_port);
    for kind in [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::SecretKey,
    ] {
        assert_ne!(main.base58_prefix(kind), test.base58_prefix(kind), "{kind:?}");
    }
    for kind in [
        Bech32Type::WitnessPubkeyAddress,
        Bech32Type::WitnessScriptAddress,
    ] {
        assert_ne!(main.bech32_hrp(kind), test.bech32_hrp(kind), "{kind:?}");
    }

    // extended keys share the Bitcoin mainnet prefixes on both networks
    for kind in [Base58Type::ExtPublicKey, Base58Type::ExtSecretKey] {
        assert_eq!(main.base58_prefix(kind), test.base58_prefix(kind), "{kind:?}");
    }
}

#[test]
fn test_magic_numbers_unique() {
    let mut magics: Vec<u32> = Network::ALL.iter().map(|n| n.params().magic).collect();
    magics.sort_unstable();
    magics.dedup();
    assert_eq!(magics.len(), Network::ALL.len());
}

#[test]
fn test_consensus_records() {
    let main = &Network::Mainnet.params().consensus;
    assert_eq!(main.subsidy_halving_interval, 500_000);
    assert_eq!(main.majority_enforce_block_upgrade, 1500);
    assert_eq!(main.majority_reject_block_outdated, 1900);
    assert_eq!(main.majority_window, 2000);
    assert_eq!(main.pow_target_timespan.as_secs(), 7200);
    assert_eq!(main.pow_target_spacing.as_secs(), 30);
    assert_eq!(main.coinbase_maturity, 30);

    let test = &Network::Testnet.params().consensus;
    assert_eq!(test.subsidy_halving_interval, 1722);
    assert_eq!(test.majority_enforce_block_upgrade, 501);
    assert_eq!(test.majority_reject_block_outdated, 750);
    assert_eq!(test.majority_window, 1000);
    assert_eq!(test.pow_target_timespan.as_secs(), 60);
    assert_eq!(test.pow_target_spacing.as_secs(), 60);
    assert_eq!(test.coinbase_maturity, 30);

    for consensus in [main, test] {
        assert!(consensus.litecoin_work_calculation);
        assert!(!consensus.support_segwit);
        assert!(!consensus.pow_no_retargeting);
        assert_eq!(consensus.consensus_factory, ConsensusFactory::NewYorkCoin);
        assert_eq!(
            nyc_consensus::block::hash_to_hex(&consensus.pow_limit),
            "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
        );
    }
}

#[test]
fn test_seeds() {
    let main = Network::Mainnet.params();
    let hosts: Vec<&str> = main.dns_seeds.iter().map(|s| s.host).collect();
    assert_eq!(hosts, vec!["dnsseed.nycoin.money", "dnsseed.nycoin.community"]);

    let test = Network::Testnet.params();
    assert_eq!(test.dns_seeds.len(), 1);
    assert_eq!(test.dns_seeds[0].name, "jrn.me.uk");
    assert!(test.static_seeds.is_empty());
}

#[test]
fn test_concurrent_first_access_builds_once() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| Network::Testnet.params() as *const NetworkParams as usize))
        .collect();
    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_genesis_through_factory() {
    let nyc = NewYorkCoin::new(Network::Testnet);
    let genesis = nyc.params().genesis_block().unwrap().unwrap();
    let bytes = nyc.serialize_block(&genesis);
    assert_eq!(nyc.deserialize_block(&bytes).unwrap(), genesis);
    assert_eq!(nyc.block_hash(&genesis.header), nyc.genesis_hash().unwrap());
    assert!(nyc.check_proof_of_work(&genesis.header).unwrap());
}
