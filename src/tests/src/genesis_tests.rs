//! Tests for genesis import and export.

use crate::helpers::{fund, keeper_with_fee, new_keeper, ALICE, BOB, CAROL};
use factory_core::expected::{AccountKeeper, Ledger};
use factory_core::types::{AuthorityMetadata, Coin, DenomMetadata, Params};
use factory_core::{FactoryError, GenesisDenom, GenesisState};
use tempfile::tempdir;

fn sample_genesis(count: usize) -> GenesisState {
    let factory_denoms = (0..count)
        .map(|i| {
            GenesisDenom::new(
                format!("factory/{}/token{:02}", ALICE, i),
                AuthorityMetadata::with_admin(ALICE),
            )
        })
        .collect();
    GenesisState::new(Params::new(vec![Coin::new("uosmo", 100)]), factory_denoms)
}

/// Tests that importing an export reproduces it, for zero, one and many denoms.
#[test]
fn test_round_trip() {
    for count in [0, 1, 25] {
        let genesis = sample_genesis(count);

        let mut keeper = new_keeper();
        keeper.init_genesis(&genesis).unwrap();
        let exported = keeper.export_genesis().unwrap();
        assert_eq!(exported, genesis);

        let mut other = new_keeper();
        other.init_genesis(&exported).unwrap();
        assert_eq!(other.export_genesis().unwrap(), exported);
    }
}

/// Tests a round trip of live state: admin changes, hooks and orphans.
#[test]
fn test_round_trip_of_live_state() {
    let mut keeper = keeper_with_fee(10);
    fund(&mut keeper, ALICE, 100);
    fund(&mut keeper, BOB, 100);

    let bitcoin = keeper.create_denom(ALICE, "bitcoin").unwrap();
    let ether = keeper.create_denom(BOB, "ether").unwrap();
    let orphan = keeper.create_denom(ALICE, "orphan").unwrap();
    keeper.change_admin(ALICE, &bitcoin, CAROL).unwrap();
    keeper.set_before_send_hook(BOB, &ether, CAROL).unwrap();
    keeper.change_admin(ALICE, &orphan, "").unwrap();

    let exported = keeper.export_genesis().unwrap();
    assert_eq!(exported.factory_denoms.len(), 3);

    let mut imported = new_keeper();
    imported.init_genesis(&exported).unwrap();
    assert_eq!(imported.export_genesis().unwrap(), exported);

    // The creator index is rebuilt from the denom names
    assert_eq!(
        imported.get_denoms_from_creator(ALICE).unwrap(),
        vec![bitcoin.clone(), orphan.clone()]
    );
    assert_eq!(imported.get_denoms_from_creator(BOB).unwrap(), vec![ether]);
    assert_eq!(imported.get_authority_metadata(&bitcoin).unwrap().admin, CAROL);
    assert_eq!(imported.get_authority_metadata(&orphan).unwrap().admin(), None);
}

/// Tests that exported denoms are in lexicographic order.
#[test]
fn test_export_order() {
    let mut keeper = new_keeper();
    keeper.create_denom(BOB, "zzz").unwrap();
    keeper.create_denom(ALICE, "aaa").unwrap();

    let denoms: Vec<String> = keeper
        .export_genesis()
        .unwrap()
        .factory_denoms
        .into_iter()
        .map(|entry| entry.denom)
        .collect();
    assert_eq!(denoms, vec!["factory/alice1/aaa", "factory/bob1/zzz"]);
}

/// Tests that a pre-existing display record survives import untouched.
#[test]
fn test_import_keeps_existing_display_metadata() {
    let genesis = sample_genesis(2);
    let existing = DenomMetadata {
        description: "already described".to_string(),
        symbol: "TK00".to_string(),
        ..DenomMetadata::minimal("factory/alice1/token00")
    };

    let mut keeper = new_keeper();
    keeper
        .ledger_mut()
        .set_denom_metadata("factory/alice1/token00", &existing)
        .unwrap();
    keeper.init_genesis(&genesis).unwrap();

    assert_eq!(
        keeper
            .ledger()
            .get_denom_metadata("factory/alice1/token00")
            .unwrap(),
        Some(existing)
    );
    // Denoms without a record get a minimal one
    assert_eq!(
        keeper
            .ledger()
            .get_denom_metadata("factory/alice1/token01")
            .unwrap(),
        Some(DenomMetadata::minimal("factory/alice1/token01"))
    );
    assert_eq!(keeper.export_genesis().unwrap(), genesis);
}

/// Tests that import creates the module account and can be repeated.
#[test]
fn test_import_is_repeatable() {
    let genesis = sample_genesis(3);
    let mut keeper = new_keeper();

    keeper.init_genesis(&genesis).unwrap();
    keeper.init_genesis(&genesis).unwrap();

    let module = keeper.module_address();
    assert!(keeper.accounts().get_account(&module).unwrap().is_some());
    assert_eq!(keeper.accounts().next_account_number().unwrap(), 1);
    assert_eq!(keeper.export_genesis().unwrap(), genesis);
    assert_eq!(keeper.get_denoms_from_creator(ALICE).unwrap().len(), 3);
}

/// Tests that imported params take effect for later creations.
#[test]
fn test_imported_params_apply() {
    let mut keeper = new_keeper();
    keeper.init_genesis(&sample_genesis(0)).unwrap();
    fund(&mut keeper, BOB, 99);

    assert!(matches!(
        keeper.create_denom(BOB, "bitcoin"),
        Err(FactoryError::InsufficientFunds { .. })
    ));
}

/// Tests rejection of malformed genesis documents before any write.
#[test]
fn test_invalid_genesis() {
    let mut duplicate = sample_genesis(1);
    duplicate
        .factory_denoms
        .push(duplicate.factory_denoms[0].clone());

    let not_factory = GenesisState::new(
        Params::default(),
        vec![GenesisDenom::new("uosmo", AuthorityMetadata::with_admin(ALICE))],
    );

    let bad_admin = GenesisState::new(
        Params::default(),
        vec![GenesisDenom::new(
            "factory/alice1/bitcoin",
            AuthorityMetadata::with_admin("not an address"),
        )],
    );

    let bad_params = GenesisState::new(
        Params::new(vec![Coin::new("uosmo", 0)]),
        Vec::new(),
    );

    for genesis in [duplicate, not_factory, bad_admin, bad_params] {
        let mut keeper = new_keeper();
        assert!(matches!(
            keeper.init_genesis(&genesis),
            Err(FactoryError::InvalidGenesis(_))
        ));
        assert!(keeper.export_genesis().unwrap().factory_denoms.is_empty());
        assert!(keeper
            .accounts()
            .get_account(&keeper.module_address())
            .unwrap()
            .is_none());
    }
}

/// Tests that an orphaned denom is valid genesis.
#[test]
fn test_orphan_genesis_is_valid() {
    let genesis = GenesisState::new(
        Params::default(),
        vec![GenesisDenom::new(
            "factory/alice1/bitcoin",
            AuthorityMetadata::default(),
        )],
    );
    assert!(genesis.validate().is_ok());
}

/// Tests loading and saving genesis files.
#[test]
fn test_genesis_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("genesis.json");

    let genesis = sample_genesis(2);
    genesis.to_file(&path).unwrap();
    assert_eq!(GenesisState::from_file(&path).unwrap(), genesis);

    // Missing sections fall back to defaults
    std::fs::write(&path, "{}").unwrap();
    assert_eq!(GenesisState::from_file(&path).unwrap(), GenesisState::default());

    assert!(GenesisState::from_file(dir.path().join("missing.json")).is_err());
}
