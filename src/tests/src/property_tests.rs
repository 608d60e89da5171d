//! Property tests for naming, uniqueness and the creator index.

use crate::helpers::{new_keeper, ALICE};
use factory_core::denom::{deconstruct_denom, get_token_denom};
use factory_core::FactoryError;
use proptest::collection::{btree_set, vec};
use proptest::prelude::*;

fn address() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,38}"
}

fn subdenom() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9/:._-]{1,44}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_denom_deconstructs_to_its_parts(creator in address(), sub in subdenom()) {
        let denom = get_token_denom(&creator, &sub).unwrap();
        prop_assert_eq!(deconstruct_denom(&denom).unwrap(), (creator, sub));
    }

    #[test]
    fn prop_second_creation_collides(creator in address(), sub in subdenom()) {
        let mut keeper = new_keeper();
        let denom = keeper.create_denom(&creator, &sub).unwrap();
        prop_assert_eq!(
            keeper.create_denom(&creator, &sub),
            Err(FactoryError::DenomAlreadyExists(denom))
        );
    }

    #[test]
    fn prop_creators_never_collide(
        first in address(),
        second in address(),
        sub in subdenom(),
    ) {
        prop_assume!(first != second);
        let mut keeper = new_keeper();
        let a = keeper.create_denom(&first, &sub).unwrap();
        let b = keeper.create_denom(&second, &sub).unwrap();
        prop_assert_ne!(a, b);
    }

    #[test]
    fn prop_creator_index_matches_creations(
        subs in btree_set("[a-z][a-z0-9]{0,11}", 0..12),
        others in vec(address(), 0..4),
    ) {
        let mut keeper = new_keeper();
        for sub in &subs {
            keeper.create_denom(ALICE, sub).unwrap();
        }
        // Creators sharing a prefix with ALICE must not leak into its index
        for other in others.iter().filter(|other| other.as_str() != ALICE) {
            keeper.create_denom(other, "shadow").ok();
        }

        let expected: Vec<String> = subs
            .iter()
            .map(|sub| format!("factory/{}/{}", ALICE, sub))
            .collect();
        prop_assert_eq!(keeper.get_denoms_from_creator(ALICE).unwrap(), expected);
    }

    #[test]
    fn prop_overlong_subdenom_is_rejected(sub in "[a-z]{45,60}") {
        prop_assert!(matches!(
            get_token_denom(ALICE, &sub),
            Err(FactoryError::InvalidSubdenom(_))
        ));
    }
}
