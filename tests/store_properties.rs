//! Store invariant property tests.
//!
//! Runs random sequences of inserts and retrievals (correct and wrong
//! passwords) against the store and checks after every step that:
//!
//! - keys stay in strict ascending order (BST ordering)
//! - every subtree is AVL balanced with correct stored heights
//! - the entry count matches a simple model of what should be present

use std::collections::BTreeMap;

use burnnote::errors::BurnNoteError;
use burnnote::store::SecretStore;
use proptest::prelude::*;

/// Store operation for property testing
#[derive(Debug, Clone)]
enum StoreOp {
    Insert { id: i64, password: String, attempts: u32 },
    RetrieveCorrect { id: i64 },
    RetrieveWrong { id: i64 },
    Remove { id: i64 },
}

/// Small id range so operations collide often.
fn arb_id() -> impl Strategy<Value = i64> {
    -30i64..30
}

fn arb_store_op() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        4 => (arb_id(), "[a-z]{1,6}", 1u32..5).prop_map(|(id, password, attempts)| {
            StoreOp::Insert { id, password, attempts }
        }),
        2 => arb_id().prop_map(|id| StoreOp::RetrieveCorrect { id }),
        3 => arb_id().prop_map(|id| StoreOp::RetrieveWrong { id }),
        1 => arb_id().prop_map(|id| StoreOp::Remove { id }),
    ]
}

/// Model entry: password, message, attempts left.
type Model = BTreeMap<i64, (String, String, u32)>;

fn apply(store: &mut SecretStore, model: &mut Model, op: &StoreOp) {
    match op {
        StoreOp::Insert { id, password, attempts } => {
            let message = format!("message-{id}-{password}");
            let inserted = store.insert(*id, password, &message, *attempts);
            assert_eq!(inserted, !model.contains_key(id));
            model
                .entry(*id)
                .or_insert_with(|| (password.clone(), message, *attempts));
        }
        StoreOp::RetrieveCorrect { id } => {
            let result = store.try_retrieve(*id, &correct_password(model, *id));
            match model.remove(id) {
                Some((_, message, _)) => assert_eq!(result.unwrap(), message),
                None => assert!(matches!(result, Err(BurnNoteError::NotFound(_)))),
            }
        }
        StoreOp::RetrieveWrong { id } => {
            // Stored passwords are lowercase letters, so this never matches.
            let result = store.try_retrieve(*id, "WRONG");
            match model.get(id).map(|entry| entry.2) {
                None => assert!(matches!(result, Err(BurnNoteError::NotFound(_)))),
                Some(1) => {
                    assert!(matches!(result, Err(BurnNoteError::MessageDestroyed(_))));
                    model.remove(id);
                }
                Some(left) => {
                    match result {
                        Err(BurnNoteError::InvalidPassword { remaining }) => {
                            assert_eq!(remaining, left - 1)
                        }
                        other => panic!("expected InvalidPassword, got {other:?}"),
                    }
                    if let Some(entry) = model.get_mut(id) {
                        entry.2 = left - 1;
                    }
                }
            }
        }
        StoreOp::Remove { id } => {
            assert_eq!(store.remove(*id), model.remove(id).is_some());
        }
    }
}

fn correct_password(model: &Model, id: i64) -> String {
    model
        .get(&id)
        .map(|(pw, _, _)| pw.clone())
        .unwrap_or_else(|| "absent".to_string())
}

fn assert_invariants(store: &SecretStore, model: &Model) {
    let ids = store.ids();
    assert!(ids.windows(2).all(|w| w[0] < w[1]), "keys out of order: {ids:?}");
    assert!(store.is_balanced(), "AVL property violated");
    assert_eq!(ids, model.keys().copied().collect::<Vec<_>>());
    assert_eq!(store.len(), model.len());
    assert_eq!(store.is_empty(), model.is_empty());
    assert_eq!(store.find_min().ok(), model.keys().next().copied());
    assert_eq!(store.find_max().ok(), model.keys().next_back().copied());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn invariants_hold_after_every_step(ops in prop::collection::vec(arb_store_op(), 1..200)) {
        let mut store = SecretStore::new();
        let mut model = Model::new();

        for op in &ops {
            apply(&mut store, &mut model, op);
            assert_invariants(&store, &model);
        }
    }

    #[test]
    fn count_is_inserted_minus_removed(ids in prop::collection::vec(-1000i64..1000, 0..300)) {
        let mut store = SecretStore::new();
        let mut unique = std::collections::BTreeSet::new();
        for id in &ids {
            store.insert(*id, "pw", "m", 1);
            unique.insert(*id);
        }
        prop_assert_eq!(store.len(), unique.len());
        prop_assert!(store.is_balanced());

        // Release every other key, burn the rest.
        for (i, id) in unique.iter().enumerate() {
            if i % 2 == 0 {
                prop_assert!(store.try_retrieve(*id, "pw").is_ok());
            } else {
                prop_assert!(store.try_retrieve(*id, "x").is_err());
            }
            prop_assert!(store.is_balanced());
        }
        prop_assert!(store.is_empty());
    }
}
