// PlayerHashMap property tests.
//
// Model: a Vec<Player> in insertion order. Keyed operations act on the first
// model entry with a matching uid, which is what the table's head-first
// chain scan finds because `add` appends.
//
// Invariants asserted after every op:
// - len() == model.len() and equals the sum of chain lengths.
// - Every chain passes check_health() and holds only uids routed to it.
// - get/put/remove agree with the model, misses are KeyNotFound, and a
//   failed remove leaves len() unchanged.
//
// The same state machine runs under the Pearson hash and under a constant
// hash that piles everything into bucket 0.
use player_map::{KeyHash, MapError, Pearson, Player, PlayerHashMap};
use proptest::prelude::*;
use std::num::NonZeroUsize;

#[derive(Clone, Debug)]
enum Op {
    Add(usize, u8),
    Get(usize),
    Put(usize, u8),
    Remove(usize),
}

fn arb_ops(keys: usize) -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        (0..keys, any::<u8>()).prop_map(|(k, n)| Op::Add(k, n)),
        (0..keys).prop_map(Op::Get),
        (0..keys, any::<u8>()).prop_map(|(k, n)| Op::Put(k, n)),
        (0..keys).prop_map(Op::Remove),
    ];
    proptest::collection::vec(op, 1..120)
}

#[derive(Clone, Copy)]
struct ConstHash;
impl KeyHash for ConstHash {
    fn hash_key(&self, _key: &str) -> usize {
        0
    }
}

fn run<S: KeyHash>(mut sut: PlayerHashMap<S>, ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut model: Vec<Player> = Vec::new();

    for op in ops {
        match op {
            Op::Add(k, n) => {
                let p = Player::new(format!("ID-{k}"), format!("n{n}"));
                sut.add(p.clone());
                model.push(p);
            }
            Op::Get(k) => {
                let key = format!("ID-{k}");
                match model.iter().find(|p| p.uid() == key) {
                    Some(p) => {
                        prop_assert_eq!(sut.get(&key), Ok(p));
                    }
                    None => {
                        prop_assert_eq!(sut.get(&key), Err(MapError::KeyNotFound(key.clone())));
                    }
                }
            }
            Op::Put(k, n) => {
                let key = format!("ID-{k}");
                let res = sut.put(&key, format!("n{n}"));
                match model.iter_mut().find(|p| p.uid() == key) {
                    Some(p) => {
                        prop_assert!(res.is_ok());
                        p.set_name(format!("n{n}"));
                    }
                    None => {
                        prop_assert_eq!(res, Err(MapError::KeyNotFound(key.clone())));
                    }
                }
            }
            Op::Remove(k) => {
                let key = format!("ID-{k}");
                let before = sut.len();
                match model.iter().position(|p| p.uid() == key) {
                    Some(pos) => {
                        let expected = model.remove(pos);
                        prop_assert_eq!(sut.remove(&key), Ok(expected));
                        prop_assert_eq!(sut.len(), before - 1);
                    }
                    None => {
                        prop_assert!(sut.remove(&key).is_err());
                        prop_assert_eq!(sut.len(), before);
                    }
                }
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        let mut total = 0;
        for (i, chain) in sut.buckets() {
            prop_assert!(chain.check_health());
            total += chain.len();
            for p in chain {
                prop_assert_eq!(sut.bucket_index(p.uid()), i);
            }
        }
        prop_assert_eq!(total, model.len());
        prop_assert_eq!(sut.iter().count(), model.len());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]

    #[test]
    fn prop_table_matches_model(size in 1usize..=12, ops in arb_ops(16)) {
        let size = NonZeroUsize::new(size).unwrap();
        run(PlayerHashMap::with_hasher(size, Pearson), ops)?;
    }

    #[test]
    fn prop_table_matches_model_with_collisions(ops in arb_ops(8)) {
        let size = NonZeroUsize::new(5).unwrap();
        run(PlayerHashMap::with_hasher(size, ConstHash), ops)?;
    }

    // Property: len() equals the number of adds when nothing is removed,
    // whatever uids repeat.
    #[test]
    fn prop_len_counts_adds(uids in proptest::collection::vec("[a-d]{1,3}", 0..64)) {
        let mut m = PlayerHashMap::new();
        for (i, uid) in uids.iter().enumerate() {
            m.add(Player::new(uid.clone(), i.to_string()));
            prop_assert_eq!(m.len(), i + 1);
        }
        for uid in &uids {
            let first = uids.iter().position(|u| u == uid).unwrap();
            prop_assert_eq!(m.get(uid).unwrap().name(), first.to_string());
        }
    }
}
