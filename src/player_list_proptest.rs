#![cfg(test)]

// Property tests for PlayerList kept inside the crate next to the chain so
// link-level accessors can be checked alongside the public API.

use crate::error::MapError;
use crate::player::Player;
use crate::player_list::PlayerList;
use proptest::prelude::*;
use std::collections::VecDeque;

// Pool-indexed operations: indices shrink toward earlier uids, the pool
// shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Append(usize, u8),
    Prepend(usize, u8),
    Remove(usize),
    RemoveHead,
    RemoveTail,
    Update(usize, u8),
    Get(usize),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    // Small uid alphabet on purpose: duplicates must occur.
    proptest::collection::vec("[a-c]{1,2}", 1..=6).prop_flat_map(|pool| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            (idx.clone(), any::<u8>()).prop_map(|(i, n)| Op::Append(i, n)),
            (idx.clone(), any::<u8>()).prop_map(|(i, n)| Op::Prepend(i, n)),
            idx.clone().prop_map(Op::Remove),
            Just(Op::RemoveHead),
            Just(Op::RemoveTail),
            (idx.clone(), any::<u8>()).prop_map(|(i, n)| Op::Update(i, n)),
            idx.prop_map(Op::Get),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn name(n: u8) -> String {
    format!("n{n}")
}

// Property: state-machine equivalence against a VecDeque model.
// Invariants checked after every op:
// - `check_health()` holds (end markers, next/last symmetry, node count).
// - Forward and backward walks match the model and its reverse.
// - Every non-tail node satisfies `node.next.last == node`.
// - Keyed ops act on the model's first match; misses are KeyNotFound.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_chain_matches_model((pool, ops) in arb_scenario()) {
        let mut sut = PlayerList::new();
        let mut model: VecDeque<Player> = VecDeque::new();

        for op in ops {
            match op {
                Op::Append(i, n) => {
                    let p = Player::new(pool[i].clone(), name(n));
                    sut.append(p.clone());
                    model.push_back(p);
                }
                Op::Prepend(i, n) => {
                    let p = Player::new(pool[i].clone(), name(n));
                    sut.prepend(p.clone());
                    model.push_front(p);
                }
                Op::Remove(i) => {
                    let key = pool[i].as_str();
                    match model.iter().position(|p| p.uid() == key) {
                        Some(pos) => {
                            let expected = model.remove(pos);
                            prop_assert_eq!(sut.remove(key).ok(), expected);
                        }
                        None => {
                            prop_assert_eq!(sut.remove(key), Err(MapError::KeyNotFound(key.to_string())));
                        }
                    }
                }
                Op::RemoveHead => {
                    prop_assert_eq!(sut.remove_at_head(), model.pop_front());
                }
                Op::RemoveTail => {
                    prop_assert_eq!(sut.remove_at_tail(), model.pop_back());
                }
                Op::Update(i, n) => {
                    let key = pool[i].as_str();
                    let res = sut.update(key, name(n));
                    match model.iter_mut().find(|p| p.uid() == key) {
                        Some(p) => {
                            prop_assert!(res.is_ok());
                            p.set_name(name(n));
                        }
                        None => {
                            prop_assert!(res.is_err());
                        }
                    }
                }
                Op::Get(i) => {
                    let key = pool[i].as_str();
                    prop_assert_eq!(sut.get(key), model.iter().find(|p| p.uid() == key));
                    prop_assert_eq!(sut.contains(key), model.iter().any(|p| p.uid() == key));
                }
            }

            prop_assert!(sut.check_health());
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.head().is_none(), sut.tail().is_none());

            let forward: Vec<&Player> = sut.iter().collect();
            let expected: Vec<&Player> = model.iter().collect();
            prop_assert_eq!(&forward, &expected);
            let backward: Vec<&Player> = sut.iter().rev().collect();
            let expected_rev: Vec<&Player> = model.iter().rev().collect();
            prop_assert_eq!(backward, expected_rev);

            let mut cur = sut.head();
            while let Some(node) = cur {
                let next = node.next(&sut);
                if let Some(n) = next {
                    prop_assert_eq!(n.last(&sut), Some(node));
                } else {
                    prop_assert_eq!(Some(node), sut.tail());
                }
                cur = next;
            }
        }
    }
}
