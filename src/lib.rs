//! player-map: a fixed-bucket, separately chained hash map of `Player`
//! records keyed by uid.
//!
//! Internal Design:
//!
//! Summary
//! - Layers, leaves first:
//!   - `Player`: immutable uid plus a mutable display name.
//!   - `pearson`: summing Pearson-style byte mixer over a permutation
//!     table shuffled once per process from a fixed seed. Reached through
//!     the `KeyHash` trait so tests can force collisions.
//!   - `PlayerList`: doubly-linked chain whose nodes live in a slot arena
//!     and refer to neighbours by generational keys.
//!   - `PlayerHashMap<S>`: a `Vec` of chains plus an incrementally
//!     maintained length; routes each uid with `hash % size`.
//!
//! Constraints
//! - Single-threaded: the table is `!Send`/`!Sync`. Share it behind one
//!   exclusive lock if needed.
//! - Fixed bucket count chosen at construction; no rehashing or growth.
//! - `add` never rejects a uid that is already present. All keyed
//!   operations scan a chain from its head, so the earliest-added of
//!   several equal uids is the one found, renamed and removed.
//! - `get` hands out `&Player`; `put` is the only way to rename a stored
//!   player.
//!
//! Links without ownership cycles
//! - A node's `last` and `next` are `slotmap` keys into the chain's own
//!   arena. Removing a node frees its slot and bumps the generation, so a
//!   stale `NodeHandle` never resolves to a later node.
//!
//! Reentrancy
//! - The only caller code run inside a table operation is
//!   `KeyHash::hash_key`. Debug builds panic if it re-enters the table.
//!
//! Logging
//! - Mutations and failed lookups emit `log` records at `trace`/`debug`
//!   level. The crate never installs a logger.

mod error;
pub mod pearson;
mod player;
mod player_hash_map;
pub mod player_list;
mod player_list_proptest;
mod reentrancy;

// Public surface
pub use error::MapError;
pub use pearson::{pearson_hash, KeyHash, Pearson, PERMUTATION_SEED};
pub use player::Player;
pub use player_hash_map::{Iter, PlayerHashMap, DEFAULT_SIZE};
pub use player_list::{NodeHandle, PlayerList};
