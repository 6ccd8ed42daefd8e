//! PlayerHashMap: fixed array of `PlayerList` buckets addressed by uid.

use crate::error::MapError;
use crate::pearson::{KeyHash, Pearson};
use crate::player::Player;
use crate::player_list::{self, PlayerList};
use crate::reentrancy::BusyFlag;
use core::fmt;
use core::iter::FusedIterator;
use core::num::NonZeroUsize;
use log::{debug, trace};

/// Bucket count used by `PlayerHashMap::new`.
pub const DEFAULT_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => panic!("default bucket count must be non-zero"),
};

/// Separate-chaining map from uid to `Player`.
///
/// The bucket count is fixed at construction; the table never rehashes.
/// `add` does not check for an existing uid, so duplicates may coexist in
/// one chain and every keyed operation acts on the one added first.
pub struct PlayerHashMap<S = Pearson> {
    hasher: S,
    buckets: Vec<PlayerList>,
    length: usize,
    busy: BusyFlag,
}

impl PlayerHashMap {
    pub fn new() -> Self {
        Self::with_size(DEFAULT_SIZE)
    }

    pub fn with_size(size: NonZeroUsize) -> Self {
        Self::with_hasher(size, Pearson)
    }
}

impl Default for PlayerHashMap {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: KeyHash> PlayerHashMap<S> {
    pub fn with_hasher(size: NonZeroUsize, hasher: S) -> Self {
        Self {
            hasher,
            buckets: (0..size.get()).map(|_| PlayerList::new()).collect(),
            length: 0,
            busy: BusyFlag::new(),
        }
    }

    fn index_of(&self, key: &str) -> usize {
        self.hasher.hash_key(key) % self.buckets.len()
    }

    /// Bucket that `key` routes to.
    pub fn bucket_index(&self, key: &str) -> usize {
        let _g = self.busy.enter();
        self.index_of(key)
    }

    /// Number of buckets.
    pub fn size(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn bucket(&self, index: usize) -> Option<&PlayerList> {
        self.buckets.get(index)
    }

    /// Append `player` to the chain of its uid's bucket.
    pub fn add(&mut self, player: Player) {
        let _g = self.busy.enter();
        let i = self.index_of(player.uid());
        trace!("add uid={:?} bucket={}", player.uid(), i);
        self.buckets[i].append(player);
        self.length += 1;
    }

    pub fn get(&self, key: &str) -> Result<&Player, MapError> {
        let _g = self.busy.enter();
        let i = self.index_of(key);
        self.buckets[i].get(key).ok_or_else(|| {
            debug!("get uid={:?}: not found in bucket {}", key, i);
            MapError::not_found(key)
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        let _g = self.busy.enter();
        self.buckets[self.index_of(key)].contains(key)
    }

    /// Rename the player stored under `key`. Never inserts.
    pub fn put(&mut self, key: &str, name: impl Into<String>) -> Result<(), MapError> {
        let _g = self.busy.enter();
        let i = self.index_of(key);
        self.buckets[i].update(key, name).map_err(|e| {
            debug!("put uid={:?}: {}", key, e);
            e
        })?;
        trace!("put uid={:?} bucket={}", key, i);
        Ok(())
    }

    /// Detach and return the player stored under `key`.
    pub fn remove(&mut self, key: &str) -> Result<Player, MapError> {
        let _g = self.busy.enter();
        let i = self.index_of(key);
        let player = self.buckets[i].remove(key).map_err(|e| {
            debug!("remove uid={:?}: {}", key, e);
            e
        })?;
        self.length -= 1;
        trace!("remove uid={:?} bucket={} len={}", key, i, self.length);
        Ok(player)
    }
}

impl<S> PlayerHashMap<S> {
    /// All players, bucket by bucket, each chain head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.length,
        }
    }

    /// `(index, chain)` for every bucket, empty ones included.
    pub fn buckets(&self) -> impl Iterator<Item = (usize, &PlayerList)> {
        self.buckets.iter().enumerate()
    }
}

/// Iterator over every player in a `PlayerHashMap`.
pub struct Iter<'a> {
    buckets: core::slice::Iter<'a, PlayerList>,
    chain: Option<player_list::Iter<'a>>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Player;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(p) = self.chain.as_mut().and_then(|it| it.next()) {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(p);
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}
impl<'a> FusedIterator for Iter<'a> {}

impl<'a, S> IntoIterator for &'a PlayerHashMap<S> {
    type Item = &'a Player;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Bucket dump: one line per bucket index with its players.
impl<S> fmt::Display for PlayerHashMap<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "PlayerHashMap(size={}, len={})",
            self.buckets.len(),
            self.length
        )?;
        for (i, chain) in self.buckets() {
            write!(f, "  {}:", i)?;
            for (j, p) in chain.iter().enumerate() {
                f.write_str(if j == 0 { " " } else { ", " })?;
                write!(f, "{}", p)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Compact `{uid: name}` view; empty buckets contribute nothing.
impl<S> fmt::Debug for PlayerHashMap<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|p| (p.uid(), p.name())))
            .finish()
    }
}
