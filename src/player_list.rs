//! PlayerList: a doubly-linked chain of players backed by a slot arena.
//!
//! Nodes live in a per-list `SlotMap` and point at their neighbours with
//! generational keys, so the `last` link is a plain lookup relation and no
//! node owns another. Every mutation keeps the two-way invariant: if B is
//! `A.next` then `B.last` is A, `head.last` and `tail.next` are `None`, and
//! `head` is `None` exactly when `tail` is.

use crate::error::MapError;
use crate::player::Player;
use core::fmt;
use core::iter::FusedIterator;
use slotmap::{DefaultKey, SlotMap};

/// Stable reference to a node of one `PlayerList`.
///
/// A handle stops resolving once its node is removed, even if the slot is
/// later reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeHandle(DefaultKey);

impl NodeHandle {
    pub fn player<'a>(&self, list: &'a PlayerList) -> Option<&'a Player> {
        list.slots.get(self.0).map(|n| &n.player)
    }

    pub fn next(&self, list: &PlayerList) -> Option<NodeHandle> {
        list.slots.get(self.0)?.next.map(NodeHandle)
    }

    pub fn last(&self, list: &PlayerList) -> Option<NodeHandle> {
        list.slots.get(self.0)?.last.map(NodeHandle)
    }
}

#[derive(Debug)]
struct Node {
    player: Player,
    last: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

#[derive(Debug, Default)]
pub struct PlayerList {
    slots: SlotMap<DefaultKey, Node>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl PlayerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(&self) -> Option<NodeHandle> {
        self.head.map(NodeHandle)
    }

    pub fn tail(&self) -> Option<NodeHandle> {
        self.tail.map(NodeHandle)
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    fn set_next(&mut self, at: DefaultKey, to: Option<DefaultKey>) {
        if let Some(node) = self.slots.get_mut(at) {
            node.next = to;
        }
    }

    fn set_last(&mut self, at: DefaultKey, to: Option<DefaultKey>) {
        if let Some(node) = self.slots.get_mut(at) {
            node.last = to;
        }
    }

    /// Add a player after the current tail.
    pub fn append(&mut self, player: Player) -> NodeHandle {
        let k = self.slots.insert(Node {
            player,
            last: self.tail,
            next: None,
        });
        match self.tail {
            Some(t) => self.set_next(t, Some(k)),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
        NodeHandle(k)
    }

    /// Add a player before the current head.
    pub fn prepend(&mut self, player: Player) -> NodeHandle {
        let k = self.slots.insert(Node {
            player,
            last: None,
            next: self.head,
        });
        match self.head {
            Some(h) => self.set_last(h, Some(k)),
            None => self.tail = Some(k),
        }
        self.head = Some(k);
        NodeHandle(k)
    }

    // Splice a node out, relinking its neighbours or moving the ends.
    fn unlink(&mut self, k: DefaultKey) -> Option<Player> {
        let node = self.slots.remove(k)?;
        match node.last {
            Some(l) => self.set_next(l, node.next),
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.set_last(n, node.last),
            None => self.tail = node.last,
        }
        Some(node.player)
    }

    pub fn remove_at_head(&mut self) -> Option<Player> {
        let h = self.head?;
        self.unlink(h)
    }

    pub fn remove_at_tail(&mut self) -> Option<Player> {
        let t = self.tail?;
        self.unlink(t)
    }

    fn find_node(&self, key: &str) -> Option<DefaultKey> {
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = self.slots.get(k)?;
            if node.player.uid() == key {
                return Some(k);
            }
            cur = node.next;
        }
        None
    }

    /// Remove the first player, scanning from the head, whose uid is `key`.
    pub fn remove(&mut self, key: &str) -> Result<Player, MapError> {
        self.find_node(key)
            .and_then(|k| self.unlink(k))
            .ok_or_else(|| MapError::not_found(key))
    }

    /// Rename the first player whose uid is `key`.
    pub fn update(&mut self, key: &str, name: impl Into<String>) -> Result<(), MapError> {
        let node = self
            .find_node(key)
            .and_then(|k| self.slots.get_mut(k))
            .ok_or_else(|| MapError::not_found(key))?;
        node.player.set_name(name);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Player> {
        self.find_node(key)
            .and_then(|k| self.slots.get(k))
            .map(|n| &n.player)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find_node(key).is_some()
    }

    /// Head to tail; `.rev()` walks tail to head along the `last` links.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: &self.slots,
            front: self.head,
            back: self.tail,
            remaining: self.slots.len(),
        }
    }

    /// Display adapter listing players tail to head.
    pub fn reversed(&self) -> Reversed<'_> {
        Reversed(self)
    }

    /// Walk the chain both ways and verify the link structure: end markers,
    /// `next`/`last` symmetry, and that both walks reach every node once.
    pub fn check_health(&self) -> bool {
        if self.head.is_none() != self.tail.is_none() {
            return false;
        }
        let n = self.slots.len();

        let mut prev = None;
        let mut cur = self.head;
        let mut seen = 0;
        while let Some(k) = cur {
            let Some(node) = self.slots.get(k) else {
                return false;
            };
            seen += 1;
            if node.last != prev || seen > n {
                return false;
            }
            prev = cur;
            cur = node.next;
        }
        if prev != self.tail || seen != n {
            return false;
        }

        let mut after = None;
        let mut cur = self.tail;
        let mut seen = 0;
        while let Some(k) = cur {
            let Some(node) = self.slots.get(k) else {
                return false;
            };
            seen += 1;
            if node.next != after || seen > n {
                return false;
            }
            after = cur;
            cur = node.last;
        }
        after == self.head && seen == n
    }
}

/// Iterator over the players of a `PlayerList`.
pub struct Iter<'a> {
    slots: &'a SlotMap<DefaultKey, Node>,
    front: Option<DefaultKey>,
    back: Option<DefaultKey>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Player;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.slots.get(self.front?)?;
        self.remaining -= 1;
        self.front = node.next;
        Some(&node.player)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.slots.get(self.back?)?;
        self.remaining -= 1;
        self.back = node.last;
        Some(&node.player)
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}
impl<'a> FusedIterator for Iter<'a> {}

impl<'a> IntoIterator for &'a PlayerList {
    type Item = &'a Player;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn write_players<'a>(
    f: &mut fmt::Formatter<'_>,
    players: impl Iterator<Item = &'a Player>,
) -> fmt::Result {
    f.write_str("PlayerList(")?;
    for (i, p) in players.enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "\n {}", p)?;
    }
    f.write_str(")")
}

impl fmt::Display for PlayerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_players(f, self.iter())
    }
}

pub struct Reversed<'a>(&'a PlayerList);

impl<'a> fmt::Display for Reversed<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_players(f, self.0.iter().rev())
    }
}
