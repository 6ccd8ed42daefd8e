use crate::pearson::pearson_hash;
use core::fmt;

/// A record stored in the map: an immutable uid and a mutable display name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Player {
    uid: String,
    name: String,
}

impl Player {
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
        }
    }

    /// The key under which the player is stored. Fixed for the player's lifetime.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Unreduced Pearson hash of the uid.
    pub fn pearson_hash(&self) -> usize {
        pearson_hash(self.uid.as_bytes())
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player(uid={}, name={})", self.uid, self.name)
    }
}
