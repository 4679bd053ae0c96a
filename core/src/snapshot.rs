//! The transient, screen-owned copy of the remote collection.
//!
//! The snapshot is a cache, never the source of truth: it is rebuilt
//! wholesale after a list and patched after each successful mutation. Ids
//! stay unique across every operation.

use std::collections::HashSet;

use tracing::warn;

use crate::types::User;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalSnapshot {
    users: Vec<User>,
}

impl LocalSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `users`, keeping the first entry for each id.
    pub fn replace_all(&mut self, users: Vec<User>) {
        let mut seen = HashSet::with_capacity(users.len());
        self.users = users
            .into_iter()
            .filter(|user| {
                let fresh = seen.insert(user.id);
                if !fresh {
                    warn!(id = user.id, "dropping duplicate user id from listing");
                }
                fresh
            })
            .collect();
    }

    /// Replace the entry with the same id in place, or append a new one.
    pub fn upsert(&mut self, user: User) {
        match self.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => self.users.push(user),
        }
    }

    /// Drop the entry for `id`. Returns whether one was present.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        self.users.len() != before
    }

    pub fn get(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn iter(&self) -> std::slice::Iter<'_, User> {
        self.users.iter()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl<'a> IntoIterator for &'a LocalSnapshot {
    type Item = &'a User;
    type IntoIter = std::slice::Iter<'a, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
