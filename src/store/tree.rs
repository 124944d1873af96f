//! `SecretStore`: a self-balancing (AVL) tree of password-gated,
//! self-destructing messages.
//!
//! Every mutation walks from the root to its target through the owned
//! child slots and rebalances each ancestor on the way back up.  A message
//! leaves the store exactly once: either released by a correct password or
//! discarded when its attempt budget runs out.

use std::cmp::Ordering;
use std::fmt;

use crate::errors::{BurnNoteError, Result};

use super::balance::balance;
use super::entry::{height, Entry, Link};

/// In-memory store of secret messages keyed by a unique integer id.
///
/// The store is single-owner: every mutating call takes `&mut self` and
/// runs to completion.  Hosts that share it between callers must guard
/// the whole store with one lock, since `try_retrieve` reads and then
/// conditionally mutates.
#[derive(Default)]
pub struct SecretStore {
    root: Link,
    len: usize,
}

impl SecretStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Store `message` under `id`, gated by `password` and an attempt budget.
    ///
    /// If `id` is already present this does nothing and returns `false`:
    /// the existing entry keeps its password, message and remaining
    /// attempts.  Duplicate ids are deliberately not treated as updates.
    ///
    /// `max_attempts` is stored as given; callers are expected to have
    /// validated it (see `Settings::validate_attempts`).
    pub fn insert(&mut self, id: i64, password: &str, message: &str, max_attempts: u32) -> bool {
        let inserted = insert_at(&mut self.root, id, password, message, max_attempts);
        if inserted {
            self.len += 1;
            tracing::debug!(id, max_attempts, entries = self.len, "message stored");
        } else {
            tracing::debug!(id, "duplicate id ignored");
        }
        inserted
    }

    /// Attempt to release the message stored under `id`.
    ///
    /// - correct password: the message is returned and the entry removed;
    /// - wrong password with attempts left: `InvalidPassword { remaining }`,
    ///   the entry stays with its counter decremented;
    /// - wrong password on the last attempt: the entry is removed and
    ///   `MessageDestroyed` is returned;
    /// - unknown id: `NotFound`, nothing changes.
    pub fn try_retrieve(&mut self, id: i64, password: &str) -> Result<String> {
        let outcome = retrieve_at(&mut self.root, id, password);

        match &outcome {
            Ok(_) => {
                self.len -= 1;
                tracing::info!(id, entries = self.len, "message released");
            }
            Err(BurnNoteError::MessageDestroyed(_)) => {
                self.len -= 1;
                tracing::warn!(id, entries = self.len, "message self-destructed");
            }
            Err(BurnNoteError::InvalidPassword { remaining }) => {
                tracing::warn!(id, remaining, "wrong password");
            }
            Err(_) => tracing::debug!(id, "retrieval for unknown id"),
        }

        outcome
    }

    /// Remove the entry under `id` without any credential check.
    ///
    /// Returns `false` if no such entry exists.
    pub fn remove(&mut self, id: i64) -> bool {
        let removed = remove_at(&mut self.root, id);
        if removed {
            self.len -= 1;
            tracing::debug!(id, entries = self.len, "entry removed");
        }
        removed
    }

    /// Drop every entry.  Secrets are wiped as their entries are dropped.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Smallest id in the store.
    pub fn find_min(&self) -> Result<i64> {
        let mut node = self.root.as_deref().ok_or(BurnNoteError::Underflow)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(node.id)
    }

    /// Largest id in the store.
    pub fn find_max(&self) -> Result<i64> {
        let mut node = self.root.as_deref().ok_or(BurnNoteError::Underflow)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(node.id)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Height of the tree; -1 when empty.
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// All ids in ascending order.  Exposes keys only.
    pub fn ids(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len);
        collect_ids(&self.root, &mut out);
        out
    }

    /// Check the AVL shape: every stored height is correct and no two
    /// sibling subtrees differ in height by more than one.
    pub fn is_balanced(&self) -> bool {
        checked_height(&self.root).is_some()
    }
}

impl fmt::Debug for SecretStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretStore")
            .field("len", &self.len)
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

// ── Recursive helpers ────────────────────────────────────────────────

fn insert_at(slot: &mut Link, id: i64, password: &str, message: &str, attempts: u32) -> bool {
    let inserted = match slot {
        None => {
            *slot = Some(Box::new(Entry::new(id, password, message, attempts)));
            true
        }
        Some(node) => match id.cmp(&node.id) {
            Ordering::Less => insert_at(&mut node.left, id, password, message, attempts),
            Ordering::Greater => insert_at(&mut node.right, id, password, message, attempts),
            Ordering::Equal => false,
        },
    };

    if inserted {
        balance(slot);
    }
    inserted
}

fn retrieve_at(slot: &mut Link, id: i64, password: &str) -> Result<String> {
    let Some(node) = slot.as_mut() else {
        return Err(BurnNoteError::NotFound(id));
    };

    let outcome = match id.cmp(&node.id) {
        Ordering::Less => retrieve_at(&mut node.left, id, password),
        Ordering::Greater => retrieve_at(&mut node.right, id, password),
        Ordering::Equal => {
            if node.password_matches(password) {
                let message = std::mem::take(&mut node.message);
                remove_root(slot);
                Ok(message)
            } else {
                node.attempts_remaining = node.attempts_remaining.saturating_sub(1);
                if node.attempts_remaining == 0 {
                    remove_root(slot);
                    Err(BurnNoteError::MessageDestroyed(id))
                } else {
                    Err(BurnNoteError::InvalidPassword {
                        remaining: node.attempts_remaining,
                    })
                }
            }
        }
    };

    // Only a release or a self-destruct changes the shape of the tree.
    if matches!(outcome, Ok(_) | Err(BurnNoteError::MessageDestroyed(_))) {
        balance(slot);
    }
    outcome
}

fn remove_at(slot: &mut Link, id: i64) -> bool {
    let Some(node) = slot.as_mut() else {
        return false;
    };

    let removed = match id.cmp(&node.id) {
        Ordering::Less => remove_at(&mut node.left, id),
        Ordering::Greater => remove_at(&mut node.right, id),
        Ordering::Equal => {
            remove_root(slot);
            true
        }
    };

    if removed {
        balance(slot);
    }
    removed
}

/// Remove the entry at the root of `slot`.
///
/// With at most one child the child is spliced into the slot.  With two
/// children the in-order successor is detached from the right subtree and
/// its fields move up into this entry.
fn remove_root(slot: &mut Link) {
    let Some(node) = slot.as_mut() else {
        return;
    };

    if node.left.is_some() && node.right.is_some() {
        if let Some(mut successor) = take_min(&mut node.right) {
            node.adopt(&mut successor);
        }
    } else if let Some(mut old) = slot.take() {
        *slot = old.left.take().or_else(|| old.right.take());
    }
}

/// Detach the leftmost entry of `slot`, rebalancing on the way back up.
fn take_min(slot: &mut Link) -> Option<Box<Entry>> {
    let node = slot.as_mut()?;

    let detached = if node.left.is_some() {
        take_min(&mut node.left)
    } else {
        let mut min = slot.take()?;
        *slot = min.right.take();
        Some(min)
    };

    balance(slot);
    detached
}

fn collect_ids(link: &Link, out: &mut Vec<i64>) {
    if let Some(node) = link {
        collect_ids(&node.left, out);
        out.push(node.id);
        collect_ids(&node.right, out);
    }
}

/// Height of `link` if its subtree satisfies the AVL shape, else `None`.
fn checked_height(link: &Link) -> Option<i32> {
    let Some(node) = link else {
        return Some(-1);
    };
    let left = checked_height(&node.left)?;
    let right = checked_height(&node.right)?;
    let actual = left.max(right) + 1;

    if (left - right).abs() > 1 || node.height != actual {
        return None;
    }
    Some(actual)
}
