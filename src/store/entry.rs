//! The `Entry` node type held by the secret store.
//!
//! Each entry owns its two child subtrees outright, so there are no back
//! references and no shared ownership anywhere in the tree.  The password
//! and message are wiped from memory when the entry is dropped.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// An owned link to a child subtree (`None` = empty subtree).
pub(crate) type Link = Option<Box<Entry>>;

/// A single node of the store.
pub(crate) struct Entry {
    /// Unique key; never changes while this logical entry lives.
    pub(crate) id: i64,

    /// Credential required to release the message.
    pub(crate) password: String,

    /// The secret payload.  Released at most once.
    pub(crate) message: String,

    /// Wrong-password attempts left before the entry self-destructs.
    pub(crate) attempts_remaining: u32,

    /// Height of the subtree rooted here (a leaf has height 0).
    pub(crate) height: i32,

    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl Entry {
    /// Create a fresh leaf entry.
    pub(crate) fn new(id: i64, password: &str, message: &str, attempts: u32) -> Self {
        Self {
            id,
            password: password.to_string(),
            message: message.to_string(),
            attempts_remaining: attempts,
            height: 0,
            left: None,
            right: None,
        }
    }

    /// Exact, constant-time comparison against the stored password.
    ///
    /// Inputs of different lengths never match.
    pub(crate) fn password_matches(&self, candidate: &str) -> bool {
        self.password
            .as_bytes()
            .ct_eq(candidate.as_bytes())
            .into()
    }

    /// Recompute this entry's height from its children.
    pub(crate) fn update_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    /// Take over the key and secret fields of `successor`.
    ///
    /// Used when a two-child entry is removed: the in-order successor's
    /// fields move up into this slot.  The fields are swapped, not cloned,
    /// so the outgoing password and message are wiped when `successor`
    /// is dropped.
    pub(crate) fn adopt(&mut self, successor: &mut Entry) {
        self.id = successor.id;
        self.attempts_remaining = successor.attempts_remaining;
        std::mem::swap(&mut self.password, &mut successor.password);
        std::mem::swap(&mut self.message, &mut successor.message);
    }
}

impl Drop for Entry {
    fn drop(&mut self) {
        self.password.zeroize();
        self.message.zeroize();
    }
}

// Never print credentials or payloads, even in debug output.
impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("attempts_remaining", &self.attempts_remaining)
            .field("height", &self.height)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish_non_exhaustive()
    }
}

/// Height of a subtree, or -1 for an empty one.
pub(crate) fn height(link: &Link) -> i32 {
    link.as_ref().map_or(-1, |entry| entry.height)
}
