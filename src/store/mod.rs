//! Store module — the in-memory tree of self-destructing messages.
//!
//! This module provides:
//! - The owned `Entry` node type, wiped on drop (`entry`)
//! - AVL rotations and rebalancing (`balance`)
//! - `SecretStore` with the insert / retrieve protocol (`tree`)

mod balance;
mod entry;
pub mod tree;

pub use tree::SecretStore;
