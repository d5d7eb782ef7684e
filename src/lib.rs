//! # Ternary Search Tree
//!
//! A ternary search tree (TST) is a string-keyed associative container built
//! from nodes that each hold one character and three children, `low`, `eq`,
//! and `high`, arranged so that a path down the `eq` children spells a
//! stored key. Each node's `low`/`high` children form a binary search tree
//! keyed on the character the node splits on, which is what gives the
//! structure its name: a binary search tree of binary search trees, one per
//! trie level.
//!
//! This crate implements the core data structure (`tst::node::TstNode`) and
//! its public façade (`tst::tree::TstTree`), including the four algorithms
//! that make a TST worth reaching for over a `HashMap` or a plain trie:
//! character-by-character insertion, a median-first balanced rebuild,
//! Hamming-style near-neighbor search, and `.`/`*` wildcard pattern
//! matching.

pub mod tst;

pub use tst::error::InsertError;
pub use tst::key::Key;
pub use tst::node::TstNode;
pub use tst::tree::TstTree;
