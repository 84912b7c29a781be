//! This crate exposes three flavours of Binary Search Tree (BST) behind one
//! interface, mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! has up to two child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value no greater than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value no less than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a value takes `O(height)` (where `height` is the number of
//! `Node`s on the longest path from the root `Node` to a leaf `Node`).
//! BSTs also naturally support sorted iteration by visiting the left subtree,
//! then the subtree root, then the right subtree.
//!
//! ## Variants
//!
//! - [`plain::Tree`] never rebalances. Its height depends entirely on the
//!   order values arrive in.
//! - [`avl::Tree`] keeps the heights of every node's subtrees within one of
//!   each other, bounding its height by about `1.44 lg N`.
//! - [`red_black::Tree`] colors its nodes and keeps the number of black nodes
//!   on every root to leaf path equal, bounding its height by `2 lg N`.
//!
//! All three implement [`SearchTree`] and keep parent links, so they share the
//! same descent, traversal and rotation machinery. Equal values are allowed.
//!
//! ## Logging
//!
//! Rotations, recolorings and the rebalancing cases taken are reported through
//! [`tracing`] at `trace` and `debug` level. Nothing is emitted unless a
//! subscriber is installed.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod plain;
pub mod red_black;

mod error;
mod node;
mod ordered;
mod raw;
mod rotation;
mod traversal;
mod value;

#[cfg(test)]
mod test;

pub use error::{Error, Result, Violation};
pub use node::{Color, Meta, NodeRef};
pub use ordered::SearchTree;
pub use traversal::{Order, Traversal};
pub use value::Value;
