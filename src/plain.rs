//! A plain, unbalanced BST. Values are attached wherever the descent ends and nothing is ever
//! rotated, so inserting sorted input builds a list and every operation degrades to `O(N)`.
//! Useful as a baseline for the balanced trees.
//!
//! Equal values are stored to the left of each other.
//!
//! # Examples
//!
//! ```
//! use bst_variants::plain::Tree;
//!
//! let mut tree = Tree::with_values([1, 2, 3])?;
//!
//! // Nothing balances it.
//! assert_eq!(tree.height(), 3);
//!
//! assert_eq!(tree.delete(&2), Some(2));
//! assert_eq!(tree.height(), 2);
//! # Ok::<(), bst_variants::Error>(())
//! ```

use std::fmt;

use crate::error::{Result, Violation};
use crate::node::{Meta, NodeRef, Side};
use crate::ordered::SearchTree;
use crate::raw::RawTree;
use crate::traversal::{Order, Traversal};

/// An unbalanced Binary Search Tree.
pub struct Tree<T> {
    raw: RawTree<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw.fmt(f)
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            raw: RawTree::new(),
        }
    }

    /// Builds a tree by inserting each value in iteration order. Stops at the first value that
    /// can't be inserted.
    pub fn with_values<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: PartialOrd,
    {
        let mut tree = Self::new();
        for value in values {
            tree.insert(value)?;
        }
        Ok(tree)
    }

    /// Number of values stored.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether some node holds a value equal to `value`.
    pub fn find(&self, value: &T) -> bool
    where
        T: PartialOrd,
    {
        self.raw.find(value).is_some()
    }

    /// Number of nodes on the longest root to leaf path, `0` when empty.
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Walks the values in the given order.
    pub fn to_sequence(&self, order: Order) -> Traversal<'_, T> {
        self.raw.traverse(order)
    }

    /// A read-only view of the root, for inspecting the shape of the tree.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.raw.root_ref()
    }

    /// Inserts the value into the tree below the node where the descent ends.
    ///
    /// # Errors
    ///
    /// [`Error::ValueNotComparable`](crate::Error::ValueNotComparable) if the value has no total
    /// order, [`Error::TypeMismatch`](crate::Error::TypeMismatch) if it can't be ordered against
    /// the values already stored. The tree is untouched in both cases.
    pub fn insert(&mut self, value: T) -> Result<()>
    where
        T: PartialOrd,
    {
        self.raw.insert(value, Side::Left, Meta::None)?;
        Ok(())
    }

    /// Deletes one node holding `value` and returns the value it held. A node with two children
    /// takes its in-order predecessor's value and the predecessor's node is removed instead.
    pub fn delete(&mut self, value: &T) -> Option<T>
    where
        T: PartialOrd,
    {
        let target = self.raw.removal_target(value)?;
        self.raw.splice(target);
        Some(self.raw.dealloc(target))
    }

    /// Checks BST order and parent links.
    pub fn validate(&self) -> Result<(), Violation>
    where
        T: PartialOrd,
    {
        self.raw.validate()
    }
}

impl<T> SearchTree<T> for Tree<T>
where
    T: PartialOrd,
{
    fn insert(&mut self, value: T) -> Result<()> {
        Tree::insert(self, value)
    }

    fn delete(&mut self, value: &T) -> Option<T> {
        Tree::delete(self, value)
    }

    fn find(&self, value: &T) -> bool {
        Tree::find(self, value)
    }

    fn height(&self) -> usize {
        Tree::height(self)
    }

    fn len(&self) -> usize {
        Tree::len(self)
    }

    fn to_sequence(&self, order: Order) -> Traversal<'_, T> {
        Tree::to_sequence(self, order)
    }

    fn validate(&self) -> Result<(), Violation> {
        Tree::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::value::Value;

    #[test]
    fn test_insert() {
        let mut tree = Tree::new();
        tree.insert(1).unwrap();

        assert!(tree.find(&1));
        assert!(!tree.find(&2));
    }

    #[test]
    fn shape_follows_insertion_order() {
        let tree = Tree::with_values([10, 4, 15, 7, 12, 20, 6, 8, 18, 30]).unwrap();

        assert_eq!(tree.height(), 4);
        assert_eq!(
            tree.to_sequence(Order::LevelOrder).copied().collect::<Vec<_>>(),
            [10, 4, 15, 7, 12, 20, 6, 8, 18, 30]
        );
        assert!(tree.root().and_then(|root| root.balance()).is_none());
    }

    #[test]
    fn duplicates_go_left() {
        let tree = Tree::with_values([5, 5, 5]).unwrap();

        let root = tree.root().unwrap();
        assert!(root.right().is_none());
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn delete_cases() {
        let mut tree = Tree::with_values([5, 3, 8, 2, 6, 9, 7]).unwrap();

        // Leaf.
        assert_eq!(tree.delete(&2), Some(2));
        // One child.
        assert_eq!(tree.delete(&6), Some(6));
        // Two children: 8 takes 7's value.
        assert_eq!(tree.delete(&8), Some(8));
        assert_eq!(
            tree.to_sequence(Order::PreOrder).copied().collect::<Vec<_>>(),
            [5, 3, 7, 9]
        );
        assert_eq!(tree.delete(&42), None);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn mixed_values_are_rejected() {
        let mut tree = Tree::with_values([Value::Int(3), Value::Int(1)]).unwrap();

        assert_eq!(tree.insert(Value::from("three")), Err(Error::TypeMismatch));
        assert_eq!(tree.insert(Value::from(f64::NAN)), Err(Error::ValueNotComparable));
        assert_eq!(tree.len(), 2);
        assert!(!tree.find(&Value::from("three")));
    }
}
