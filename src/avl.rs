//! An AVL tree: a BST that keeps, for every node, the heights of its two subtrees within one of
//! each other. Each node stores its balance factor (`height(left) - height(right)`) and the
//! factors are updated incrementally on the way back up from an insert or delete, so no
//! operation ever rescans subtree heights.
//!
//! Equal values are stored to the right of each other.
//!
//! # Examples
//!
//! ```
//! use bst_variants::avl::Tree;
//! use bst_variants::Order;
//!
//! let mut tree = Tree::with_values([10, 20, 30])?;
//!
//! // Inserting in sorted order would make a list out of a plain BST.
//! assert_eq!(tree.height(), 2);
//! assert!(tree.find(&20));
//!
//! assert_eq!(tree.delete(&20), Some(20));
//! assert!(!tree.find(&20));
//! assert_eq!(tree.to_sequence(Order::InOrder).collect::<Vec<_>>(), [&10, &30]);
//! # Ok::<(), bst_variants::Error>(())
//! ```

use std::fmt;

use tracing::debug;

use crate::error::{Result, Violation};
use crate::node::{Meta, Node, NodePtr, NodeRef, Side};
use crate::ordered::SearchTree;
use crate::raw::RawTree;
use crate::traversal::{Order, Traversal};

/// A self-balancing Binary Search Tree using AVL height balancing.
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
    ///
    /// The balance factors say which child is taller, so this only follows a single path and
    /// runs in `O(lg N)`.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut link = self.raw.root();
        while let Some(ptr) = link {
            height += 1;
            let node = self.raw.get(ptr);
            link = if node.balance() < 0 {
                node.right
            } else {
                node.left
            };
        }
        height
    }

    /// Walks the values in the given order.
    pub fn to_sequence(&self, order: Order) -> Traversal<'_, T> {
        self.raw.traverse(order)
    }

    /// A read-only view of the root, for inspecting the shape of the tree.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.raw.root_ref()
    }

    /// Inserts the value into the tree. Equal values are kept side by side.
    ///
    /// # Errors
    ///
    /// [`Error::ValueNotComparable`](crate::Error::ValueNotComparable) if the value has no total
    /// order, [`Error::TypeMismatch`](crate::Error::TypeMismatch) if it can't be ordered against
    /// the values already stored. The tree is untouched in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_variants::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1)?;
    /// tree.insert(1)?;
    ///
    /// assert_eq!(tree.len(), 2);
    /// # Ok::<(), bst_variants::Error>(())
    /// ```
    pub fn insert(&mut self, value: T) -> Result<()>
    where
        T: PartialOrd,
    {
        let leaf = self.raw.insert(value, Side::Right, Meta::Balance(0))?;
        self.retrace_insert(leaf);
        Ok(())
    }

    /// Deletes one node holding `value` and returns the value it held. If no node holds it,
    /// nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_variants::avl::Tree;
    ///
    /// let mut tree = Tree::with_values([2, 1, 3])?;
    ///
    /// assert_eq!(tree.delete(&2), Some(2));
    /// assert_eq!(tree.delete(&2), None);
    /// assert_eq!(tree.len(), 2);
    /// # Ok::<(), bst_variants::Error>(())
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T>
    where
        T: PartialOrd,
    {
        let target = self.raw.removal_target(value)?;
        if let Some((parent, side)) = self.raw.splice(target) {
            self.retrace_delete(parent, side);
        }
        Some(self.raw.dealloc(target))
    }

    /// Checks BST order, parent links and that every stored balance factor is exact and within
    /// `-1..=1`.
    pub fn validate(&self) -> Result<(), Violation>
    where
        T: PartialOrd,
    {
        self.raw.validate()?;
        self.raw.root_node().map_or(Ok(0), checked_height).map(|_| ())
    }

    /// Walks up from a freshly attached leaf. Each parent's subtree grew on the side we came
    /// from. Once a subtree's height stops changing, nothing above it changes either; once a
    /// node is out of balance, one rebalance restores the height the subtree had before the
    /// insert.
    fn retrace_insert(&mut self, mut child: NodePtr<T>) {
        while let Some((parent, side)) = self.raw.position(child) {
            let balance = self.raw.get(parent).balance()
                + match side {
                    Side::Left => 1,
                    Side::Right => -1,
                };
            self.raw.get_mut(parent).set_balance(balance);

            match balance {
                0 => return,
                -1 | 1 => child = parent,
                _ => {
                    self.rebalance(parent);
                    return;
                }
            }
        }
    }

    /// Walks up from a splice. `side` of `parent` just got one shorter. Unlike inserting, a
    /// rebalance here can leave the subtree shorter than before so the walk may rebalance many
    /// ancestors on its way to the root. It stops early once a subtree keeps its height.
    fn retrace_delete(&mut self, mut parent: NodePtr<T>, mut side: Side) {
        loop {
            let balance = self.raw.get(parent).balance()
                + match side {
                    Side::Left => -1,
                    Side::Right => 1,
                };
            self.raw.get_mut(parent).set_balance(balance);

            let shrunk = match balance {
                // The other side is still as tall as before.
                -1 | 1 => return,
                0 => parent,
                _ => {
                    let top = self.rebalance(parent);
                    if self.raw.get(top).balance() != 0 {
                        return;
                    }
                    top
                }
            };

            match self.raw.position(shrunk) {
                Some((grandparent, shrunk_side)) => {
                    parent = grandparent;
                    side = shrunk_side;
                }
                None => return,
            }
        }
    }

    /// Restores the balance of a node whose balance factor is `2` or `-2` and returns the new
    /// root of its subtree.
    ///
    /// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
    fn rebalance(&mut self, node: NodePtr<T>) -> NodePtr<T> {
        let balance = self.raw.get(node).balance();
        let top = if balance < -1 {
            let right = self
                .raw
                .get(node)
                .right
                .expect("Right heavy node => right child");
            if self.raw.get(right).balance() > 0 {
                debug!(balance, "rebalance right-left");
                self.rotate_right(right);
            } else {
                debug!(balance, "rebalance left");
            }
            self.rotate_left(node)
        } else if balance > 1 {
            let left = self
                .raw
                .get(node)
                .left
                .expect("Left heavy node => left child");
            if self.raw.get(left).balance() < 0 {
                debug!(balance, "rebalance left-right");
                self.rotate_left(left);
            } else {
                debug!(balance, "rebalance right");
            }
            self.rotate_right(node)
        } else {
            node
        };

        if cfg!(debug_assertions) {
            let top = self.raw.get(top);
            assert!(top.balance().abs() <= 1);
            for child in [top.left, top.right].into_iter().flatten() {
                assert!(self.raw.get(child).balance().abs() <= 1);
            }
        }
        top
    }

    /// Rotates left and derives both moved nodes' balance factors from their old ones.
    ///
    /// With `x` the node going down and `y` its right child coming up, the subtree heights
    /// give `x' = x + 1 - min(y, 0)` and then `y' = y + 1 + max(x', 0)`.
    fn rotate_left(&mut self, node: NodePtr<T>) -> NodePtr<T> {
        let x = self.raw.get(node).balance();
        let pivot = self.raw.rotate_left(node);
        let y = self.raw.get(pivot).balance();

        let new_x = x + 1 - y.min(0);
        let new_y = y + 1 + new_x.max(0);
        self.raw.get_mut(node).set_balance(new_x);
        self.raw.get_mut(pivot).set_balance(new_y);
        pivot
    }

    /// Mirror image of [`Tree::rotate_left`]: `x' = x - 1 - max(y, 0)` and
    /// `y' = y - 1 + min(x', 0)`.
    fn rotate_right(&mut self, node: NodePtr<T>) -> NodePtr<T> {
        let x = self.raw.get(node).balance();
        let pivot = self.raw.rotate_right(node);
        let y = self.raw.get(pivot).balance();

        let new_x = x - 1 - y.max(0);
        let new_y = y - 1 + new_x.min(0);
        self.raw.get_mut(node).set_balance(new_x);
        self.raw.get_mut(pivot).set_balance(new_y);
        pivot
    }
}

/// Recomputes the height of a subtree from scratch, checking every balance factor on the way.
fn checked_height<T>(node: &Node<T>) -> Result<usize, Violation> {
    let Meta::Balance(stored) = node.meta else {
        return Err(Violation::ForeignMetadata);
    };
    let left = node.child_node(Side::Left).map_or(Ok(0), checked_height)?;
    let right = node.child_node(Side::Right).map_or(Ok(0), checked_height)?;

    let actual = left as isize - right as isize;
    if actual != stored as isize {
        return Err(Violation::BalanceMismatch { stored, actual });
    }
    if stored.abs() > 1 {
        return Err(Violation::Unbalanced(stored));
    }
    Ok(left.max(right) + 1)
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
