//! A Red-Black tree. Every node is colored red or black such that the root is black, no red
//! node has a red child and every path from a node down to an empty child passes through the
//! same number of black nodes. Together these keep the longest path at most twice the shortest.
//!
//! Equal values are stored to the right of each other.
//!
//! # Examples
//!
//! ```
//! use bst_variants::red_black::Tree;
//! use bst_variants::Color;
//!
//! let mut tree = Tree::with_values(1..=5)?;
//!
//! assert_eq!(tree.root().and_then(|root| root.color()), Some(Color::Black));
//! assert!(tree.validate().is_ok());
//!
//! assert_eq!(tree.delete(&2), Some(2));
//! assert!(!tree.find(&2));
//! assert!(tree.validate().is_ok());
//! # Ok::<(), bst_variants::Error>(())
//! ```

use std::fmt;

use tracing::{debug, trace};

use crate::error::{Result, Violation};
use crate::node::{Color, Link, Meta, Node, NodePtr, NodeRef, Side};
use crate::ordered::SearchTree;
use crate::raw::RawTree;
use crate::traversal::{Order, Traversal};

/// A self-balancing Binary Search Tree using red/black coloring.
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

    /// A read-only view of the root, for inspecting the shape and colors of the tree.
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
    pub fn insert(&mut self, value: T) -> Result<()>
    where
        T: PartialOrd,
    {
        let color = if self.raw.is_empty() {
            Color::Black
        } else {
            Color::Red
        };
        let node = self.raw.insert(value, Side::Right, Meta::Color(color))?;
        self.fix_insert(node);

        if cfg!(debug_assertions) {
            assert_eq!(self.root_color(), Some(Color::Black));
        }
        Ok(())
    }

    /// Deletes one node holding `value` and returns the value it held. If no node holds it,
    /// nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_variants::red_black::Tree;
    ///
    /// let mut tree = Tree::with_values([2, 1, 3])?;
    ///
    /// assert_eq!(tree.delete(&1), Some(1));
    /// assert_eq!(tree.delete(&1), None);
    /// assert_eq!(tree.len(), 2);
    /// # Ok::<(), bst_variants::Error>(())
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T>
    where
        T: PartialOrd,
    {
        let target = self.raw.removal_target(value)?;
        let removed_color = self.raw.get(target).color();
        let child = {
            let node = self.raw.get(target);
            node.left.or(node.right)
        };
        let position = self.raw.splice(target);

        if removed_color == Color::Black {
            match (child, position) {
                // A black node with a single child always has a red one. Painting it black puts
                // the missing black back on every path through it.
                (Some(child), _) => self.set_color(child, Color::Black),
                (None, Some((parent, side))) => self.fix_delete(parent, side),
                (None, None) => {}
            }
        }

        if cfg!(debug_assertions) {
            assert_ne!(self.root_color(), Some(Color::Red));
        }
        Some(self.raw.dealloc(target))
    }

    /// Checks BST order, parent links and the red/black rules.
    pub fn validate(&self) -> Result<(), Violation>
    where
        T: PartialOrd,
    {
        self.raw.validate()?;
        let Some(root) = self.raw.root_node() else {
            return Ok(());
        };
        if root.color() == Color::Red {
            return Err(Violation::RedRoot);
        }
        black_height(root).map(|_| ())
    }

    fn color(&self, link: Link<T>) -> Color {
        link.map_or(Color::Black, |ptr| self.raw.get(ptr).color())
    }

    fn set_color(&mut self, ptr: NodePtr<T>, color: Color) {
        trace!(%color, "recolor");
        self.raw.get_mut(ptr).set_color(color);
    }

    fn root_color(&self) -> Option<Color> {
        self.raw.root_node().map(Node::color)
    }

    /// Restores the red/black rules after attaching the red `node`. The only rule that can be
    /// broken is a red node having a red parent.
    fn fix_insert(&mut self, mut node: NodePtr<T>) {
        while let Some(parent) = self.raw.get(node).parent {
            if self.color(Some(parent)) == Color::Black {
                return;
            }
            // The root is black, so a red parent always has a parent of its own.
            let Some(grandparent) = self.raw.get(parent).parent else {
                return;
            };
            let parent_side = self.raw.side_in(grandparent, parent);
            let uncle = self.raw.get(grandparent).child(parent_side.opposite());

            if self.color(uncle) == Color::Red {
                debug!("fix insert: red uncle");
                self.set_color(parent, Color::Black);
                if let Some(uncle) = uncle {
                    self.set_color(uncle, Color::Black);
                }
                if self.raw.get(grandparent).parent.is_some() {
                    self.set_color(grandparent, Color::Red);
                }
                // The grandparent may now be red under a red parent.
                node = grandparent;
                continue;
            }

            let top = if self.raw.side_in(parent, node) == parent_side {
                debug!("fix insert: straight");
                parent
            } else {
                debug!("fix insert: zigzag");
                self.raw.rotate(parent, parent_side);
                node
            };
            self.raw.rotate(grandparent, parent_side.opposite());
            self.set_color(top, Color::Black);
            self.set_color(grandparent, Color::Red);
            return;
        }
    }

    /// Restores the red/black rules after a black leaf was removed from `side` of `parent`.
    /// Every path through that (now empty) position is one black node short. The shortfall is
    /// either fixed locally with rotations or pushed up one level at a time.
    fn fix_delete(&mut self, mut parent: NodePtr<T>, mut side: Side) {
        loop {
            let deficient = self.raw.get(parent).child(side);
            if self.color(deficient) == Color::Red {
                if let Some(deficient) = deficient {
                    self.set_color(deficient, Color::Black);
                }
                return;
            }

            // The short side has a black height of at least one less than the other, so the
            // sibling exists.
            let mut sibling = self
                .raw
                .get(parent)
                .child(side.opposite())
                .expect("Deficient node => sibling");

            if self.color(Some(sibling)) == Color::Red {
                debug!("fix delete: red sibling");
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.raw.rotate(parent, side);
                sibling = self
                    .raw
                    .get(parent)
                    .child(side.opposite())
                    .expect("Red sibling => black nephews");
            }

            let near = self.raw.get(sibling).child(side);
            let far = self.raw.get(sibling).child(side.opposite());

            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                debug!("fix delete: black nephews");
                self.set_color(sibling, Color::Red);
                match self.raw.position(parent) {
                    // A red parent absorbs the shortfall at the top of the next iteration.
                    Some((grandparent, parent_side)) => {
                        side = parent_side;
                        parent = grandparent;
                    }
                    // Removing a black from every path under the root is fine.
                    None => return,
                }
                continue;
            }

            if self.color(far) == Color::Black {
                debug!("fix delete: red near nephew");
                let near = near.expect("Red near nephew => near nephew");
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                sibling = self.raw.rotate(sibling, side.opposite());
            }

            debug!("fix delete: red far nephew");
            let far = self
                .raw
                .get(sibling)
                .child(side.opposite())
                .expect("Red far nephew => far nephew");
            let parent_color = self.raw.get(parent).color();
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            self.set_color(far, Color::Black);
            self.raw.rotate(parent, side);
            return;
        }
    }
}

/// Checks the red/black rules below `node` and returns its black height, counting `node` and
/// treating empty children as black.
fn black_height<T>(node: &Node<T>) -> Result<usize, Violation> {
    let Meta::Color(color) = node.meta else {
        return Err(Violation::ForeignMetadata);
    };

    let mut heights = [0; 2];
    for (height, side) in heights.iter_mut().zip([Side::Left, Side::Right]) {
        *height = match node.child_node(side) {
            Some(child) => {
                if color == Color::Red && child.color() == Color::Red {
                    return Err(Violation::DoubleRed);
                }
                black_height(child)?
            }
            None => 1,
        };
    }

    let [left, right] = heights;
    if left != right {
        return Err(Violation::BlackHeightMismatch { left, right });
    }
    Ok(left + usize::from(color == Color::Black))
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

    fn colors(tree: &Tree<i32>) -> Vec<(i32, Color)> {
        let mut out = Vec::new();
        let mut pending: Vec<NodeRef<'_, i32>> = tree.root().into_iter().collect();
        while let Some(node) = pending.pop() {
            out.push((*node.value(), node.color().unwrap()));
            pending.extend(node.right());
            pending.extend(node.left());
        }
        out
    }

    #[test]
    fn first_insert_is_black_root() {
        let tree = Tree::with_values([1]).unwrap();

        assert_eq!(colors(&tree), [(1, Color::Black)]);
    }

    #[test]
    fn red_uncle_recolors_and_keeps_root_black() {
        let tree = Tree::with_values([2, 1, 3, 4]).unwrap();

        assert_eq!(tree.raw.rotations(), 0);
        assert_eq!(
            colors(&tree),
            [
                (2, Color::Black),
                (1, Color::Black),
                (3, Color::Black),
                (4, Color::Red)
            ]
        );
    }

    #[test]
    fn straight_case_rotates_once() {
        let tree = Tree::with_values([1, 2, 3]).unwrap();

        assert_eq!(tree.raw.rotations(), 1);
        assert_eq!(
            colors(&tree),
            [(2, Color::Black), (1, Color::Red), (3, Color::Red)]
        );
    }

    #[test]
    fn zigzag_case_rotates_twice() {
        let tree = Tree::with_values([3, 1, 2]).unwrap();

        assert_eq!(tree.raw.rotations(), 2);
        assert_eq!(
            colors(&tree),
            [(2, Color::Black), (1, Color::Red), (3, Color::Red)]
        );
    }

    #[test]
    fn one_to_five() {
        let tree = Tree::with_values(1..=5).unwrap();

        assert_eq!(
            colors(&tree),
            [
                (2, Color::Black),
                (1, Color::Black),
                (4, Color::Black),
                (3, Color::Red),
                (5, Color::Red)
            ]
        );
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn duplicates_go_right() {
        let tree = Tree::with_values([5, 5]).unwrap();

        let root = tree.root().unwrap();
        assert!(root.left().is_none());
        assert_eq!(root.right().map(|n| *n.value()), Some(5));
    }

    #[test]
    fn delete_red_leaf() {
        let mut tree = Tree::with_values([2, 1, 3, 4]).unwrap();

        assert_eq!(tree.delete(&4), Some(4));
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn delete_black_node_with_red_child() {
        let mut tree = Tree::with_values([2, 1, 3, 4]).unwrap();

        assert_eq!(tree.delete(&3), Some(3));
        assert_eq!(
            colors(&tree),
            [(2, Color::Black), (1, Color::Black), (4, Color::Black)]
        );
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn delete_black_leaf_with_black_nephews() {
        let mut tree = Tree::with_values([2, 1, 3]).unwrap();
        // Three black nodes after recoloring through a red uncle and deleting the red leaf.
        tree.insert(4).unwrap();
        tree.delete(&4);
        assert_eq!(
            colors(&tree),
            [(2, Color::Black), (1, Color::Black), (3, Color::Black)]
        );

        assert_eq!(tree.delete(&1), Some(1));
        assert_eq!(colors(&tree), [(2, Color::Black), (3, Color::Red)]);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn delete_black_leaf_with_red_far_nephew() {
        let mut tree = Tree::with_values([2, 1, 3, 4]).unwrap();

        assert_eq!(tree.delete(&1), Some(1));
        assert_eq!(
            colors(&tree),
            [(3, Color::Black), (2, Color::Black), (4, Color::Black)]
        );
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn delete_black_leaf_with_red_near_nephew() {
        let mut tree = Tree::with_values([2, 1, 4, 3]).unwrap();

        assert_eq!(tree.delete(&1), Some(1));
        assert_eq!(
            colors(&tree),
            [(3, Color::Black), (2, Color::Black), (4, Color::Black)]
        );
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn delete_black_leaf_with_red_sibling() {
        let mut tree = Tree::with_values(1..=6).unwrap();
        // 2 (black) has a red sibling 4 whose children 3 and 5 are black.
        assert_eq!(
            colors(&tree),
            [
                (2, Color::Black),
                (1, Color::Black),
                (4, Color::Red),
                (3, Color::Black),
                (5, Color::Black),
                (6, Color::Red)
            ]
        );

        assert_eq!(tree.delete(&1), Some(1));
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(
            tree.to_sequence(Order::InOrder).copied().collect::<Vec<_>>(),
            [2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn delete_everything() {
        crate::test::init_tracing();
        let values: Vec<i32> = (0..64).map(|x| (x * 37) % 64).collect();
        let mut tree = Tree::with_values(values.iter().copied()).unwrap();

        for value in &values {
            assert_eq!(tree.delete(value), Some(*value));
            assert_eq!(tree.validate(), Ok(()));
        }
        assert!(tree.is_empty());
    }
}
