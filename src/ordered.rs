//! The ordered-container contract shared by every tree in this crate.

use crate::error::{Result, Violation};
use crate::traversal::{Order, Traversal};

/// Operations every tree variant supports. Handy for code (tests, benchmarks) that wants to run
/// the same operations against several variants.
///
/// ```
/// use bst_variants::{avl, plain, red_black, Order, SearchTree};
///
/// fn sorted<S: SearchTree<i32>>(mut tree: S) -> Vec<i32> {
///     for value in [3, 1, 2] {
///         tree.insert(value).unwrap();
///     }
///     tree.to_sequence(Order::InOrder).copied().collect()
/// }
///
/// assert_eq!(sorted(plain::Tree::new()), [1, 2, 3]);
/// assert_eq!(sorted(avl::Tree::new()), [1, 2, 3]);
/// assert_eq!(sorted(red_black::Tree::new()), [1, 2, 3]);
/// ```
pub trait SearchTree<T> {
    /// Inserts a value, keeping any equal values already present.
    fn insert(&mut self, value: T) -> Result<()>;

    /// Removes one value equal to `value` and returns it.
    fn delete(&mut self, value: &T) -> Option<T>;

    /// Whether a value equal to `value` is stored.
    fn find(&self, value: &T) -> bool;

    /// Number of nodes on the longest root to leaf path.
    fn height(&self) -> usize;

    /// Number of values stored.
    fn len(&self) -> usize;

    /// Whether no values are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walks the stored values in the given order.
    fn to_sequence(&self, order: Order) -> Traversal<'_, T>;

    /// Checks the tree's invariants.
    fn validate(&self) -> Result<(), Violation>;
}
