//! Structural rotations shared by the balancing engines.
//!
//! A rotation only relinks nodes. It preserves BST order but knows nothing about balance
//! factors or colors, so the engine calling it must fix up the metadata of the two nodes that
//! moved.

use tracing::trace;

use crate::node::{NodePtr, Side};
use crate::raw::RawTree;

impl<T> RawTree<T> {
    /// Rotate `node` to the left. The right child moves up to take `node`'s place. Returns the
    /// promoted child.
    ///
    /// # Panics
    ///
    /// When `node` has no right child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///    Option<parent>               Option<parent>
    ///      /                            /
    ///    node                        pivot
    ///    /  \                        /   \
    ///   x   pivot     rotate ->   node    z
    ///       /   \                 /  \
    ///      y     z               x    y
    /// ```
    pub(crate) fn rotate_left(&mut self, node: NodePtr<T>) -> NodePtr<T> {
        self.rotate(node, Side::Left)
    }

    /// Mirror image of [`RawTree::rotate_left`]: the left child moves up.
    ///
    /// # Panics
    ///
    /// When `node` has no left child.
    pub(crate) fn rotate_right(&mut self, node: NodePtr<T>) -> NodePtr<T> {
        self.rotate(node, Side::Right)
    }

    /// Rotates `node` down towards `direction`, promoting its child on the other side.
    pub(crate) fn rotate(&mut self, node: NodePtr<T>, direction: Side) -> NodePtr<T> {
        let up = direction.opposite();
        let pivot = self
            .get(node)
            .child(up)
            .expect("Rotating a node requires a child to promote");

        // The pivot's inner subtree changes hands.
        let inner = self.get(pivot).child(direction);
        self.get_mut(node).set_child(up, inner);
        if let Some(inner) = inner {
            self.get_mut(inner).parent = Some(node);
        }

        // `replace` updates the root when `node` was the root.
        self.replace(node, Some(pivot));
        self.get_mut(pivot).set_child(direction, Some(node));
        self.get_mut(node).parent = Some(pivot);

        self.count_rotation();
        trace!(?direction, rotations = self.rotations(), "rotate");
        pivot
    }
}
