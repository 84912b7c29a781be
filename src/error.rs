//! Errors returned by tree operations and by invariant validation.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced by tree operations. Every one of these is detected before the tree is
/// modified, so a failed call leaves the tree exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value does not compare equal to itself (e.g. `f64::NAN`) so it has no place in a
    /// totally ordered container.
    #[error("value has no total order")]
    ValueNotComparable,
    /// A Red-Black color was described with something other than `RED` or `BLACK`.
    #[error("invalid color `{0}`, expected RED or BLACK")]
    ColorInvalid(String),
    /// The value can't be ordered against the values already stored in the tree.
    #[error("value cannot be ordered against the existing contents of the tree")]
    TypeMismatch,
    /// A traversal order key that isn't one of `pre_order`, `in_order`, `post_order` or
    /// `level_order`.
    #[error("unsupported traversal order `{0}`")]
    UnsupportedOrder(String),
}

/// An invariant found broken by `validate`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A value sits on the wrong side of one of its ancestors.
    #[error("binary search tree order is broken")]
    Unordered,
    /// A child does not point back at the node that owns it (or the root has a parent).
    #[error("stale parent link")]
    StaleParent,
    /// The cached number of values disagrees with the number of reachable nodes.
    #[error("tree holds {actual} nodes but reports {reported}")]
    LenMismatch {
        /// What `len()` says.
        reported: usize,
        /// What was counted.
        actual: usize,
    },
    /// A node carries metadata belonging to another tree variant.
    #[error("node metadata does not belong to this tree variant")]
    ForeignMetadata,
    /// A stored balance factor disagrees with the real subtree heights.
    #[error("stored balance {stored} but subtree heights give {actual}")]
    BalanceMismatch {
        /// The balance factor kept in the node.
        stored: i8,
        /// `height(left) - height(right)`.
        actual: isize,
    },
    /// A balance factor outside `-1..=1`.
    #[error("node is out of balance ({0})")]
    Unbalanced(i8),
    /// The root of a Red-Black tree is RED.
    #[error("root is red")]
    RedRoot,
    /// A RED node has a RED child.
    #[error("red node has a red child")]
    DoubleRed,
    /// Two paths from the same node reach a leaf through a different number of BLACK nodes.
    #[error("black heights differ: {left} on the left, {right} on the right")]
    BlackHeightMismatch {
        /// Black height through the left child.
        left: usize,
        /// Black height through the right child.
        right: usize,
    },
}
