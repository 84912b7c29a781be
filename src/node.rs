//! The node shared by every tree variant along with the metadata it carries.

use std::fmt;
use std::ptr::NonNull;
use std::str::FromStr;

use crate::error::Error;

/// Pointer to a node owned by some `RawTree`. Only ever dereferenced through the tree that owns
/// it (see `RawTree::get`).
pub(crate) type NodePtr<T> = NonNull<Node<T>>;

/// A possibly absent child or parent. Child links own the node they point to, parent links
/// don't.
pub(crate) type Link<T> = Option<NodePtr<T>>;

/// Which child of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The color of a node in a Red-Black tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// A red node. Red nodes never have red children.
    Red,
    /// A black node. Absent children are treated as black.
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("RED"),
            Color::Black => f.write_str("BLACK"),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parses `RED` or `BLACK`, ignoring ASCII case.
    ///
    /// ```
    /// use bst_variants::{Color, Error};
    ///
    /// assert_eq!("red".parse::<Color>(), Ok(Color::Red));
    /// assert_eq!(
    ///     "GREEN".parse::<Color>(),
    ///     Err(Error::ColorInvalid("GREEN".to_string()))
    /// );
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("red") {
            Ok(Color::Red)
        } else if s.eq_ignore_ascii_case("black") {
            Ok(Color::Black)
        } else {
            Err(Error::ColorInvalid(s.to_string()))
        }
    }
}

/// Variant specific bookkeeping stored in each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meta {
    /// Plain BST nodes carry nothing.
    None,
    /// AVL nodes carry `height(left) - height(right)`.
    Balance(i8),
    /// Red-Black nodes carry their color.
    Color(Color),
}

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) parent: Link<T>,
    pub(crate) meta: Meta,
}

impl<T> Node<T> {
    pub(crate) fn new_boxed(value: T, meta: Meta, parent: Link<T>) -> Box<Self> {
        Box::new(Node {
            value,
            left: None,
            right: None,
            parent,
            meta,
        })
    }

    pub(crate) fn child(&self, side: Side) -> Link<T> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Link<T>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Borrows a child for as long as `self` is borrowed.
    pub(crate) fn child_node(&self, side: Side) -> Option<&Self> {
        // SAFETY: Child links always point at live nodes owned by the same tree as `self`. The
        // tree can't be mutated while `self` is borrowed so the child outlives the returned
        // reference.
        self.child(side).map(|ptr| unsafe { ptr.as_ref() })
    }

    fn parent_node(&self) -> Option<&Self> {
        // SAFETY: See `child_node`. The parent owns `self` so it lives at least as long.
        self.parent.map(|ptr| unsafe { ptr.as_ref() })
    }

    /// The AVL balance factor. Nodes of other variants read as balanced.
    pub(crate) fn balance(&self) -> i8 {
        match self.meta {
            Meta::Balance(balance) => balance,
            _ => 0,
        }
    }

    pub(crate) fn set_balance(&mut self, balance: i8) {
        self.meta = Meta::Balance(balance);
    }

    /// The Red-Black color. Nodes of other variants read as black, like absent children.
    pub(crate) fn color(&self) -> Color {
        match self.meta {
            Meta::Color(color) => color,
            _ => Color::Black,
        }
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.meta = Meta::Color(color);
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("meta", &self.meta)
            .field("left", &self.child_node(Side::Left))
            .field("right", &self.child_node(Side::Right))
            .finish()
    }
}

/// A read-only view of a node, borrowed from its tree. Meant for callers that want to inspect
/// the shape of a tree (e.g. to print it) without being able to break its invariants.
pub struct NodeRef<'a, T> {
    node: &'a Node<T>,
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> fmt::Debug for NodeRef<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.fmt(f)
    }
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(node: &'a Node<T>) -> Self {
        Self { node }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.node.child_node(Side::Left).map(NodeRef::new)
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.node.child_node(Side::Right).map(NodeRef::new)
    }

    /// The node owning this one. `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.node.parent_node().map(NodeRef::new)
    }

    /// Everything the tree variant keeps about this node.
    pub fn meta(&self) -> Meta {
        self.node.meta
    }

    /// The balance factor if this is an AVL node.
    pub fn balance(&self) -> Option<i8> {
        match self.node.meta {
            Meta::Balance(balance) => Some(balance),
            _ => None,
        }
    }

    /// The color if this is a Red-Black node.
    pub fn color(&self) -> Option<Color> {
        match self.node.meta {
            Meta::Color(color) => Some(color),
            _ => None,
        }
    }
}
