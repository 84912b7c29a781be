//! Walking a tree's values in one of the four classic orders.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::node::{Node, Side};

/// The order in which [`Traversal`] yields values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then its left subtree, then its right subtree.
    PreOrder,
    /// Left subtree, node, right subtree. Yields values sorted.
    InOrder,
    /// Left subtree, right subtree, then the node.
    PostOrder,
    /// Breadth first: the root, then every node one level down from left to right, and so on.
    LevelOrder,
}

impl Order {
    /// Every order, in the order they're listed above.
    pub const ALL: [Order; 4] = [
        Order::PreOrder,
        Order::InOrder,
        Order::PostOrder,
        Order::LevelOrder,
    ];

    /// The key this order is parsed from.
    pub fn key(self) -> &'static str {
        match self {
            Order::PreOrder => "pre_order",
            Order::InOrder => "in_order",
            Order::PostOrder => "post_order",
            Order::LevelOrder => "level_order",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Order {
    type Err = Error;

    /// ```
    /// use bst_variants::{Error, Order};
    ///
    /// assert_eq!("level_order".parse::<Order>(), Ok(Order::LevelOrder));
    /// assert_eq!(
    ///     "zigzag".parse::<Order>(),
    ///     Err(Error::UnsupportedOrder("zigzag".to_string()))
    /// );
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Order::ALL
            .into_iter()
            .find(|order| order.key() == s)
            .ok_or_else(|| Error::UnsupportedOrder(s.to_string()))
    }
}

/// A one-shot walk over the values of a tree, created by `to_sequence`. It borrows the tree, so
/// the tree can't change underneath it, and uses an explicit stack (or queue) rather than
/// recursion.
pub struct Traversal<'a, T> {
    pending: Pending<'a, T>,
}

enum Pending<'a, T> {
    PreOrder(Vec<&'a Node<T>>),
    InOrder {
        stack: Vec<&'a Node<T>>,
        next: Option<&'a Node<T>>,
    },
    /// The flag records whether the node's children have already been queued.
    PostOrder(Vec<(&'a Node<T>, bool)>),
    LevelOrder(VecDeque<&'a Node<T>>),
}

impl<'a, T> Traversal<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, order: Order) -> Self {
        let pending = match order {
            Order::PreOrder => Pending::PreOrder(root.into_iter().collect()),
            Order::InOrder => Pending::InOrder {
                stack: Vec::new(),
                next: root,
            },
            Order::PostOrder => Pending::PostOrder(root.map(|n| (n, false)).into_iter().collect()),
            Order::LevelOrder => Pending::LevelOrder(root.into_iter().collect()),
        };
        Self { pending }
    }
}

impl<'a, T> Iterator for Traversal<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.pending {
            Pending::PreOrder(stack) => {
                let node = stack.pop()?;
                stack.extend(node.child_node(Side::Right));
                stack.extend(node.child_node(Side::Left));
                Some(&node.value)
            }
            Pending::InOrder { stack, next } => {
                while let Some(node) = *next {
                    stack.push(node);
                    *next = node.child_node(Side::Left);
                }
                let node = stack.pop()?;
                *next = node.child_node(Side::Right);
                Some(&node.value)
            }
            Pending::PostOrder(stack) => loop {
                let (node, expanded) = stack.pop()?;
                if expanded {
                    return Some(&node.value);
                }
                stack.push((node, true));
                stack.extend(node.child_node(Side::Right).map(|n| (n, false)));
                stack.extend(node.child_node(Side::Left).map(|n| (n, false)));
            },
            Pending::LevelOrder(queue) => {
                let node = queue.pop_front()?;
                queue.extend(node.child_node(Side::Left));
                queue.extend(node.child_node(Side::Right));
                Some(&node.value)
            }
        }
    }
}
