//! The unbalanced core every tree variant is built on. `RawTree` owns the nodes and knows how
//! to descend, attach, splice and walk them; the variants decide where ties go and how to
//! restore their own invariants afterwards.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ptr;

use tracing::debug;

use crate::error::{Error, Result, Violation};
use crate::node::{Link, Meta, Node, NodePtr, NodeRef, Side};
use crate::traversal::{Order, Traversal};

pub(crate) struct RawTree<T> {
    root: Link<T>,
    len: usize,
    rotations: usize,
    // Tells dropck that we own `Node<T>`s even though we only hold pointers to them.
    _owns: PhantomData<Box<Node<T>>>,
}

// SAFETY: A `RawTree` exclusively owns all of its nodes. No node is reachable from outside the
// tree, so sending the tree sends every `T` with it and sharing it only hands out `&T`.
unsafe impl<T: Send> Send for RawTree<T> {}
unsafe impl<T: Sync> Sync for RawTree<T> {}

impl<T> Default for RawTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawTree<T> {
    fn drop(&mut self) {
        // Walk the child links with an explicit stack so a degenerate (list shaped) tree can't
        // overflow the call stack.
        let mut pending: Vec<NodePtr<T>> = self.root.take().into_iter().collect();
        while let Some(ptr) = pending.pop() {
            // SAFETY: Every node was allocated with `Box::new` in `Node::new_boxed` and is owned
            // by exactly one child link (or the root). Each link is visited once.
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            pending.extend(node.left);
            pending.extend(node.right);
        }
    }
}

impl<T> Clone for RawTree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        copy.len = self.len;

        let Some(root) = self.root_node() else {
            return copy;
        };
        let new_root = Self::alloc(root.value.clone(), root.meta, None);
        copy.root = Some(new_root);

        let mut pending = vec![(root, new_root)];
        while let Some((original, duplicate)) = pending.pop() {
            for side in [Side::Left, Side::Right] {
                if let Some(child) = original.child_node(side) {
                    let new_child = Self::alloc(child.value.clone(), child.meta, Some(duplicate));
                    copy.get_mut(duplicate).set_child(side, Some(new_child));
                    pending.push((child, new_child));
                }
            }
        }

        copy
    }
}

impl<T> fmt::Debug for RawTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root_node())
            .finish()
    }
}

impl<T> RawTree<T> {
    pub(crate) fn new() -> Self {
        Self {
            root: None,
            len: 0,
            rotations: 0,
            _owns: PhantomData,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn root(&self) -> Link<T> {
        self.root
    }

    pub(crate) fn root_node(&self) -> Option<&Node<T>> {
        self.root.map(|ptr| self.get(ptr))
    }

    pub(crate) fn root_ref(&self) -> Option<NodeRef<'_, T>> {
        self.root_node().map(NodeRef::new)
    }

    /// Number of rotations performed over the lifetime of this tree.
    pub(crate) fn rotations(&self) -> usize {
        self.rotations
    }

    pub(crate) fn count_rotation(&mut self) {
        self.rotations += 1;
    }

    /// Borrows a node of this tree.
    ///
    /// `ptr` must belong to this tree. Every `NodePtr` handed around inside the crate comes from
    /// the links of the tree it is used with, so this holds by construction.
    pub(crate) fn get(&self, ptr: NodePtr<T>) -> &Node<T> {
        // SAFETY: `ptr` points at a live node owned by `self` (see above). The returned borrow is
        // tied to `&self` so no `&mut` to the same node can exist while it lives.
        unsafe { ptr.as_ref() }
    }

    /// Mutably borrows a node of this tree. Same requirements as [`RawTree::get`].
    pub(crate) fn get_mut(&mut self, mut ptr: NodePtr<T>) -> &mut Node<T> {
        // SAFETY: As in `get`. Taking `&mut self` means no other borrow of any node is alive.
        unsafe { ptr.as_mut() }
    }

    fn alloc(value: T, meta: Meta, parent: Link<T>) -> NodePtr<T> {
        NodePtr::from(Box::leak(Node::new_boxed(value, meta, parent)))
    }

    /// Frees a node that has already been unlinked with [`RawTree::splice`] and hands back its
    /// value.
    pub(crate) fn dealloc(&mut self, ptr: NodePtr<T>) -> T {
        debug_assert!(self.get(ptr).left.is_none() && self.get(ptr).right.is_none());
        // SAFETY: `splice` removed the only link to this node and it has no children, so this
        // is the last use of the pointer. It was allocated with `Box::new`.
        let node = unsafe { Box::from_raw(ptr.as_ptr()) };
        node.value
    }

    /// Which side of `parent` `child` hangs off.
    pub(crate) fn side_in(&self, parent: NodePtr<T>, child: NodePtr<T>) -> Side {
        if self.get(parent).left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// The parent of `node` and the side `node` hangs off. `None` for the root.
    pub(crate) fn position(&self, node: NodePtr<T>) -> Option<(NodePtr<T>, Side)> {
        let parent = self.get(node).parent?;
        Some((parent, self.side_in(parent, node)))
    }

    /// Puts `new` where `old` is, pointing `old`'s parent (or the root) at it. `old` keeps its
    /// own links.
    pub(crate) fn replace(&mut self, old: NodePtr<T>, new: Link<T>) {
        let parent = self.get(old).parent;
        match self.position(old) {
            Some((parent, side)) => self.get_mut(parent).set_child(side, new),
            None => self.root = new,
        }
        if let Some(new) = new {
            self.get_mut(new).parent = parent;
        }
    }

    /// Finds where `value` would be attached: the parent and the empty side, or `None` if the
    /// tree is empty. Equal values go to `tie`. Nothing is modified.
    fn locate(&self, value: &T, tie: Side) -> Result<Option<(NodePtr<T>, Side)>>
    where
        T: PartialOrd,
    {
        if value.partial_cmp(value) != Some(Ordering::Equal) {
            return Err(Error::ValueNotComparable);
        }

        let mut slot = None;
        let mut link = self.root;
        while let Some(ptr) = link {
            let node = self.get(ptr);
            let side = match value.partial_cmp(&node.value).ok_or(Error::TypeMismatch)? {
                Ordering::Less => Side::Left,
                Ordering::Equal => tie,
                Ordering::Greater => Side::Right,
            };
            slot = Some((ptr, side));
            link = node.child(side);
        }

        Ok(slot)
    }

    /// Attaches a new leaf holding `value` without rebalancing and returns it.
    pub(crate) fn insert(&mut self, value: T, tie: Side, meta: Meta) -> Result<NodePtr<T>>
    where
        T: PartialOrd,
    {
        let slot = match self.locate(&value, tie) {
            Ok(slot) => slot,
            Err(err) => {
                debug!(%err, "rejected insert");
                return Err(err);
            }
        };

        let leaf = Self::alloc(value, meta, slot.map(|(parent, _)| parent));
        match slot {
            Some((parent, side)) => self.get_mut(parent).set_child(side, Some(leaf)),
            None => self.root = Some(leaf),
        }
        self.len += 1;

        Ok(leaf)
    }

    pub(crate) fn find(&self, value: &T) -> Link<T>
    where
        T: PartialOrd,
    {
        let mut link = self.root;
        while let Some(ptr) = link {
            let node = self.get(ptr);
            link = match value.partial_cmp(&node.value)? {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(ptr),
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// The rightmost node of the subtree rooted at `node`.
    pub(crate) fn max_of(&self, mut node: NodePtr<T>) -> NodePtr<T> {
        while let Some(right) = self.get(node).right {
            node = right;
        }
        node
    }

    /// Finds the node holding `value` and, if it has two children, swaps its value with its
    /// in-order predecessor. Either way the returned node holds `value` and has at most one
    /// child, so it can be spliced out.
    pub(crate) fn removal_target(&mut self, value: &T) -> Link<T>
    where
        T: PartialOrd,
    {
        let target = self.find(value)?;
        let node = self.get(target);
        match (node.left, node.right) {
            (Some(left), Some(_)) => {
                let predecessor = self.max_of(left);
                // SAFETY: `predecessor` lives in `target`'s left subtree so the two are distinct
                // live nodes and the two places don't overlap. No references to either node are
                // held across this call.
                unsafe {
                    ptr::swap(
                        ptr::addr_of_mut!((*target.as_ptr()).value),
                        ptr::addr_of_mut!((*predecessor.as_ptr()).value),
                    );
                }
                Some(predecessor)
            }
            _ => Some(target),
        }
    }

    /// Unlinks a node with at most one child, moving that child up into its place. Returns the
    /// parent it was removed from and the side it hung off (whose subtree just got shorter).
    /// The node must be passed to [`RawTree::dealloc`] afterwards.
    pub(crate) fn splice(&mut self, node: NodePtr<T>) -> Option<(NodePtr<T>, Side)> {
        let (left, right) = (self.get(node).left, self.get(node).right);
        debug_assert!(left.is_none() || right.is_none(), "splicing a node with two children");

        let position = self.position(node);
        self.replace(node, left.or(right));

        let unlinked = self.get_mut(node);
        unlinked.parent = None;
        unlinked.left = None;
        unlinked.right = None;
        self.len -= 1;

        position
    }

    /// Number of nodes on the longest root to leaf path. Computed level by level so it doesn't
    /// recurse.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut level: Vec<&Node<T>> = self.root_node().into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .into_iter()
                .flat_map(|node| {
                    node.child_node(Side::Left)
                        .into_iter()
                        .chain(node.child_node(Side::Right))
                })
                .collect();
        }
        height
    }

    pub(crate) fn traverse(&self, order: Order) -> Traversal<'_, T> {
        Traversal::new(self.root_node(), order)
    }

    /// Checks the invariants every variant shares: BST order, parent links and `len`.
    pub(crate) fn validate(&self) -> Result<(), Violation>
    where
        T: PartialOrd,
    {
        let Some(root) = self.root else {
            return if self.len == 0 {
                Ok(())
            } else {
                Err(Violation::LenMismatch {
                    reported: self.len,
                    actual: 0,
                })
            };
        };
        if self.get(root).parent.is_some() {
            return Err(Violation::StaleParent);
        }

        // Each entry carries the bounds inherited from its ancestors.
        let mut count = 0;
        let mut pending: Vec<(NodePtr<T>, Option<&T>, Option<&T>)> = vec![(root, None, None)];
        while let Some((ptr, low, high)) = pending.pop() {
            count += 1;
            let node = self.get(ptr);
            if low.map_or(false, |low| node.value < *low)
                || high.map_or(false, |high| node.value > *high)
            {
                return Err(Violation::Unordered);
            }
            for side in [Side::Left, Side::Right] {
                let Some(child) = node.child(side) else {
                    continue;
                };
                if self.get(child).parent != Some(ptr) {
                    return Err(Violation::StaleParent);
                }
                match side {
                    Side::Left => pending.push((child, low, Some(&node.value))),
                    Side::Right => pending.push((child, Some(&node.value), high)),
                }
            }
        }

        if count == self.len {
            Ok(())
        } else {
            Err(Violation::LenMismatch {
                reported: self.len,
                actual: count,
            })
        }
    }
}
