//! Property tests run against every tree variant through the shared `SearchTree` interface.

use std::collections::{BTreeMap, BTreeSet};

use bst_variants::{avl, plain, red_black, Order, SearchTree};
use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<T> {
    /// Insert the value into the data structure
    Insert(T),
    /// Remove one copy of the value from the data structure
    Remove(T),
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(T::arbitrary(g))
        } else {
            Op::Remove(T::arbitrary(g))
        }
    }
}

/// Applies a set of operations to a tree and to a map counting the copies
/// of each value. Returns whether every delete agreed with the map.
fn do_ops<S>(ops: &[Op<i8>], tree: &mut S, counts: &mut BTreeMap<i8, usize>) -> bool
where
    S: SearchTree<i8>,
{
    for op in ops {
        match op {
            Op::Insert(value) => {
                tree.insert(*value).unwrap();
                *counts.entry(*value).or_default() += 1;
            }
            Op::Remove(value) => {
                let present = counts.get(value).map_or(false, |count| *count > 0);
                if present {
                    *counts.entry(*value).or_default() -= 1;
                }
                if tree.delete(value) != present.then_some(*value) {
                    return false;
                }
            }
        }
    }
    true
}

fn fuzz<S: SearchTree<i8>>(mut tree: S, ops: &[Op<i8>]) -> bool {
    let mut counts = BTreeMap::new();
    if !do_ops(ops, &mut tree, &mut counts) {
        return false;
    }

    let expected = counts
        .iter()
        .flat_map(|(value, count)| std::iter::repeat(*value).take(*count));
    ops_agree(&tree, &counts) && tree.to_sequence(Order::InOrder).copied().eq(expected)
}

fn ops_agree<S: SearchTree<i8>>(tree: &S, counts: &BTreeMap<i8, usize>) -> bool {
    tree.validate().is_ok()
        && tree.len() == counts.values().sum::<usize>()
        && counts
            .iter()
            .all(|(value, count)| tree.find(value) == (*count > 0))
}

fn contains<S: SearchTree<i8>>(mut tree: S, xs: &[i8]) -> bool {
    for x in xs {
        tree.insert(*x).unwrap();
    }

    xs.iter().all(|x| tree.find(x))
}

fn contains_not<S: SearchTree<i8>>(mut tree: S, xs: &[i8], nots: &[i8]) -> bool {
    for x in xs {
        tree.insert(*x).unwrap();
    }
    let added: BTreeSet<_> = xs.iter().collect();

    nots.iter()
        .filter(|x| !added.contains(x))
        .all(|x| !tree.find(x))
}

fn with_deletions<S: SearchTree<i8>>(mut tree: S, xs: &[i8], deletes: &[i8]) -> bool {
    for x in xs {
        tree.insert(*x).unwrap();
    }
    for delete in deletes {
        // We may have inserted the same value multiple times - delete each one.
        while tree.delete(delete).is_some() {}
    }

    let deleted: BTreeSet<_> = deletes.iter().collect();
    let mut still_present: Vec<i8> = xs.iter().copied().filter(|x| !deleted.contains(x)).collect();
    still_present.sort_unstable();

    tree.validate().is_ok()
        && deletes.iter().all(|x| !tree.find(x))
        && tree.to_sequence(Order::InOrder).copied().eq(still_present)
}

fn orders_visit_everything<S: SearchTree<i8>>(mut tree: S, xs: &[i8]) -> bool {
    for x in xs {
        tree.insert(*x).unwrap();
    }
    let mut sorted = xs.to_vec();
    sorted.sort_unstable();

    Order::ALL.into_iter().all(|order| {
        let mut seen: Vec<i8> = tree.to_sequence(order).copied().collect();
        seen.sort_unstable();
        seen == sorted
    })
}

macro_rules! variant_quicktests {
    ($name:ident, $tree:ty) => {
        mod $name {
            use super::*;

            quickcheck::quickcheck! {
                fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
                    fuzz(<$tree>::new(), &ops)
                }
            }

            quickcheck::quickcheck! {
                fn contains_inserted(xs: Vec<i8>) -> bool {
                    contains(<$tree>::new(), &xs)
                }
            }

            quickcheck::quickcheck! {
                fn does_not_contain_others(xs: Vec<i8>, nots: Vec<i8>) -> bool {
                    contains_not(<$tree>::new(), &xs, &nots)
                }
            }

            quickcheck::quickcheck! {
                fn deletes_every_copy(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
                    with_deletions(<$tree>::new(), &xs, &deletes)
                }
            }

            quickcheck::quickcheck! {
                fn every_order_visits_every_value(xs: Vec<i8>) -> bool {
                    orders_visit_everything(<$tree>::new(), &xs)
                }
            }
        }
    };
}

variant_quicktests!(plain_tree, plain::Tree<i8>);
variant_quicktests!(avl_tree, avl::Tree<i8>);
variant_quicktests!(red_black_tree, red_black::Tree<i8>);
