//! Coalescing overlapping sets into disjoint components
//!
//! Any collection of sets that share elements, directly or through a
//! chain of other sets, is merged into one. The result is the partition of
//! all elements into connected components, computed by direct set union
//! rather than an index-based union-find.

use std::collections::VecDeque;
use std::hash::Hash;

use hashbrown::HashSet;

/// Lazily merge `sets` into pairwise-disjoint components.
///
/// Every element of every input set appears in exactly one output set.
/// Empty input sets contribute no elements and are dropped. Output order is
/// not part of the contract.
///
/// ```
/// use rw_core::coalesce;
///
/// let parts: Vec<_> = coalesce(vec![vec![1, 2], vec![2, 3], vec![7]]).collect();
/// assert_eq!(parts.len(), 2);
/// ```
pub fn coalesce<I, S, T>(sets: I) -> Coalesce<T>
where
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = T>,
    T: Eq + Hash,
{
    let pending = sets
        .into_iter()
        .map(|s| s.into_iter().collect::<HashSet<T>>())
        .filter(|s| !s.is_empty())
        .collect();
    Coalesce { pending }
}

/// Iterator returned by [`coalesce`]
///
/// Each step pops the front set. If no other pending set intersects it,
/// it is final and yielded; otherwise every intersecting set is folded
/// into it and the merged set goes to the back of the queue. Every step
/// either finalizes a set or shrinks the queue by at least one.
#[derive(Debug, Clone)]
pub struct Coalesce<T> {
    pending: VecDeque<HashSet<T>>,
}

impl<T: Eq + Hash> Iterator for Coalesce<T> {
    type Item = HashSet<T>;

    fn next(&mut self) -> Option<HashSet<T>> {
        loop {
            let mut current = self.pending.pop_front()?;
            let (matches, rest): (VecDeque<_>, VecDeque<_>) = self
                .pending
                .drain(..)
                .partition(|other| !current.is_disjoint(other));
            self.pending = rest;

            if matches.is_empty() {
                return Some(current);
            }
            for other in matches {
                current.extend(other);
            }
            self.pending.push_back(current);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.pending.len();
        (usize::from(n > 0), Some(n))
    }
}
