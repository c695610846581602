//! Join operators
//!
//! All joins are inner joins: a row without a counterpart contributes no
//! output. Output always follows left order, then right order for the
//! matches of a single left row.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use tracing::debug;

use super::sequence::Query;

impl<L> Query<L> {
    /// Equi-join with `right`.
    ///
    /// Emits `combine(l, r)` once for every pair whose keys are equal.
    pub fn inner_join<'r, R, K, U, LK, RK, C>(
        self,
        right: &'r [R],
        left_key: LK,
        right_key: RK,
        combine: C,
    ) -> Query<U>
    where
        K: Eq + Hash,
        LK: Fn(&L) -> K,
        RK: Fn(&R) -> K,
        C: FnMut(&L, &'r R) -> U,
    {
        Query::new(hash_join(
            self.as_slice(),
            right,
            |l| Some(left_key(l)),
            right_key,
            combine,
        ))
    }

    /// Join with `right` on an arbitrary predicate, by nested iteration
    pub fn range_join<'r, R, U, P, C>(self, right: &'r [R], predicate: P, mut combine: C) -> Query<U>
    where
        P: Fn(&L, &R) -> bool,
        C: FnMut(&L, &'r R) -> U,
    {
        let mut rows = Vec::new();
        for l in self.iter() {
            for r in right {
                if predicate(l, r) {
                    rows.push(combine(l, r));
                }
            }
        }

        debug!(
            left = self.len(),
            right = right.len(),
            rows = rows.len(),
            "nested loop join"
        );
        Query::new(rows)
    }

    /// Join the sequence with itself.
    ///
    /// Rows whose left key is `None` take no part in the join.
    pub fn self_join<K, U, LK, RK, C>(self, left_key: LK, right_key: RK, combine: C) -> Query<U>
    where
        K: Eq + Hash,
        LK: Fn(&L) -> Option<K>,
        RK: Fn(&L) -> K,
        C: FnMut(&L, &L) -> U,
    {
        let rows = self.as_slice();
        Query::new(hash_join(rows, rows, left_key, right_key, combine))
    }

    /// Keep the left rows that have at least one match in `right`.
    ///
    /// Unlike `inner_join`, a left row appears at most once however many
    /// right rows share its key.
    pub fn semi_join<R, K, LK, RK>(self, right: &[R], left_key: LK, right_key: RK) -> Self
    where
        K: Eq + Hash,
        LK: Fn(&L) -> K,
        RK: Fn(&R) -> K,
    {
        let keys: HashSet<K> = right.iter().map(right_key).collect();
        let left_rows = self.len();
        let result = self.filter(|l| keys.contains(&left_key(l)));

        debug!(
            left = left_rows,
            keys = keys.len(),
            rows = result.len(),
            "semi join"
        );
        result
    }
}

fn hash_join<'r, L, R, K, U, LK, RK, C>(
    left: &[L],
    right: &'r [R],
    left_key: LK,
    right_key: RK,
    mut combine: C,
) -> Vec<U>
where
    K: Eq + Hash,
    LK: Fn(&L) -> Option<K>,
    RK: Fn(&R) -> K,
    C: FnMut(&L, &'r R) -> U,
{
    // Build on the right side so probing walks the left side in order
    let mut table: HashMap<K, Vec<&'r R>> = HashMap::with_capacity(right.len());
    for r in right {
        table.entry(right_key(r)).or_default().push(r);
    }

    let mut rows = Vec::new();
    for l in left {
        let Some(key) = left_key(l) else {
            continue;
        };
        if let Some(matches) = table.get(&key) {
            for r in matches {
                rows.push(combine(l, *r));
            }
        }
    }

    debug!(
        left = left.len(),
        right = right.len(),
        rows = rows.len(),
        "hash join"
    );
    rows
}
