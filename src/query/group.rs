//! Grouping and per-group aggregation
//!
//! Groups are kept in the order their key was first seen.

use std::fmt::Debug;
use std::hash::Hash;

use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use super::sequence::{self, Query};
use crate::error::{Error, Result};

impl<T> Query<T> {
    /// Partition the rows by exact equality of `key`
    pub fn group_by<K, F>(self, key: F) -> Grouped<K, T>
    where
        K: Eq + Hash,
        F: Fn(&T) -> K,
    {
        let input_rows = self.len();
        let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
        for row in self {
            groups.entry(key(&row)).or_default().push(row);
        }

        debug!(rows = input_rows, groups = groups.len(), "group by");
        Grouped { groups }
    }
}

/// Rows partitioned by a grouping key. No group is ever empty.
#[derive(Debug, Clone)]
pub struct Grouped<K, T> {
    groups: IndexMap<K, Vec<T>>,
}

impl<K, T> Grouped<K, T>
where
    K: Eq + Hash + Clone,
{
    /// Number of rows per group
    pub fn count(&self) -> GroupMap<K, usize> {
        self.groups
            .iter()
            .map(|(key, rows)| (key.clone(), rows.len()))
            .collect()
    }

    /// Exact decimal sum per group
    pub fn sum_by<F>(&self, value: F) -> GroupMap<K, BigDecimal>
    where
        F: Fn(&T) -> BigDecimal,
    {
        self.groups
            .iter()
            .map(|(key, rows)| (key.clone(), sequence::sum(rows.iter().map(&value))))
            .collect()
    }

    /// Exact decimal mean per group
    pub fn average_by<F>(&self, value: F) -> Result<GroupMap<K, BigDecimal>>
    where
        F: Fn(&T) -> BigDecimal,
    {
        self.groups
            .iter()
            .map(|(key, rows)| Ok((key.clone(), sequence::average(rows.iter().map(&value))?)))
            .collect()
    }

    /// Smallest key per group
    pub fn min_by<V, F>(&self, value: F) -> GroupMap<K, V>
    where
        V: Ord,
        F: Fn(&T) -> V,
    {
        self.fold_groups(|rows| rows.iter().map(&value).min())
    }

    /// Largest key per group
    pub fn max_by<V, F>(&self, value: F) -> GroupMap<K, V>
    where
        V: Ord,
        F: Fn(&T) -> V,
    {
        self.fold_groups(|rows| rows.iter().map(&value).max())
    }

    // `reduce` returns None only for an empty group, which group_by never builds
    fn fold_groups<V, F>(&self, reduce: F) -> GroupMap<K, V>
    where
        F: Fn(&[T]) -> Option<V>,
    {
        self.groups
            .iter()
            .filter_map(|(key, rows)| reduce(rows.as_slice()).map(|v| (key.clone(), v)))
            .collect()
    }
}

impl<K, T> Grouped<K, T> {
    /// Reduce every group to one output row
    pub fn aggregate<U, F>(&self, mut reduce: F) -> Query<U>
    where
        F: FnMut(&K, Query<&T>) -> U,
    {
        self.groups
            .iter()
            .map(|(key, rows)| reduce(key, Query::from_slice(rows)))
            .collect()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over the group keys in first-occurrence order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.keys()
    }

    /// Iterate over `(key, rows)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[T])> {
        self.groups.iter().map(|(key, rows)| (key, rows.as_slice()))
    }
}

impl<K, T> IntoIterator for Grouped<K, T> {
    type Item = (K, Query<T>);
    type IntoIter = std::vec::IntoIter<(K, Query<T>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups
            .into_iter()
            .map(|(key, rows)| (key, Query::new(rows)))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

/// A precomputed aggregate per key, in first-occurrence order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupMap<K: Hash + Eq, V> {
    entries: IndexMap<K, V>,
}

impl<K, V> GroupMap<K, V>
where
    K: Eq + Hash,
{
    /// Look up the aggregate for `key`.
    ///
    /// An absent key is an error rather than a default value.
    pub fn get(&self, key: &K) -> Result<&V>
    where
        K: Debug,
    {
        self.entries
            .get(key)
            .ok_or_else(|| Error::KeyNotFound(format!("{:?}", key)))
    }

    /// Check if an aggregate exists for `key`
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over keys in first-occurrence order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Iterate over aggregates in first-occurrence order
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    /// Iterate over `(key, aggregate)` pairs
    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.entries.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for GroupMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K, V> IntoIterator for GroupMap<K, V>
where
    K: Eq + Hash,
{
    type Item = (K, V);
    type IntoIter = indexmap::map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
