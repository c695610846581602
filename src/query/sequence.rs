//! Ordered sequences and their unary operators
//!
//! A [`Query`] holds rows in insertion order until a sort is applied. Every
//! operator takes the query by value (or by reference for scalar results)
//! and returns a new sequence; source collections are never touched.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::hash::Hash;

use bigdecimal::{BigDecimal, Zero};
use serde::Serialize;

use crate::error::{Error, Result};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// An ordered, immutable sequence of rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query<T> {
    rows: Vec<T>,
}

impl<'a, T> Query<&'a T> {
    /// Create a query borrowing every record of a collection
    pub fn from_slice(rows: &'a [T]) -> Self {
        Self {
            rows: rows.iter().collect(),
        }
    }

    /// Clone the borrowed records into an owned query
    pub fn cloned(self) -> Query<T>
    where
        T: Clone,
    {
        Query {
            rows: self.rows.into_iter().cloned().collect(),
        }
    }
}

impl<T> Query<T> {
    /// Create a query over owned rows
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    /// Keep the rows for which `predicate` holds
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        Self {
            rows: self.rows.into_iter().filter(|row| predicate(row)).collect(),
        }
    }

    /// Map every row to a new shape, one output per input
    pub fn project<U, F>(self, map: F) -> Query<U>
    where
        F: FnMut(T) -> U,
    {
        Query {
            rows: self.rows.into_iter().map(map).collect(),
        }
    }

    /// Filter and project in one pass, keeping the `Some` results
    pub fn filter_map<U, F>(self, map: F) -> Query<U>
    where
        F: FnMut(T) -> Option<U>,
    {
        Query {
            rows: self.rows.into_iter().filter_map(map).collect(),
        }
    }

    /// Stable sort by `key`.
    ///
    /// Rows with equal keys keep their relative order in both directions.
    pub fn sort_by_key<K, F>(mut self, key: F, order: SortOrder) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        match order {
            SortOrder::Ascending => self.rows.sort_by_cached_key(|row| key(row)),
            SortOrder::Descending => self.rows.sort_by_cached_key(|row| Reverse(key(row))),
        }
        self
    }

    /// Keep the first `n` rows of the current order
    pub fn limit(mut self, n: usize) -> Self {
        self.rows.truncate(n);
        self
    }

    /// Keep the first row for every distinct key
    pub fn distinct_by<K, F>(self, key: F) -> Self
    where
        K: Eq + Hash,
        F: Fn(&T) -> K,
    {
        let mut seen = HashSet::new();
        Self {
            rows: self
                .rows
                .into_iter()
                .filter(|row| seen.insert(key(row)))
                .collect(),
        }
    }

    /// Check if at least one row satisfies `predicate` (false when empty)
    pub fn any_match<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.rows.iter().any(predicate)
    }

    /// Check if every row satisfies `predicate` (true when empty)
    pub fn all_match<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.rows.iter().all(predicate)
    }

    /// Smallest key, or `EmptyAggregate` on an empty sequence
    pub fn min_by<K, F>(&self, key: F) -> Result<K>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        self.rows
            .iter()
            .map(key)
            .min()
            .ok_or(Error::EmptyAggregate("min"))
    }

    /// Largest key, or `EmptyAggregate` on an empty sequence
    pub fn max_by<K, F>(&self, key: F) -> Result<K>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        self.rows
            .iter()
            .map(key)
            .max()
            .ok_or(Error::EmptyAggregate("max"))
    }

    /// Exact decimal sum; zero for an empty sequence
    pub fn sum_by<F>(&self, value: F) -> BigDecimal
    where
        F: Fn(&T) -> BigDecimal,
    {
        sum(self.rows.iter().map(value))
    }

    /// Exact decimal mean, or `EmptyAggregate` on an empty sequence
    pub fn average_by<F>(&self, value: F) -> Result<BigDecimal>
    where
        F: Fn(&T) -> BigDecimal,
    {
        average(self.rows.iter().map(value))
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the sequence has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the row at `index`
    pub fn get(&self, index: usize) -> Option<&T> {
        self.rows.get(index)
    }

    /// Get the first row
    pub fn first(&self) -> Option<&T> {
        self.rows.first()
    }

    /// Check if some row equals `row`
    pub fn contains(&self, row: &T) -> bool
    where
        T: PartialEq,
    {
        self.rows.contains(row)
    }

    /// Iterate over the rows in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    /// View the rows as a slice
    pub fn as_slice(&self) -> &[T] {
        &self.rows
    }

    /// Take the rows out of the query
    pub fn into_vec(self) -> Vec<T> {
        self.rows
    }
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Query<T> {
    fn from(rows: Vec<T>) -> Self {
        Self { rows }
    }
}

impl<T> FromIterator<T> for Query<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Query<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'q, T> IntoIterator for &'q Query<T> {
    type Item = &'q T;
    type IntoIter = std::slice::Iter<'q, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

pub(crate) fn sum<I>(values: I) -> BigDecimal
where
    I: IntoIterator<Item = BigDecimal>,
{
    values
        .into_iter()
        .fold(BigDecimal::zero(), |acc, value| acc + value)
}

pub(crate) fn average<I>(values: I) -> Result<BigDecimal>
where
    I: IntoIterator<Item = BigDecimal>,
{
    let mut count: u64 = 0;
    let mut total = BigDecimal::zero();
    for value in values {
        total += value;
        count += 1;
    }

    if count == 0 {
        return Err(Error::EmptyAggregate("average"));
    }
    Ok(total / BigDecimal::from(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        team: &'static str,
        score: i64,
    }

    fn row(id: u32, team: &'static str, score: i64) -> Row {
        Row { id, team, score }
    }

    fn rows() -> Vec<Row> {
        vec![
            row(1, "red", 30),
            row(2, "blue", 10),
            row(3, "red", 20),
            row(4, "green", 10),
            row(5, "blue", 30),
        ]
    }

    fn ids<T: std::borrow::Borrow<Row>>(query: &Query<T>) -> Vec<u32> {
        query
            .iter()
            .map(|r| <T as std::borrow::Borrow<Row>>::borrow(r).id)
            .collect()
    }

    #[test]
    fn test_filter_preserves_order() {
        let data = rows();
        let result = Query::from_slice(&data).filter(|r| r.team != "red");
        assert_eq!(ids(&result), vec![2, 4, 5]);
        // Source is untouched
        assert_eq!(data.len(), 5);
    }

    #[test]
    fn test_project() {
        let names = Query::new(rows()).project(|r| r.team);
        assert_eq!(names.into_vec(), vec!["red", "blue", "red", "green", "blue"]);
    }

    #[test]
    fn test_filter_map() {
        let high: Query<u32> =
            Query::new(rows()).filter_map(|r| if r.score >= 30 { Some(r.id) } else { None });
        assert_eq!(high.into_vec(), vec![1, 5]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let asc = Query::new(rows()).sort_by_key(|r| r.score, SortOrder::Ascending);
        assert_eq!(ids(&asc), vec![2, 4, 3, 1, 5]);

        let desc = Query::new(rows()).sort_by_key(|r| r.score, SortOrder::Descending);
        assert_eq!(ids(&desc), vec![1, 5, 3, 2, 4]);
    }

    #[test]
    fn test_sort_by_string_key() {
        let sorted = Query::new(rows()).sort_by_key(|r| r.team, SortOrder::Ascending);
        assert_eq!(ids(&sorted), vec![2, 5, 4, 1, 3]);
    }

    #[test]
    fn test_limit() {
        let first_two = Query::new(rows()).limit(2);
        assert_eq!(ids(&first_two), vec![1, 2]);

        let all = Query::new(rows()).limit(100);
        assert_eq!(all.len(), 5);

        let none = Query::new(rows()).limit(0);
        assert!(none.is_empty());
    }

    #[test]
    fn test_distinct_by_first_wins() {
        let teams = Query::new(rows()).distinct_by(|r| r.team);
        assert_eq!(ids(&teams), vec![1, 2, 4]);
    }

    #[test]
    fn test_any_all() {
        let query = Query::new(rows());
        assert!(query.any_match(|r| r.team == "green"));
        assert!(!query.any_match(|r| r.score > 100));
        assert!(query.all_match(|r| r.score >= 10));
        assert!(!query.all_match(|r| r.team == "red"));

        let empty: Query<Row> = Query::default();
        assert!(empty.all_match(|_| false));
        assert!(!empty.any_match(|_| true));
    }

    #[test]
    fn test_min_max() {
        let query = Query::new(rows());
        assert_eq!(query.min_by(|r| r.score).unwrap(), 10);
        assert_eq!(query.max_by(|r| r.score).unwrap(), 30);
        assert_eq!(query.max_by(|r| r.team).unwrap(), "red");
    }

    #[test]
    fn test_empty_aggregates_fail() {
        let empty: Query<Row> = Query::default();
        assert!(matches!(
            empty.min_by(|r| r.score),
            Err(Error::EmptyAggregate("min"))
        ));
        assert!(matches!(
            empty.max_by(|r| r.score),
            Err(Error::EmptyAggregate("max"))
        ));
        assert!(matches!(
            empty.average_by(|r| BigDecimal::from(r.score)),
            Err(Error::EmptyAggregate("average"))
        ));
        assert_eq!(empty.sum_by(|r| BigDecimal::from(r.score)), BigDecimal::zero());
    }

    #[test]
    fn test_average_is_exact() {
        let query = Query::new(vec![row(1, "a", 1), row(2, "a", 2)]);
        let avg = query.average_by(|r| BigDecimal::from(r.score)).unwrap();
        assert_eq!(avg, "1.5".parse::<BigDecimal>().unwrap());

        let tenths: Query<BigDecimal> = ["0.1", "0.2"]
            .iter()
            .map(|s| s.parse::<BigDecimal>().unwrap())
            .collect();
        assert_eq!(
            tenths.sum_by(|v| v.clone()),
            "0.3".parse::<BigDecimal>().unwrap()
        );
    }

    #[test]
    fn test_cloned_and_accessors() {
        let data = rows();
        let owned = Query::from_slice(&data).limit(1).cloned();
        assert_eq!(owned.first(), Some(&row(1, "red", 30)));
        assert!(owned.contains(&row(1, "red", 30)));
        assert_eq!(owned.get(1), None);
        assert_eq!(owned.as_slice().len(), 1);
    }
}
