//! Sorted-insertion container for ranked itineraries.

use std::ops::Index;

use crate::domain::{Criterion, Itinerary};

/// A record that can be ranked under a [`Criterion`].
pub trait Ranked {
    fn rank_key(&self, criterion: Criterion) -> f64;
}

impl Ranked for Itinerary {
    fn rank_key(&self, criterion: Criterion) -> f64 {
        Itinerary::rank_key(self, criterion)
    }
}

/// A sequence kept in ascending order of one criterion, fixed at
/// construction.
///
/// Each insert binary-searches its position. Equal keys keep insertion
/// order: a new record goes after every existing record with the same key.
/// There is no removal or re-sorting; build a new set to rank differently.
#[derive(Debug, Clone)]
pub struct RankedResultSet<T = Itinerary> {
    criterion: Criterion,
    entries: Vec<T>,
}

impl<T: Ranked> RankedResultSet<T> {
    /// Create an empty set ordered by `criterion`.
    pub fn new(criterion: Criterion) -> Self {
        Self {
            criterion,
            entries: Vec::new(),
        }
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    /// Insert a record after all records whose key is not greater.
    pub fn insert(&mut self, record: T) {
        let key = record.rank_key(self.criterion);
        let criterion = self.criterion;
        let index = self
            .entries
            .partition_point(|existing| existing.rank_key(criterion) <= key);
        self.entries.insert(index, record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    /// Hand the ordered records to the caller.
    pub fn into_vec(self) -> Vec<T> {
        self.entries
    }
}

impl<T: Ranked> Extend<T> for RankedResultSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl<T> Index<usize> for RankedResultSet<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.entries[index]
    }
}

impl<'a, T> IntoIterator for &'a RankedResultSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
