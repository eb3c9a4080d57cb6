//! # Scenario Enumeration
//!
//! The scenario space is the Cartesian product of the per-hypothesis option
//! lists. It is walked lazily, in odometer order with the first list varying
//! slowest and each list's options in their given order, so callers that stop
//! at the first feasible scenario never build the rest.
//!
//! Scenarios holding a statically false constraint are skipped, and a
//! constraint set already produced by an earlier tuple is not produced again.

use crate::constraint::{Constraint, Scenario};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// A scenario together with its position in the product order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedScenario {
    /// Zero-based ordinal of the product tuple that produced it
    pub index: usize,
    /// The constraint set
    pub scenario: Scenario,
}

/// Counters describing a (partial) enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumerationStats {
    /// Product tuples visited
    pub visited: usize,
    /// Tuples skipped for containing a statically false constraint
    pub discarded: usize,
    /// Tuples skipped because the same set was already produced
    pub duplicates: usize,
}

/// Lazy iterator over the scenario space
pub struct ScenarioEnumerator {
    lists: Vec<Vec<Constraint>>,
    cursor: Option<Vec<usize>>,
    next_index: usize,
    seen: BTreeSet<Scenario>,
    stats: EnumerationStats,
}

impl ScenarioEnumerator {
    /// Enumerate the product of `lists`
    ///
    /// An empty collection of lists has exactly one (empty) scenario; any
    /// empty list makes the product empty.
    pub fn new(lists: Vec<Vec<Constraint>>) -> Self {
        let cursor = if lists.iter().any(Vec::is_empty) {
            None
        } else {
            Some(vec![0; lists.len()])
        };
        ScenarioEnumerator {
            lists,
            cursor,
            next_index: 0,
            seen: BTreeSet::new(),
            stats: EnumerationStats::default(),
        }
    }

    /// Number of product tuples, saturating at `usize::MAX`
    pub fn space_size(&self) -> usize {
        self.lists
            .iter()
            .fold(1usize, |acc, list| acc.saturating_mul(list.len()))
    }

    /// Counters so far
    pub fn stats(&self) -> EnumerationStats {
        self.stats
    }

    fn advance(&mut self) {
        let Some(cursor) = self.cursor.as_mut() else {
            return;
        };
        for pos in (0..cursor.len()).rev() {
            cursor[pos] += 1;
            if cursor[pos] < self.lists[pos].len() {
                return;
            }
            cursor[pos] = 0;
        }
        // Wrapped around every position
        self.cursor = None;
    }
}

impl Iterator for ScenarioEnumerator {
    type Item = IndexedScenario;

    fn next(&mut self) -> Option<IndexedScenario> {
        loop {
            let cursor = self.cursor.as_ref()?;
            let scenario: Scenario = cursor
                .iter()
                .zip(&self.lists)
                .map(|(&choice, options)| options[choice].clone())
                .collect();
            let index = self.next_index;
            self.next_index += 1;
            self.stats.visited += 1;
            self.advance();

            if scenario.has_static_falsehood() {
                debug!(index, %scenario, "discarding scenario with a statically false constraint");
                self.stats.discarded += 1;
                continue;
            }
            if !self.seen.insert(scenario.clone()) {
                trace!(index, "skipping repeated scenario");
                self.stats.duplicates += 1;
                continue;
            }
            return Some(IndexedScenario { index, scenario });
        }
    }
}

/// Collect the whole scenario space
pub fn enumerate(lists: Vec<Vec<Constraint>>) -> Vec<Scenario> {
    ScenarioEnumerator::new(lists)
        .map(|indexed| indexed.scenario)
        .collect()
}
