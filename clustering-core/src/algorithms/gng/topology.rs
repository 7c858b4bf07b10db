#[cfg(test)]
#[path = "../../../tests/unit/algorithms/gng/topology_test.rs"]
mod topology_test;

use crate::models::DissimilarityMetric;
use crate::utils::{ClusteringError, ClusteringResult, Float, compare_floats};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;

/// A stable identifier of the unit in topology.
pub type UnitId = usize;

/// A reference vector with accumulated local error.
#[derive(Clone, Debug)]
pub struct Unit {
    /// Position of the unit in data space.
    pub weights: Vec<Float>,
    /// Accumulated error.
    pub error: Float,
}

/// An undirected graph of units with aged edges. Units are kept in arena, so identifiers of live
/// units never change when other units are removed.
#[derive(Clone, Debug, Default)]
pub struct Topology {
    units: Vec<Option<Unit>>,
    edges: FxHashMap<(UnitId, UnitId), usize>,
    neighbours: Vec<FxHashSet<UnitId>>,
}

impl Topology {
    /// Adds a new unit and returns its id.
    pub fn add_unit(&mut self, weights: Vec<Float>, error: Float) -> UnitId {
        self.units.push(Some(Unit { weights, error }));
        self.neighbours.push(FxHashSet::default());

        self.units.len() - 1
    }

    /// Returns a live unit by its id.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id).and_then(|unit| unit.as_ref())
    }

    /// Returns a mutable live unit by its id.
    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(id).and_then(|unit| unit.as_mut())
    }

    /// Returns ids of live units in ascending order.
    pub fn unit_ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.units.iter().enumerate().filter(|(_, unit)| unit.is_some()).map(|(id, _)| id)
    }

    /// Returns live units with their ids in ascending order.
    pub fn units(&self) -> impl Iterator<Item = (UnitId, &Unit)> + '_ {
        self.units.iter().enumerate().filter_map(|(id, unit)| unit.as_ref().map(|unit| (id, unit)))
    }

    /// Returns amount of live units.
    pub fn size(&self) -> usize {
        self.units.iter().filter(|unit| unit.is_some()).count()
    }

    /// Returns neighbours of the unit in ascending order.
    pub fn neighbours(&self, id: UnitId) -> Vec<UnitId> {
        let mut neighbours =
            self.neighbours.get(id).map(|set| set.iter().cloned().collect::<Vec<_>>()).unwrap_or_default();
        neighbours.sort_unstable();

        neighbours
    }

    /// Returns edge age if units are connected.
    pub fn edge_age(&self, a: UnitId, b: UnitId) -> Option<usize> {
        self.edges.get(&edge_key(a, b)).cloned()
    }

    /// Returns all edges with their ages ordered by unit ids.
    pub fn edges(&self) -> Vec<(UnitId, UnitId, usize)> {
        let mut edges = self.edges.iter().map(|(&(a, b), &age)| (a, b, age)).collect::<Vec<_>>();
        edges.sort_unstable();

        edges
    }

    /// Connects two units with a fresh edge or resets age of the existing one.
    pub fn connect(&mut self, a: UnitId, b: UnitId) {
        debug_assert_ne!(a, b);

        self.edges.insert(edge_key(a, b), 0);
        self.neighbours[a].insert(b);
        self.neighbours[b].insert(a);
    }

    /// Removes edge between two units, if it exists.
    pub fn disconnect(&mut self, a: UnitId, b: UnitId) {
        if self.edges.remove(&edge_key(a, b)).is_some() {
            self.neighbours[a].remove(&b);
            self.neighbours[b].remove(&a);
        }
    }

    /// Increments age of every edge incident to the unit.
    pub fn age_edges(&mut self, id: UnitId) {
        let Some(neighbours) = self.neighbours.get(id) else { return };

        neighbours.iter().for_each(|&other| {
            if let Some(age) = self.edges.get_mut(&edge_key(id, other)) {
                *age += 1;
            }
        });
    }

    /// Removes edges older than `max_age`, then removes units left without edges.
    /// Returns amount of removed units.
    pub fn remove_stale(&mut self, max_age: usize) -> usize {
        let stale_edges =
            self.edges.iter().filter(|&(_, &age)| age > max_age).map(|(&key, _)| key).collect::<Vec<_>>();
        stale_edges.into_iter().for_each(|(a, b)| self.disconnect(a, b));

        let isolated = self.unit_ids().filter(|&id| self.neighbours[id].is_empty()).collect::<Vec<_>>();
        isolated.iter().for_each(|&id| self.units[id] = None);

        isolated.len()
    }

    /// Scales errors of all units by given factor.
    pub fn scale_errors(&mut self, factor: Float) {
        self.units.iter_mut().flatten().for_each(|unit| unit.error *= factor);
    }

    /// Returns the unit with maximal error, the lowest id wins on ties.
    pub fn max_error_unit<I>(&self, ids: I) -> Option<UnitId>
    where
        I: IntoIterator<Item = UnitId>,
    {
        ids.into_iter()
            .filter_map(|id| self.unit(id).map(|unit| (id, unit.error)))
            .fold(None, |best, (id, error)| match best {
                Some((_, best_error)) if compare_floats(error, best_error) != Ordering::Greater => best,
                _ => Some((id, error)),
            })
            .map(|(id, _)| id)
    }

    /// Returns the nearest and the second nearest units to the signal, the lowest id wins on ties.
    pub fn find_nearest_two(
        &self,
        signal: &[Float],
        metric: &(dyn DissimilarityMetric + Send + Sync),
    ) -> (Option<UnitId>, Option<UnitId>) {
        let (first, second) = self.units().map(|(id, unit)| (id, metric.dissimilarity(signal, &unit.weights))).fold(
            (None::<(UnitId, Float)>, None::<(UnitId, Float)>),
            |(first, second), (id, distance)| {
                let is_less = |other: Option<(UnitId, Float)>| {
                    other.is_none_or(|(_, other)| compare_floats(distance, other) == Ordering::Less)
                };

                if is_less(first) {
                    (Some((id, distance)), first)
                } else if is_less(second) {
                    (first, Some((id, distance)))
                } else {
                    (first, second)
                }
            },
        );

        (first.map(|(id, _)| id), second.map(|(id, _)| id))
    }

    /// Returns connected components as unit id lists. Components are ordered by their smallest
    /// unit id, ids inside a component are ascending.
    pub fn components(&self) -> Vec<Vec<UnitId>> {
        let mut visited = vec![false; self.units.len()];

        self.unit_ids().fold(Vec::new(), |mut components, start| {
            if visited[start] {
                return components;
            }

            visited[start] = true;
            let mut stack = vec![start];
            let mut component = Vec::new();

            while let Some(id) = stack.pop() {
                component.push(id);
                self.neighbours[id].iter().filter(|&&other| self.unit(other).is_some()).for_each(|&other| {
                    if !visited[other] {
                        visited[other] = true;
                        stack.push(other);
                    }
                });
            }

            component.sort_unstable();
            components.push(component);

            components
        })
    }

    /// Checks that every edge connects two distinct live units and that neighbour sets agree with
    /// edges.
    pub fn validate(&self) -> ClusteringResult<()> {
        let dangling = self.edges.keys().find(|&&(a, b)| a >= b || self.unit(a).is_none() || self.unit(b).is_none());
        if let Some((a, b)) = dangling {
            return Err(ClusteringError::InvariantViolation(format!("edge ({a}, {b}) references non-live unit")));
        }

        let neighbour_links = self.neighbours.iter().map(|set| set.len()).sum::<usize>();
        let is_consistent = neighbour_links == 2 * self.edges.len()
            && self
                .neighbours
                .iter()
                .enumerate()
                .all(|(id, set)| set.iter().all(|&other| self.edges.contains_key(&edge_key(id, other))));

        if !is_consistent {
            return Err(ClusteringError::InvariantViolation("neighbour sets do not match edges".to_string()));
        }

        Ok(())
    }
}

fn edge_key(a: UnitId, b: UnitId) -> (UnitId, UnitId) {
    if a < b { (a, b) } else { (b, a) }
}
