//! Provides implementation of Ward's agglomerative clustering.
//!
//! Starting from singletons, the least dissimilar pair of live clusters is merged repeatedly and
//! dissimilarities of the merged cluster to others are updated with the Lance-Williams recurrence
//! for Ward's method:
//!
//! ```text
//! d(C∪D, E) = [(w_C + w_E)·d(C,E) + (w_D + w_E)·d(D,E) - w_E·d(C,D)] / (w_C + w_D + w_E)
//! ```
//!
//! where weights are cluster sizes. The merge history is kept as a dendrogram.

#[cfg(test)]
#[path = "../../../tests/unit/algorithms/ward/ward_test.rs"]
mod ward_test;

use super::*;
use crate::models::{compute_centroids, create_dissimilarity_matrix};
use crate::utils::{Environment, Telemetry};
use std::sync::Arc;

mod dendrogram;
pub use self::dendrogram::*;

/// Ward's agglomerative clustering algorithm.
pub struct WardAgglomerative {
    depth: usize,
    metric: Arc<dyn DissimilarityMetric + Send + Sync>,
    environment: Arc<Environment>,
    is_verbose: bool,
    result: Option<WardResult>,
}

struct WardResult {
    dendrogram: Dendrogram,
    clusters: Vec<Vec<usize>>,
    prototypes: Matrix,
}

/// A live cluster: its dendrogram node and amount of points.
#[derive(Clone, Copy)]
struct Slot {
    node: NodeId,
    weight: usize,
}

impl WardAgglomerative {
    /// Creates a new instance of `WardAgglomerative` which returns clusters at depth 1 (two
    /// subtrees of the root).
    pub fn new(metric: Arc<dyn DissimilarityMetric + Send + Sync>) -> Self {
        Self { depth: 1, metric, environment: Arc::new(Environment::default()), is_verbose: false, result: None }
    }

    /// Sets depth at which dendrogram is cut by `get_clusters`.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Sets environment used to write log.
    pub fn with_environment(mut self, environment: Arc<Environment>) -> Self {
        self.environment = environment;
        self
    }

    /// Returns dendrogram built by the last run.
    pub fn dendrogram(&self) -> Option<&Dendrogram> {
        self.result.as_ref().map(|result| &result.dendrogram)
    }

    /// Returns clusters at given depth.
    pub fn clusters_at_depth(&self, depth: usize) -> Vec<Vec<usize>> {
        self.dendrogram().map(|dendrogram| dendrogram.clusters_at_depth(depth)).unwrap_or_default()
    }

    /// Returns exactly `count` clusters (or all singletons) by undoing the latest merges.
    pub fn clusters_for_count(&self, count: usize) -> Vec<Vec<usize>> {
        self.dendrogram().map(|dendrogram| dendrogram.clusters_for_count(count)).unwrap_or_default()
    }

    /// Returns merge distances in merge order.
    pub fn merge_distances(&self) -> Vec<Float> {
        self.dendrogram().map(|dendrogram| dendrogram.merge_distances()).unwrap_or_default()
    }

    fn build_dendrogram(&self, data: &Matrix, telemetry: &Telemetry) -> ClusteringResult<Dendrogram> {
        let size = data.rows();
        let mut distances = create_dissimilarity_matrix(data, self.metric.as_ref());
        let mut slots = (0..size).map(|node| Some(Slot { node, weight: 1 })).collect::<Vec<_>>();
        let mut row_minima = (0..size).map(|row| find_row_minimum(&distances, &slots, row)).collect::<Vec<_>>();
        let mut dendrogram = Dendrogram::new(size);

        for merge in 1..size {
            let (i, j, distance) = find_closest_pair(&row_minima).ok_or_else(|| {
                ClusteringError::InvariantViolation(format!("cannot find a pair to merge at step {merge}"))
            })?;

            let (Some(left), Some(right)) = (slots[i], slots[j]) else {
                return Err(ClusteringError::InvariantViolation(format!("pair ({i}, {j}) refers to a dead cluster")));
            };

            // NOTE capture pre-merge rows as the merged row overwrites row i
            let row_i = distances.row(i).to_vec();
            let row_j = distances.row(j).to_vec();

            let node = dendrogram.join(left.node, right.node, distance);
            slots[j] = None;
            slots[i] = Some(Slot { node, weight: left.weight + right.weight });

            (0..size).filter(|&k| k != i).for_each(|k| {
                if let Some(other) = slots[k] {
                    let (w_i, w_j, w_k) = (left.weight as Float, right.weight as Float, other.weight as Float);
                    let value = ((w_i + w_k) * row_i[k] + (w_j + w_k) * row_j[k] - w_k * distance) / (w_i + w_j + w_k);

                    distances.set(i, k, value);
                    distances.set(k, i, value);
                }
            });

            update_row_minima(&distances, &slots, &mut row_minima, i, j);

            if merge % 1000 == 0 || merge + 1 == size {
                telemetry.log(format!("ward: merge {merge}/{} at distance {distance}", size - 1).as_str());
            }
        }

        Ok(dendrogram)
    }
}

impl ClusteringAlgorithm for WardAgglomerative {
    fn cluster(&mut self, data: &Matrix) -> ClusteringResult<()> {
        validate_data(data, 1)?;

        let telemetry = Telemetry::new(self.environment.logger.clone(), self.is_verbose);
        let dendrogram = self.build_dendrogram(data, &telemetry)?;
        let clusters = dendrogram.clusters_at_depth(self.depth);
        let prototypes = compute_centroids(data, clusters.as_slice());

        self.result = Some(WardResult { dendrogram, clusters, prototypes });

        Ok(())
    }

    fn get_clusters(&self) -> Vec<Vec<usize>> {
        self.result.as_ref().map(|result| result.clusters.clone()).unwrap_or_default()
    }

    fn get_prototypes(&self) -> ClusteringResult<Option<Matrix>> {
        Ok(self.result.as_ref().map(|result| result.prototypes.clone()))
    }

    fn set_verbose(&mut self, verbose: bool) {
        self.is_verbose = verbose;
    }
}

/// Finds the smallest distance from live `row` to live rows after it, the first column wins on ties.
fn find_row_minimum(distances: &Matrix, slots: &[Option<Slot>], row: usize) -> Option<(usize, Float)> {
    slots[row]?;

    ((row + 1)..slots.len()).filter(|&col| slots[col].is_some()).fold(None, |best, col| {
        let value = distances.get(row, col);
        match best {
            Some((_, best_value)) if compare_floats(value, best_value) != Ordering::Less => best,
            _ => Some((col, value)),
        }
    })
}

/// Finds the closest pair as the first one met in row-major scan order.
fn find_closest_pair(row_minima: &[Option<(usize, Float)>]) -> Option<(usize, usize, Float)> {
    row_minima.iter().enumerate().fold(None, |best, (row, minimum)| match (best, minimum) {
        (Some((_, _, best_value)), Some((_, value))) if compare_floats(*value, best_value) != Ordering::Less => best,
        (_, Some((col, value))) => Some((row, *col, *value)),
        (best, None) => best,
    })
}

/// Updates cached row minima after merging row `j` into row `i` (`i < j`).
fn update_row_minima(
    distances: &Matrix,
    slots: &[Option<Slot>],
    row_minima: &mut [Option<(usize, Float)>],
    i: usize,
    j: usize,
) {
    row_minima[i] = find_row_minimum(distances, slots, i);
    row_minima[j] = None;

    for row in (0..slots.len()).filter(|&row| row != i && row != j && slots[row].is_some()) {
        let cached = row_minima[row];
        let refers_to_merged = cached.is_some_and(|(col, _)| col == j || (row < i && col == i));

        if refers_to_merged {
            row_minima[row] = find_row_minimum(distances, slots, row);
        } else if row < i {
            let value = distances.get(row, i);
            let is_better = cached.is_none_or(|(col, best_value)| match compare_floats(value, best_value) {
                Ordering::Less => true,
                Ordering::Equal => i < col,
                Ordering::Greater => false,
            });

            if is_better {
                row_minima[row] = Some((i, value));
            }
        }
    }
}
