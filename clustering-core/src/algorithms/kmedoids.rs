//! Provides implementation of K-Medoids: a batch relocation clustering where each cluster is
//! represented by one of its members (medoid) instead of a computed mean.

#[cfg(test)]
#[path = "../../tests/unit/algorithms/kmedoids_test.rs"]
mod kmedoids_test;

use super::*;
use crate::models::assignments_to_clusters;
use crate::utils::{Environment, Telemetry, sample_distinct};
use std::sync::Arc;

/// A K-Medoids clustering algorithm.
pub struct KMedoids {
    num_centers: usize,
    max_iterations: Option<usize>,
    metric: Arc<dyn DissimilarityMetric + Send + Sync>,
    environment: Arc<Environment>,
    is_verbose: bool,
    result: Option<KMedoidsResult>,
}

struct KMedoidsResult {
    medoids: Vec<usize>,
    assignment: Vec<usize>,
    prototypes: Matrix,
    errors: Vec<Float>,
    error_history: Vec<Float>,
    convergence: Convergence,
}

impl KMedoids {
    /// Creates a new instance of `KMedoids` which looks for `num_centers` clusters. By default,
    /// amount of iterations is unbounded.
    pub fn new(num_centers: usize, metric: Arc<dyn DissimilarityMetric + Send + Sync>) -> Self {
        Self {
            num_centers,
            max_iterations: None,
            metric,
            environment: Arc::new(Environment::default()),
            is_verbose: false,
            result: None,
        }
    }

    /// Sets maximum amount of relocation iterations, `None` means unbounded.
    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets environment used to draw initial medoids and write log.
    pub fn with_environment(mut self, environment: Arc<Environment>) -> Self {
        self.environment = environment;
        self
    }

    /// Returns row indices of medoids, position `k` corresponds to cluster `k`.
    pub fn medoids(&self) -> Vec<usize> {
        self.result.as_ref().map(|result| result.medoids.clone()).unwrap_or_default()
    }

    /// Returns a sum of dissimilarities between members of the cluster and its medoid. For the
    /// squared error metric, this is the squared error of the cluster.
    pub fn squared_error(&self, cluster: usize) -> Option<Float> {
        self.result.as_ref().and_then(|result| result.errors.get(cluster).cloned())
    }

    /// Returns the sum of errors over all clusters.
    pub fn total_squared_error(&self) -> Option<Float> {
        self.result.as_ref().map(|result| result.errors.iter().sum())
    }

    /// Returns total error observed after each assignment step.
    pub fn error_history(&self) -> Vec<Float> {
        self.result.as_ref().map(|result| result.error_history.clone()).unwrap_or_default()
    }

    fn assign(&self, data: &Matrix, medoids: &[usize]) -> (Vec<usize>, Float) {
        let prototypes = data.select_rows(medoids);

        (0..data.rows()).fold((Vec::with_capacity(data.rows()), 0.), |(mut assignment, total), idx| {
            // NOTE prototypes are not empty here, so nearest always exists
            let nearest = find_nearest(data.row(idx), &prototypes, self.metric.as_ref()).unwrap_or_default();
            let error = self.metric.dissimilarity(data.row(idx), prototypes.row(nearest));
            assignment.push(nearest);

            (assignment, total + error)
        })
    }

    fn update_medoids(&self, data: &Matrix, medoids: &mut [usize], assignment: &[usize]) {
        let clusters = assignments_to_clusters(
            assignment.iter().map(|&cluster| Some(cluster)).collect::<Vec<_>>().as_slice(),
            medoids.len(),
        );

        clusters.iter().zip(medoids.iter_mut()).filter(|(members, _)| !members.is_empty()).for_each(
            |(members, medoid)| {
                let cost_fn = |candidate: usize| -> Float {
                    members.iter().map(|&other| self.metric.dissimilarity(data.row(candidate), data.row(other))).sum()
                };

                // NOTE keep the current medoid unless another member is strictly better
                let initial = (*medoid, cost_fn(*medoid));
                let (best, _) = members.iter().filter(|&&candidate| candidate != *medoid).fold(
                    initial,
                    |(best, best_cost), &candidate| {
                        let cost = cost_fn(candidate);
                        match compare_floats(cost, best_cost) {
                            Ordering::Less => (candidate, cost),
                            _ => (best, best_cost),
                        }
                    },
                );

                *medoid = best;
            },
        );
    }

    fn get_errors(&self, data: &Matrix, medoids: &[usize], assignment: &[usize]) -> Vec<Float> {
        assignment.iter().enumerate().fold(vec![0.; medoids.len()], |mut errors, (idx, &cluster)| {
            errors[cluster] += self.metric.dissimilarity(data.row(idx), data.row(medoids[cluster]));
            errors
        })
    }
}

impl ClusteringAlgorithm for KMedoids {
    fn cluster(&mut self, data: &Matrix) -> ClusteringResult<()> {
        validate_data(data, 1)?;

        if self.num_centers == 0 || self.num_centers > data.rows() {
            return Err(ClusteringError::InvalidInput(format!(
                "amount of centers must be in [1, {}], got {}",
                data.rows(),
                self.num_centers
            )));
        }

        let telemetry = Telemetry::new(self.environment.logger.clone(), self.is_verbose);
        let mut medoids = sample_distinct(self.environment.random.as_ref(), data.rows(), self.num_centers);

        let (mut assignment, total) = self.assign(data, &medoids);
        let mut error_history = vec![total];
        let mut iterations = 0;

        telemetry.log(format!("initial medoids: {medoids:?}, total error: {total}").as_str());

        let convergence = loop {
            if self.max_iterations.is_some_and(|max| iterations >= max) {
                break Convergence::Exhausted { iterations };
            }

            if self.environment.is_quota_reached() {
                break Convergence::Interrupted { iterations };
            }

            self.update_medoids(data, medoids.as_mut_slice(), &assignment);

            let (next, total) = self.assign(data, &medoids);
            error_history.push(total);
            iterations += 1;

            telemetry.log(format!("iteration {iterations}: total error: {total}").as_str());

            if next == assignment {
                break Convergence::Converged { iterations };
            }

            assignment = next;
        };

        if !convergence.is_converged() {
            telemetry.warn(format!("k-medoids: {convergence}").as_str());
        }

        self.result = Some(KMedoidsResult {
            errors: self.get_errors(data, &medoids, &assignment),
            prototypes: data.select_rows(&medoids),
            medoids,
            assignment,
            error_history,
            convergence,
        });

        Ok(())
    }

    fn get_clusters(&self) -> Vec<Vec<usize>> {
        self.result
            .as_ref()
            .map(|result| {
                let assignment = result.assignment.iter().map(|&cluster| Some(cluster)).collect::<Vec<_>>();
                assignments_to_clusters(assignment.as_slice(), result.medoids.len())
            })
            .unwrap_or_default()
    }

    fn get_prototypes(&self) -> ClusteringResult<Option<Matrix>> {
        Ok(self.result.as_ref().map(|result| result.prototypes.clone()))
    }

    fn set_verbose(&mut self, verbose: bool) {
        self.is_verbose = verbose;
    }

    fn convergence(&self) -> Option<Convergence> {
        self.result.as_ref().map(|result| result.convergence)
    }
}
