//! Provides implementation of affinity propagation clustering.
//!
//! Points exchange two kinds of messages: responsibilities `r[i][k]`, which reflect how well suited
//! point `k` is to serve as exemplar of point `i`, and availabilities `a[i][k]`, which reflect how
//! appropriate it would be for `i` to pick `k` as its exemplar. Similarity is a negated
//! dissimilarity, the diagonal (self preference) is set to the median of all other similarities,
//! so higher median produces more exemplars.

#[cfg(test)]
#[path = "../../tests/unit/algorithms/affinity_propagation_test.rs"]
mod affinity_propagation_test;

use super::*;
use crate::models::{assignments_to_clusters, create_dissimilarity_matrix};
use crate::utils::{Environment, Telemetry, arg_max, get_median};
use std::sync::Arc;

const DEFAULT_ROUNDS: usize = 100;
const DEFAULT_DAMPING: Float = 0.5;
const STABILITY_TOLERANCE: Float = 1E-9;

/// An affinity propagation clustering algorithm.
pub struct AffinityPropagation {
    metric: Arc<dyn DissimilarityMetric + Send + Sync>,
    rounds: usize,
    damping: Float,
    preference: Option<Float>,
    convergence_rounds: Option<usize>,
    environment: Arc<Environment>,
    is_verbose: bool,
    result: Option<AffinityResult>,
}

struct AffinityResult {
    exemplars: Vec<usize>,
    clusters: Vec<Vec<usize>>,
    prototypes: Matrix,
    convergence: Convergence,
}

/// Keeps message matrices between rounds.
struct Messages {
    similarities: Matrix,
    responsibilities: Matrix,
    availabilities: Matrix,
}

impl AffinityPropagation {
    /// Creates a new instance of `AffinityPropagation` with 100 rounds and damping factor 0.5.
    pub fn new(metric: Arc<dyn DissimilarityMetric + Send + Sync>) -> Self {
        Self {
            metric,
            rounds: DEFAULT_ROUNDS,
            damping: DEFAULT_DAMPING,
            preference: None,
            convergence_rounds: None,
            environment: Arc::new(Environment::default()),
            is_verbose: false,
            result: None,
        }
    }

    /// Sets amount of message passing rounds.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Sets damping factor in `[0, 1)`, zero disables damping.
    pub fn with_damping(mut self, damping: Float) -> Self {
        self.damping = damping;
        self
    }

    /// Sets self preference explicitly instead of the median of similarities.
    pub fn with_preference(mut self, preference: Option<Float>) -> Self {
        self.preference = preference;
        self
    }

    /// Enables early stop: message passing stops when a non-empty exemplar set is unchanged for
    /// given amount of consecutive rounds.
    pub fn with_convergence_rounds(mut self, convergence_rounds: Option<usize>) -> Self {
        self.convergence_rounds = convergence_rounds;
        self
    }

    /// Sets environment used to write log and check quota.
    pub fn with_environment(mut self, environment: Arc<Environment>) -> Self {
        self.environment = environment;
        self
    }

    /// Returns exemplar row indices in ascending order.
    pub fn get_exemplars(&self) -> Vec<usize> {
        self.result.as_ref().map(|result| result.exemplars.clone()).unwrap_or_default()
    }

    fn create_messages(&self, data: &Matrix, telemetry: &Telemetry) -> Messages {
        let size = data.rows();
        let dissimilarities = create_dissimilarity_matrix(data, self.metric.as_ref());
        let mut similarities = Matrix::from_fn(size, |i, k| -dissimilarities.get(i, k));

        let preference = self.preference.unwrap_or_else(|| {
            let off_diagonal = (0..size)
                .flat_map(|i| (0..size).filter(move |&k| k != i).map(move |k| (i, k)))
                .map(|(i, k)| similarities.get(i, k))
                .collect::<Vec<_>>();

            get_median(off_diagonal.as_slice()).unwrap_or_default()
        });

        telemetry.log(format!("affinity propagation: self preference is {preference}").as_str());

        (0..size).for_each(|i| similarities.set(i, i, preference));

        Messages { similarities, responsibilities: Matrix::new(size, size), availabilities: Matrix::new(size, size) }
    }

    /// Updates responsibilities and returns the biggest absolute change.
    fn update_responsibilities(&self, messages: &mut Messages) -> Float {
        let size = messages.similarities.rows();
        let Messages { similarities, responsibilities, availabilities } = messages;

        (0..size).fold(0., |max_change, i| {
            // find the biggest and the second biggest values of a[i][k'] + s[i][k']
            let (first_idx, first, second) = (0..size).fold(
                (usize::MAX, Float::NEG_INFINITY, Float::NEG_INFINITY),
                |(first_idx, first, second), k| {
                    let value = availabilities.get(i, k) + similarities.get(i, k);
                    if value > first {
                        (k, value, first)
                    } else if value > second {
                        (first_idx, first, value)
                    } else {
                        (first_idx, first, second)
                    }
                },
            );

            (0..size).fold(max_change, |max_change, k| {
                let competitor = if k == first_idx { second } else { first };
                let new_value = similarities.get(i, k) - competitor;
                let old_value = responsibilities.get(i, k);
                let value = (1. - self.damping) * new_value + self.damping * old_value;

                responsibilities.set(i, k, value);

                max_change.max((value - old_value).abs())
            })
        })
    }

    /// Updates availabilities and returns the biggest absolute change.
    fn update_availabilities(&self, messages: &mut Messages) -> Float {
        let size = messages.similarities.rows();
        let Messages { responsibilities, availabilities, .. } = messages;

        (0..size).fold(0., |max_change, k| {
            let positive_sum =
                (0..size).filter(|&i| i != k).map(|i| responsibilities.get(i, k).max(0.)).sum::<Float>();
            let self_responsibility = responsibilities.get(k, k);

            (0..size).fold(max_change, |max_change, i| {
                let new_value = if i == k {
                    positive_sum
                } else {
                    (self_responsibility + positive_sum - responsibilities.get(i, k).max(0.)).min(0.)
                };
                let old_value = availabilities.get(i, k);
                let value = (1. - self.damping) * new_value + self.damping * old_value;

                availabilities.set(i, k, value);

                max_change.max((value - old_value).abs())
            })
        })
    }

    /// Returns points with positive self evidence `r[i][i] + a[i][i]`.
    fn get_positive_exemplars(messages: &Messages) -> Vec<usize> {
        (0..messages.similarities.rows()).filter(|&i| Self::get_evidence(messages, i) > 0.).collect()
    }

    fn get_evidence(messages: &Messages, idx: usize) -> Float {
        messages.responsibilities.get(idx, idx) + messages.availabilities.get(idx, idx)
    }

    fn create_result(
        &self,
        data: &Matrix,
        exemplars: Vec<usize>,
        similarities: &Matrix,
        convergence: Convergence,
    ) -> AffinityResult {
        let assignment = (0..data.rows())
            .map(|i| {
                if let Ok(position) = exemplars.binary_search(&i) {
                    Some(position)
                } else {
                    arg_max(exemplars.iter().map(|&exemplar| similarities.get(i, exemplar)))
                }
            })
            .collect::<Vec<_>>();

        AffinityResult {
            clusters: assignments_to_clusters(assignment.as_slice(), exemplars.len()),
            prototypes: data.select_rows(&exemplars),
            exemplars,
            convergence,
        }
    }
}

impl ClusteringAlgorithm for AffinityPropagation {
    fn cluster(&mut self, data: &Matrix) -> ClusteringResult<()> {
        validate_data(data, 1)?;

        if !(0. ..1.).contains(&self.damping) {
            return Err(ClusteringError::InvalidInput(format!("damping must be in [0, 1), got {}", self.damping)));
        }

        if self.convergence_rounds == Some(0) {
            return Err(ClusteringError::InvalidInput("convergence rounds must be positive".to_string()));
        }

        let telemetry = Telemetry::new(self.environment.logger.clone(), self.is_verbose);

        if data.rows() == 1 {
            let similarities = Matrix::new(1, 1);
            let convergence = Convergence::Converged { iterations: 0 };
            self.result = Some(self.create_result(data, vec![0], &similarities, convergence));
            return Ok(());
        }

        let mut messages = self.create_messages(data, &telemetry);
        let mut last_exemplars: Option<Vec<usize>> = None;
        let mut stable_rounds = 0;
        let mut last_change = Float::INFINITY;

        let mut convergence = None;
        for round in 0..self.rounds {
            if self.environment.is_quota_reached() {
                convergence = Some(Convergence::Interrupted { iterations: round });
                break;
            }

            let r_change = self.update_responsibilities(&mut messages);
            let a_change = self.update_availabilities(&mut messages);
            last_change = r_change.max(a_change);

            if let Some(convergence_rounds) = self.convergence_rounds {
                let exemplars = Self::get_positive_exemplars(&messages);
                let is_stable = !exemplars.is_empty() && last_exemplars.as_ref() == Some(&exemplars);
                stable_rounds = if is_stable { stable_rounds + 1 } else { 0 };
                last_exemplars = Some(exemplars);

                if stable_rounds >= convergence_rounds {
                    convergence = Some(Convergence::Converged { iterations: round + 1 });
                    break;
                }
            }

            telemetry.log(format!("round {}: max message change: {last_change}", round + 1).as_str());
        }

        let convergence = convergence.unwrap_or(if last_change < STABILITY_TOLERANCE {
            Convergence::Converged { iterations: self.rounds }
        } else {
            Convergence::Exhausted { iterations: self.rounds }
        });

        if !convergence.is_converged() {
            telemetry.warn(format!("affinity propagation: {convergence}").as_str());
        }

        let mut exemplars = Self::get_positive_exemplars(&messages);
        if exemplars.is_empty() {
            let best = arg_max((0..data.rows()).map(|idx| Self::get_evidence(&messages, idx))).ok_or_else(|| {
                ClusteringError::InvariantViolation("cannot find exemplar candidate".to_string())
            })?;

            telemetry.warn(
                format!("affinity propagation: no point has positive evidence, use {best} as exemplar").as_str(),
            );
            exemplars.push(best);
        }

        telemetry.log(format!("affinity propagation: found {} exemplars", exemplars.len()).as_str());

        self.result = Some(self.create_result(data, exemplars, &messages.similarities, convergence));

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

    fn convergence(&self) -> Option<Convergence> {
        self.result.as_ref().map(|result| result.convergence)
    }
}
