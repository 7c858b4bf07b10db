//! Provides implementation of threshold driven clustering algorithms: CAST (Cluster Affinity
//! Search Technique) and its extension ECAST.
//!
//! Both grow one open cluster at a time: a point joins the open cluster while its affinity (sum of
//! similarities to cluster members) is high enough and leaves it when the affinity drops. When
//! neither happens, the cluster is closed and a new one is started from the remaining points.
//! Variants differ in how similarity is derived from dissimilarity and how the threshold is chosen.

#[cfg(test)]
#[path = "../../../tests/unit/algorithms/threshold/threshold_test.rs"]
mod threshold_test;

use super::*;
use crate::models::create_dissimilarity_matrix;
use crate::utils::{Environment, Telemetry};
use std::sync::Arc;

mod calibration;
pub use self::calibration::*;

mod state;
use self::state::*;

/// Specifies a variant of threshold clustering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdVariant {
    /// Similarity is a dissimilarity normalized by the biggest one: `1 - d / d_max`. The threshold
    /// is fixed for all clusters.
    Cast,
    /// Similarity is `exp(-d)`. The threshold is recalibrated before each new cluster from
    /// similarities between unassigned points.
    Ecast,
}

/// A threshold driven clustering which produces clusters one by one.
pub struct ThresholdAffinityClustering {
    variant: ThresholdVariant,
    threshold: Float,
    max_rounds: Option<usize>,
    metric: Arc<dyn DissimilarityMetric + Send + Sync>,
    environment: Arc<Environment>,
    is_verbose: bool,
    result: Option<ThresholdResult>,
}

struct ThresholdResult {
    clusters: Vec<Vec<usize>>,
    thresholds: Vec<Float>,
}

impl ThresholdAffinityClustering {
    /// Creates a new instance of `ThresholdAffinityClustering`. Threshold must be in (0, 1).
    pub fn new(
        variant: ThresholdVariant,
        threshold: Float,
        metric: Arc<dyn DissimilarityMetric + Send + Sync>,
    ) -> Self {
        Self {
            variant,
            threshold,
            max_rounds: None,
            metric,
            environment: Arc::new(Environment::default()),
            is_verbose: false,
            result: None,
        }
    }

    /// Creates a CAST variant.
    pub fn cast(threshold: Float, metric: Arc<dyn DissimilarityMetric + Send + Sync>) -> Self {
        Self::new(ThresholdVariant::Cast, threshold, metric)
    }

    /// Creates an ECAST variant.
    pub fn ecast(threshold: Float, metric: Arc<dyn DissimilarityMetric + Send + Sync>) -> Self {
        Self::new(ThresholdVariant::Ecast, threshold, metric)
    }

    /// Sets maximum amount of add/remove alternations per cluster. Default is `2 * rows + 10`.
    pub fn with_max_rounds(mut self, max_rounds: Option<usize>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Sets environment used to write log.
    pub fn with_environment(mut self, environment: Arc<Environment>) -> Self {
        self.environment = environment;
        self
    }

    /// Returns variant of the algorithm.
    pub fn variant(&self) -> ThresholdVariant {
        self.variant
    }

    /// Returns thresholds used for each produced cluster.
    pub fn thresholds(&self) -> Vec<Float> {
        self.result.as_ref().map(|result| result.thresholds.clone()).unwrap_or_default()
    }

    /// Runs clustering on a precomputed square matrix of pairwise similarities in `[0, 1]`.
    pub fn cluster_similarities(&mut self, similarities: &Matrix) -> ClusteringResult<()> {
        validate_open_range("threshold", self.threshold, 0., 1.)?;
        validate_similarities(similarities)?;

        let telemetry = Telemetry::new(self.environment.logger.clone(), self.is_verbose);
        let size = similarities.rows();
        let max_rounds = self.max_rounds.unwrap_or(2 * size + 10);

        let mut state = ClusterState::new(similarities);
        let mut clusters = Vec::new();
        let mut thresholds = Vec::new();

        while state.has_unassigned() {
            let threshold = match self.variant {
                ThresholdVariant::Cast => self.threshold,
                ThresholdVariant::Ecast => calculate_t(similarities, state.unassigned()).unwrap_or(self.threshold),
            };

            let rounds = state.grow(threshold, max_rounds)?;
            if rounds >= max_rounds {
                let message = format!("threshold clustering: cluster {} closed after {rounds} rounds", clusters.len());
                telemetry.warn(message.as_str());
            }

            let cluster = state.close();
            telemetry.log(
                format!("closed cluster {} with {} points, threshold: {threshold}", clusters.len(), cluster.len())
                    .as_str(),
            );

            clusters.push(cluster);
            thresholds.push(threshold);
        }

        self.result = Some(ThresholdResult { clusters, thresholds });

        Ok(())
    }
}

impl ClusteringAlgorithm for ThresholdAffinityClustering {
    fn cluster(&mut self, data: &Matrix) -> ClusteringResult<()> {
        validate_data(data, 1)?;
        validate_open_range("threshold", self.threshold, 0., 1.)?;

        let dissimilarities = create_dissimilarity_matrix(data, self.metric.as_ref());
        let similarities = match self.variant {
            ThresholdVariant::Cast => create_normalized_similarities(&dissimilarities),
            ThresholdVariant::Ecast => create_exponential_similarities(&dissimilarities),
        };

        self.cluster_similarities(&similarities)
    }

    fn get_clusters(&self) -> Vec<Vec<usize>> {
        self.result.as_ref().map(|result| result.clusters.clone()).unwrap_or_default()
    }

    fn get_prototypes(&self) -> ClusteringResult<Option<Matrix>> {
        Err(ClusteringError::UnsupportedOperation("threshold clustering does not define prototypes".to_string()))
    }

    fn set_verbose(&mut self, verbose: bool) {
        self.is_verbose = verbose;
    }
}

fn validate_similarities(similarities: &Matrix) -> ClusteringResult<()> {
    if similarities.rows() == 0 || similarities.rows() != similarities.cols() {
        return Err(ClusteringError::InvalidInput(format!(
            "similarity matrix must be square and not empty, got {}x{}",
            similarities.rows(),
            similarities.cols()
        )));
    }

    let size = similarities.rows();
    let is_valid = (0..size).flat_map(|i| (0..size).map(move |j| (i, j))).all(|(i, j)| {
        let value = similarities.get(i, j);
        (0. ..=1.).contains(&value)
    });

    if is_valid { Ok(()) } else { Err(ClusteringError::InvalidInput("similarities must be in [0, 1]".to_string())) }
}
