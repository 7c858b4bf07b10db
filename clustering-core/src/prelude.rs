//! This module reimports commonly used types.

pub use crate::algorithms::ClusteringAlgorithm;
pub use crate::algorithms::Convergence;
pub use crate::algorithms::affinity_propagation::AffinityPropagation;
pub use crate::algorithms::gng::GrowingNeuralGas;
pub use crate::algorithms::kmedoids::KMedoids;
pub use crate::algorithms::neural_gas::NeuralGas;
pub use crate::algorithms::threshold::{ThresholdAffinityClustering, ThresholdVariant};
pub use crate::algorithms::ward::{Dendrogram, WardAgglomerative};

pub use crate::models::{AbsoluteErrorMetric, DissimilarityMetric, Matrix, SquaredErrorMetric};

pub use crate::utils::{ClusteringError, ClusteringResult};
pub use crate::utils::{DefaultRandom, Random};
pub use crate::utils::{Environment, InfoLogger};
pub use crate::utils::{Float, Quota, TimeQuota};
