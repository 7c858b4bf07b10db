//! Core crate contains a suite of unsupervised clustering algorithms which operate on a dense numeric
//! matrix where rows are cases (e.g. voxel time series) and columns are features.
//!
//! Available algorithms:
//! - **Affinity propagation**: message passing between points which elects exemplars.
//! - **CAST/ECAST**: threshold driven incremental growth of an open cluster.
//! - **Ward's agglomerative clustering**: Lance-Williams merges forming a dendrogram.
//! - **Growing neural gas**: competitive learning over an evolving topology graph.
//! - **Neural gas**: rank based online vector quantization with fixed amount of units.
//! - **K-medoids**: batch relocation clustering with medoid updates.
//!
//! All of them implement [`ClusteringAlgorithm`](algorithms::ClusteringAlgorithm):
//!
//! ```
//! use clustering_core::prelude::*;
//! use std::sync::Arc;
//!
//! let data = Matrix::from_rows(vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ])
//! .unwrap();
//!
//! let mut algorithm = KMedoids::new(2, Arc::new(SquaredErrorMetric))
//!     .with_environment(Arc::new(Environment::new_with_seed(42)));
//! algorithm.cluster(&data).unwrap();
//!
//! let mut clusters = algorithm.get_clusters();
//! clusters.sort();
//! assert_eq!(clusters, vec![vec![0, 1], vec![2, 3]]);
//! ```

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

#[cfg(test)]
#[path = "../tests/features/mod.rs"]
pub mod features;

#[cfg(test)]
#[path = "../tests/discovery/mod.rs"]
pub mod discovery;

pub mod algorithms;
pub mod models;
pub mod prelude;
pub mod utils;
