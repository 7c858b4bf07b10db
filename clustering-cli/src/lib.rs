//! A library part of the command line interface to the clustering algorithm suite: config
//! handling, csv import and json export.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/unit/lib_test.rs"]
mod lib_test;

pub mod extensions;

use crate::extensions::config::{Config, create_algorithm_from_config};
use crate::extensions::export::ClusteringOutput;
use clustering_core::prelude::*;

/// Runs algorithm specified by config on the data and collects its output.
pub fn run_clustering(data: &Matrix, config: &Config, is_verbose: bool) -> Result<ClusteringOutput, String> {
    let mut algorithm = create_algorithm_from_config(config)?;
    algorithm.set_verbose(is_verbose || config.is_logging_enabled());

    algorithm.cluster(data).map_err(|err| format!("cannot cluster data: '{err}'"))?;

    ClusteringOutput::from_algorithm(algorithm.as_ref())
}
