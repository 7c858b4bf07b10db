//! Export of clustering results in json format.

#[cfg(test)]
#[path = "../../tests/unit/extensions/export_test.rs"]
mod export_test;

extern crate serde_json;

use clustering_core::prelude::*;
use serde::Serialize;
use std::io::{BufWriter, Write};

/// A clustering result which is written as json.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusteringOutput {
    /// Row indices of each cluster.
    pub clusters: Vec<Vec<usize>>,
    /// A prototype of each cluster. Absent when algorithm does not define prototypes.
    pub prototypes: Option<Vec<Vec<Float>>>,
}

impl ClusteringOutput {
    /// Collects output from algorithm which has already clustered the data.
    pub fn from_algorithm(algorithm: &dyn ClusteringAlgorithm) -> Result<Self, String> {
        let prototypes = match algorithm.get_prototypes() {
            Ok(prototypes) => prototypes.map(|prototypes| prototypes.to_rows()),
            Err(ClusteringError::UnsupportedOperation(_)) => None,
            Err(err) => return Err(format!("cannot get prototypes: '{err}'")),
        };

        Ok(Self { clusters: algorithm.get_clusters(), prototypes })
    }
}

/// Writes clustering output as json.
pub fn write_output<W: Write>(output: &ClusteringOutput, writer: BufWriter<W>) -> Result<(), String> {
    let mut writer = writer;

    serde_json::to_writer_pretty(&mut writer, output)
        .map_err(|err| format!("cannot serialize clustering output: '{err}'"))?;
    writer.write_all(b"\n").and_then(|_| writer.flush()).map_err(|err| format!("cannot write output: '{err}'"))
}
