//! This module contains feature tests: end-to-end scenarios which run algorithms through their
//! common interface.

use crate::algorithms::ClusteringAlgorithm;
use crate::helpers::algorithms::*;
use crate::helpers::models::*;
use crate::helpers::utils::*;
use crate::models::*;
use std::sync::Arc;

mod determinism_test;
