//! Clustering algorithm configuration.

#[cfg(test)]
#[path = "../../tests/unit/extensions/config_test.rs"]
mod config_test;

extern crate serde_json;

use clustering_core::algorithms::gng::{DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_EPSILON_B, DEFAULT_EPSILON_N};
use clustering_core::algorithms::neural_gas::DEFAULT_EPSILON;
use clustering_core::prelude::*;
use serde::Deserialize;
use std::io::{BufReader, Read};
use std::sync::Arc;

/// A default threshold used by threshold clustering when it is created by name.
pub const DEFAULT_THRESHOLD: Float = 0.5;

/// A default amount of clusters (centers, units) used when algorithm is created by name.
pub const DEFAULT_CLUSTERS: usize = 2;

/// A clustering configuration.
#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    /// Specifies algorithm and its parameters.
    pub algorithm: AlgorithmType,
    /// Specifies dissimilarity metric. Default is squared error.
    pub metric: Option<MetricType>,
    /// Specifies random seed.
    pub seed: Option<u64>,
    /// Specifies termination configuration.
    pub termination: Option<TerminationConfig>,
    /// Specifies telemetry configuration.
    pub telemetry: Option<TelemetryConfig>,
}

/// An algorithm configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(tag = "type")]
#[serde(rename_all = "camelCase")]
pub enum AlgorithmType {
    /// Affinity propagation.
    #[serde(rename_all = "camelCase")]
    AffinityPropagation {
        /// Amount of message passing rounds. Default is 100.
        rounds: Option<usize>,
        /// Damping factor in [0, 1). Default is 0.5.
        damping: Option<Float>,
        /// Self similarity. Default is the median of similarities.
        preference: Option<Float>,
        /// Stops when exemplars are stable for given amount of rounds. Not used by default.
        convergence_rounds: Option<usize>,
    },

    /// Cluster affinity search technique with fixed threshold.
    #[serde(rename_all = "camelCase")]
    Cast {
        /// Affinity threshold in (0, 1).
        threshold: Float,
        /// Max add/remove alternations per cluster.
        max_rounds: Option<usize>,
    },

    /// Cluster affinity search technique with recalibrated threshold.
    #[serde(rename_all = "camelCase")]
    Ecast {
        /// Initial affinity threshold in (0, 1).
        threshold: Float,
        /// Max add/remove alternations per cluster.
        max_rounds: Option<usize>,
    },

    /// Ward's agglomerative clustering.
    #[serde(rename_all = "camelCase")]
    Ward {
        /// Depth of dendrogram cut. Default is 1.
        depth: Option<usize>,
    },

    /// Growing neural gas.
    #[serde(rename_all = "camelCase")]
    GrowingNeuralGas {
        /// Max amount of units.
        max_units: usize,
        /// Insertion period in signals. Default is 100.
        lambda: Option<usize>,
        /// Adaptation rate of the winner. Default is 0.2.
        epsilon_b: Option<Float>,
        /// Adaptation rate of the winner's neighbours. Default is 0.006.
        epsilon_n: Option<Float>,
        /// Error decay on insertion. Default is 0.5.
        alpha: Option<Float>,
        /// Global error decay. Default is 0.0005.
        beta: Option<Float>,
        /// Max edge age. Default is 50.
        age_max: Option<usize>,
        /// Max amount of signals.
        max_signals: Option<usize>,
    },

    /// Neural gas.
    #[serde(rename_all = "camelCase")]
    NeuralGas {
        /// Amount of units.
        num_units: usize,
        /// Initial step size. Default is 0.5.
        epsilon_initial: Option<Float>,
        /// Final step size. Default is 0.005.
        epsilon_final: Option<Float>,
        /// Initial neighbourhood range. Default is a half of units.
        lambda_initial: Option<Float>,
        /// Final neighbourhood range. Default is 0.01.
        lambda_final: Option<Float>,
        /// Max amount of adaptation steps. Default is 40000.
        max_steps: Option<usize>,
    },

    /// K-medoids.
    #[serde(rename_all = "camelCase")]
    Kmedoids {
        /// Amount of medoids.
        num_centers: usize,
        /// Max amount of iterations. Unbounded by default.
        max_iterations: Option<usize>,
    },
}

/// A dissimilarity metric type.
#[derive(Clone, Copy, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MetricType {
    /// Sum of squared differences.
    SquaredError,
    /// Sum of absolute differences.
    AbsoluteError,
}

/// A termination configuration.
#[derive(Clone, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TerminationConfig {
    /// Max time in seconds.
    pub max_time: Option<Float>,
}

/// A telemetry configuration.
#[derive(Clone, Deserialize, Debug)]
pub struct TelemetryConfig {
    /// Specifies logging configuration.
    pub logging: Option<LoggingConfig>,
}

/// A logging configuration.
#[derive(Clone, Deserialize, Debug)]
pub struct LoggingConfig {
    /// Specifies whether progress is logged.
    pub enabled: bool,
}

impl Config {
    /// Returns true if logging is enabled.
    pub fn is_logging_enabled(&self) -> bool {
        self.telemetry
            .as_ref()
            .and_then(|telemetry| telemetry.logging.as_ref())
            .is_some_and(|logging| logging.enabled)
    }
}

/// Reads config from reader.
pub fn read_config<R: Read>(reader: BufReader<R>) -> Result<Config, String> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'"))
}

/// Creates a config for algorithm specified by its name, using defaults for the rest of parameters.
/// `clusters` is used as amount of medoids and neural gas units, and as max units of growing neural gas.
pub fn create_config_from_name(name: &str, clusters: Option<usize>, seed: Option<u64>) -> Result<Config, String> {
    let clusters = clusters.unwrap_or(DEFAULT_CLUSTERS);

    let algorithm = match name {
        "affinityPropagation" => AlgorithmType::AffinityPropagation {
            rounds: None,
            damping: None,
            preference: None,
            convergence_rounds: None,
        },
        "cast" => AlgorithmType::Cast { threshold: DEFAULT_THRESHOLD, max_rounds: None },
        "ecast" => AlgorithmType::Ecast { threshold: DEFAULT_THRESHOLD, max_rounds: None },
        "ward" => AlgorithmType::Ward { depth: None },
        "growingNeuralGas" => AlgorithmType::GrowingNeuralGas {
            max_units: clusters,
            lambda: None,
            epsilon_b: None,
            epsilon_n: None,
            alpha: None,
            beta: None,
            age_max: None,
            max_signals: None,
        },
        "neuralGas" => AlgorithmType::NeuralGas {
            num_units: clusters,
            epsilon_initial: None,
            epsilon_final: None,
            lambda_initial: None,
            lambda_final: None,
            max_steps: None,
        },
        "kmedoids" => AlgorithmType::Kmedoids { num_centers: clusters, max_iterations: None },
        _ => return Err(format!("unknown algorithm: '{name}'")),
    };

    Ok(Config { algorithm, metric: None, seed, termination: None, telemetry: None })
}

/// Creates an algorithm from config.
pub fn create_algorithm_from_config(config: &Config) -> Result<Box<dyn ClusteringAlgorithm>, String> {
    let metric = create_metric(config.metric);
    let environment = Arc::new(create_environment(config)?);

    let algorithm: Box<dyn ClusteringAlgorithm> = match &config.algorithm {
        AlgorithmType::AffinityPropagation { rounds, damping, preference, convergence_rounds } => {
            let mut algorithm = AffinityPropagation::new(metric)
                .with_preference(*preference)
                .with_convergence_rounds(*convergence_rounds)
                .with_environment(environment);
            if let Some(rounds) = rounds {
                algorithm = algorithm.with_rounds(*rounds);
            }
            if let Some(damping) = damping {
                algorithm = algorithm.with_damping(*damping);
            }

            Box::new(algorithm)
        }
        AlgorithmType::Cast { threshold, max_rounds } => Box::new(
            ThresholdAffinityClustering::cast(*threshold, metric)
                .with_max_rounds(*max_rounds)
                .with_environment(environment),
        ),
        AlgorithmType::Ecast { threshold, max_rounds } => Box::new(
            ThresholdAffinityClustering::ecast(*threshold, metric)
                .with_max_rounds(*max_rounds)
                .with_environment(environment),
        ),
        AlgorithmType::Ward { depth } => {
            let algorithm = WardAgglomerative::new(metric).with_environment(environment);
            Box::new(if let Some(depth) = depth { algorithm.with_depth(*depth) } else { algorithm })
        }
        AlgorithmType::GrowingNeuralGas {
            max_units,
            lambda,
            epsilon_b,
            epsilon_n,
            alpha,
            beta,
            age_max,
            max_signals,
        } => {
            let mut algorithm = GrowingNeuralGas::new(*max_units, metric)
                .with_adaptation(epsilon_b.unwrap_or(DEFAULT_EPSILON_B), epsilon_n.unwrap_or(DEFAULT_EPSILON_N))
                .with_error_decay(alpha.unwrap_or(DEFAULT_ALPHA), beta.unwrap_or(DEFAULT_BETA))
                .with_environment(environment);
            if let Some(lambda) = lambda {
                algorithm = algorithm.with_lambda(*lambda);
            }
            if let Some(age_max) = age_max {
                algorithm = algorithm.with_age_max(*age_max);
            }
            if max_signals.is_some() {
                algorithm = algorithm.with_max_signals(*max_signals);
            }

            Box::new(algorithm)
        }
        AlgorithmType::NeuralGas {
            num_units,
            epsilon_initial,
            epsilon_final,
            lambda_initial,
            lambda_final,
            max_steps,
        } => {
            let mut algorithm = NeuralGas::new(*num_units, metric)
                .with_epsilon(epsilon_initial.unwrap_or(DEFAULT_EPSILON.0), epsilon_final.unwrap_or(DEFAULT_EPSILON.1))
                .with_environment(environment);

            algorithm = match (lambda_initial, lambda_final) {
                (Some(initial), Some(last)) => algorithm.with_lambda(*initial, *last),
                (None, None) => algorithm,
                _ => return Err("neural gas expects both initial and final lambda or none of them".to_string()),
            };

            if let Some(max_steps) = max_steps {
                algorithm = algorithm.with_max_steps(*max_steps);
            }

            Box::new(algorithm)
        }
        AlgorithmType::Kmedoids { num_centers, max_iterations } => Box::new(
            KMedoids::new(*num_centers, metric).with_max_iterations(*max_iterations).with_environment(environment),
        ),
    };

    Ok(algorithm)
}

fn create_metric(metric: Option<MetricType>) -> Arc<dyn DissimilarityMetric + Send + Sync> {
    match metric.unwrap_or(MetricType::SquaredError) {
        MetricType::SquaredError => Arc::new(SquaredErrorMetric),
        MetricType::AbsoluteError => Arc::new(AbsoluteErrorMetric),
    }
}

fn create_environment(config: &Config) -> Result<Environment, String> {
    let random: Arc<dyn Random + Send + Sync> = match config.seed {
        Some(seed) => Arc::new(DefaultRandom::new_with_seed(seed)),
        None => Arc::new(DefaultRandom::default()),
    };

    let quota = match config.termination.as_ref().and_then(|termination| termination.max_time) {
        Some(max_time) if max_time <= 0. => return Err(format!("max time should be positive, got: {max_time}")),
        Some(max_time) => Some(Arc::new(TimeQuota::new(max_time)) as Arc<dyn Quota + Send + Sync>),
        None => None,
    };

    Ok(Environment::new(random, quota, Arc::new(|msg: &str| eprintln!("{msg}"))))
}
