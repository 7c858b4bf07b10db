//! Provides implementation of Neural Gas: an online vector quantization where every signal moves
//! all units toward it with a strength decaying exponentially with unit rank.

#[cfg(test)]
#[path = "../../tests/unit/algorithms/neural_gas_test.rs"]
mod neural_gas_test;

use super::*;
use crate::models::{AbsoluteErrorMetric, assignments_to_clusters};
use crate::utils::{Environment, Telemetry, random_index, sample_distinct};
use std::sync::Arc;

/// Default initial and final learning rates.
pub const DEFAULT_EPSILON: (Float, Float) = (0.5, 0.005);
/// Default final neighbourhood range, the initial one is a half of units amount.
pub const DEFAULT_FINAL_LAMBDA: Float = 0.01;
/// Default maximum amount of adaptation steps.
pub const DEFAULT_MAX_STEPS: usize = 40_000;

const MOVEMENT_TOLERANCE: Float = 1E-8;
const QUOTA_CHECK_PERIOD: usize = 100;

/// A Neural Gas clustering algorithm.
pub struct NeuralGas {
    num_units: usize,
    epsilon: (Float, Float),
    lambda: Option<(Float, Float)>,
    max_steps: usize,
    metric: Arc<dyn DissimilarityMetric + Send + Sync>,
    environment: Arc<Environment>,
    is_verbose: bool,
    result: Option<NeuralGasResult>,
}

struct NeuralGasResult {
    units: Matrix,
    clusters: Vec<Vec<usize>>,
    convergence: Convergence,
}

impl NeuralGas {
    /// Creates a new instance of `NeuralGas` with `num_units` units.
    pub fn new(num_units: usize, metric: Arc<dyn DissimilarityMetric + Send + Sync>) -> Self {
        Self {
            num_units,
            epsilon: DEFAULT_EPSILON,
            lambda: None,
            max_steps: DEFAULT_MAX_STEPS,
            metric,
            environment: Arc::new(Environment::default()),
            is_verbose: false,
            result: None,
        }
    }

    /// Sets initial and final learning rates.
    pub fn with_epsilon(mut self, initial: Float, last: Float) -> Self {
        self.epsilon = (initial, last);
        self
    }

    /// Sets initial and final neighbourhood ranges.
    pub fn with_lambda(mut self, initial: Float, last: Float) -> Self {
        self.lambda = Some((initial, last));
        self
    }

    /// Sets maximum amount of adaptation steps.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Sets environment used to draw units and signals and write log.
    pub fn with_environment(mut self, environment: Arc<Environment>) -> Self {
        self.environment = environment;
        self
    }

    fn get_lambda(&self) -> (Float, Float) {
        self.lambda.unwrap_or((self.num_units as Float / 2., DEFAULT_FINAL_LAMBDA))
    }

    fn validate(&self, data: &Matrix) -> ClusteringResult<()> {
        validate_data(data, 1)?;

        if self.num_units == 0 || self.num_units > data.rows() {
            return Err(ClusteringError::InvalidInput(format!(
                "amount of units must be in [1, {}], got {}",
                data.rows(),
                self.num_units
            )));
        }

        if self.max_steps == 0 {
            return Err(ClusteringError::InvalidInput("max steps must be positive".to_string()));
        }

        let (epsilon, lambda) = (self.epsilon, self.get_lambda());
        [("epsilon", epsilon.0), ("epsilon", epsilon.1), ("lambda", lambda.0), ("lambda", lambda.1)]
            .into_iter()
            .try_for_each(|(name, value)| {
                if value > 0. {
                    Ok(())
                } else {
                    Err(ClusteringError::InvalidInput(format!("{name} must be positive, got {value}")))
                }
            })
    }

    /// Moves all units toward the signal and returns the norm of the movement.
    fn adapt(&self, units: &mut Matrix, signal: &[Float], epsilon: Float, lambda: Float) -> Float {
        let mut ranked = (0..units.rows())
            .map(|idx| (idx, self.metric.dissimilarity(signal, units.row(idx))))
            .collect::<Vec<_>>();
        ranked.sort_by(|(_, a), (_, b)| compare_floats(*a, *b));

        let movement = ranked.into_iter().enumerate().fold(0., |acc, (rank, (idx, _))| {
            let fraction = epsilon * (-(rank as Float) / lambda).exp();

            units.row_mut(idx).iter_mut().zip(signal.iter()).fold(acc, |acc, (value, target)| {
                let delta = fraction * (target - *value);
                *value += delta;
                acc + delta * delta
            })
        });

        movement.sqrt()
    }

    fn train(&self, data: &Matrix, telemetry: &Telemetry) -> (Matrix, Convergence) {
        let random = self.environment.random.as_ref();
        let mut units = data.select_rows(sample_distinct(random, data.rows(), self.num_units).as_slice());

        let (epsilon, lambda) = (self.epsilon, self.get_lambda());
        let decay = |(initial, last): (Float, Float), step: usize| {
            initial * (last / initial).powf(step as Float / self.max_steps as Float)
        };

        let convergence = (0..self.max_steps)
            .find_map(|step| {
                if step % QUOTA_CHECK_PERIOD == 0 && self.environment.is_quota_reached() {
                    return Some(Convergence::Interrupted { iterations: step });
                }

                let signal = data.row(random_index(random, data.rows()));
                let movement = self.adapt(&mut units, signal, decay(epsilon, step), decay(lambda, step));

                if step % 1000 == 0 {
                    telemetry.log(format!("neural gas: step {step}, movement: {movement}").as_str());
                }

                (movement / (data.cols() as Float) < MOVEMENT_TOLERANCE)
                    .then_some(Convergence::Converged { iterations: step + 1 })
            })
            .unwrap_or(Convergence::Exhausted { iterations: self.max_steps });

        (units, convergence)
    }
}

impl ClusteringAlgorithm for NeuralGas {
    fn cluster(&mut self, data: &Matrix) -> ClusteringResult<()> {
        self.validate(data)?;

        let telemetry = Telemetry::new(self.environment.logger.clone(), self.is_verbose);
        let (units, convergence) = self.train(data, &telemetry);

        if !convergence.is_converged() {
            telemetry.warn(format!("neural gas: {convergence}").as_str());
        }

        let assignment = data
            .iter_rows()
            .map(|row| find_nearest(row, &units, &AbsoluteErrorMetric))
            .collect::<Vec<_>>();
        let clusters = assignments_to_clusters(assignment.as_slice(), units.rows());

        self.result = Some(NeuralGasResult { units, clusters, convergence });

        Ok(())
    }

    fn get_clusters(&self) -> Vec<Vec<usize>> {
        self.result.as_ref().map(|result| result.clusters.clone()).unwrap_or_default()
    }

    fn get_prototypes(&self) -> ClusteringResult<Option<Matrix>> {
        Ok(self.result.as_ref().map(|result| result.units.clone()))
    }

    fn set_verbose(&mut self, verbose: bool) {
        self.is_verbose = verbose;
    }

    fn convergence(&self) -> Option<Convergence> {
        self.result.as_ref().map(|result| result.convergence)
    }
}
