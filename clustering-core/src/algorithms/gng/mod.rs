//! Provides implementation of Growing Neural Gas: an online competitive learning which grows
//! a graph of units. Each signal adapts the nearest unit and its topological neighbours, edges
//! age and expire, and new units are inserted periodically where accumulated error is the highest.
//! Connected components of the final graph form clusters.

#[cfg(test)]
#[path = "../../../tests/unit/algorithms/gng/gng_test.rs"]
mod gng_test;

use super::*;
use crate::utils::{Environment, Telemetry, random_index, sample_distinct};
use std::sync::Arc;

mod topology;
pub use self::topology::*;

/// Default amount of signals between unit insertions.
pub const DEFAULT_LAMBDA: usize = 100;
/// Default adaptation rate of the nearest unit.
pub const DEFAULT_EPSILON_B: Float = 0.2;
/// Default adaptation rate of the nearest unit's neighbours.
pub const DEFAULT_EPSILON_N: Float = 0.006;
/// Default error decay applied on unit insertion.
pub const DEFAULT_ALPHA: Float = 0.5;
/// Default error decay applied after each signal.
pub const DEFAULT_BETA: Float = 0.0005;
/// Default maximum edge age.
pub const DEFAULT_AGE_MAX: usize = 50;

/// A Growing Neural Gas clustering algorithm.
pub struct GrowingNeuralGas {
    max_units: usize,
    lambda: usize,
    epsilon_b: Float,
    epsilon_n: Float,
    alpha: Float,
    beta: Float,
    age_max: usize,
    max_signals: Option<usize>,
    metric: Arc<dyn DissimilarityMetric + Send + Sync>,
    environment: Arc<Environment>,
    is_verbose: bool,
    result: Option<GngResult>,
}

struct GngResult {
    topology: Topology,
    clusters: Vec<Vec<usize>>,
    prototypes: Matrix,
    convergence: Convergence,
}

impl GrowingNeuralGas {
    /// Creates a new instance of `GrowingNeuralGas` which grows the graph till it has more than
    /// `max_units` units.
    pub fn new(max_units: usize, metric: Arc<dyn DissimilarityMetric + Send + Sync>) -> Self {
        Self {
            max_units,
            lambda: DEFAULT_LAMBDA,
            epsilon_b: DEFAULT_EPSILON_B,
            epsilon_n: DEFAULT_EPSILON_N,
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            age_max: DEFAULT_AGE_MAX,
            max_signals: None,
            metric,
            environment: Arc::new(Environment::default()),
            is_verbose: false,
            result: None,
        }
    }

    /// Sets amount of signals between unit insertions.
    pub fn with_lambda(mut self, lambda: usize) -> Self {
        self.lambda = lambda;
        self
    }

    /// Sets adaptation rates of the nearest unit and of its neighbours.
    pub fn with_adaptation(mut self, epsilon_b: Float, epsilon_n: Float) -> Self {
        self.epsilon_b = epsilon_b;
        self.epsilon_n = epsilon_n;
        self
    }

    /// Sets error decay factors: `alpha` on insertion, `beta` after every signal.
    pub fn with_error_decay(mut self, alpha: Float, beta: Float) -> Self {
        self.alpha = alpha;
        self.beta = beta;
        self
    }

    /// Sets maximum edge age.
    pub fn with_age_max(mut self, age_max: usize) -> Self {
        self.age_max = age_max;
        self
    }

    /// Sets the limit of presented signals. Default is `lambda * (max_units + 1) * 100`.
    pub fn with_max_signals(mut self, max_signals: Option<usize>) -> Self {
        self.max_signals = max_signals;
        self
    }

    /// Sets environment used to draw signals and write log.
    pub fn with_environment(mut self, environment: Arc<Environment>) -> Self {
        self.environment = environment;
        self
    }

    /// Returns the graph built by the last run.
    pub fn topology(&self) -> Option<&Topology> {
        self.result.as_ref().map(|result| &result.topology)
    }

    /// Returns weights of live units in ascending id order.
    pub fn units(&self) -> Vec<Vec<Float>> {
        self.topology()
            .map(|topology| topology.units().map(|(_, unit)| unit.weights.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns edges of the graph as ordered unit id pairs.
    pub fn edges(&self) -> Vec<(UnitId, UnitId)> {
        self.topology()
            .map(|topology| topology.edges().into_iter().map(|(a, b, _)| (a, b)).collect())
            .unwrap_or_default()
    }

    fn validate(&self, data: &Matrix) -> ClusteringResult<()> {
        validate_data(data, 2)?;

        if self.max_units < 2 {
            let max_units = self.max_units;
            return Err(ClusteringError::InvalidInput(format!("max units must be at least 2, got {max_units}")));
        }

        if self.lambda == 0 {
            return Err(ClusteringError::InvalidInput("lambda must be positive".to_string()));
        }

        [("epsilon_b", self.epsilon_b), ("epsilon_n", self.epsilon_n)].into_iter().try_for_each(|(name, value)| {
            if value > 0. && value <= 1. {
                Ok(())
            } else {
                Err(ClusteringError::InvalidInput(format!("{name} must be in (0, 1], got {value}")))
            }
        })?;

        [("alpha", self.alpha), ("beta", self.beta)].into_iter().try_for_each(|(name, value)| {
            if (0. ..1.).contains(&value) {
                Ok(())
            } else {
                Err(ClusteringError::InvalidInput(format!("{name} must be in [0, 1), got {value}")))
            }
        })
    }

    /// Presents a single signal to the graph.
    fn adapt(&self, topology: &mut Topology, signal: &[Float]) -> ClusteringResult<()> {
        let (Some(s1), Some(s2)) = topology.find_nearest_two(signal, self.metric.as_ref()) else {
            return Err(ClusteringError::InvariantViolation("graph has less than two units".to_string()));
        };

        topology.age_edges(s1);

        if let Some(unit) = topology.unit_mut(s1) {
            unit.error += self.metric.dissimilarity(&unit.weights, signal);
            move_toward(unit.weights.as_mut_slice(), signal, self.epsilon_b);
        }

        topology.neighbours(s1).into_iter().for_each(|neighbour| {
            if let Some(unit) = topology.unit_mut(neighbour) {
                move_toward(unit.weights.as_mut_slice(), signal, self.epsilon_n);
            }
        });

        topology.connect(s1, s2);
        topology.remove_stale(self.age_max);

        Ok(())
    }

    /// Inserts a new unit between the unit with maximal error and its worst neighbour.
    fn insert_unit(&self, topology: &mut Topology) -> ClusteringResult<UnitId> {
        let q = topology.max_error_unit(topology.unit_ids().collect::<Vec<_>>());
        let f = q.and_then(|q| topology.max_error_unit(topology.neighbours(q)));

        let (Some(q), Some(f)) = (q, f) else {
            return Err(ClusteringError::InvariantViolation("cannot find units for insertion".to_string()));
        };

        let weights = match (topology.unit(q), topology.unit(f)) {
            (Some(q), Some(f)) => q.weights.iter().zip(f.weights.iter()).map(|(a, b)| (a + b) / 2.).collect(),
            _ => return Err(ClusteringError::InvariantViolation(format!("unit {q} or {f} is not live"))),
        };

        let r = topology.add_unit(weights, 0.);
        topology.disconnect(q, f);
        topology.connect(q, r);
        topology.connect(r, f);

        topology.scale_errors(1. - self.alpha);
        let error = topology.unit(q).map(|unit| unit.error).unwrap_or_default();
        if let Some(unit) = topology.unit_mut(r) {
            unit.error = error;
        }

        Ok(r)
    }

    fn grow(&self, data: &Matrix, telemetry: &Telemetry) -> ClusteringResult<(Topology, Convergence)> {
        let random = self.environment.random.as_ref();
        let max_signals = self.max_signals.unwrap_or(self.lambda * (self.max_units + 1) * 100);

        let mut topology = Topology::default();
        sample_distinct(random, data.rows(), 2).into_iter().for_each(|idx| {
            topology.add_unit(data.row(idx).to_vec(), 0.);
        });

        let mut signals = 0;
        let convergence = loop {
            if signals >= max_signals {
                break Convergence::Exhausted { iterations: signals };
            }

            let signal = data.row(random_index(random, data.rows()));
            self.adapt(&mut topology, signal)?;
            signals += 1;

            if signals % self.lambda == 0 {
                let r = self.insert_unit(&mut topology)?;
                let size = topology.size();
                telemetry.log(format!("gng: inserted unit {r} after {signals} signals, units: {size}").as_str());
            }

            topology.scale_errors(1. - self.beta);

            if topology.size() > self.max_units {
                break Convergence::Converged { iterations: signals };
            }

            if signals % self.lambda == 0 && self.environment.is_quota_reached() {
                break Convergence::Interrupted { iterations: signals };
            }
        };

        Ok((topology, convergence))
    }

    /// Assigns rows to connected components of their nearest units. Components without rows
    /// are dropped.
    fn collect_clusters(&self, data: &Matrix, topology: &Topology) -> ClusteringResult<(Vec<Vec<usize>>, Matrix)> {
        let components = topology.components();
        let (ids, weights): (Vec<_>, Vec<_>) = topology.units().map(|(id, unit)| (id, unit.weights.clone())).unzip();
        let units = Matrix::from_rows(weights)?;

        let mut component_of = vec![None; ids.last().map_or(0, |&id| id + 1)];
        components.iter().enumerate().for_each(|(idx, component)| {
            component.iter().for_each(|&id| component_of[id] = Some(idx));
        });

        let mut clusters = vec![Vec::new(); components.len()];
        (0..data.rows()).for_each(|row| {
            let component = find_nearest(data.row(row), &units, self.metric.as_ref())
                .and_then(|nearest| component_of[ids[nearest]]);

            if let Some(component) = component {
                clusters[component].push(row);
            }
        });

        let (clusters, prototypes): (Vec<_>, Vec<_>) = clusters
            .into_iter()
            .zip(components.iter())
            .filter(|(members, _)| !members.is_empty())
            .map(|(members, component)| {
                let size = component.len() as Float;
                let mean = component.iter().filter_map(|&id| topology.unit(id)).fold(
                    vec![0.; data.cols()],
                    |mut mean, unit| {
                        mean.iter_mut().zip(unit.weights.iter()).for_each(|(m, w)| *m += w / size);
                        mean
                    },
                );

                (members, mean)
            })
            .unzip();

        Ok((clusters, Matrix::from_rows(prototypes)?))
    }
}

impl ClusteringAlgorithm for GrowingNeuralGas {
    fn cluster(&mut self, data: &Matrix) -> ClusteringResult<()> {
        self.validate(data)?;

        let telemetry = Telemetry::new(self.environment.logger.clone(), self.is_verbose);
        let (topology, convergence) = self.grow(data, &telemetry)?;

        topology.validate()?;

        if !convergence.is_converged() {
            telemetry.warn(format!("growing neural gas: {convergence}").as_str());
        }

        let (clusters, prototypes) = self.collect_clusters(data, &topology)?;
        telemetry.log(format!("gng: {} units, {} clusters", topology.size(), clusters.len()).as_str());

        self.result = Some(GngResult { topology, clusters, prototypes, convergence });

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
