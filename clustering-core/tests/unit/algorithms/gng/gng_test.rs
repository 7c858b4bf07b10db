use super::*;
use crate::helpers::models::{create_matrix, create_two_blobs, normalize_clusters};
use crate::helpers::utils::random::FakeRandom;
use crate::helpers::utils::*;
use crate::models::{SquaredErrorMetric, is_partition};
use crate::utils::TimeQuota;

fn create_algorithm(max_units: usize, seed: u64) -> GrowingNeuralGas {
    GrowingNeuralGas::new(max_units, Arc::new(SquaredErrorMetric))
        .with_environment(create_test_environment_with_seed(seed))
}

#[test]
fn can_adapt_and_insert_unit() {
    let data = create_matrix(vec![vec![0.], vec![4.], vec![10.]]);
    // initial units at rows 0 and 2, then the signal is row 1
    let random = Arc::new(FakeRandom::new(vec![0, 2, 1], vec![]));
    let mut algorithm = GrowingNeuralGas::new(2, Arc::new(SquaredErrorMetric))
        .with_lambda(1)
        .with_environment(create_test_environment_with_random(random));

    algorithm.cluster(&data).unwrap();

    let units = algorithm.units();
    assert_eq!(units.len(), 3);
    assert_approx!(units[0][0], 0.8);
    assert_approx!(units[1][0], 10.);
    assert_approx!(units[2][0], 5.4);
    assert_eq!(algorithm.edges(), vec![(0, 2), (1, 2)]);

    let topology = algorithm.topology().unwrap();
    assert_approx!(topology.unit(0).unwrap().error, 16. * 0.5 * (1. - DEFAULT_BETA));
    assert_approx!(topology.unit(2).unwrap().error, 16. * 0.5 * (1. - DEFAULT_BETA));

    assert_eq!(algorithm.get_clusters(), vec![vec![0, 1, 2]]);
    assert_eq!(algorithm.convergence(), Some(Convergence::Converged { iterations: 1 }));
    let prototypes = algorithm.get_prototypes().unwrap().unwrap();
    assert_approx!(prototypes.get(0, 0), (0.8 + 10. + 5.4) / 3.);
}

#[test]
fn can_cluster_blobs() {
    let data = create_two_blobs();
    let mut algorithm = create_algorithm(10, 3);

    algorithm.cluster(&data).unwrap();

    let clusters = algorithm.get_clusters();
    assert!(is_partition(&clusters, data.rows()));
    assert_eq!(clusters.iter().map(|members| members.len()).sum::<usize>(), data.rows());
    assert!(algorithm.topology().unwrap().validate().is_ok());
    assert!(algorithm.units().len() <= 11);
    assert!(algorithm.convergence().unwrap().is_converged());
    assert_eq!(algorithm.get_prototypes().unwrap().unwrap().rows(), clusters.len());

    // NOTE each blob is covered by connected units, blobs are expected to be separated
    let clusters = normalize_clusters(clusters);
    let blobs = vec![(0..10).collect::<Vec<_>>(), (10..20).collect()];
    assert!(clusters == blobs || clusters == vec![(0..20).collect::<Vec<_>>()], "unexpected clusters: {clusters:?}");
}

#[test]
fn can_produce_same_result_with_same_seed() {
    let data = create_two_blobs();
    let mut first = create_algorithm(6, 5);
    let mut second = create_algorithm(6, 5);

    first.cluster(&data).unwrap();
    second.cluster(&data).unwrap();

    assert_eq!(first.get_clusters(), second.get_clusters());
    assert_eq!(first.units(), second.units());
    assert_eq!(first.edges(), second.edges());
}

#[test]
fn can_stop_at_signal_limit() {
    let data = create_two_blobs();
    let (environment, messages) = create_logging_environment(1);
    let mut algorithm =
        GrowingNeuralGas::new(5, Arc::new(SquaredErrorMetric)).with_max_signals(Some(10)).with_environment(environment);

    algorithm.cluster(&data).unwrap();

    assert_eq!(algorithm.convergence(), Some(Convergence::Exhausted { iterations: 10 }));
    assert_eq!(algorithm.units().len(), 2);
    assert!(is_partition(&algorithm.get_clusters(), data.rows()));
    assert!(messages.lock().unwrap().iter().any(|msg| msg.contains("warning: growing neural gas")));
}

#[test]
fn can_stop_when_quota_is_reached() {
    let data = create_two_blobs();
    let environment = Environment { quota: Some(Arc::new(TimeQuota::new(-1.))), ..Environment::new_with_seed(0) };
    let mut algorithm =
        GrowingNeuralGas::new(5, Arc::new(SquaredErrorMetric)).with_lambda(10).with_environment(Arc::new(environment));

    algorithm.cluster(&data).unwrap();

    assert_eq!(algorithm.convergence(), Some(Convergence::Interrupted { iterations: 10 }));
}

parameterized_test! {can_validate_parameters, (rows, max_units, lambda, epsilon_b, alpha), {
    let data = create_matrix((0..rows).map(|idx| vec![idx as Float]).collect());
    let mut algorithm = create_algorithm(max_units, 0).with_lambda(lambda).with_adaptation(epsilon_b, 0.006)
        .with_error_decay(alpha, 0.0005);

    let result = algorithm.cluster(&data);

    assert!(result.is_err_and(|err| err.is_invalid_input()));
}}

can_validate_parameters! {
    case_01_single_row: (1, 5, 100, 0.2, 0.5),
    case_02_max_units_too_small: (10, 1, 100, 0.2, 0.5),
    case_03_zero_lambda: (10, 5, 0, 0.2, 0.5),
    case_04_zero_epsilon: (10, 5, 100, 0., 0.5),
    case_05_alpha_one: (10, 5, 100, 0.2, 1.),
}

#[test]
fn can_return_empty_result_before_cluster() {
    let algorithm = create_algorithm(5, 0);

    assert!(algorithm.get_clusters().is_empty());
    assert!(algorithm.units().is_empty());
    assert!(algorithm.edges().is_empty());
    assert_eq!(algorithm.get_prototypes(), Ok(None));
}
