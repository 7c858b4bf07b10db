use super::*;
use crate::algorithms::gng::GrowingNeuralGas;
use crate::algorithms::kmedoids::KMedoids;
use crate::algorithms::neural_gas::NeuralGas;

type AlgorithmFactory = fn(u64) -> Box<dyn ClusteringAlgorithm>;

fn create_kmedoids(seed: u64) -> Box<dyn ClusteringAlgorithm> {
    Box::new(KMedoids::new(3, Arc::new(SquaredErrorMetric)).with_environment(create_test_environment_with_seed(seed)))
}

fn create_gng(seed: u64) -> Box<dyn ClusteringAlgorithm> {
    let environment = create_test_environment_with_seed(seed);
    Box::new(GrowingNeuralGas::new(6, Arc::new(SquaredErrorMetric)).with_environment(environment))
}

fn create_neural_gas(seed: u64) -> Box<dyn ClusteringAlgorithm> {
    Box::new(
        NeuralGas::new(3, Arc::new(SquaredErrorMetric))
            .with_max_steps(2000)
            .with_environment(create_test_environment_with_seed(seed)),
    )
}

parameterized_test! {can_produce_same_result_with_same_seed, factory, {
    let factory: AlgorithmFactory = factory;
    let data = create_blobs(&[vec![0., 0.], vec![4., 4.], vec![8., 0.]], 7, 1.5, 23);

    let run = |seed: u64| {
        let mut algorithm = factory(seed);
        algorithm.cluster(&data).unwrap();
        (algorithm.get_clusters(), algorithm.get_prototypes().unwrap(), algorithm.convergence())
    };

    assert_eq!(run(7), run(7));
}}

can_produce_same_result_with_same_seed! {
    case_01_kmedoids: create_kmedoids,
    case_02_gng: create_gng,
    case_03_neural_gas: create_neural_gas,
}

#[test]
fn can_replace_previous_result_on_repeated_call() {
    let mut algorithm = create_kmedoids(1);

    algorithm.cluster(&create_two_blobs()).unwrap();
    algorithm.cluster(&create_matrix(vec![vec![0.], vec![1.], vec![2.]])).unwrap();

    let clusters = algorithm.get_clusters();
    assert_eq!(clusters.iter().flatten().count(), 3);
    assert!(is_partition(&clusters, 3));
}
