use super::*;
use crate::helpers::models::{create_matrix, create_two_blobs, normalize_clusters};
use crate::helpers::utils::{create_logging_environment, create_test_environment};
use crate::models::SquaredErrorMetric;

fn create_algorithm() -> AffinityPropagation {
    AffinityPropagation::new(Arc::new(SquaredErrorMetric)).with_environment(create_test_environment())
}

#[test]
fn can_return_empty_result_before_cluster() {
    let algorithm = create_algorithm();

    assert!(algorithm.get_clusters().is_empty());
    assert!(algorithm.get_exemplars().is_empty());
    assert_eq!(algorithm.get_prototypes(), Ok(None));
    assert_eq!(algorithm.convergence(), None);
}

#[test]
fn can_find_exemplar_per_blob() {
    let data = create_two_blobs();
    let mut algorithm = create_algorithm().with_rounds(200);

    algorithm.cluster(&data).unwrap();

    let exemplars = algorithm.get_exemplars();
    assert_eq!(exemplars.len(), 2);
    assert!(exemplars[0] < 10 && exemplars[1] >= 10);
    assert_eq!(normalize_clusters(algorithm.get_clusters()), vec![(0..10).collect::<Vec<_>>(), (10..20).collect()]);

    let prototypes = algorithm.get_prototypes().unwrap().unwrap();
    assert_eq!(prototypes, data.select_rows(&exemplars));
}

#[test]
fn can_use_first_point_as_exemplar_when_rows_are_identical() {
    let data = create_matrix(vec![vec![1., 2.]; 5]);
    let (environment, messages) = create_logging_environment(0);
    let mut algorithm = AffinityPropagation::new(Arc::new(SquaredErrorMetric)).with_environment(environment);

    algorithm.cluster(&data).unwrap();

    assert_eq!(algorithm.get_exemplars(), vec![0]);
    assert_eq!(algorithm.get_clusters(), vec![vec![0, 1, 2, 3, 4]]);
    assert_eq!(algorithm.convergence(), Some(Convergence::Converged { iterations: 100 }));
    assert!(messages.lock().unwrap().iter().any(|msg| msg.contains("no point has positive evidence")));
}

#[test]
fn can_handle_single_row() {
    let data = create_matrix(vec![vec![3., 4.]]);
    let mut algorithm = create_algorithm();

    algorithm.cluster(&data).unwrap();

    assert_eq!(algorithm.get_exemplars(), vec![0]);
    assert_eq!(algorithm.get_clusters(), vec![vec![0]]);
}

#[test]
fn can_make_every_point_exemplar_with_high_preference() {
    let data = create_matrix(vec![vec![0.], vec![5.], vec![10.]]);
    let mut algorithm = create_algorithm().with_preference(Some(0.));

    algorithm.cluster(&data).unwrap();

    assert_eq!(algorithm.get_exemplars(), vec![0, 1, 2]);
    assert_eq!(algorithm.get_clusters(), vec![vec![0], vec![1], vec![2]]);
}

#[test]
fn can_stop_early_when_exemplars_are_stable() {
    let data = create_two_blobs();
    let mut algorithm = create_algorithm().with_rounds(1000).with_convergence_rounds(Some(10));

    algorithm.cluster(&data).unwrap();

    let convergence = algorithm.convergence().unwrap();
    assert!(convergence.is_converged());
    assert!(convergence.iterations() < 1000);
}

#[test]
fn can_warn_when_messages_are_not_stable() {
    let data = create_two_blobs();
    let (environment, messages) = create_logging_environment(0);
    let mut algorithm =
        AffinityPropagation::new(Arc::new(SquaredErrorMetric)).with_rounds(1).with_environment(environment);

    algorithm.cluster(&data).unwrap();

    assert_eq!(algorithm.convergence(), Some(Convergence::Exhausted { iterations: 1 }));
    assert!(messages.lock().unwrap().iter().any(|msg| msg.contains("warning: affinity propagation")));
}

parameterized_test! {can_validate_parameters, (damping, convergence_rounds), {
    let data = create_two_blobs();
    let mut algorithm = create_algorithm().with_damping(damping).with_convergence_rounds(convergence_rounds);

    let result = algorithm.cluster(&data);

    assert!(result.is_err_and(|err| err.is_invalid_input()));
}}

can_validate_parameters! {
    case_01_damping_one: (1., None),
    case_02_negative_damping: (-0.1, None),
    case_03_zero_convergence_rounds: (0.5, Some(0)),
}

#[test]
fn can_reject_empty_data() {
    let mut algorithm = create_algorithm();

    assert!(algorithm.cluster(&Matrix::new(0, 2)).is_err_and(|err| err.is_invalid_input()));
}
