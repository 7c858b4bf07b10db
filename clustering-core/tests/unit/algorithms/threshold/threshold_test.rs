use super::*;
use crate::helpers::models::{create_matrix, create_two_blobs, normalize_clusters};
use crate::helpers::utils::{create_logging_environment, create_test_environment};
use crate::models::SquaredErrorMetric;

fn create_algorithm(variant: ThresholdVariant, threshold: Float) -> ThresholdAffinityClustering {
    ThresholdAffinityClustering::new(variant, threshold, Arc::new(SquaredErrorMetric))
        .with_environment(create_test_environment())
}

parameterized_test! {can_put_identical_rows_into_single_cluster, variant, {
    let data = create_matrix(vec![vec![2., 2.]; 4]);
    let mut algorithm = create_algorithm(variant, 0.5);

    algorithm.cluster(&data).unwrap();

    assert_eq!(algorithm.get_clusters(), vec![vec![0, 1, 2, 3]]);
}}

can_put_identical_rows_into_single_cluster! {
    case_01_cast: ThresholdVariant::Cast,
    case_02_ecast: ThresholdVariant::Ecast,
}

#[test]
fn can_separate_blobs_with_cast() {
    let data = create_two_blobs();
    let mut algorithm = create_algorithm(ThresholdVariant::Cast, 0.5);

    algorithm.cluster(&data).unwrap();

    assert_eq!(normalize_clusters(algorithm.get_clusters()), vec![(0..10).collect::<Vec<_>>(), (10..20).collect()]);
    assert_eq!(algorithm.thresholds(), vec![0.5, 0.5]);
}

#[test]
fn can_calibrate_threshold_for_cliques_with_ecast() {
    let similarities = Matrix::from_fn(6, |i, j| if i / 3 == j / 3 { 1. } else { 0. });
    let mut algorithm = create_algorithm(ThresholdVariant::Ecast, 0.5);

    algorithm.cluster_similarities(&similarities).unwrap();

    assert_eq!(algorithm.get_clusters(), vec![vec![0, 1, 2], vec![3, 4, 5]]);
    assert_eq!(algorithm.thresholds(), vec![0.5, 0.5]);
}

#[test]
fn can_fallback_to_configured_threshold_with_ecast() {
    let similarities = Matrix::from_fn(3, |i, j| if i == j { 1. } else { 0.2 });
    let mut algorithm = create_algorithm(ThresholdVariant::Ecast, 0.3);

    algorithm.cluster_similarities(&similarities).unwrap();

    assert_eq!(algorithm.get_clusters(), vec![vec![0], vec![1], vec![2]]);
    assert_eq!(algorithm.thresholds(), vec![0.3, 0.3, 0.3]);
}

#[test]
fn can_warn_when_round_limit_is_reached() {
    let similarities = Matrix::from_fn(6, |i, j| if i / 3 == j / 3 { 1. } else { 0. });
    let (environment, messages) = create_logging_environment(0);
    let mut algorithm = ThresholdAffinityClustering::cast(0.5, Arc::new(SquaredErrorMetric))
        .with_max_rounds(Some(1))
        .with_environment(environment);

    algorithm.cluster_similarities(&similarities).unwrap();

    assert_eq!(algorithm.get_clusters(), vec![vec![0, 1, 2], vec![3, 4, 5]]);
    assert!(messages.lock().unwrap().iter().any(|msg| msg.contains("closed after 1 rounds")));
}

parameterized_test! {can_validate_threshold, (variant, threshold), {
    let data = create_two_blobs();
    let mut algorithm = create_algorithm(variant, threshold);

    let result = algorithm.cluster(&data);

    assert!(result.is_err_and(|err| err.is_invalid_input()));
}}

can_validate_threshold! {
    case_01_cast_zero: (ThresholdVariant::Cast, 0.),
    case_02_cast_one: (ThresholdVariant::Cast, 1.),
    case_03_ecast_negative: (ThresholdVariant::Ecast, -0.5),
    case_04_ecast_above_one: (ThresholdVariant::Ecast, 1.5),
}

parameterized_test! {can_validate_similarities, similarities, {
    let mut algorithm = create_algorithm(ThresholdVariant::Cast, 0.5);

    let result = algorithm.cluster_similarities(&similarities);

    assert!(result.is_err_and(|err| err.is_invalid_input()));
}}

can_validate_similarities! {
    case_01_empty: Matrix::new(0, 0),
    case_02_not_square: Matrix::new(2, 3),
    case_03_above_one: Matrix::from_fn(2, |_, _| 1.5),
    case_04_negative: Matrix::from_fn(2, |i, j| if i == j { 1. } else { -0.1 }),
}

#[test]
fn can_reject_prototypes() {
    let data = create_two_blobs();
    let mut algorithm = create_algorithm(ThresholdVariant::Cast, 0.5);
    algorithm.cluster(&data).unwrap();

    let result = algorithm.get_prototypes();

    assert!(matches!(result, Err(ClusteringError::UnsupportedOperation(_))));
}

#[test]
fn can_keep_variant() {
    let cast = ThresholdAffinityClustering::cast(0.5, Arc::new(SquaredErrorMetric));
    let ecast = ThresholdAffinityClustering::ecast(0.5, Arc::new(SquaredErrorMetric));

    assert_eq!(cast.variant(), ThresholdVariant::Cast);
    assert_eq!(ecast.variant(), ThresholdVariant::Ecast);
}
