use super::*;
use crate::algorithms::kmedoids::KMedoids;
use crate::helpers::utils::create_test_environment_with_seed;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]
    #[test]
    fn can_keep_error_non_increasing(data in generate_data(), num_centers in 1_usize..4, seed in get_seed_strategy()) {
        let num_centers = num_centers.min(data.rows());
        let mut algorithm = KMedoids::new(num_centers, Arc::new(SquaredErrorMetric))
            .with_environment(create_test_environment_with_seed(seed));

        algorithm.cluster(&data).unwrap();

        let history = algorithm.error_history();
        for pair in history.windows(2) {
            prop_assert!(pair[1] <= pair[0] + 1E-9 * pair[0].abs().max(1.), "history: {:?}", history);
        }

        let total = algorithm.total_squared_error().unwrap();
        prop_assert!((total - history[history.len() - 1]).abs() <= 1E-9 * total.abs().max(1.));
        prop_assert!(algorithm.convergence().unwrap().is_converged());
        prop_assert_eq!(algorithm.medoids().len(), num_centers);
        assert_partition(&algorithm, &data);
    }
}
