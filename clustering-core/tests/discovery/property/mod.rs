use crate::algorithms::ClusteringAlgorithm;
use crate::models::*;
use proptest::prelude::*;
use std::sync::Arc;

mod generated_for_kmedoids;

prop_compose! {
    /// Generates a dense matrix with given bounds on its shape.
    fn generate_matrix(max_rows: usize, max_cols: usize)
    (
        cols in 1..=max_cols,
        rows in 2..=max_rows,
    )
    (
        values in prop::collection::vec(prop::collection::vec(-100. ..100_f64, cols), rows),
    ) -> Matrix {
        Matrix::from_rows(values).unwrap()
    }
}

prop_compose! {
    /// Generates a matrix with many identical rows.
    fn generate_matrix_with_duplicates(max_rows: usize)
    (
        base in generate_matrix(4, 3),
        picks in prop::collection::vec(0_usize..4, 2..=max_rows),
    ) -> Matrix {
        let rows = picks.iter().map(|&pick| base.row(pick % base.rows()).to_vec()).collect::<Vec<_>>();
        Matrix::from_rows(rows).unwrap()
    }
}

fn generate_data() -> impl Strategy<Value = Matrix> {
    prop_oneof![generate_matrix(24, 4), generate_matrix_with_duplicates(16)]
}

fn assert_partition(algorithm: &dyn ClusteringAlgorithm, data: &Matrix) {
    let clusters = algorithm.get_clusters();

    assert!(is_partition(&clusters, data.rows()), "invalid partition: {clusters:?}");
    assert_eq!(clusters.iter().map(|members| members.len()).sum::<usize>(), data.rows());
}

fn get_seed_strategy() -> impl Strategy<Value = u64> {
    0_u64..1000
}
