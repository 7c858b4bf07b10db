#[cfg(test)]
#[path = "../../tests/unit/models/clusters_test.rs"]
mod clusters_test;

use crate::models::Matrix;
use crate::utils::Float;

/// A cluster assignment per data row, `None` means that the row is not assigned.
pub type Assignment = Vec<Option<usize>>;

/// Converts per row assignment into cluster index lists. Members are sorted in ascending order.
pub fn assignments_to_clusters(assignment: &[Option<usize>], cluster_count: usize) -> Vec<Vec<usize>> {
    assignment.iter().enumerate().fold(vec![Vec::new(); cluster_count], |mut clusters, (idx, cluster)| {
        if let Some(cluster) = cluster {
            clusters[*cluster].push(idx);
        }
        clusters
    })
}

/// Converts cluster index lists into per row assignment. For overlapping clusters the first
/// cluster which contains the row wins.
pub fn clusters_to_assignments(clusters: &[Vec<usize>], rows: usize) -> Assignment {
    clusters.iter().enumerate().fold(vec![None; rows], |mut assignment, (cluster_idx, members)| {
        members.iter().filter(|&&idx| idx < rows).for_each(|&idx| {
            if assignment[idx].is_none() {
                assignment[idx] = Some(cluster_idx);
            }
        });
        assignment
    })
}

/// Checks that each index is in `[0, rows)` and appears at most once.
pub fn is_partition(clusters: &[Vec<usize>], rows: usize) -> bool {
    let mut seen = vec![false; rows];

    clusters.iter().flatten().all(|&idx| {
        if idx >= rows || seen[idx] {
            false
        } else {
            seen[idx] = true;
            true
        }
    })
}

/// Computes mean row per cluster, an empty cluster gets a zero row.
pub fn compute_centroids(data: &Matrix, clusters: &[Vec<usize>]) -> Matrix {
    let mut centroids = Matrix::new(clusters.len(), data.cols());

    clusters.iter().enumerate().filter(|(_, members)| !members.is_empty()).for_each(|(cluster_idx, members)| {
        let centroid = centroids.row_mut(cluster_idx);
        members.iter().for_each(|&idx| {
            centroid.iter_mut().zip(data.row(idx).iter()).for_each(|(c, v)| *c += v);
        });
        centroid.iter_mut().for_each(|c| *c /= members.len() as Float);
    });

    centroids
}
