use super::*;

fn create_balanced() -> Dendrogram {
    let mut dendrogram = Dendrogram::new(4);
    let left = dendrogram.join(0, 1, 1.);
    let right = dendrogram.join(2, 3, 2.);
    dendrogram.join(left, right, 10.);

    dendrogram
}

fn create_chain() -> Dendrogram {
    let mut dendrogram = Dendrogram::new(3);
    let left = dendrogram.join(0, 1, 1.);
    dendrogram.join(left, 2, 5.);

    dendrogram
}

#[test]
fn can_join_nodes() {
    let dendrogram = create_balanced();

    assert_eq!(dendrogram.size(), 4);
    assert_eq!(dendrogram.root(), Some(6));
    assert_eq!(dendrogram.weight(6), 4);
    assert_eq!(dendrogram.weight(4), 2);
    assert_eq!(dendrogram.node(4), Some(&DendrogramNode::Join { left: 0, right: 1, weight: 2, distance: 1. }));
    assert_eq!(dendrogram.node(3), Some(&DendrogramNode::Leaf { index: 3 }));
    assert_eq!(dendrogram.leaves(5), vec![2, 3]);
    assert_eq!(dendrogram.merge_distances(), vec![1., 2., 10.]);
}

type DendrogramFactory = fn() -> Dendrogram;

parameterized_test! {can_get_clusters_at_depth, (factory, depth, expected), {
    let factory: DendrogramFactory = factory;
    let expected: Vec<Vec<usize>> = expected;

    assert_eq!(factory().clusters_at_depth(depth), expected);
}}

can_get_clusters_at_depth! {
    case_01_balanced_root: (create_balanced, 0, vec![vec![0, 1, 2, 3]]),
    case_02_balanced_first_level: (create_balanced, 1, vec![vec![0, 1], vec![2, 3]]),
    case_03_balanced_leaves: (create_balanced, 2, vec![vec![0], vec![1], vec![2], vec![3]]),
    case_04_balanced_too_deep: (create_balanced, 5, vec![vec![0], vec![1], vec![2], vec![3]]),
    case_05_chain_first_level: (create_chain, 1, vec![vec![0, 1], vec![2]]),
    case_06_chain_leaf_above_depth: (create_chain, 2, vec![vec![0], vec![1], vec![2]]),
}

parameterized_test! {can_get_clusters_for_count, (factory, count, expected), {
    let factory: DendrogramFactory = factory;
    let expected: Vec<Vec<usize>> = expected;

    assert_eq!(factory().clusters_for_count(count), expected);
}}

can_get_clusters_for_count! {
    case_01_one: (create_balanced, 1, vec![vec![0, 1, 2, 3]]),
    case_02_two: (create_balanced, 2, vec![vec![0, 1], vec![2, 3]]),
    case_03_three_undo_latest: (create_balanced, 3, vec![vec![0, 1], vec![2], vec![3]]),
    case_04_more_than_leaves: (create_balanced, 10, vec![vec![0], vec![1], vec![2], vec![3]]),
    case_05_chain_two: (create_chain, 2, vec![vec![0, 1], vec![2]]),
}

#[test]
fn can_handle_single_leaf() {
    let dendrogram = Dendrogram::new(1);

    assert_eq!(dendrogram.root(), Some(0));
    assert_eq!(dendrogram.clusters_at_depth(3), vec![vec![0]]);
    assert_eq!(dendrogram.clusters_for_count(2), vec![vec![0]]);
    assert!(dendrogram.merge_distances().is_empty());
}

#[test]
fn can_handle_empty_dendrogram() {
    let dendrogram = Dendrogram::new(0);

    assert_eq!(dendrogram.root(), None);
    assert!(dendrogram.clusters_at_depth(1).is_empty());
    assert!(dendrogram.clusters_for_count(1).is_empty());
}
