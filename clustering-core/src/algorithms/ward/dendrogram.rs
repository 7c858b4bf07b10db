#[cfg(test)]
#[path = "../../../tests/unit/algorithms/ward/dendrogram_test.rs"]
mod dendrogram_test;

use crate::utils::Float;

/// An identifier of the node in dendrogram.
pub type NodeId = usize;

/// Represents a node of binary merge tree.
#[derive(Clone, Debug, PartialEq)]
pub enum DendrogramNode {
    /// A single data point.
    Leaf {
        /// Row index of the point.
        index: usize,
    },
    /// A union of two subtrees.
    Join {
        /// Left subtree.
        left: NodeId,
        /// Right subtree.
        right: NodeId,
        /// Amount of leaves in the subtree.
        weight: usize,
        /// Dissimilarity at which subtrees were merged.
        distance: Float,
    },
}

/// A binary merge tree built bottom-up by agglomerative clustering. Leaves occupy first `size`
/// identifiers, join nodes follow in merge order.
#[derive(Clone, Debug)]
pub struct Dendrogram {
    nodes: Vec<DendrogramNode>,
    size: usize,
}

impl Dendrogram {
    /// Creates a new dendrogram with `size` leaves and no joins.
    pub(crate) fn new(size: usize) -> Self {
        Self { nodes: (0..size).map(|index| DendrogramNode::Leaf { index }).collect(), size }
    }

    /// Joins two subtrees and returns id of the new node.
    pub(crate) fn join(&mut self, left: NodeId, right: NodeId, distance: Float) -> NodeId {
        let weight = self.weight(left) + self.weight(right);
        self.nodes.push(DendrogramNode::Join { left, right, weight, distance });

        self.nodes.len() - 1
    }

    /// Returns amount of leaves.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the root node id. It is the last join or the only leaf.
    pub fn root(&self) -> Option<NodeId> {
        self.nodes.len().checked_sub(1)
    }

    /// Returns node by its id.
    pub fn node(&self, id: NodeId) -> Option<&DendrogramNode> {
        self.nodes.get(id)
    }

    /// Returns amount of leaves in the subtree.
    pub fn weight(&self, id: NodeId) -> usize {
        match &self.nodes[id] {
            DendrogramNode::Leaf { .. } => 1,
            DendrogramNode::Join { weight, .. } => *weight,
        }
    }

    /// Returns leaves of the subtree in ascending order.
    pub fn leaves(&self, id: NodeId) -> Vec<usize> {
        let mut leaves = Vec::with_capacity(self.weight(id));
        let mut stack = vec![id];

        while let Some(id) = stack.pop() {
            match &self.nodes[id] {
                DendrogramNode::Leaf { index } => leaves.push(*index),
                DendrogramNode::Join { left, right, .. } => {
                    stack.push(*right);
                    stack.push(*left);
                }
            }
        }

        leaves.sort_unstable();

        leaves
    }

    /// Returns merge distances in merge order.
    pub fn merge_distances(&self) -> Vec<Float> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                DendrogramNode::Join { distance, .. } => Some(*distance),
                DendrogramNode::Leaf { .. } => None,
            })
            .collect()
    }

    /// Returns nodes reached by descending `depth` levels from the root in left-to-right order.
    /// Leaves met above the depth are kept as they are.
    pub fn nodes_at_depth(&self, depth: usize) -> Vec<NodeId> {
        let Some(root) = self.root() else { return vec![] };

        (0..depth).fold(vec![root], |level, _| {
            level
                .into_iter()
                .flat_map(|id| match &self.nodes[id] {
                    DendrogramNode::Leaf { .. } => vec![id],
                    DendrogramNode::Join { left, right, .. } => vec![*left, *right],
                })
                .collect()
        })
    }

    /// Returns one cluster per node reached at given depth.
    pub fn clusters_at_depth(&self, depth: usize) -> Vec<Vec<usize>> {
        self.nodes_at_depth(depth).into_iter().map(|id| self.leaves(id)).collect()
    }

    /// Returns `count` clusters by undoing the latest merges. When `count` exceeds amount of leaves,
    /// all leaves are returned as singletons.
    pub fn clusters_for_count(&self, count: usize) -> Vec<Vec<usize>> {
        let Some(root) = self.root() else { return vec![] };

        let mut frontier = vec![root];
        while frontier.len() < count {
            // NOTE join ids grow with merge order, so the latest merge has the biggest id
            let latest = frontier
                .iter()
                .enumerate()
                .filter(|(_, id)| matches!(self.nodes[**id], DendrogramNode::Join { .. }))
                .max_by_key(|(_, id)| **id)
                .map(|(position, _)| position);

            let Some(position) = latest else { break };

            if let DendrogramNode::Join { left, right, .. } = self.nodes[frontier[position]] {
                frontier.splice(position..=position, [left, right]);
            }
        }

        frontier.into_iter().map(|id| self.leaves(id)).collect()
    }
}
