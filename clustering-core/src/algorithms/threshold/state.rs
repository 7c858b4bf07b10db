#[cfg(test)]
#[path = "../../../tests/unit/algorithms/threshold/state_test.rs"]
mod state_test;

use crate::models::Matrix;
use crate::utils::{ClusteringError, ClusteringResult, Float, arg_max, compare_floats};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Location {
    Unassigned,
    Open,
    Closed,
}

/// Keeps the unassigned set, the open cluster and affinities of all points to the open cluster.
pub(crate) struct ClusterState<'a> {
    similarities: &'a Matrix,
    locations: Vec<Location>,
    affinities: Vec<Float>,
    unassigned: Vec<usize>,
    open_size: usize,
}

impl<'a> ClusterState<'a> {
    pub fn new(similarities: &'a Matrix) -> Self {
        let size = similarities.rows();

        Self {
            similarities,
            locations: vec![Location::Unassigned; size],
            affinities: vec![0.; size],
            unassigned: (0..size).collect(),
            open_size: 0,
        }
    }

    pub fn has_unassigned(&self) -> bool {
        !self.unassigned.is_empty()
    }

    /// Returns unassigned points in ascending order.
    pub fn unassigned(&self) -> &[usize] {
        self.unassigned.as_slice()
    }

    #[cfg(test)]
    pub fn open_size(&self) -> usize {
        self.open_size
    }

    #[cfg(test)]
    pub fn affinity(&self, idx: usize) -> Float {
        self.affinities[idx]
    }

    /// Alternates add and remove phases till none of them changes the open cluster or the limit
    /// of rounds is reached. Returns amount of rounds done.
    pub fn grow(&mut self, threshold: Float, max_rounds: usize) -> ClusteringResult<usize> {
        let mut rounds = 0;

        while rounds < max_rounds {
            let added = self.add_phase(threshold)?;
            let removed = self.remove_phase(threshold)?;
            rounds += 1;

            if !added && !removed {
                break;
            }
        }

        Ok(rounds)
    }

    /// Closes the open cluster and returns its members in ascending order. Affinities are reset.
    pub fn close(&mut self) -> Vec<usize> {
        let members = self
            .locations
            .iter()
            .enumerate()
            .filter(|(_, location)| **location == Location::Open)
            .map(|(idx, _)| idx)
            .collect::<Vec<_>>();

        members.iter().for_each(|&idx| self.locations[idx] = Location::Closed);
        self.affinities.iter_mut().for_each(|affinity| *affinity = 0.);
        self.open_size = 0;

        members
    }

    /// Moves points with high affinity from unassigned set into the open cluster.
    fn add_phase(&mut self, threshold: Float) -> ClusteringResult<bool> {
        let mut is_changed = false;

        while self.has_unassigned() {
            let candidate = self.find_candidate(Location::Unassigned, true)?;

            if compare_floats(self.affinities[candidate], threshold * self.open_size as Float) == Ordering::Less {
                break;
            }

            self.unassigned.retain(|&idx| idx != candidate);
            self.move_point(candidate, Location::Open, 1.);
            self.open_size += 1;
            is_changed = true;
        }

        Ok(is_changed)
    }

    /// Moves points with low affinity from the open cluster back to unassigned set. A single member
    /// is never removed: its affinity threshold is zero and similarities are not negative.
    fn remove_phase(&mut self, threshold: Float) -> ClusteringResult<bool> {
        let mut is_changed = false;

        while self.open_size > 1 {
            let candidate = self.find_candidate(Location::Open, false)?;

            if compare_floats(self.affinities[candidate], threshold * (self.open_size - 1) as Float) != Ordering::Less {
                break;
            }

            let position = self.unassigned.partition_point(|&idx| idx < candidate);
            self.unassigned.insert(position, candidate);
            self.move_point(candidate, Location::Unassigned, -1.);
            self.open_size -= 1;
            is_changed = true;
        }

        Ok(is_changed)
    }

    fn move_point(&mut self, point: usize, target: Location, sign: Float) {
        self.locations[point] = target;

        let similarities = self.similarities;
        self.affinities
            .iter_mut()
            .enumerate()
            .filter(|(idx, _)| *idx != point)
            .for_each(|(idx, affinity)| *affinity += sign * similarities.get(idx, point));
    }

    /// Finds a point with the highest (or the lowest) affinity within given set, lowest index wins on ties.
    fn find_candidate(&self, location: Location, is_max: bool) -> ClusteringResult<usize> {
        let members = self
            .locations
            .iter()
            .enumerate()
            .filter(|(_, other)| **other == location)
            .map(|(idx, _)| idx)
            .collect::<Vec<_>>();

        let sign = if is_max { 1. } else { -1. };

        arg_max(members.iter().map(|&idx| sign * self.affinities[idx])).map(|position| members[position]).ok_or_else(
            || ClusteringError::InvariantViolation(format!("cannot find a candidate in non-empty {location:?} set")),
        )
    }
}
