use crate::memory::Primitive;

/// Positions of all `k` centers at one step, one vector per center.
pub type CenterSet<T> = Vec<Vec<T>>;

/// Cluster index per point; `None` while a point is unassigned.
pub type AssignmentVector = Vec<Option<usize>>;

/// Append-only trace of a clustering run.
///
/// Holds two parallel sequences: the center positions and the point assignments at every
/// recorded step. Entry `i` of both sequences describes the same step, so both always have
/// the same length. Entry `0` is the initial state (all points unassigned), the last entry is
/// the converged state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnapshotHistory<T: Primitive> {
    center_snapshots: Vec<CenterSet<T>>,
    assignment_snapshots: Vec<AssignmentVector>,
}

impl<T: Primitive> SnapshotHistory<T> {
    pub(crate) fn new() -> Self {
        Self { center_snapshots: Vec::new(), assignment_snapshots: Vec::new() }
    }

    /// Record copies of the given flat centroid buffer and assignment vector.
    pub(crate) fn record(&mut self, centroids: &[T], sample_dims: usize, assignments: &[Option<usize>]) {
        self.center_snapshots.push(centroids.chunks_exact(sample_dims).map(|c| c.to_vec()).collect());
        self.assignment_snapshots.push(assignments.to_vec());
        tracing::debug!(snapshot = self.center_snapshots.len() - 1, "recorded snapshot");
    }

    /// Amount of recorded steps.
    pub fn len(&self) -> usize { self.center_snapshots.len() }

    pub fn is_empty(&self) -> bool { self.center_snapshots.is_empty() }

    pub fn center_snapshots(&self) -> &[CenterSet<T>] { &self.center_snapshots }

    pub fn assignment_snapshots(&self) -> &[AssignmentVector] { &self.assignment_snapshots }

    /// Iterate over `(centers, assignments)` pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (&CenterSet<T>, &AssignmentVector)> {
        self.center_snapshots.iter().zip(self.assignment_snapshots.iter())
    }

    /// Centers of the last recorded step (the converged state after a finished run).
    pub fn final_centers(&self) -> Option<&CenterSet<T>> { self.center_snapshots.last() }

    pub fn final_assignments(&self) -> Option<&AssignmentVector> { self.assignment_snapshots.last() }

    /// Split the history into its two parallel sequences.
    pub fn into_parts(self) -> (Vec<CenterSet<T>>, Vec<AssignmentVector>) {
        (self.center_snapshots, self.assignment_snapshots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_keeps_sequences_parallel() {
        let mut history = SnapshotHistory::<f64>::new();
        history.record(&[0.0, 0.0, 10.0, 0.0], 2, &[None, None, None]);
        history.record(&[0.0, 0.5, 10.0, 0.5], 2, &[Some(0), Some(1), Some(1)]);

        assert_eq!(history.len(), 2);
        assert_eq!(history.center_snapshots().len(), history.assignment_snapshots().len());
        assert_eq!(history.center_snapshots()[0], vec![vec![0.0, 0.0], vec![10.0, 0.0]]);
        assert_eq!(history.final_centers(), Some(&vec![vec![0.0, 0.5], vec![10.0, 0.5]]));
        assert_eq!(history.final_assignments(), Some(&vec![Some(0), Some(1), Some(1)]));
        assert_eq!(history.iter().count(), 2);
    }

    #[test]
    fn snapshots_are_copies() {
        let mut centroids = vec![1.0f32, 2.0];
        let mut assignments = vec![Some(0)];
        let mut history = SnapshotHistory::new();
        history.record(&centroids, 2, &assignments);
        centroids[0] = 5.0;
        assignments[0] = None;
        assert_eq!(history.center_snapshots()[0], vec![vec![1.0, 2.0]]);
        assert_eq!(history.assignment_snapshots()[0], vec![Some(0)]);
    }
}
