use crate::api::{ClusteringEngine, KMeansState};
use crate::error::{KMeansError, Result};
use crate::memory::*;

/// Index of the not yet selected sample with the largest distance; the lowest index wins on ties.
pub(crate) fn farthest_unselected<T: Primitive>(distances: &[T], selected: &[bool]) -> Option<usize> {
    distances.iter().cloned().enumerate()
        .filter(|(i, _)| !selected[*i])
        .fold(None, |best: Option<(usize, T)>, (i, d)| match best {
            Some((_, best_dist)) if !(d > best_dist) => best,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}

/// Farthest-point heuristic: the first sample is the first centroid, every following centroid is the
/// sample whose distance to its nearest already chosen centroid is maximal.
#[inline(always)]
pub fn calculate<T: Primitive>(kmean: &ClusteringEngine<'_, T>, state: &mut KMeansState<T>) -> Result<()> {
    let mut selected = vec![false; kmean.points.len()];
    selected[0] = true;
    state.set_centroid_from_iter(0, kmean.points.point(0).iter().cloned());

    for k in 1..state.k {
        let distances = kmean.nearest_centroid_distances(&state.centroids, k);
        let next = farthest_unselected(&distances, &selected)
            .ok_or_else(|| KMeansError::invalid("not enough samples to choose the initial centroids"))?;
        selected[next] = true;
        state.set_centroid_from_iter(k, kmean.points.point(next).iter().cloned());
    }
    Ok(())
}
