use crate::api::{ClusteringEngine, KMeansState};
use crate::error::{KMeansError, Result};
use crate::history::SnapshotHistory;
use crate::memory::*;
use std::cmp::Ordering;

/// Two centroid buffers differ, if any coordinate of any centroid differs (no tolerance).
#[inline(always)]
pub(crate) fn centroids_differ<T: Primitive>(centroids: &[T], new_centroids: &[T]) -> bool {
    centroids.iter().zip(new_centroids.iter()).any(|(c, nc)| c != nc)
}

/// Give every empty cluster the sample that is farthest from its own centroid, taken from a cluster
/// that keeps at least one other sample.
fn reseed_empty_clusters<T: Primitive>(kmean: &ClusteringEngine<'_, T>, state: &mut KMeansState<T>) -> Result<()> {
    // Farthest first, stable sort keeps the lowest sample index first among equal distances
    let mut distance_sorted_samples: Vec<usize> = (0..kmean.points.len()).collect();
    distance_sorted_samples.sort_by(
        |&i1, &i2| state.centroid_distances[i2].partial_cmp(&state.centroid_distances[i1]).unwrap_or(Ordering::Equal));

    for i in 0..state.k {
        if state.centroid_frequency[i] != 0 {
            continue;
        }
        let (sample_id, prev_centroid_id) = distance_sorted_samples.iter().cloned()
            .filter_map(|s| state.assignments[s].map(|c| (s, c)))
            .find(|&(_, c)| state.centroid_frequency[c] > 1)
            .ok_or(KMeansError::DegenerateCluster { cluster: i })?;

        // Re-Assign found sample to the centroid without any samples
        state.centroid_frequency[prev_centroid_id] -= 1;
        state.centroid_frequency[i] += 1;
        state.distsum -= state.centroid_distances[sample_id] * state.centroid_distances[sample_id];
        // Centroid is moved into the chosen sample -> the sample's centroid distance is 0
        state.centroid_distances[sample_id] = T::zero();
        state.assignments[sample_id] = Some(i);
        tracing::debug!(cluster = i, sample = sample_id, donor = prev_centroid_id, "reseeded empty cluster");
    }
    Ok(())
}

/// Compute the mean of every cluster into a fresh centroid buffer.
fn update_centroids<T: Primitive>(kmean: &ClusteringEngine<'_, T>, state: &mut KMeansState<T>) -> Result<Vec<T>> {
    let sample_dims = kmean.points.sample_dims;
    let used_centroids_cnt = kmean.update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
    if used_centroids_cnt != state.k {
        reseed_empty_clusters(kmean, state)?;
    }

    // Sum all samples in a cluster together into new_centroids
    let mut new_centroids = vec![T::zero(); state.k * sample_dims];
    kmean.points.iter()
        .zip(state.assignments.iter())
        .filter_map(|(s, assignment)| assignment.map(|centroid_id| (s, centroid_id)))
        .for_each(|(s, centroid_id)| {
            new_centroids.iter_mut().skip(centroid_id * sample_dims).take(sample_dims)
                .zip(s.iter())
                .for_each(|(c, sv)| *c += sv);
        });

    for (cluster, (c, cfreq)) in new_centroids.chunks_exact_mut(sample_dims)
            .zip(state.centroid_frequency.iter().cloned())
            .enumerate() {
        let cfreq: T = match T::from(cfreq) {
            Some(f) if cfreq > 0 => f,
            _ => return Err(KMeansError::DegenerateCluster { cluster }),
        };
        c.iter_mut().for_each(|v| *v = *v / cfreq);
        if c.iter().any(|v| !v.is_finite()) {
            return Err(KMeansError::NonFiniteCentroid { cluster });
        }
    }
    Ok(new_centroids)
}

/// Lloyd's algorithm, recording a snapshot of the initial state, of the first iteration, and of
/// every following iteration that moved the centroids.
pub(crate) fn calculate<T: Primitive>(kmean: &ClusteringEngine<'_, T>) -> Result<SnapshotHistory<T>> {
    let (sample_cnt, sample_dims, k) = (kmean.points.len(), kmean.points.dims(), kmean.k);
    let mut state = KMeansState::new(sample_cnt, sample_dims, k);
    let mut history = SnapshotHistory::new();

    // Initialize clusters and notify subscriber
    crate::inits::initialize(kmean, &mut state)?;
    (kmean.config.init_done)(&state);
    history.record(&state.centroids, sample_dims, &state.assignments);

    kmean.update_cluster_assignments(&mut state);
    let mut new_centroids = update_centroids(kmean, &mut state)?;
    history.record(&new_centroids, sample_dims, &state.assignments);
    (kmean.config.iteration_done)(&state, 1, true);

    let mut iteration = 1;
    let mut changed = centroids_differ(&state.centroids, &new_centroids);
    while changed {
        if iteration >= kmean.config.max_iter {
            tracing::warn!(iterations = iteration, "centroids did not settle");
            return Err(KMeansError::NotConverged { iterations: iteration });
        }
        iteration += 1;

        state.unassign();
        state.centroids = new_centroids;
        kmean.update_cluster_assignments(&mut state);
        new_centroids = update_centroids(kmean, &mut state)?;

        changed = centroids_differ(&state.centroids, &new_centroids);
        if changed {
            history.record(&new_centroids, sample_dims, &state.assignments);
        }
        tracing::trace!(iteration, distsum = %state.distsum, changed, "iteration done");
        // Notify subscriber about finished iteration
        (kmean.config.iteration_done)(&state, iteration, changed);
    }

    tracing::info!(
        method = kmean.init.name(), k, iterations = iteration, snapshots = history.len(),
        distsum = %state.distsum, "k-means converged"
    );
    Ok(history)
}
