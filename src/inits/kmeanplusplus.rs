use crate::api::{ClusteringEngine, KMeansState};
use crate::error::{KMeansError, Result};
use crate::inits::farthest::farthest_unselected;
use crate::memory::*;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::ops::DerefMut;

#[inline(always)]
pub fn calculate<T: Primitive>(kmean: &ClusteringEngine<'_, T>, state: &mut KMeansState<T>) -> Result<()> {
    let mut selected = vec![false; kmean.points.len()];
    {
        // Randomly select first centroid
        let first_idx = kmean.config.rnd.borrow_mut().gen_range(0..kmean.points.len());
        selected[first_idx] = true;
        state.set_centroid_from_iter(0, kmean.points.point(first_idx).iter().cloned());
    }
    for k in 1..state.k {
        // For each following centroid...
        // Squared distance of each sample to its nearest chosen centroid
        let weights: Vec<T> = kmean.nearest_centroid_distances(&state.centroids, k).into_iter()
            .map(|d| d * d)
            .collect();
        let distsum: T = weights.iter().cloned().sum();

        // Use rand's WeightedIndex to randomly draw a centroid, with probability weight / distsum.
        // Already chosen samples have weight 0 and are never drawn.
        let sampled = if distsum > T::zero() && distsum.is_finite() {
            match WeightedIndex::<T>::new(&weights) {
                Ok(centroid_index) => Some(centroid_index.sample(kmean.config.rnd.borrow_mut().deref_mut())),
                Err(_) => farthest_unselected(&weights, &selected),
            }
        } else {
            // all remaining samples sit on a chosen centroid, or the weights overflowed
            farthest_unselected(&weights, &selected)
        };
        let sampled_centroid_id = sampled
            .ok_or_else(|| KMeansError::invalid("not enough samples to choose the initial centroids"))?;

        selected[sampled_centroid_id] = true;
        state.set_centroid_from_iter(k, kmean.points.point(sampled_centroid_id).iter().cloned());
    }
    Ok(())
}
