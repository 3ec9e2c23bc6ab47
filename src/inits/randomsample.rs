use crate::api::{ClusteringEngine, KMeansState};
use crate::error::Result;
use crate::memory::*;
use rand::prelude::*;
use std::ops::DerefMut;

#[inline(always)]
pub fn calculate<T: Primitive>(kmean: &ClusteringEngine<'_, T>, state: &mut KMeansState<T>) -> Result<()> {
    kmean.points.iter()
        .choose_multiple(kmean.config.rnd.borrow_mut().deref_mut(), state.k).iter().cloned()
        .enumerate()
        .for_each(|(ci, c)| { // Copy randomly chosen samples into state.centroids
            state.set_centroid_from_iter(ci, c.iter().cloned());
        });
    Ok(())
}
