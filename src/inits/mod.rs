use crate::api::{ClusteringEngine, InitMethod, KMeansState};
use crate::error::Result;
use crate::memory::Primitive;

pub(crate) mod farthest;
pub(crate) mod kmeanplusplus;
pub(crate) mod precomputed;
pub(crate) mod randomsample;

/// Fill `state.centroids` with the `k` initial centers of the engine's [`InitMethod`].
pub(crate) fn initialize<T: Primitive>(kmean: &ClusteringEngine<'_, T>, state: &mut KMeansState<T>) -> Result<()> {
    tracing::debug!(method = kmean.init.name(), k = state.k, "initializing centroids");
    match &kmean.init {
        InitMethod::Random => randomsample::calculate(kmean, state),
        InitMethod::Farthest => farthest::calculate(kmean, state),
        InitMethod::KMeansPlusPlus => kmeanplusplus::calculate(kmean, state),
        InitMethod::Manual(seeds) => precomputed::calculate(state, seeds),
    }
}
