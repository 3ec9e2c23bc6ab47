use crate::error::{KMeansError, Result};
use crate::history::SnapshotHistory;
use crate::memory::*;
use crate::points::PointSet;
use crate::distance;
use std::cell::RefCell;
use rand::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&KMeansState<T>, usize, bool);

/// Default upper bound on the amount of Lloyd iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// This is a structure holding various configuration options for a clustering run, such as
/// the random number generator to use, or a couple of callbacks, that can be set to get status information from
/// a running calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: Current [`KMeansState`] after the iteration
    /// - **iteration_id**: Number of the current iteration
    /// - **recorded**: Whether this round was recorded as a snapshot (always true for the first round,
    ///   afterwards only for rounds that moved the centers)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// Amount of iterations after which a still moving run is aborted with an error
    pub(crate) max_iter: usize,
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_, _, _| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            max_iter: DEFAULT_MAX_ITERATIONS,
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig").field("max_iter", &self.max_iter).finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration during a running calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used by the randomized initialization methods.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the amount of iterations after which a run whose centers are still moving fails
    /// with [`KMeansError::NotConverged`].
    /// ## Default
    /// [`DEFAULT_MAX_ITERATIONS`]
    pub fn max_iterations(mut self, max_iter: usize) -> Self {
        self.config.max_iter = max_iter; self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// Centroid initialization method used to pick the first set of `k` centers.
#[derive(Clone, Debug, PartialEq)]
pub enum InitMethod<T> {
    /// Draw `k` distinct points uniformly at random (a.k.a. Forgy).
    Random,
    /// Start with the first point, then repeatedly take the point farthest from its nearest chosen center.
    Farthest,
    /// Start with a uniformly drawn point, then draw each further center with probability
    /// proportional to its squared distance to the nearest chosen center.
    KMeansPlusPlus,
    /// Use exactly these `k` seed points, in this order.
    Manual(Vec<Vec<T>>),
}

impl<T> InitMethod<T> {
    pub fn name(&self) -> &'static str {
        match self {
            InitMethod::Random => "random",
            InitMethod::Farthest => "farthest",
            InitMethod::KMeansPlusPlus => "kmeans++",
            InitMethod::Manual(_) => "manual",
        }
    }
}


/// State of a running calculation, as handed to the status callbacks of [`KMeansConfig`].
///
/// ## Fields
/// - **k**: The amount of clusters
/// - **distsum**: The total sum of squared distances from all samples to their respective centroids
/// - **centroids**: Current cluster centers [row-major] = [<centroid0>,<centroid1>,<centroid2>,...]
/// - **centroid_frequency**: Amount of samples in each cluster
/// - **assignments**: Cluster of each sample, `None` while unassigned
/// - **centroid_distances**: Each sample's distance to its centroid
#[derive(Clone, Debug)]
pub struct KMeansState<T: Primitive> {
    pub(crate) k: usize,
    pub(crate) distsum: T,
    pub(crate) centroids: Vec<T>,
    pub(crate) centroid_frequency: Vec<usize>,
    pub(crate) assignments: Vec<Option<usize>>,
    pub(crate) centroid_distances: Vec<T>,

    pub(crate) sample_dims: usize,
}
impl<T: Primitive> KMeansState<T> {
    pub(crate) fn new(sample_cnt: usize, sample_dims: usize, k: usize) -> Self {
        Self {
            k,
            distsum: T::zero(),
            centroids: vec![T::zero(); sample_dims * k],
            centroid_frequency: vec![0usize; k],
            assignments: vec![None; sample_cnt],
            centroid_distances: vec![T::infinity(); sample_cnt],
            sample_dims,
        }
    }
    pub(crate) fn set_centroid_from_iter(&mut self, idx: usize, src: impl Iterator<Item = T>) {
        self.centroids.set_nth_from_iter(idx, self.sample_dims, src);
    }
    /// Reset every sample to "unassigned".
    pub(crate) fn unassign(&mut self) {
        self.assignments.iter_mut().for_each(|a| *a = None);
        self.centroid_distances.iter_mut().for_each(|d| *d = T::infinity());
        self.centroid_frequency.iter_mut().for_each(|f| *f = 0);
        self.distsum = T::zero();
    }

    pub fn k(&self) -> usize { self.k }
    pub fn distsum(&self) -> T { self.distsum }
    pub fn centroids(&self) -> &[T] { &self.centroids }
    pub fn centroid(&self, idx: usize) -> &[T] { self.centroids.nth_row(idx, self.sample_dims) }
    pub fn centroid_frequency(&self) -> &[usize] { &self.centroid_frequency }
    pub fn assignments(&self) -> &[Option<usize>] { &self.assignments }
    pub fn centroid_distances(&self) -> &[T] { &self.centroid_distances }
}


/// Entrypoint of this crate's API-Surface: one clustering run over one point set.
///
/// The engine is created once per run, validated eagerly, and consumed by [`ClusteringEngine::run`],
/// which returns the complete [`SnapshotHistory`] of the run.
///
/// ## Supported initialization methods
/// - Random-Sample [`InitMethod::Random`]
/// - Farthest-Point [`InitMethod::Farthest`]
/// - K-Mean++ [`InitMethod::KMeansPlusPlus`]
/// - Manual seed points [`InitMethod::Manual`]
pub struct ClusteringEngine<'a, T: Primitive> {
    pub(crate) points: PointSet<T>,
    pub(crate) k: usize,
    pub(crate) init: InitMethod<T>,
    pub(crate) config: KMeansConfig<'a, T>,
}
impl<'a, T: Primitive> ClusteringEngine<'a, T> {
    /// Create a new clustering engine.
    ///
    /// ## Arguments
    /// - **points**: The validated [`PointSet`] to cluster
    /// - **k**: Amount of clusters to search for (`1 <= k <= points.len()`)
    /// - **init**: Initialization-Method to use for the initialization of the **k** centroids
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Errors
    /// [`KMeansError::InvalidConfiguration`] for an out-of-range `k`, a zero iteration limit, or manual
    /// seed points that do not match `k` or the point dimensionality, [`KMeansError::NonFiniteSeed`] for seed points
    /// with non-finite coordinates.
    pub fn new(points: PointSet<T>, k: usize, init: InitMethod<T>, config: KMeansConfig<'a, T>) -> Result<Self> {
        if k < 1 {
            return Err(KMeansError::invalid("k must be at least 1"));
        }
        if k > points.len() {
            return Err(KMeansError::invalid(format!("k ({}) exceeds the amount of points ({})", k, points.len())));
        }
        if config.max_iter == 0 {
            return Err(KMeansError::invalid("max_iterations must be at least 1"));
        }
        if let InitMethod::Manual(seeds) = &init {
            Self::validate_seeds(seeds, k, points.dims())?;
        }
        Ok(Self { points, k, init, config })
    }

    fn validate_seeds(seeds: &[Vec<T>], k: usize, sample_dims: usize) -> Result<()> {
        if seeds.len() != k {
            return Err(KMeansError::invalid(format!(
                "manual initialization needs exactly {} seed points, got {}", k, seeds.len()
            )));
        }
        for (index, seed) in seeds.iter().enumerate() {
            if seed.len() != sample_dims {
                return Err(KMeansError::invalid(format!(
                    "seed point {} has dimension {}, expected {}", index, seed.len(), sample_dims
                )));
            }
            if let Some(dim) = seed.iter().position(|v| !v.is_finite()) {
                return Err(KMeansError::NonFiniteSeed { index, dim });
            }
        }
        Ok(())
    }

    pub fn points(&self) -> &PointSet<T> { &self.points }
    pub fn k(&self) -> usize { self.k }
    pub fn init_method(&self) -> &InitMethod<T> { &self.init }

    /// Run Lloyd's algorithm to convergence.
    ///
    /// Initializes the centers, then alternates assignment passes and centroid recomputation until
    /// the recomputed centers equal the previous ones exactly. The returned history starts with the
    /// initial centers (all points unassigned), holds one entry for every iteration that moved the
    /// centers, and ends with the converged state.
    ///
    /// ## Example
    /// ```rust
    /// use kmeans_replay::*;
    ///
    /// let points = PointSet::from_rows(&[[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]]).unwrap();
    /// let init = InitMethod::Manual(vec![vec![0.0, 0.0], vec![10.0, 0.0]]);
    /// let engine = ClusteringEngine::new(points, 2, init, KMeansConfig::default()).unwrap();
    /// let history = engine.run().unwrap();
    ///
    /// assert_eq!(history.len(), 2);
    /// assert_eq!(history.final_centers().unwrap(), &vec![vec![0.0, 0.5], vec![10.0, 0.5]]);
    /// ```
    pub fn run(self) -> Result<SnapshotHistory<T>> {
        crate::variants::lloyd::calculate(&self)
    }

    /// Assign every sample to the index of its nearest centroid (first one wins on ties).
    /// Expects all samples to be unassigned.
    pub(crate) fn update_cluster_assignments(&self, state: &mut KMeansState<T>) {
        let (centroids, sample_dims) = (&state.centroids, self.points.sample_dims);
        let mut distsum = T::zero();
        self.points.iter()
            .zip(state.assignments.iter_mut())
            .zip(state.centroid_distances.iter_mut())
            .for_each(|((s, assignment), centroid_dist)| {
                debug_assert!(assignment.is_none());
                for (ci, c) in centroids.chunks_exact(sample_dims).enumerate() {
                    let dist = distance::distance(s, c);
                    if assignment.is_none() || dist < *centroid_dist {
                        *assignment = Some(ci);
                        *centroid_dist = dist;
                    }
                }
                distsum += *centroid_dist * *centroid_dist;
            });
        state.distsum = distsum;
        self.update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
    }

    /// Count the samples per cluster; returns the amount of clusters with at least one sample.
    pub(crate) fn update_cluster_frequencies(&self, assignments: &[Option<usize>], centroid_frequency: &mut [usize]) -> usize {
        centroid_frequency.iter_mut().for_each(|v| *v = 0);
        let mut used_centroids_cnt = 0;
        assignments.iter().flatten().cloned()
            .for_each(|centroid_id| {
                if centroid_frequency[centroid_id] == 0 {
                    used_centroids_cnt += 1;
                }
                centroid_frequency[centroid_id] += 1;
            });
        used_centroids_cnt
    }

    /// Distance of every sample to the nearest of the first `chosen` centroids in `centroids`.
    pub(crate) fn nearest_centroid_distances(&self, centroids: &[T], chosen: usize) -> Vec<T> {
        let sample_dims = self.points.sample_dims;
        self.points.iter()
            .map(|s| {
                centroids.chunks_exact(sample_dims).take(chosen)
                    .map(|c| distance::distance(s, c))
                    .fold(T::infinity(), |best, d| if d < best { d } else { best })
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn engine(rows: &[[f64; 2]], k: usize, init: InitMethod<f64>) -> Result<ClusteringEngine<'static, f64>> {
        ClusteringEngine::new(PointSet::from_rows(rows)?, k, init, KMeansConfig::default())
    }

    #[test]
    fn k_out_of_range_is_rejected() {
        let rows = [[0.0, 0.0], [1.0, 1.0]];
        assert!(matches!(engine(&rows, 0, InitMethod::Random), Err(KMeansError::InvalidConfiguration(_))));
        assert!(matches!(engine(&rows, 3, InitMethod::Farthest), Err(KMeansError::InvalidConfiguration(_))));
        assert!(engine(&rows, 2, InitMethod::KMeansPlusPlus).is_ok());
    }

    #[test]
    fn zero_iteration_limit_is_rejected() {
        let points = PointSet::from_rows(&[[0.0f64, 0.0]]).unwrap();
        let conf = KMeansConfig::build().max_iterations(0).build();
        assert!(matches!(ClusteringEngine::new(points, 1, InitMethod::Farthest, conf), Err(KMeansError::InvalidConfiguration(_))));
    }

    #[test]
    fn manual_seeds_are_validated() {
        let rows = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
        let too_few = InitMethod::Manual(vec![vec![0.0, 0.0]]);
        assert!(matches!(engine(&rows, 2, too_few), Err(KMeansError::InvalidConfiguration(_))));
        let wrong_dims = InitMethod::Manual(vec![vec![0.0, 0.0], vec![1.0]]);
        assert!(matches!(engine(&rows, 2, wrong_dims), Err(KMeansError::InvalidConfiguration(_))));
        let nan = InitMethod::Manual(vec![vec![0.0, 0.0], vec![1.0, f64::NAN]]);
        assert!(matches!(engine(&rows, 2, nan), Err(KMeansError::NonFiniteSeed { index: 1, dim: 1 })));
        let ok = InitMethod::Manual(vec![vec![0.0, 0.0], vec![5.0, 5.0]]);
        assert!(engine(&rows, 2, ok).is_ok());
    }

    #[test]
    fn assignment_picks_nearest_and_first_on_ties() {
        let kmean = engine(&[[0.0, 0.0], [5.0, 0.0], [9.0, 0.0]], 2, InitMethod::Farthest).unwrap();
        let mut state = KMeansState::new(3, 2, 2);
        state.set_centroid_from_iter(0, [0.0, 0.0].into_iter());
        state.set_centroid_from_iter(1, [10.0, 0.0].into_iter());

        kmean.update_cluster_assignments(&mut state);

        // point 1 is equally far from both centers -> the first center wins
        assert_eq!(state.assignments(), &[Some(0), Some(0), Some(1)]);
        assert_eq!(state.centroid_frequency(), &[2, 1]);
        assert_eq!(state.centroid_distances(), &[0.0, 5.0, 1.0]);
        assert_eq!(state.distsum(), 26.0);
    }

    #[test]
    fn unassign_resets_every_sample() {
        let kmean = engine(&[[0.0, 0.0], [5.0, 0.0]], 1, InitMethod::Farthest).unwrap();
        let mut state = KMeansState::new(2, 2, 1);
        kmean.update_cluster_assignments(&mut state);
        assert!(state.assignments().iter().all(|a| a.is_some()));

        state.unassign();
        assert!(state.assignments().iter().all(|a| a.is_none()));
        assert_eq!(state.centroid_frequency(), &[0]);
    }

    #[test]
    fn nearest_centroid_distances_only_consider_chosen_centroids() {
        let kmean = engine(&[[0.0, 0.0], [3.0, 4.0], [6.0, 8.0]], 2, InitMethod::Farthest).unwrap();
        let centroids = vec![0.0, 0.0, 6.0, 8.0];
        assert_eq!(kmean.nearest_centroid_distances(&centroids, 1), vec![0.0, 5.0, 10.0]);
        assert_eq!(kmean.nearest_centroid_distances(&centroids, 2), vec![0.0, 5.0, 0.0]);
    }
}
