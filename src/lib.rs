//! # kmeans-replay - API documentation
//!
//! Lloyd's k-means clustering that keeps a full trace of the run: the center positions and the
//! point-to-cluster assignments at every step, for step-by-step playback.
//!
//! ## Supported centroid initializations
//! The outcome of each run depends on the initialization of its clusters. See [`InitMethod`]:
//! - random sample of `k` points
//! - farthest-point heuristic, seeded with the first point
//! - K-Mean++
//! - manually chosen seed points
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! ```rust
//! use kmeans_replay::*;
//! use rand::prelude::*;
//!
//! let mut rnd = StdRng::seed_from_u64(42);
//! let rows = demo::demo_points(&mut rnd).unwrap();
//!
//! let conf = KMeansConfig::build()
//!     .random_generator(rnd)
//!     .iteration_done(&|s, nr, moved| println!("Iteration {} - Error: {:.2} | moved: {}", nr, s.distsum(), moved))
//!     .build();
//! let engine = ClusteringEngine::new(PointSet::from_rows(&rows).unwrap(), 4, InitMethod::KMeansPlusPlus, conf).unwrap();
//! let history = engine.run().unwrap();
//!
//! for (step, (centers, _assignments)) in history.iter().enumerate() {
//!     println!("Step {}: {:?}", step, centers);
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Points are validated once into a [`PointSet`]. A [`ClusteringEngine`] is built per run from the
//! point set, `k`, the [`InitMethod`] and a [`KMeansConfig`] (random generator, status callbacks,
//! iteration limit). [`ClusteringEngine::run`] consumes the engine and returns the
//! [`SnapshotHistory`]:
//! - entry 0: the initial centers, all points unassigned
//! - entry 1: the state after the first assignment and centroid update
//! - one entry per further iteration that moved the centers, the last one being the converged state
//!
//! Empty clusters are reseeded with the point farthest from its own center (taken from a cluster
//! that keeps other points), so every recorded center is the mean of the points assigned to it.
//!
//! The [`protocol`] module maps the JSON request/response shape of the clustering endpoint onto the
//! engine; [`demo`] generates the synthetic demonstration data.

#[macro_use] mod helpers;
mod memory;
mod api;
mod error;
mod distance;
mod points;
mod history;
mod variants;
mod inits;
pub mod demo;
pub mod protocol;

pub use api::{
    ClusteringEngine, InitMethod, KMeansConfig, KMeansConfigBuilder, KMeansState,
    InitDoneCallbackFn, IterationDoneCallbackFn, DEFAULT_MAX_ITERATIONS,
};
pub use distance::{distance, squared_distance};
pub use error::{KMeansError, Result};
pub use history::{AssignmentVector, CenterSet, SnapshotHistory};
pub use memory::Primitive;
pub use points::PointSet;
