//! Synthetic demonstration data: isotropic Gaussian blobs around given centers.

use crate::error::{KMeansError, Result};
use rand::prelude::*;
use rand_distr::Normal;

/// Centers of the demonstration data set.
pub const DEMO_CENTERS: [[f64; 2]; 4] = [[0.0, 0.0], [2.0, 2.0], [-3.0, 2.0], [2.0, -4.0]];
pub const DEMO_SAMPLES: usize = 300;
pub const DEMO_STD_DEV: f64 = 1.0;

/// Generate `n_samples` points scattered around `centers` with standard deviation `std_dev` per
/// coordinate. Samples are split as evenly as possible over the centers (the first centers get one
/// extra sample when `n_samples` is not a multiple) and returned in shuffled order.
pub fn make_blobs<C, R>(centers: &[C], n_samples: usize, std_dev: f64, rng: &mut R) -> Result<Vec<Vec<f64>>>
where
    C: AsRef<[f64]>,
    R: Rng + ?Sized,
{
    if centers.is_empty() {
        return Err(KMeansError::invalid("at least one blob center is required"));
    }
    if !(std_dev >= 0.0 && std_dev.is_finite()) {
        return Err(KMeansError::invalid(format!("standard deviation must be finite and >= 0, got {}", std_dev)));
    }
    let normal = Normal::new(0.0, std_dev)
        .map_err(|e| KMeansError::invalid(format!("invalid standard deviation {}: {}", std_dev, e)))?;

    let (per_center, remainder) = (n_samples / centers.len(), n_samples % centers.len());
    let mut samples = Vec::with_capacity(n_samples);
    for (ci, center) in centers.iter().enumerate() {
        let cnt = per_center + usize::from(ci < remainder);
        for _ in 0..cnt {
            samples.push(center.as_ref().iter().map(|c| c + normal.sample(rng)).collect());
        }
    }
    samples.shuffle(rng);
    Ok(samples)
}

/// The demonstration data set: 300 two-dimensional points around [`DEMO_CENTERS`].
pub fn demo_points<R: Rng + ?Sized>(rng: &mut R) -> Result<Vec<Vec<f64>>> {
    make_blobs(&DEMO_CENTERS, DEMO_SAMPLES, DEMO_STD_DEV, rng)
}
