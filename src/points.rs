use crate::error::{KMeansError, Result};
use crate::memory::{FlatRows, Primitive};

/// Immutable, validated set of points all sharing the same dimensionality.
///
/// Samples are stored row-major in one buffer: `[<point0>,<point1>,<point2>,...]`.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet<T: Primitive> {
    pub(crate) sample_cnt: usize,
    pub(crate) sample_dims: usize,
    pub(crate) samples: Vec<T>,
}

impl<T: Primitive> PointSet<T> {
    /// Create a point set from a flat, row-major sample buffer.
    ///
    /// ## Arguments
    /// - **samples**: Vector of samples [row-major] = [<sample0>,<sample1>,<sample2>,...]
    /// - **sample_cnt**: Amount of samples, contained in the passed **samples** vector
    /// - **sample_dims**: Amount of dimensions each sample from the **sample** vector has
    pub fn new(samples: Vec<T>, sample_cnt: usize, sample_dims: usize) -> Result<Self> {
        if sample_cnt == 0 {
            return Err(KMeansError::invalid("point set must contain at least one point"));
        }
        if sample_dims == 0 {
            return Err(KMeansError::invalid("points must have at least one dimension"));
        }
        if samples.len() != sample_cnt * sample_dims {
            return Err(KMeansError::invalid(format!(
                "expected {} coordinates for {} points of dimension {}, got {}",
                sample_cnt * sample_dims, sample_cnt, sample_dims, samples.len()
            )));
        }
        if let Some(pos) = samples.iter().position(|v| !v.is_finite()) {
            return Err(KMeansError::NonFiniteInput { index: pos / sample_dims, dim: pos % sample_dims });
        }
        Ok(Self { sample_cnt, sample_dims, samples })
    }

    /// Create a point set from one vector per point.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let sample_dims = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if let Some(idx) = rows.iter().position(|r| r.as_ref().len() != sample_dims) {
            return Err(KMeansError::invalid(format!(
                "point {} has dimension {}, expected {}",
                idx, rows[idx].as_ref().len(), sample_dims
            )));
        }
        let samples = rows.iter().flat_map(|r| r.as_ref().iter().cloned()).collect();
        Self::new(samples, rows.len(), sample_dims)
    }

    /// Amount of points.
    pub fn len(&self) -> usize { self.sample_cnt }

    /// Always `false`, a point set holds at least one point.
    pub fn is_empty(&self) -> bool { self.sample_cnt == 0 }

    /// Dimensionality shared by all points.
    pub fn dims(&self) -> usize { self.sample_dims }

    pub fn point(&self, idx: usize) -> &[T] {
        self.samples.nth_row(idx, self.sample_dims)
    }

    pub fn iter(&self) -> std::slice::ChunksExact<'_, T> {
        self.samples.chunks_exact(self.sample_dims)
    }
}
