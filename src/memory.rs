use num::{Float, NumCast, Zero};
use rand::distributions::uniform::SampleUniform;
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

/// Floating point type a clustering run is calculated in.
pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static
                + for<'a> AddAssign<&'a Self> {}
impl Primitive for f32 {}
impl Primitive for f64 {}

/// Row-major view helpers for flat `[<row0>,<row1>,...]` buffers.
pub(crate) trait FlatRows<T> {
    fn nth_row(&self, idx: usize, dims: usize) -> &[T];
    fn set_nth_from_iter(&mut self, idx: usize, dims: usize, src: impl Iterator<Item = T>);
}
impl<T: Copy> FlatRows<T> for Vec<T> {
    #[inline(always)]
    fn nth_row(&self, idx: usize, dims: usize) -> &[T] {
        &self[idx * dims..(idx + 1) * dims]
    }
    fn set_nth_from_iter(&mut self, idx: usize, dims: usize, src: impl Iterator<Item = T>) {
        self.iter_mut().skip(dims * idx).take(dims)
            .zip(src)
            .for_each(|(c, s)| *c = s);
    }
}
