use crate::memory::Primitive;

/// Sum of squared coordinate differences between two points of equal dimensionality.
#[inline(always)]
pub fn squared_distance<T: Primitive>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len());
    a.iter().cloned()
        .zip(b.iter().cloned())
        .map(|(av, bv)| av - bv)        // <a> - <b>
        .map(|v| v * v)                 // <vec_components> ^2
        .sum()                          // sum(<vec_components>^2)
}

/// Euclidean distance between two points of equal dimensionality.
#[inline(always)]
pub fn distance<T: Primitive>(a: &[T], b: &[T]) -> T {
    squared_distance(a, b).sqrt()
}
