use crate::api::KMeansState;
use crate::error::{KMeansError, Result};
use crate::memory::*;

/// Use caller supplied seed points verbatim, in the order supplied.
#[inline(always)]
pub fn calculate<T: Primitive>(state: &mut KMeansState<T>, seeds: &[Vec<T>]) -> Result<()> {
    if seeds.len() != state.k {
        return Err(KMeansError::invalid(format!(
            "initialized with {} seed points, but k is {}", seeds.len(), state.k
        )));
    }
    seeds.iter().enumerate().for_each(|(ci, c)| {
        state.set_centroid_from_iter(ci, c.iter().cloned());
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_are_copied_in_order() {
        let mut state = KMeansState::<f32>::new(4, 2, 2);
        calculate(&mut state, &[vec![10.0, 0.0], vec![0.0, 0.0]]).unwrap();
        assert_eq!(state.centroids(), &[10.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn wrong_seed_count_is_an_error() {
        let mut state = KMeansState::<f64>::new(4, 1, 3);
        assert!(matches!(calculate(&mut state, &[vec![1.0]]), Err(KMeansError::InvalidConfiguration(_))));
    }
}
