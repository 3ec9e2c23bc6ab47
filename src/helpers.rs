#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}

#[cfg(test)]
pub(crate) mod testing {
	use crate::{ClusteringEngine, InitMethod, KMeansConfig, PointSet, SnapshotHistory};
	use rand::prelude::*;

	/// Engine over `rows` whose randomized initializations draw from a seeded generator.
	pub fn seeded_engine<'a, R: AsRef<[f64]>>(rows: &[R], k: usize, init: InitMethod<f64>, seed: u64) -> ClusteringEngine<'a, f64> {
		let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build();
		ClusteringEngine::new(PointSet::from_rows(rows).unwrap(), k, init, conf).unwrap()
	}

	/// Checks every property a finished trace has to fulfill:
	/// - parallel sequences of at least two entries
	/// - the initial entry is fully unassigned
	/// - every later entry assigns every sample to a cluster in `[0,k)`
	/// - every later center is the mean of exactly the samples assigned to it
	/// - every recorded iteration after the first moved the centers
	pub fn assert_snapshot_invariants(points: &PointSet<f64>, history: &SnapshotHistory<f64>, k: usize) {
		assert_eq!(history.center_snapshots().len(), history.assignment_snapshots().len());
		assert!(history.len() >= 2);
		assert!(history.assignment_snapshots()[0].iter().all(|a| a.is_none()));

		for (step, (centers, assignments)) in history.iter().enumerate() {
			assert_eq!(centers.len(), k);
			assert!(centers.iter().all(|c| c.len() == points.dims()));
			if step == 0 {
				continue;
			}
			assert_eq!(assignments.len(), points.len());
			for (ci, center) in centers.iter().enumerate() {
				let members: Vec<&[f64]> = points.iter().zip(assignments.iter())
					.filter(|(_, a)| {
						let a = a.expect("sample left unassigned");
						assert!(a < k);
						a == ci
					})
					.map(|(s, _)| s)
					.collect();
				assert!(!members.is_empty(), "cluster {} empty in snapshot {}", ci, step);
				for d in 0..points.dims() {
					let mean = members.iter().map(|s| s[d]).sum::<f64>() / members.len() as f64;
					assert_approx_eq!(center[d], mean, 1e-9);
				}
			}
		}
		for pair in history.center_snapshots()[1..].windows(2) {
			assert_ne!(pair[0], pair[1]);
		}
	}
}
