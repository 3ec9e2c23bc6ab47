//! JSON request/response shapes of the clustering endpoint and the glue running them.
//!
//! Request:
//! ```json
//! { "data": [[0,0],[0,1]], "k": 2, "initMethod": "manual", "selectedPoints": [[0,0],[0,1]] }
//! ```
//! Response: one entry per recorded snapshot, unassigned points encoded as `-1`.
//! ```json
//! { "centers": [[[0,0],[0,1]], ...], "assignments": [[-1,-1], [0,1], ...] }
//! ```

use crate::api::{ClusteringEngine, InitMethod, KMeansConfig};
use crate::error::{KMeansError, Result};
use crate::history::{AssignmentVector, CenterSet, SnapshotHistory};
use crate::points::PointSet;
use serde::{Deserialize, Serialize, Serializer};

/// Cluster count used when a request does not name one.
pub const DEFAULT_K: i64 = 4;

/// Wire name of an initialization method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InitMethodKind {
    #[default]
    #[serde(rename = "random")]
    Random,
    #[serde(rename = "farthest")]
    Farthest,
    #[serde(rename = "kmeans++", alias = "k-means++")]
    KMeansPlusPlus,
    #[serde(rename = "manual")]
    Manual,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KMeansRequest {
    pub data: Vec<Vec<f64>>,
    /// Signed on the wire, so that `k < 1` is reported as an invalid configuration.
    #[serde(default = "default_k")]
    pub k: i64,
    #[serde(default)]
    pub init_method: InitMethodKind,
    /// Seed points; only read for [`InitMethodKind::Manual`].
    #[serde(default)]
    pub selected_points: Vec<Vec<f64>>,
}

fn default_k() -> i64 { DEFAULT_K }

impl KMeansRequest {
    /// The [`InitMethod`] this request asks for. Seed points are ignored unless the method is manual.
    pub fn init_method(&self) -> InitMethod<f64> {
        match self.init_method {
            InitMethodKind::Random => InitMethod::Random,
            InitMethodKind::Farthest => InitMethod::Farthest,
            InitMethodKind::KMeansPlusPlus => InitMethod::KMeansPlusPlus,
            InitMethodKind::Manual => InitMethod::Manual(self.selected_points.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KMeansResponse {
    /// Center positions per snapshot, in chronological order.
    pub centers: Vec<CenterSet<f64>>,
    /// Assignments per snapshot, parallel to `centers`.
    #[serde(serialize_with = "serialize_assignments")]
    pub assignments: Vec<AssignmentVector>,
}

impl From<SnapshotHistory<f64>> for KMeansResponse {
    fn from(history: SnapshotHistory<f64>) -> Self {
        let (centers, assignments) = history.into_parts();
        Self { centers, assignments }
    }
}

/// Unassigned points are sent as `-1`.
fn serialize_assignments<S: Serializer>(assignments: &[AssignmentVector], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let encoded: Vec<Vec<i64>> = assignments.iter()
        .map(|snapshot| snapshot.iter().map(|a| a.map_or(-1, |c| c as i64)).collect())
        .collect();
    encoded.serialize(serializer)
}

/// Run one clustering request to convergence.
pub fn run_request(request: &KMeansRequest, config: KMeansConfig<'_, f64>) -> Result<KMeansResponse> {
    let k = usize::try_from(request.k)
        .map_err(|_| KMeansError::invalid(format!("k must be at least 1, got {}", request.k)))?;
    let points = PointSet::from_rows(&request.data)?;
    let engine = ClusteringEngine::new(points, k, request.init_method(), config)?;
    Ok(engine.run()?.into())
}

/// Parse a JSON request, run it and serialize the response.
pub fn run_json(request: &str, config: KMeansConfig<'_, f64>) -> Result<String> {
    let request: KMeansRequest = serde_json::from_str(request)?;
    tracing::debug!(points = request.data.len(), k = request.k, init = ?request.init_method, "clustering request");
    let response = run_request(&request, config)?;
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use serde_json::{json, Value};

    fn seeded() -> KMeansConfig<'static, f64> {
        KMeansConfig::build().random_generator(StdRng::seed_from_u64(1)).build()
    }

    #[test]
    fn defaults_are_applied() {
        let request: KMeansRequest = serde_json::from_value(json!({ "data": [[0.0, 1.0]] })).unwrap();
        assert_eq!(request.k, 4);
        assert_eq!(request.init_method, InitMethodKind::Random);
        assert!(request.selected_points.is_empty());
    }

    #[test]
    fn method_names_follow_the_wire_format() {
        for (name, kind) in [
            ("random", InitMethodKind::Random),
            ("farthest", InitMethodKind::Farthest),
            ("kmeans++", InitMethodKind::KMeansPlusPlus),
            ("manual", InitMethodKind::Manual),
        ] {
            let request: KMeansRequest = serde_json::from_value(json!({ "data": [], "initMethod": name })).unwrap();
            assert_eq!(request.init_method, kind);
        }
        assert!(serde_json::from_value::<KMeansRequest>(json!({ "data": [], "initMethod": "spectral" })).is_err());
    }

    #[test]
    fn selected_points_only_matter_for_manual() {
        let request: KMeansRequest = serde_json::from_value(json!({
            "data": [[0.0]], "k": 1, "initMethod": "farthest", "selectedPoints": [[1.0], [2.0]]
        })).unwrap();
        assert_eq!(request.init_method(), InitMethod::Farthest);
    }

    #[test]
    fn end_to_end_manual_request() {
        let response = run_json(
            r#"{"data": [[0,0],[0,1],[10,0],[10,1]], "k": 2, "initMethod": "manual", "selectedPoints": [[0,0],[10,0]]}"#,
            seeded(),
        ).unwrap();
        let response: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(response, json!({
            "centers": [[[0.0, 0.0], [10.0, 0.0]], [[0.0, 0.5], [10.0, 0.5]]],
            "assignments": [[-1, -1, -1, -1], [0, 0, 1, 1]],
        }));
    }

    #[test]
    fn every_method_returns_parallel_sequences() {
        let mut rnd = StdRng::seed_from_u64(3);
        let data = crate::demo::demo_points(&mut rnd).unwrap();
        for kind in [InitMethodKind::Random, InitMethodKind::Farthest, InitMethodKind::KMeansPlusPlus] {
            let request = KMeansRequest { data: data.clone(), k: DEFAULT_K, init_method: kind, selected_points: vec![] };
            let response = run_request(&request, seeded()).unwrap();
            assert_eq!(response.centers.len(), response.assignments.len());
            assert!(response.centers.len() >= 2);
            assert!(response.assignments[1..].iter().flatten().all(|a| matches!(a, Some(c) if *c < DEFAULT_K as usize)));
        }
    }

    #[test]
    fn invalid_requests_are_reported() {
        assert!(matches!(run_json("{", seeded()), Err(KMeansError::Json(_))));
        assert!(matches!(
            run_json(r#"{"data": [[0,0],[1,1]], "k": 3}"#, seeded()),
            Err(KMeansError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            run_json(r#"{"data": [[0,0],[1,1]], "k": 2, "initMethod": "manual"}"#, seeded()),
            Err(KMeansError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            run_json(r#"{"data": [[0,0],[1]], "k": 1}"#, seeded()),
            Err(KMeansError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn non_positive_k_is_an_invalid_configuration() {
        for k in [0, -1, -42] {
            let request = format!(r#"{{"data": [[0,0],[1,1]], "k": {}}}"#, k);
            assert!(matches!(run_json(&request, seeded()), Err(KMeansError::InvalidConfiguration(_))), "k = {}", k);
        }
    }
}
