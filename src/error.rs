use thiserror::Error;

/// Errors reported by the clustering engine and the request glue around it.
#[derive(Debug, Error)]
pub enum KMeansError {
    /// Rejected before any computation: bad `k`, ragged or empty point set, wrong seed points.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("non-finite coordinate in point {index} (dimension {dim})")]
    NonFiniteInput { index: usize, dim: usize },
    #[error("non-finite coordinate in seed point {index} (dimension {dim})")]
    NonFiniteSeed { index: usize, dim: usize },
    /// Cluster ended up without points and no other cluster could spare one.
    #[error("cluster {cluster} is empty and cannot be reseeded")]
    DegenerateCluster { cluster: usize },
    #[error("centroid of cluster {cluster} is not finite")]
    NonFiniteCentroid { cluster: usize },
    #[error("centroids still moving after {iterations} iterations")]
    NotConverged { iterations: usize },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Convenient alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, KMeansError>;

impl KMeansError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        KMeansError::InvalidConfiguration(msg.into())
    }
}
