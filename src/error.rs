use thiserror::Error;

/// Failure of a single request against the metadata provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("provider returned status {status} for {path}: {message}")]
    Status {
        path: String,
        status: u16,
        message: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse provider JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// The provider answered and the resource is not there under this type:
    /// a 404, or a body that does not decode as the requested kind. Every
    /// other failure (network, rate limit, auth, 5xx) leaves the question open.
    pub fn is_miss(&self) -> bool {
        match self {
            FetchError::NotFound(_) | FetchError::Decode(_) => true,
            FetchError::Status { status, .. } => *status == 404,
            FetchError::Transport(_) => false,
        }
    }
}

/// Errors reported across the catalog boundary.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("title not found: {0}")]
    NotFound(String),

    #[error("metadata provider unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl CatalogError {
    pub(crate) fn from_fetch(err: FetchError, id: &str) -> Self {
        match err {
            FetchError::NotFound(_) => CatalogError::NotFound(id.to_string()),
            FetchError::Status { status: 404, .. } => CatalogError::NotFound(id.to_string()),
            other => CatalogError::UpstreamUnavailable(other.to_string()),
        }
    }
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> FetchError {
        FetchError::Status {
            path: "/movie/1".to_string(),
            status: code,
            message: String::new(),
        }
    }

    #[test]
    fn only_definitive_answers_count_as_misses() {
        assert!(FetchError::NotFound("/movie/1".to_string()).is_miss());
        assert!(status(404).is_miss());
        let decode = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        assert!(FetchError::Decode(decode).is_miss());

        for code in [401, 403, 429, 500, 503] {
            assert!(!status(code).is_miss(), "status {} is not a miss", code);
        }
    }

    #[test]
    fn fetch_not_found_maps_to_catalog_not_found_with_id() {
        let err = CatalogError::from_fetch(FetchError::NotFound("/tv/9".to_string()), "9");
        assert!(matches!(err, CatalogError::NotFound(id) if id == "9"));
    }
}
