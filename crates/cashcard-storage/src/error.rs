//! Storage error type.

/// Failure in a storage backend.
///
/// "Not found" is not an error at this layer — lookups answer in-band with
/// `Option` or `bool` so the caller can apply the hiding policy itself.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend failed to execute an operation.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

#[cfg(feature = "postgres-backend")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Backend(err.to_string())
    }
}
