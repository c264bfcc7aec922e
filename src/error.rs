//! Error types shared by the storage, store and session layers.

/// Failures while reading or writing the key-value slot.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot could not be encoded for the slot.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failures during the sign-in exchange.
///
/// None of these are shown to the user in detail; the login view collapses
/// them into one generic message.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Transport-level failure talking to the provider or the backend.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response body did not have the expected shape.
    #[error("Unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    /// The backend answered but carried no session token.
    #[error("Backend returned no session token")]
    MissingToken,

    /// The identity provider rejected the sign-in before any call was made.
    #[error("Identity provider error: {0}")]
    Provider(String),

    /// Session values could not be written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
