use thiserror::Error;

/// Errors raised by a [`KeyValueStorage`](crate::storage::KeyValueStorage) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Errors surfaced by store operations. Validation failures are not errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write user snapshot: {0}")]
    Storage(#[from] StorageError),
    #[error("Failed to serialize user snapshot: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors returned by [`UserClient`](crate::client::UserClient) calls.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised while starting or stopping the [`UserSystem`](crate::system::UserSystem).
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Storage setup failed: {0}")]
    Storage(#[from] StorageError),
    #[error("Store actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}
