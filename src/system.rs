//! Startup, wiring and shutdown of the store actor.

use std::sync::Arc;

use tracing::{error, info};

use crate::client::UserClient;
use crate::config::StoreConfig;
use crate::error::{StorageError, SystemError};
use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage};
use crate::store::UserStore;
use crate::store_actor::StoreActor;

/// Installs the global tracing subscriber. Call once per process.
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}

/// The running store: one actor task plus the client handed to the UI.
pub struct UserSystem {
    pub client: UserClient,
    handle: tokio::task::JoinHandle<()>,
}

impl UserSystem {
    /// Builds the storage named by `config`, loads the store and starts the actor.
    pub fn start(config: &StoreConfig) -> Result<Self, SystemError> {
        let storage: Arc<dyn KeyValueStorage> = match &config.storage_dir {
            Some(dir) => {
                info!(dir = %dir.display(), "Using file storage");
                Arc::new(FileStorage::new(dir))
            }
            None => {
                info!("Using in-memory storage");
                Arc::new(MemoryStorage::new())
            }
        };
        Self::with_storage(storage, config)
    }

    /// Starts the actor over an existing storage backend.
    pub fn with_storage(storage: Arc<dyn KeyValueStorage>, config: &StoreConfig) -> Result<Self, SystemError> {
        // An unusable slot name would make every later write fail. Other read
        // errors are left to the store, which starts empty.
        if let Err(e @ StorageError::InvalidKey(_)) = storage.get(&config.slot) {
            return Err(e.into());
        }

        let store = UserStore::load(storage, config.slot.clone());
        let (actor, client) = StoreActor::new(store, config.channel_capacity);
        let handle = tokio::spawn(actor.run());

        info!(slot = %config.slot, "User system started");
        Ok(Self { client, handle })
    }

    /// Drops the client and waits for the actor to drain its queue.
    ///
    /// Clones of the client held elsewhere keep the actor alive until they
    /// are dropped too.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down user system...");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Store actor task failed: {:?}", e);
            return Err(SystemError::ActorTask(e));
        }

        info!("User system shutdown complete.");
        Ok(())
    }
}
