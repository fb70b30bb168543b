//! # User store
//!
//! An ordered, editable list of user records (login, password, record type,
//! tags) with field-level validation. The valid subset is mirrored into a
//! named key-value slot after every persisting edit.
//!
//! ## Layers
//!
//! - **Domain** - records, patches, tags and validation rules → [`domain`]
//! - **Store** - the single owner of the live list → [`UserStore`]
//! - **Storage** - where snapshots go → [`KeyValueStorage`], [`MemoryStorage`], [`FileStorage`]
//! - **Actor** - serves the store one request at a time → [`StoreActor`], [`UserClient`]
//! - **System** - configuration, startup and shutdown → [`StoreConfig`], [`UserSystem`]
//!
//! ## Example Usage
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use user_store::{StoreConfig, UserPatch, UserSystem};
//!
//! let system = UserSystem::start(&StoreConfig::default())?;
//! let id = system.client.add_user().await?;
//! system.client.update_user(id, UserPatch::login("alice")).await?;
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod ids;
pub mod messages;
pub mod observer;
pub mod storage;
pub mod store;
pub mod store_actor;
pub mod system;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

pub use client::UserClient;
pub use config::StoreConfig;
pub use domain::{
    parse_tags, validate_user, FieldErrors, RecordType, RecordTypeOption, Tag, User, UserId,
    UserPatch,
};
pub use error::{ClientError, StorageError, StoreError, SystemError};
pub use observer::{ChangeEvent, SubscriptionId};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{UserStore, DEFAULT_SLOT};
pub use store_actor::StoreActor;
pub use system::{setup_tracing, UserSystem};
