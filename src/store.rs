//! The user store: the live, ordered collection of user records and the
//! rules that decide which of them reach the persistent slot.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::domain::{
    default_record_types, parse_tags, validate_user, RecordTypeOption, User, UserId, UserPatch,
};
use crate::error::StoreError;
use crate::ids::TimestampIds;
use crate::observer::{ChangeEvent, Observers, SubscriptionId};
use crate::storage::KeyValueStorage;

pub const DEFAULT_SLOT: &str = "users";

/// Owns the in-memory users and mirrors their valid subset into storage.
///
/// The in-memory list is the source of truth. Users that fail validation
/// stay here so they can be corrected, but are left out of every snapshot.
pub struct UserStore {
    users: Vec<User>,
    record_types: Vec<RecordTypeOption>,
    storage: Arc<dyn KeyValueStorage>,
    slot: String,
    ids: TimestampIds,
    observers: Observers,
}

impl UserStore {
    /// Loads the store from `slot`, falling back to an empty list.
    pub fn load(storage: Arc<dyn KeyValueStorage>, slot: impl Into<String>) -> Self {
        Self::load_with_ids(storage, slot, TimestampIds::new())
    }

    /// Like [`UserStore::load`] with a caller-supplied id source.
    pub fn load_with_ids(
        storage: Arc<dyn KeyValueStorage>,
        slot: impl Into<String>,
        mut ids: TimestampIds,
    ) -> Self {
        let slot = slot.into();

        let mut users = read_snapshot(storage.as_ref(), &slot);
        for user in &mut users {
            validate_user(user, true);
            ids.observe(user.id);
        }
        info!(slot = %slot, count = users.len(), "User store loaded");

        Self {
            users,
            record_types: default_record_types(),
            storage,
            slot,
            ids,
            observers: Observers::default(),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get_user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn record_types(&self) -> &[RecordTypeOption] {
        &self.record_types
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn subscribe(&mut self, callback: impl Fn(&ChangeEvent) + Send + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Appends a blank LDAP user and returns its id.
    ///
    /// # Notes
    /// Nothing is persisted here; the blank user is invalid anyway and is
    /// picked up by the first later mutation once it has been filled in.
    #[instrument(skip(self))]
    pub fn add_user(&mut self) -> UserId {
        let id = match self.ids.next_id() {
            Some(id) => id,
            None => {
                let id = self.smallest_unused_id();
                warn!(user_id = %id, "Timestamp ids exhausted, reusing a free id");
                id
            }
        };
        self.users.push(User::new(id));
        info!(user_id = %id, "User added");
        self.observers.notify(ChangeEvent::Added(id));
        id
    }

    /// Validates the stored user with `id`, recording errors when asked.
    ///
    /// Returns `None` when no user has that id.
    #[instrument(skip(self), fields(user_id = %id))]
    pub fn validate_user(&mut self, id: UserId, record_errors: bool) -> Option<bool> {
        let user = self.users.iter_mut().find(|user| user.id == id)?;
        let valid = validate_user(user, record_errors);
        debug!(valid, "User validated");
        if record_errors {
            self.observers.notify(ChangeEvent::Validated { id, valid });
        }
        Some(valid)
    }

    /// Merges `patch` into the user with `id`, then persists.
    ///
    /// Returns `Ok(false)` without touching storage when the id is unknown.
    #[instrument(skip(self, patch), fields(user_id = %id))]
    pub fn update_user(&mut self, id: UserId, patch: UserPatch) -> Result<bool, StoreError> {
        let Some(user) = self.users.iter_mut().find(|user| user.id == id) else {
            debug!("User not found, update ignored");
            return Ok(false);
        };
        user.apply_patch(patch);
        debug!("User updated");

        let result = self.persist();
        self.observers.notify(ChangeEvent::Updated(id));
        result.map(|()| true)
    }

    /// Removes the user with `id` and persists the remaining valid users.
    #[instrument(skip(self), fields(user_id = %id))]
    pub fn delete_user(&mut self, id: UserId) -> Result<bool, StoreError> {
        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        let removed = self.users.len() != before;
        if removed {
            info!("User deleted");
        } else {
            debug!("User not found, nothing deleted");
        }

        let result = self.persist();
        if removed {
            self.observers.notify(ChangeEvent::Deleted(id));
        }
        result.map(|()| removed)
    }

    /// Replaces the tag list of `id` with the tags parsed from `raw`.
    #[instrument(skip(self), fields(user_id = %id))]
    pub fn update_tags(&mut self, id: UserId, raw: &str) -> Result<bool, StoreError> {
        let tags = parse_tags(raw);
        debug!(tag_count = tags.len(), "Tags parsed");
        self.update_user(id, UserPatch::tags(tags))
    }

    /// Lowest non-negative id no current user holds.
    fn smallest_unused_id(&self) -> UserId {
        let mut taken: Vec<i64> = self.users.iter().map(|user| user.id.0).collect();
        taken.sort_unstable();
        taken.dedup();
        let mut candidate = 0;
        for id in taken.into_iter().filter(|id| *id >= 0) {
            if id != candidate {
                break;
            }
            candidate += 1;
        }
        UserId(candidate)
    }

    /// Writes the currently valid users to the slot, replacing its content.
    #[instrument(skip(self), fields(slot = %self.slot))]
    pub fn persist(&self) -> Result<(), StoreError> {
        let valid: Vec<&User> = self.users.iter().filter(|user| user.is_valid()).collect();
        let result = serde_json::to_string(&valid)
            .map_err(StoreError::from)
            .and_then(|json| self.storage.set(&self.slot, &json).map_err(StoreError::from));

        match &result {
            Ok(()) => debug!(
                persisted = valid.len(),
                skipped = self.users.len() - valid.len(),
                "Snapshot written"
            ),
            Err(e) => error!(error = %e, "Snapshot write failed"),
        }
        result
    }
}

/// Any failure to read or decode the slot degrades to an empty list.
fn read_snapshot(storage: &dyn KeyValueStorage, slot: &str) -> Vec<User> {
    match storage.get(slot) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<User>>(&raw) {
            Ok(users) => users,
            Err(e) => {
                warn!(error = %e, "Stored users are malformed, starting empty");
                Vec::new()
            }
        },
        Ok(None) => {
            debug!("No stored users");
            Vec::new()
        }
        Err(e) => {
            warn!(error = %e, "Stored users unreadable, starting empty");
            Vec::new()
        }
    }
}
