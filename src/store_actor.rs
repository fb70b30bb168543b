//! Serves a [`UserStore`] to the presentation layer one request at a time.

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, instrument, warn};

use crate::client::UserClient;
use crate::domain::{UserId, UserPatch};
use crate::error::StoreError;
use crate::messages::{ServiceResponse, StoreRequest};
use crate::store::UserStore;

/// Capacity of the change-event broadcast; slow subscribers see `Lagged`.
const EVENT_CAPACITY: usize = 64;

/// Owns the store exclusively. Requests run to completion in arrival order,
/// so store state needs no locking.
pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    store: UserStore,
}

impl StoreActor {
    /// A `buffer_size` of zero is treated as one.
    pub fn new(mut store: UserStore, buffer_size: usize) -> (Self, UserClient) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let forward = events.clone();
        store.subscribe(move |event| {
            // No live subscribers is not an error.
            let _ = forward.send(*event);
        });

        let actor = Self { receiver, store };
        let client = UserClient::new(sender, events);
        (actor, client)
    }

    /// Processes requests until every client handle has been dropped.
    #[instrument(name = "store_actor", skip(self), fields(slot = %self.store.slot()))]
    pub async fn run(mut self) {
        info!(users = self.store.users().len(), "Store actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::AddUser { respond_to } => {
                    self.handle_add_user(respond_to);
                }
                StoreRequest::GetUser { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get_user(id).cloned()));
                }
                StoreRequest::ListUsers { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.users().to_vec()));
                }
                StoreRequest::RecordTypes { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.record_types().to_vec()));
                }
                StoreRequest::UpdateUser { id, patch, respond_to } => {
                    self.handle_update_user(id, patch, respond_to);
                }
                StoreRequest::UpdateTags { id, raw, respond_to } => {
                    self.handle_update_tags(id, raw, respond_to);
                }
                StoreRequest::DeleteUser { id, respond_to } => {
                    self.handle_delete_user(id, respond_to);
                }
                StoreRequest::ValidateUser { id, record_errors, respond_to } => {
                    self.handle_validate_user(id, record_errors, respond_to);
                }
            }
        }

        info!("Store actor stopped");
    }

    #[instrument(skip(self, respond_to))]
    fn handle_add_user(&mut self, respond_to: ServiceResponse<UserId, StoreError>) {
        debug!("Processing add_user request");
        let id = self.store.add_user();
        let _ = respond_to.send(Ok(id));
    }

    #[instrument(fields(user_id = %id), skip(self, id, patch, respond_to))]
    fn handle_update_user(
        &mut self,
        id: UserId,
        patch: UserPatch,
        respond_to: ServiceResponse<bool, StoreError>,
    ) {
        debug!("Processing update_user request");
        let result = self.store.update_user(id, patch);
        if let Err(e) = &result {
            warn!(error = %e, "Update applied in memory only");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(user_id = %id), skip(self, id, raw, respond_to))]
    fn handle_update_tags(
        &mut self,
        id: UserId,
        raw: String,
        respond_to: ServiceResponse<bool, StoreError>,
    ) {
        debug!("Processing update_tags request");
        let result = self.store.update_tags(id, &raw);
        if let Err(e) = &result {
            warn!(error = %e, "Tag update applied in memory only");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(user_id = %id), skip(self, id, respond_to))]
    fn handle_delete_user(&mut self, id: UserId, respond_to: ServiceResponse<bool, StoreError>) {
        debug!("Processing delete_user request");
        let result = self.store.delete_user(id);
        if let Err(e) = &result {
            warn!(error = %e, "Delete applied in memory only");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(user_id = %id), skip(self, id, respond_to))]
    fn handle_validate_user(
        &mut self,
        id: UserId,
        record_errors: bool,
        respond_to: ServiceResponse<Option<bool>, StoreError>,
    ) {
        debug!("Processing validate_user request");
        let valid = self.store.validate_user(id, record_errors);
        if valid.is_none() {
            debug!("User not found");
        }
        let _ = respond_to.send(Ok(valid));
    }
}
