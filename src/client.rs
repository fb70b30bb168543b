use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, instrument, warn};

use crate::domain::{RecordTypeOption, User, UserId, UserPatch};
use crate::error::ClientError;
use crate::messages::StoreRequest;
use crate::observer::ChangeEvent;

/// Generate client methods with oneshot channel boilerplate and automatic tracing.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, ClientError> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| ClientError::ActorCommunication("Actor closed".to_string()))?;

                let result = response
                    .await
                    .map_err(|_| ClientError::ActorCommunication("Actor dropped".to_string()))?;
                Ok(result?)
            }
        }
    };
}

/// Cloneable handle the presentation layer uses to drive the store actor.
#[derive(Clone)]
pub struct UserClient {
    sender: mpsc::Sender<StoreRequest>,
    events: broadcast::Sender<ChangeEvent>,
}

impl UserClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>, events: broadcast::Sender<ChangeEvent>) -> Self {
        Self { sender, events }
    }

    /// Receives every change applied after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }
}

/// Waits for the next change event, skipping over any the receiver fell
/// behind on. Returns `None` once the store actor and all clients are gone.
pub async fn next_change(events: &mut broadcast::Receiver<ChangeEvent>) -> Option<ChangeEvent> {
    loop {
        match events.recv().await {
            Ok(event) => return Some(event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Change subscriber lagged, events dropped");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}

client_method!(UserClient => fn add_user() -> UserId as StoreRequest::AddUser);
client_method!(UserClient => fn get_user(id: UserId) -> Option<User> as StoreRequest::GetUser);
client_method!(UserClient => fn list_users() -> Vec<User> as StoreRequest::ListUsers);
client_method!(UserClient => fn record_types() -> Vec<RecordTypeOption> as StoreRequest::RecordTypes);
client_method!(UserClient => fn update_user(id: UserId, patch: UserPatch) -> bool as StoreRequest::UpdateUser);
client_method!(UserClient => fn update_tags(id: UserId, raw: String) -> bool as StoreRequest::UpdateTags);
client_method!(UserClient => fn delete_user(id: UserId) -> bool as StoreRequest::DeleteUser);
client_method!(UserClient => fn validate_user(id: UserId, record_errors: bool) -> Option<bool> as StoreRequest::ValidateUser);
