use tokio::sync::oneshot;

use crate::domain::{RecordTypeOption, User, UserId, UserPatch};
use crate::error::StoreError;

/// Generic type aliases for actor communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests served by the store actor. Each variant carries its parameters
/// and a oneshot channel for the response; one request is handled at a time.
#[derive(Debug)]
pub enum StoreRequest {
    AddUser {
        respond_to: ServiceResponse<UserId, StoreError>,
    },
    GetUser {
        id: UserId,
        respond_to: ServiceResponse<Option<User>, StoreError>,
    },
    ListUsers {
        respond_to: ServiceResponse<Vec<User>, StoreError>,
    },
    RecordTypes {
        respond_to: ServiceResponse<Vec<RecordTypeOption>, StoreError>,
    },
    UpdateUser {
        id: UserId,
        patch: UserPatch,
        respond_to: ServiceResponse<bool, StoreError>,
    },
    UpdateTags {
        id: UserId,
        raw: String,
        respond_to: ServiceResponse<bool, StoreError>,
    },
    DeleteUser {
        id: UserId,
        respond_to: ServiceResponse<bool, StoreError>,
    },
    ValidateUser {
        id: UserId,
        record_errors: bool,
        respond_to: ServiceResponse<Option<bool>, StoreError>,
    },
}
