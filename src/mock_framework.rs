//! # Mock Framework
//!
//! Utilities for testing [`UserClient`] in isolation.
//!
//! Use [`create_mock_client`] to get a client and the receiving end of its
//! request channel, then pull requests off with the `expect_*` helpers and
//! answer them by hand.

use tokio::sync::{broadcast, mpsc};

use crate::client::UserClient;
use crate::domain::{UserId, UserPatch};
use crate::error::StoreError;
use crate::messages::{ServiceResponse, StoreRequest};

/// Creates a client whose requests land on the returned receiver instead of
/// a running store actor.
pub fn create_mock_client(buffer_size: usize) -> (UserClient, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (events, _) = broadcast::channel(16);
    (UserClient::new(sender, events), receiver)
}

/// Helper to verify that the next message is an UpdateUser request
pub async fn expect_update(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(UserId, UserPatch, ServiceResponse<bool, StoreError>)> {
    match receiver.recv().await {
        Some(StoreRequest::UpdateUser { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an UpdateTags request
pub async fn expect_update_tags(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(UserId, String, ServiceResponse<bool, StoreError>)> {
    match receiver.recv().await {
        Some(StoreRequest::UpdateTags { id, raw, respond_to }) => Some((id, raw, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an AddUser request
pub async fn expect_add(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<ServiceResponse<UserId, StoreError>> {
    match receiver.recv().await {
        Some(StoreRequest::AddUser { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let add_task = tokio::spawn(async move { client.add_user().await });

        let responder = expect_add(&mut receiver).await.expect("Expected AddUser request");
        responder.send(Ok(UserId(99))).unwrap();

        let result = add_task.await.unwrap();
        assert_eq!(result.unwrap(), UserId(99));
    }
}
