use std::sync::Arc;

use crate::config::StoreConfig;
use crate::domain::{RecordType, Tag, User, UserId, UserPatch, LOGIN_ERROR};
use crate::storage::{KeyValueStorage, MemoryStorage};
use crate::store::DEFAULT_SLOT;
use crate::system::UserSystem;

fn start(storage: &MemoryStorage) -> UserSystem {
    UserSystem::with_storage(Arc::new(storage.clone()), &StoreConfig::default()).unwrap()
}

fn persisted(storage: &MemoryStorage) -> Vec<User> {
    let raw = storage.get(DEFAULT_SLOT).unwrap().unwrap_or_else(|| "[]".to_string());
    serde_json::from_str(&raw).unwrap()
}

fn persisted_ids(storage: &MemoryStorage) -> Vec<UserId> {
    persisted(storage).into_iter().map(|user| user.id).collect()
}

#[tokio::test]
async fn test_editing_session_flow() {
    let storage = MemoryStorage::new();
    let system = start(&storage);
    let client = system.client.clone();

    // Two users added back to back get distinct, increasing ids.
    let first = client.add_user().await.unwrap();
    let second = client.add_user().await.unwrap();
    assert!(second > first);
    assert!(persisted(&storage).is_empty());

    client.update_user(first, UserPatch::login("alice")).await.unwrap();
    client.update_user(second, UserPatch::login("bob")).await.unwrap();
    assert_eq!(persisted_ids(&storage), vec![first, second]);

    // An over-long login keeps the edit visible but drops the user from storage.
    let long = "x".repeat(101);
    client.update_user(first, UserPatch::login(long.clone())).await.unwrap();
    assert_eq!(client.get_user(first).await.unwrap().unwrap().login, long);
    assert_eq!(persisted_ids(&storage), vec![second]);

    assert_eq!(client.validate_user(first, true).await.unwrap(), Some(false));
    let errors = client.get_user(first).await.unwrap().unwrap().errors;
    assert_eq!(errors.login.as_deref(), Some(LOGIN_ERROR));

    // Tags: trimmed, empties and oversized segments dropped.
    let raw = format!("a; b ;;{}", "t".repeat(51));
    client.update_tags(second, raw).await.unwrap();
    assert_eq!(
        persisted(&storage)[0].tags,
        vec![Tag::new("a"), Tag::new("b")]
    );

    client.delete_user(second).await.unwrap();
    let ids: Vec<UserId> = client.list_users().await.unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![first]);
    assert!(persisted(&storage).is_empty());

    drop(client);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reload_keeps_only_valid_users() {
    let storage = MemoryStorage::new();

    let system = start(&storage);
    let ldap = system.client.add_user().await.unwrap();
    system.client.update_user(ldap, UserPatch::login("ldap-user")).await.unwrap();

    let local = system.client.add_user().await.unwrap();
    system
        .client
        .update_user(
            local,
            UserPatch {
                record_type: Some(RecordType::Local),
                login: Some("local-user".into()),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap();
    system.shutdown().await.unwrap();

    let system = start(&storage);
    let users = system.client.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, ldap);
    assert!(users[0].errors.is_empty());
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_corrupt_slot_starts_empty_and_recovers() {
    let storage = MemoryStorage::new();
    storage.set(DEFAULT_SLOT, "[{\"id\": \"oops\"").unwrap();

    let system = start(&storage);
    assert!(system.client.list_users().await.unwrap().is_empty());

    let id = system.client.add_user().await.unwrap();
    system.client.update_user(id, UserPatch::login("fresh")).await.unwrap();
    assert_eq!(persisted_ids(&storage), vec![id]);
    system.shutdown().await.unwrap();
}
