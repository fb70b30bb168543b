use clap::Parser;
use tracing::{info, warn, Instrument};

use user_store::client::next_change;
use user_store::{setup_tracing, RecordType, StoreConfig, UserPatch, UserSystem};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();
    let config = StoreConfig::parse();

    info!(?config, "Starting user store");
    let system = UserSystem::start(&config)?;
    let client = system.client.clone();

    let mut events = client.subscribe();
    let watcher = tokio::spawn(async move {
        while let Some(event) = next_change(&mut events).await {
            info!(?event, "Store changed");
        }
    });

    let span = tracing::info_span!("editing_session");
    async {
        let existing = client.list_users().await?;
        info!(count = existing.len(), "Loaded users");

        // A fresh LDAP user becomes valid once it has a login.
        let ldap = client.add_user().await?;
        client.update_user(ldap, UserPatch::login("j.doe")).await?;
        client.update_tags(ldap, "admins; on-call ;;".to_string()).await?;

        // A local user stays out of storage until its password is set.
        let local = client.add_user().await?;
        client.update_user(local, UserPatch::login("service")).await?;
        client
            .update_user(local, UserPatch::record_type(RecordType::Local))
            .await?;
        if client.validate_user(local, true).await? == Some(false) {
            if let Some(user) = client.get_user(local).await? {
                warn!(errors = ?user.errors, "Local user needs attention");
            }
        }
        client
            .update_user(local, UserPatch::password(Some("s3cret".to_string())))
            .await?;

        let users = client.list_users().await?;
        for user in &users {
            info!(user_id = %user.id, login = %user.login, record_type = %user.record_type, tags = user.tags.len(), "User");
        }

        client.delete_user(ldap).await?;
        anyhow::Ok(())
    }
    .instrument(span)
    .await?;

    drop(client);
    system.shutdown().await?;
    watcher.await?;

    info!("Session completed successfully");
    Ok(())
}
