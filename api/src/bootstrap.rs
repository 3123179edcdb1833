//! Start-up wiring: picks the backends named in the configuration and
//! builds the application state over them.

use std::sync::Arc;

use ag_api::{AppState, Collaborators};
use ag_core::repositories::{InMemoryAccountRepository, InMemoryRoleRepository};
use ag_core::services::{InMemoryObjectStorage, RoleService};
use ag_infra::database::{DatabasePool, MySqlAccountRepository, MySqlRoleRepository};
use ag_infra::mail::create_notification_sink;
use ag_infra::storage::LocalObjectStorage;
use ag_shared::{AppConfig, StorageBackend};
use anyhow::Context;

pub async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let notifications =
        create_notification_sink(&config.mail).context("failed to configure email delivery")?;

    let collaborators = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!(
                event = "memory_backend",
                "Using in-memory storage; accounts are lost on restart"
            );
            Collaborators {
                accounts: Arc::new(InMemoryAccountRepository::new()),
                roles: Arc::new(InMemoryRoleRepository::new()),
                notifications,
                storage: Arc::new(InMemoryObjectStorage::new()),
                database: None,
            }
        }
        StorageBackend::Mysql => {
            let database = DatabasePool::new(config.database.clone())
                .await
                .context("failed to connect to MySQL")?;
            if config.database.ensure_schema {
                database
                    .ensure_schema()
                    .await
                    .context("failed to create tables")?;
            }
            tracing::info!(event = "database_ready", stats = %database.get_statistics(), "Database ready");

            let storage = LocalObjectStorage::from_config(&config.storage);
            storage
                .prepare()
                .await
                .with_context(|| format!("failed to prepare {}", storage.root().display()))?;

            let pool = database.get_pool().clone();
            Collaborators {
                accounts: Arc::new(MySqlAccountRepository::new(pool.clone())),
                roles: Arc::new(MySqlRoleRepository::new(pool)),
                notifications,
                storage: Arc::new(storage),
                database: Some(database),
            }
        }
    };

    let seeded = RoleService::new(collaborators.roles.clone())
        .seed_defaults()
        .await
        .context("failed to seed default roles")?;
    tracing::info!(event = "roles_seeded", count = seeded, "Default roles checked");

    Ok(AppState::new(config, collaborators))
}
