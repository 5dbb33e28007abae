//! Startup wiring: logging, database and the initial admin account

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, Set};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::infrastructure::crypto::password::hash_password;
use crate::infrastructure::database::entities::user::{self, UserRole};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::DatabaseConfig;
use crate::infrastructure::init_database;

/// Initialize logging with the configured default level
pub fn init_tracing(config: &AppConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();
}

/// Connect, migrate and seed the default admin account.
///
/// Returns the live connection for building a `SeaOrmRepositoryProvider`.
pub async fn init(config: &AppConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    let db_config = DatabaseConfig {
        url: config.database.connection_url(),
    };
    let db = init_database(&db_config).await?;

    info!("Running database migrations...");
    Migrator::up(&db, None).await?;
    info!("Migrations completed");

    create_default_admin(&db, config).await;

    Ok(db)
}

/// Create the default admin account if no admin exists
async fn create_default_admin(db: &DatabaseConnection, config: &AppConfig) {
    let admins = user::Entity::find()
        .filter(user::Column::Role.eq(UserRole::Admin))
        .count(db)
        .await
        .unwrap_or(0);

    if admins > 0 {
        return;
    }

    info!("Creating default admin user...");

    let password_hash = match hash_password(&config.admin.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash admin password: {}", e);
            return;
        }
    };

    let admin = user::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        username: Set(config.admin.username.clone()),
        email: Set(config.admin.email.clone()),
        password_hash: Set(password_hash),
        role: Set(UserRole::Admin),
        created_at: Set(chrono::Utc::now()),
    };

    match admin.insert(db).await {
        Ok(_) => {
            info!("Default admin created: {}", config.admin.email);
            info!("Please change the admin password immediately!");
        }
        Err(e) => {
            error!("Failed to create admin user: {}", e);
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
