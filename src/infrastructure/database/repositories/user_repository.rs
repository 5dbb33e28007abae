//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::domain::user::{NewUser, User, UserRepository, UserRole};
use crate::domain::{DomainError, DomainResult, ReservationStatus, SpotStatus};
use crate::infrastructure::database::entities::{parking_spot, reservation, user};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::User => UserRole::User,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::User => user::UserRole::User,
    }
}

fn model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        username: m.username,
        email: m.email,
        password_hash: m.password_hash,
        role: entity_role_to_domain(m.role),
        created_at: m.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

fn unique_violation(e: sea_orm::DbErr) -> DomainError {
    if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
        DomainError::Conflict("Username or email already exists".to_string())
    } else {
        db_err(e)
    }
}

// ── UserRepository impl ─────────────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        let id = uuid::Uuid::new_v4().to_string();
        debug!("Creating user {} ({})", new_user.username, id);

        let model = user::ActiveModel {
            id: Set(id),
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            role: Set(domain_role_to_entity(new_user.role)),
            created_at: Set(Utc::now()),
        };
        let inserted = model.insert(&self.db).await.map_err(unique_violation)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn search(&self, keyword: &str) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .filter(
                user::Column::Username
                    .contains(keyword)
                    .or(user::Column::Email.contains(keyword)),
            )
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn update_profile(&self, id: &str, username: &str, email: &str) -> DomainResult<User> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: user::ActiveModel = existing.into();
        active.username = Set(username.to_string());
        active.email = Set(email.to_string());

        let updated = active.update(&self.db).await.map_err(unique_violation)?;
        Ok(model_to_domain(updated))
    }

    async fn delete_cascade(&self, id: &str) -> DomainResult<()> {
        debug!("Deleting user {} with reservations", id);
        let txn = self.db.begin().await.map_err(db_err)?;

        // Spots still held by this user's active reservations go back
        // to Available before the reservations disappear.
        let held: Vec<i32> = reservation::Entity::find()
            .filter(reservation::Column::UserId.eq(id))
            .filter(reservation::Column::Status.eq(ReservationStatus::Active.as_str()))
            .all(&txn)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|r| r.spot_id)
            .collect();

        if !held.is_empty() {
            parking_spot::Entity::update_many()
                .col_expr(
                    parking_spot::Column::Status,
                    Expr::value(SpotStatus::Available.as_str()),
                )
                .filter(parking_spot::Column::Id.is_in(held))
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }

        reservation::Entity::delete_many()
            .filter(reservation::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let result = user::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            });
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}
