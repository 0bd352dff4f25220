//! SeaORM implementation of the user repository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{db_err, unique_err};
use crate::domain::user::{CreateUserDto, GetUserDto, UpdateUserDto, UserRepositoryInterface};
use crate::domain::{DomainError, DomainResult, User, UserRole};
use crate::infrastructure::database::entities::user;
use crate::shared::PaginatedResult;

const DUPLICATE_USER: &str = "Username or email already exists";

impl From<user::UserRole> for UserRole {
    fn from(role: user::UserRole) -> Self {
        match role {
            user::UserRole::Admin => Self::Admin,
            user::UserRole::User => Self::User,
        }
    }
}

impl From<UserRole> for user::UserRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::Admin,
            UserRole::User => Self::User,
        }
    }
}

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            full_name: m.full_name,
            phone_number: m.phone_number,
            password_hash: m.password_hash,
            role: m.role.into(),
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
            last_login_at: m.last_login_at,
        }
    }
}

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_where(&self, column: user::Column, value: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(column.eq(value))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(User::from))
    }

    /// Load, mutate and save a user row. `NotFound` when the id is unknown.
    async fn patch<F>(&self, id: i32, f: F) -> DomainResult<()>
    where
        F: FnOnce(&mut user::ActiveModel) + Send,
    {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        let mut active: user::ActiveModel = existing.into();
        f(&mut active);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        debug!("Creating account {} <{}>", dto.username, dto.email);
        let now = Utc::now();

        user::ActiveModel {
            username: Set(dto.username),
            email: Set(dto.email),
            full_name: Set(dto.full_name),
            phone_number: Set(dto.phone_number),
            password_hash: Set(dto.password_hash),
            role: Set(dto.role.into()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map(User::from)
        .map_err(unique_err(DUPLICATE_USER))
    }

    async fn list_users(&self, dto: GetUserDto) -> DomainResult<PaginatedResult<User>> {
        let mut query = user::Entity::find();

        if let Some(search) = dto.search.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(user::Column::Username.contains(search))
                    .add(user::Column::Email.contains(search))
                    .add(user::Column::FullName.contains(search)),
            );
        }
        if let Some(role) = dto.role {
            query = query.filter(user::Column::Role.eq(user::UserRole::from(role)));
        }

        let (column, ascending) = match dto.sort_by.as_deref() {
            Some("username") => (user::Column::Username, true),
            Some("email") => (user::Column::Email, true),
            Some("full_name") => (user::Column::FullName, true),
            _ => (user::Column::CreatedAt, false),
        };
        query = if ascending {
            query.order_by_asc(column).order_by_asc(user::Column::Id)
        } else {
            query.order_by_desc(column).order_by_desc(user::Column::Id)
        };

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let page = dto.page;
        let users = query
            .offset(page.offset())
            .limit(page.limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(User::from)
            .collect();

        Ok(PaginatedResult::new(users, total, page.page, page.limit))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        self.find_where(user::Column::Username, username).await
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.find_where(user::Column::Email, email).await
    }

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(User::from))
    }

    async fn count_users(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn update_user(&self, id: i32, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let Some(existing) = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();
        if let Some(full_name) = dto.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(email) = dto.email {
            active.email = Set(email);
        }
        if let Some(phone) = dto.phone_number {
            active.phone_number = Set(Some(phone));
        }
        if let Some(role) = dto.role {
            active.role = Set(role.into());
        }
        if let Some(is_active) = dto.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        active
            .update(&self.db)
            .await
            .map(|m| Some(User::from(m)))
            .map_err(unique_err(DUPLICATE_USER))
    }

    async fn update_user_password(&self, id: i32, new_password_hash: &str) -> DomainResult<()> {
        let hash = new_password_hash.to_string();
        self.patch(id, move |u| {
            u.password_hash = Set(hash);
            u.updated_at = Set(Utc::now());
        })
        .await
    }

    async fn touch_last_login(&self, id: i32) -> DomainResult<()> {
        self.patch(id, |u| u.last_login_at = Set(Some(Utc::now())))
            .await
    }

    async fn delete_user(&self, id: i32) -> DomainResult<bool> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
