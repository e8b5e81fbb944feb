use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use super::users_errors::UserError;
use super::users_model::{NewUser, User, UserDB};
use super::users_traits::UserRepositoryTrait;
use crate::constants::ROLE_USER;
use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::users;

/// Repository for managing user records in the database
pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    /// Creates a new UserRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl UserRepositoryTrait for UserRepository {
    fn create(&self, new_user: NewUser) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let email = new_user.email.to_lowercase();

        let existing = users::table
            .filter(users::email.eq(&email))
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(UserError::from)?;
        if existing.is_some() {
            return Err(
                UserError::AlreadyExists(format!("User with email {} already exists", email))
                    .into(),
            );
        }

        let now = Utc::now().naive_utc();
        let row = UserDB {
            id: Uuid::now_v7().to_string(),
            full_name: new_user.full_name,
            role_name: ROLE_USER.to_string(),
            email,
            address: new_user.address,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };

        diesel::insert_into(users::table)
            .values(&row)
            .get_result::<UserDB>(&mut conn)
            .map(User::from)
            .map_err(|e| UserError::from(e).into())
    }

    fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;

        let row = users::table
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(UserError::from)?;
        Ok(row.map(User::from))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;

        let row = users::table
            .filter(users::email.eq(email.to_lowercase()))
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(UserError::from)?;
        Ok(row.map(User::from))
    }

    fn touch_last_login(&self, user_id: &str) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        diesel::update(users::table.find(user_id))
            .set(users::updated_at.eq(Utc::now().naive_utc()))
            .execute(&mut conn)
            .map_err(UserError::from)?;
        Ok(())
    }

    fn delete(&self, user_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;

        diesel::delete(users::table.find(user_id))
            .execute(&mut conn)
            .map_err(|e| UserError::from(e).into())
    }
}
