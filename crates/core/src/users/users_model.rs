use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::users::users_errors::UserError;

lazy_static! {
    static ref EMAIL_FORMAT: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Domain model for a user account, including the stored credential hash.
/// Never serialized directly; API responses use [`UserProfile`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub role_name: String,
    pub email: String,
    pub address: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for users
#[derive(
    Queryable, Identifiable, Selectable, Insertable, AsChangeset, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub full_name: String,
    pub role_name: String,
    pub email: String,
    pub address: Option<String>,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new user record. The password is hashed by the
/// caller; the core never sees the plaintext credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub address: Option<String>,
    pub password_hash: String,
}

impl NewUser {
    /// Validates the new user data
    pub fn validate(&self) -> Result<(), UserError> {
        if self.full_name.trim().is_empty() {
            return Err(UserError::InvalidData(
                "Full name cannot be empty".to_string(),
            ));
        }
        if !EMAIL_FORMAT.is_match(&self.email) {
            return Err(UserError::InvalidData("Invalid email format".to_string()));
        }
        if self.password_hash.trim().is_empty() {
            return Err(UserError::InvalidData(
                "Password hash cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Public view of a user, safe to return from the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        User {
            id: db.id,
            full_name: db.full_name,
            role_name: db.role_name,
            email: db.email,
            address: db.address,
            password_hash: db.password_hash,
            created_at: DateTime::from_naive_utc_and_offset(db.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(db.updated_at, Utc),
        }
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            address: user.address,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
