use async_trait::async_trait;
use log::error;
use std::sync::Arc;

use super::users_model::{NewUser, User, UserProfile};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::Result;

/// Service for managing user accounts
pub struct UserService {
    user_repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    /// Creates a new UserService instance
    pub fn new(user_repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { user_repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<UserProfile> {
        new_user.validate()?;

        let user = self.user_repository.create(new_user).map_err(|e| {
            error!("User registration failed: {}", e);
            e
        })?;
        Ok(UserProfile::from(user))
    }

    fn get_user_by_id(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self
            .user_repository
            .find_by_id(user_id)?
            .map(UserProfile::from))
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repository.find_by_email(email)
    }

    async fn record_login(&self, user_id: &str) -> Result<()> {
        self.user_repository.touch_last_login(user_id).map_err(|e| {
            error!("Failed to record login for user {}: {}", user_id, e);
            e
        })
    }
}
