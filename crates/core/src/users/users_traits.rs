use async_trait::async_trait;

use super::users_model::{NewUser, User, UserProfile};
use crate::errors::Result;

/// Trait defining the contract for User repository operations.
pub trait UserRepositoryTrait: Send + Sync {
    fn create(&self, new_user: NewUser) -> Result<User>;
    fn find_by_id(&self, user_id: &str) -> Result<Option<User>>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    fn touch_last_login(&self, user_id: &str) -> Result<()>;
    fn delete(&self, user_id: &str) -> Result<usize>;
}

/// Trait defining the contract for User service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, new_user: NewUser) -> Result<UserProfile>;
    fn get_user_by_id(&self, user_id: &str) -> Result<Option<UserProfile>>;
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn record_login(&self, user_id: &str) -> Result<()>;
}
