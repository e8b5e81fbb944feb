// Module declarations
pub(crate) mod users_errors;
pub(crate) mod users_model;
pub(crate) mod users_repository;
pub(crate) mod users_service;
pub(crate) mod users_traits;

// Re-export the public interface
pub use users_errors::UserError;
pub use users_model::{NewUser, User, UserDB, UserProfile};
pub use users_repository::UserRepository;
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
