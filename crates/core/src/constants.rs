/// Role assigned to newly registered users.
pub const ROLE_USER: &str = "USER";

/// Role allowed to list quotes across all owners.
pub const ROLE_ADMIN: &str = "ADMIN";

/// Currency label stored on quotes when the request omits one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Smallest page size accepted by paginated listings.
pub const MIN_PAGE_SIZE: i64 = 1;

/// Largest page size accepted by paginated listings.
pub const MAX_PAGE_SIZE: i64 = 100;
