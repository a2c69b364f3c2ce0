//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Listing
// =============================================================================

/// Default number of leading records to omit
pub const DEFAULT_LIST_SKIP: u64 = 0;

/// Default maximum number of records returned by a list request
pub const DEFAULT_LIST_LIMIT: u64 = 10;

/// Hard cap on records per list request to prevent excessive queries
pub const MAX_LIST_LIMIT: u64 = 100;

/// Largest offset the store can bind (SQLite integers are signed 64-bit)
pub const MAX_LIST_OFFSET: u64 = i64::MAX as u64;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (local SQLite file, created on demand)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://users.db?mode=rwc";

/// Default size of the connection pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

// =============================================================================
// Resources
// =============================================================================

/// Entity label used in not-found and conflict messages
pub const ENTITY_USER: &str = "User";
