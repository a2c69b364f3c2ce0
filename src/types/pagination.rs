//! Offset/limit windowing for list endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::config::{DEFAULT_LIST_LIMIT, DEFAULT_LIST_SKIP, MAX_LIST_LIMIT, MAX_LIST_OFFSET};

/// List query parameters
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Number of leading records to omit
    #[serde(default = "default_skip")]
    #[param(default = 0)]
    pub skip: u64,
    /// Maximum number of records to return (capped at 100)
    #[serde(default = "default_limit")]
    #[param(default = 10)]
    pub limit: u64,
}

fn default_skip() -> u64 {
    DEFAULT_LIST_SKIP
}

fn default_limit() -> u64 {
    DEFAULT_LIST_LIMIT
}

impl ListParams {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// Offset for the database query, clamped to what the store can bind.
    ///
    /// Any clamped offset is still past every row, so the window is empty.
    pub fn offset(&self) -> u64 {
        self.skip.min(MAX_LIST_OFFSET)
    }

    /// Get limit capped at maximum
    pub fn limit(&self) -> u64 {
        self.limit.min(MAX_LIST_LIMIT)
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: DEFAULT_LIST_SKIP,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}
