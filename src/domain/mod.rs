//! Domain layer - Core business entities
//!
//! This module contains the user entity and the data shapes that cross
//! the HTTP boundary, independent of infrastructure concerns.

pub mod user;

pub use user::{CreateUser, UpdateUser, User, UserResponse};
