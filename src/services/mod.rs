//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and reach the store only through a Unit of Work.

mod user_service;

pub use user_service::{UserManager, UserService};
