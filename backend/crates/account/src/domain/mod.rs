//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (User, PendingResetCode)
//! - Domain value objects (Email, UserName)
//! - Repository traits (interfaces)

pub mod entity;
pub mod repository;
pub mod value_object;
