//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Edges (follow, block, like) and their filters
//! - Operation outcomes
//! - Posts
//! - Pure services (pair keys, block filtering, post validation)
//! - Repository traits (interfaces)

pub mod edge;
pub mod outcome;
pub mod post;
pub mod repository;
pub mod services;
