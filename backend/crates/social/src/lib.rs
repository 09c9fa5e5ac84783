//! Social Graph Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Edges, outcomes, posts, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Relationship Integrity
//! - Follow, block and like edges live in one store as tagged [`Edge`] records
//! - Every operation runs inside a single edge-store transaction
//! - Creating a block severs follows in both directions
//! - Blocked parties cannot follow each other or like each other's posts
//! - Conflicts are reported as outcomes, never as errors

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::SocialConfig;
pub use domain::edge::{Edge, EdgeFilter, EdgeKind};
pub use domain::outcome::Outcome;
pub use error::{SocialError, SocialResult};
pub use infra::memory::InMemorySocialRepository;
pub use infra::postgres::PgSocialRepository;
pub use presentation::router::{social_router, social_router_generic};

pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
