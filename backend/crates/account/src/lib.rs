//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Credential Model
//! - Passwords are hashed once, with Argon2id and the configured pepper
//! - Credential checks never reveal whether the email exists
//! - Reset codes are stored on the user row with an expiry and are single use
//! - No tokens or sessions are issued

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AccountConfig;
pub use error::{AccountError, AccountResult};
pub use infra::memory::InMemoryAccountRepository;
pub use infra::postgres::PgAccountRepository;
pub use presentation::router::{account_router, account_router_generic};
