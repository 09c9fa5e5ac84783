//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, NIST SP 800-63B length policy)
//! - One-time reset codes
//! - Typed environment configuration

pub mod config;
pub mod password;
pub mod reset_code;
