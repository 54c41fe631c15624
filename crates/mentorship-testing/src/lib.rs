//! Test utilities for mentorship services.
//!
//! Provides `MockAuth` identity headers and the contract fixture loader.
//! Import from dev-dependencies only; never in production code.

pub mod auth;
pub mod fixture;
