//! Auth types shared across mentorship crates.
//!
//! Provides the `IdentityHeaders` extractor and the header names the gateway injects.

pub mod identity;
