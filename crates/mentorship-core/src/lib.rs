//! Service plumbing shared by mentorship binaries: config loading, tracing,
//! request-id middleware and the `{"message"}` response body.

pub mod config;
pub mod middleware;
pub mod response;
pub mod serde;
pub mod tracing;
