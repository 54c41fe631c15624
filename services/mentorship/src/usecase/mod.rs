pub mod relation;
pub mod user;
