pub mod health;
pub mod relation;
pub mod user;
