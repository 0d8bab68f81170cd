//! Credential store: the small set of accounts that manage the catalog.
//!
//! Usernames are case-insensitively unique. Passwords are stored as Argon2id
//! PHC strings. Whether DELETE deactivates or removes an account is a
//! deployment decision (`USER_DELETE_POLICY`).

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod password;
pub mod routes;
pub mod services;

pub use services::UserService;
