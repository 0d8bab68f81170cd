//! Features layer - One module per business capability

pub mod catalog;
pub mod notifications;
pub mod posts;
pub mod products;
pub mod quotations;
pub mod users;
