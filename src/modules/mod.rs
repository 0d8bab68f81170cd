//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for external services: media storage backends and the
//! SMTP mailer.

pub mod mail;
pub mod storage;
