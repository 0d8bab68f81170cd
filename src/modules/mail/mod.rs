//! Transactional email over SMTP.

mod mailer;

pub use mailer::Mailer;
