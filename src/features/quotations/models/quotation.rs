use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle state of a quotation. Stored as lowercase text; any transition
/// between states is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotationStatus {
    Pending,
    Invoiced,
    Cancelled,
}

impl QuotationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QuotationStatus::Pending => "pending",
            QuotationStatus::Invoiced => "invoiced",
            QuotationStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for QuotationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(QuotationStatus::Pending),
            "invoiced" => Ok(QuotationStatus::Invoiced),
            "cancelled" => Ok(QuotationStatus::Cancelled),
            other => Err(format!(
                "'{}' is not a valid status (expected pending, invoiced or cancelled)",
                other
            )),
        }
    }
}

impl fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database model for a quotation
#[derive(Debug, Clone, FromRow)]
pub struct Quotation {
    pub id: Uuid,
    pub quote_number: String,
    pub client_name: String,
    pub client_email: String,
    pub total_price: Decimal,
    pub status: String,
    pub user_id: Uuid,
    pub document_url: String,
    pub document_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Quotation joined with the owning user's username, for list views
#[derive(Debug, Clone, FromRow)]
pub struct QuotationWithOwner {
    pub id: Uuid,
    pub quote_number: String,
    pub client_name: String,
    pub client_email: String,
    pub total_price: Decimal,
    pub status: String,
    pub user_id: Uuid,
    pub username: String,
    pub document_url: String,
    pub document_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_known_values() {
        assert_eq!(
            "pending".parse::<QuotationStatus>().unwrap(),
            QuotationStatus::Pending
        );
        assert_eq!(
            "invoiced".parse::<QuotationStatus>().unwrap(),
            QuotationStatus::Invoiced
        );
        assert_eq!(
            "cancelled".parse::<QuotationStatus>().unwrap(),
            QuotationStatus::Cancelled
        );
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!("archived".parse::<QuotationStatus>().is_err());
        assert!("PENDING".parse::<QuotationStatus>().is_err());
        assert!("".parse::<QuotationStatus>().is_err());
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            QuotationStatus::Pending,
            QuotationStatus::Invoiced,
            QuotationStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<QuotationStatus>().unwrap(), status);
        }
    }
}
