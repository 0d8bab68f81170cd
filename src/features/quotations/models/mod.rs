mod quotation;

pub use quotation::{Quotation, QuotationStatus, QuotationWithOwner};
