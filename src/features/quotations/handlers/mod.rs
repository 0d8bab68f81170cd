mod quotation_handler;

pub use quotation_handler::*;
