mod quotation_dto;

pub use quotation_dto::*;
