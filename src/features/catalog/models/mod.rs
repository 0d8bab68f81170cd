mod reference;

pub use reference::{CatalogEntry, Category, Frame, PriceEntry};
