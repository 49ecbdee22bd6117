pub mod catalog_entry;
pub mod chapter;

pub use catalog_entry::*;
pub use chapter::*;
