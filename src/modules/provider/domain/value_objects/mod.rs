pub mod credit_role;
pub mod manga_source;
pub mod publication_status;
pub mod search_criteria;

pub use credit_role::*;
pub use manga_source::*;
pub use publication_status::*;
pub use search_criteria::*;
