pub mod entities;
pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use entities::*;
pub use services::{sort_chapters, FixedRandomSource, RandomSource, ThreadRandomSource};
pub use value_objects::*;
