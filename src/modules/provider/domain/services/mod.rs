pub mod chapter_ordering;
pub mod normalization;
pub mod random_source;

pub use chapter_ordering::{compare_chapters, compare_labels, sort_chapters};
pub use random_source::{FixedRandomSource, RandomSource, ThreadRandomSource};
