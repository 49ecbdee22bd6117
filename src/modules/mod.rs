pub mod aggregation;
pub mod library;
pub mod provider;
