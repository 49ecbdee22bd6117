// Shared Kernel
// Cross-cutting concerns used by every module

pub mod config; // Environment-driven configuration
pub mod errors; // Shared error types
pub mod utils; // Shared utilities (logging, validation)

// Re-exports for convenience
pub use config::{CatalogConfig, SourceEndpoint};
pub use errors::{AppError, AppResult};
