//! Transit data models, types, and traits.

pub mod traits;
pub mod types;

// Re-exports for convenience
pub use traits::{Route, TransitProvider, TransitStation};
pub use types::{Result, TransitError};
