//! Response types for HTTP handlers.

mod errors;
mod monitors;

pub use errors::*;
pub use monitors::*;
