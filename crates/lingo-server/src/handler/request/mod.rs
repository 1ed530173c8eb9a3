//! Request types for HTTP handlers.

mod simplify;
mod tasks;
mod validations;

pub use simplify::*;
pub use tasks::*;
pub use validations::*;
