//! Node middleware for the product assistant graph.
//!
//! Re-exports [`LoggingMiddleware`].

mod logging;

pub use logging::LoggingMiddleware;
