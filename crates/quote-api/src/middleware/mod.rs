//! # Middleware
//!
//! - `rate_limit`: sliding-window per-IP limits on the quote endpoint.

pub mod rate_limit;
