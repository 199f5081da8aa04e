//! # API Route Modules
//!
//! - `quote`: `POST /api/send-quote`, validate, sanitise, and deliver a
//!   guided or technical quote request.

pub mod quote;
