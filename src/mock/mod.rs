//! Simulated-backend plumbing shared by the mock services.
//!
//! Real deployments replace the mock services with live ones; nothing in
//! this module is needed at that point. It provides
//!
//! - [`Latency`] and [`delay`]: per-operation simulated response times
//! - [`ApiEnvelope`]: the `{success, data, message, code}` response shape

mod envelope;
mod latency;

pub use envelope::ApiEnvelope;
pub use latency::{delay, Latency};
