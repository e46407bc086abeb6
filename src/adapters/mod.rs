//! Adapters Layer
//!
//! Inbound adapters drive the application (HTTP); outbound adapters
//! implement the domain ports (storage, backend client).

pub mod inbound;
pub mod outbound;
