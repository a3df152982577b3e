//! Ports
//!
//! Abstract interfaces implemented outside the domain crate.

pub mod integration;

pub use integration::ChatIntegration;
