//! HTTP Routes

pub mod hook;
pub mod swagger;
