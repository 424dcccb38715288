//! The actor that owns the cart and applies add, remove and update requests.

pub mod service;

pub use service::*;
