//! Handles for talking to the cart actor.

#[macro_use]
mod macros;
pub mod cart_client;

pub use cart_client::*;
