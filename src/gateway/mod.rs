pub mod action;
pub mod client;

pub use action::Action;
pub use client::{GatewayClient, GENERIC_ERROR_MESSAGE};
