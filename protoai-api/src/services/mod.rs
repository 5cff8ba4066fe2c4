//! Service layer
//!
//! The intent dispatcher and the outbound discovery client it is built on.

pub mod discovery;
pub mod intent_service;

pub use discovery::{DiscoveryClient, DiscoveryError, HttpDiscoveryClient};
pub use intent_service::{DispatchError, IntentDispatcher};
