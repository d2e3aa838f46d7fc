//! Infrastructure layer - key store, relay and provider implementations

pub mod key_store;
pub mod logging;
pub mod media_proxy;
pub mod resolvers;
