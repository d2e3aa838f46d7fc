//! Key registry domain types

pub mod entity;

pub use entity::{KeyRecord, KeyRegistry, EXPIRY_FORMAT};
