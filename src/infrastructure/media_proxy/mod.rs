//! Media relay infrastructure

pub mod relay;

pub use relay::{MediaRelay, RelayStream, RelayedMedia};
