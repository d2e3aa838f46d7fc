//! Domain layer - core types, errors and collaborator traits

pub mod clock;
pub mod error;
pub mod key;
pub mod media;
pub mod proxy;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::DomainError;
pub use key::{KeyRecord, KeyRegistry};
pub use media::{MediaItem, MediaKind, MediaResolver};
