//! Provider resolver implementations
//!
//! Each resolver is the black-box collaborator for one upstream provider.
//! Anything provider-specific beyond "JSON in, media URLs out" stays here.

pub mod terabox;
pub mod tiktok;

pub use terabox::TeraboxResolver;
pub use tiktok::TikTokResolver;
