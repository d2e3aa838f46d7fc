//! Opaque media-proxy token encoding

pub mod token;
