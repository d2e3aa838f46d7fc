//! Request handlers

pub mod media;
