//! CLI module for the media gateway
//!
//! Subcommands:
//! - `serve`: run the HTTP gateway
//! - `keygen`: mint a key and append it to the registry file

pub mod keygen;
pub mod serve;

use clap::{Parser, Subcommand};

/// Mediagate - keyed media fetch gateway with an opaque download relay
#[derive(Parser)]
#[command(name = "mediagate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the gateway server
    Serve,

    /// Generate an API key and append it to the key file
    Keygen(keygen::KeygenArgs),
}
