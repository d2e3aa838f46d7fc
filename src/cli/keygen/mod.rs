//! Keygen command - mints registry keys

use std::path::PathBuf;

use chrono::{Duration, Utc};
use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::key_store::KeyGenerator;

#[derive(Args)]
pub struct KeygenArgs {
    /// Days until the key expires
    #[arg(long, default_value_t = 30)]
    pub days: u32,

    /// Mark the key rate-limited with the configured default cap
    #[arg(long)]
    pub limit: bool,

    /// Per-key request cap (implies rate limiting)
    #[arg(long)]
    pub cap: Option<u32>,

    /// Key prefix
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// How many keys to generate
    #[arg(long, default_value_t = 1)]
    pub count: u32,

    /// Key file to append to (defaults to the configured registry file)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

pub fn run(args: KeygenArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    let path = args.file.unwrap_or(config.keys.key_file);

    let generator = KeyGenerator::new(&args.prefix);
    let expiry = (Utc::now() + Duration::days(i64::from(args.days))).date_naive();

    for _ in 0..args.count {
        let key = generator.generate();
        let line = KeyGenerator::format_line(&key, expiry, args.limit, args.cap);
        KeyGenerator::append_line(&path, &line)?;
        println!("{line}");
    }

    Ok(())
}
