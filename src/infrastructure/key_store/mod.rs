//! Key store - registry loading, validation and usage accounting

pub mod file_ledger;
pub mod generator;
pub mod ledger;
pub mod loader;
pub mod service;

pub use file_ledger::FileUsageLedger;
pub use generator::KeyGenerator;
pub use ledger::{InMemoryUsageLedger, UsageLedger};
pub use service::KeyStore;
