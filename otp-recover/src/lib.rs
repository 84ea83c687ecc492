//! Recovers an OTP pairing passphrase by search.
//!
//! Given the pin, salt and digest from a pairing request, tries a dictionary of
//! likely passphrases and then every short string over an alphabet until one
//! hashes to the digest. The hashing and enumeration live in `otp-digest`;
//! this crate holds the search configuration, the driver and console output.

pub mod config;
pub mod error;
pub mod report;
pub mod search;

pub use config::{
    DEFAULT_PIN, DEFAULT_SALT, DEFAULT_TARGET, SearchConfig, SearchOptions, load_wordlist,
};
pub use error::Error;
pub use report::ConsoleReporter;
pub use search::{Reporter, Search, SearchOutcome, SearchState, Silent, search};
