//! OTP pairing digest and candidate passphrase enumeration.
//!
//! The pairing protocol derives its authentication token as
//! `SHA-256(pin || salt || passphrase)`, rendered as uppercase hex. This crate
//! computes that digest bit-for-bit and enumerates candidate passphrases so a
//! caller can recover a forgotten passphrase from a known pin, salt and digest.
//!
//! Candidates are produced lazily in two phases: a dictionary of likely
//! passphrases, then every string over an alphabet for a range of lengths.

pub mod candidates;
pub mod error;
pub mod hash;

pub use candidates::{
    Alphabet, Candidate, Candidates, DEFAULT_ALPHABET, DEFAULT_MAX_LEN, DEFAULT_MIN_LEN,
    DEFAULT_WORDS, Dictionary, Exhaustive, Phase, Pulled, exhaustive_count,
};
pub use error::Error;
pub use hash::{
    DIGEST_LEN, HEX_CHARS, HEX_LEN, OtpHasher, TargetDigest, hex_to_nibble, otp_hash,
    to_hex_string, to_hex_upper,
};
