use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::error::Error;

/// Length of a SHA-256 digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Length of a hex-rendered digest in characters.
pub const HEX_LEN: usize = DIGEST_LEN * 2;

/// Uppercase hex lookup table, matching the rendering used by the pairing server.
pub const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";

/// Computes the OTP pairing digest for a passphrase.
///
/// The plaintext is `pin || salt || passphrase`, hashed as UTF-8 bytes with
/// SHA-256 and rendered as 64 uppercase hex characters. The order of the
/// three parts is fixed by the pairing protocol.
pub fn otp_hash(pin: &str, salt: &str, passphrase: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pin.as_bytes());
    hasher.update(salt.as_bytes());
    hasher.update(passphrase.as_bytes());
    let hash: [u8; DIGEST_LEN] = hasher.finalize().into();

    to_hex_string(&hash)
}

/// Convert a raw digest to uppercase hex (stack allocated)
#[inline]
pub fn to_hex_upper(hash: &[u8; DIGEST_LEN]) -> [u8; HEX_LEN] {
    let mut out = [0u8; HEX_LEN];
    for (i, byte) in hash.iter().enumerate() {
        out[i * 2] = HEX_CHARS[(byte >> 4) as usize];
        out[i * 2 + 1] = HEX_CHARS[(byte & 0x0f) as usize];
    }
    out
}

/// Convert hex ASCII character to nibble value (0-15)
#[inline]
pub fn hex_to_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'F' => Some(c - b'A' + 10),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

/// Convert a raw digest to an uppercase hex `String`
pub fn to_hex_string(hash: &[u8; DIGEST_LEN]) -> String {
    let hex = to_hex_upper(hash);
    // SAFETY: every byte was taken from HEX_CHARS, which is ASCII.
    unsafe { String::from_utf8_unchecked(hex.to_vec()) }
}

/// A SHA-256 state keyed with a pin and salt.
///
/// `pin || salt` is absorbed once; every call clones that state and feeds only
/// the passphrase, so the result is identical to [`otp_hash`] without
/// rehashing the shared prefix for each candidate.
#[derive(Clone)]
pub struct OtpHasher {
    keyed: Sha256,
}

impl OtpHasher {
    pub fn new(pin: &str, salt: &str) -> Self {
        let mut keyed = Sha256::new();
        keyed.update(pin.as_bytes());
        keyed.update(salt.as_bytes());
        Self { keyed }
    }

    /// Returns the raw 32-byte digest of `pin || salt || passphrase`.
    #[inline(always)]
    pub fn digest(&self, passphrase: &[u8]) -> [u8; DIGEST_LEN] {
        let mut hasher = self.keyed.clone();
        hasher.update(passphrase);
        hasher.finalize().into()
    }

    /// Returns the digest rendered as 64 uppercase hex characters.
    pub fn hex(&self, passphrase: &str) -> String {
        to_hex_string(&self.digest(passphrase.as_bytes()))
    }

    #[inline(always)]
    pub fn matches(&self, passphrase: &[u8], target: &TargetDigest) -> bool {
        self.digest(passphrase) == target.0
    }
}

/// The digest being searched for.
///
/// Parsed once from hex so the hot loop compares raw bytes. Comparing the raw
/// bytes is equivalent to comparing uppercase renderings; lowercase input is
/// accepted and normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetDigest([u8; DIGEST_LEN]);

impl TargetDigest {
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        to_hex_string(&self.0)
    }
}

impl FromStr for TargetDigest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != HEX_LEN {
            return Err(Error::InvalidDigestLength { len: bytes.len() });
        }

        let nibble_at = |position: usize| {
            hex_to_nibble(bytes[position]).ok_or_else(|| Error::InvalidHexChar {
                position,
                // A non-hex byte is either ASCII or the lead byte of a
                // multi-byte char, so `position` is always a char boundary.
                ch: s[position..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
            })
        };

        let mut out = [0u8; DIGEST_LEN];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = (nibble_at(i * 2)? << 4) | nibble_at(i * 2 + 1)?;
        }

        Ok(Self(out))
    }
}

impl fmt::Display for TargetDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = to_hex_upper(&self.0);
        f.write_str(std::str::from_utf8(&hex).map_err(|_| fmt::Error)?)
    }
}
