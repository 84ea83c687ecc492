#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("target digest must be 64 hex characters, got {len}")]
    InvalidDigestLength { len: usize },

    #[error("invalid hex character {ch:?} at position {position} in target digest")]
    InvalidHexChar { position: usize, ch: char },

    #[error("candidate alphabet is empty")]
    EmptyAlphabet,

    #[error("symbol {symbol:?} appears more than once in the candidate alphabet")]
    DuplicateSymbol { symbol: char },
}
