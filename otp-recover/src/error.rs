use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Digest(#[from] otp_digest::Error),

    #[error("Minimum length must be at least 1 (the dictionary covers the empty passphrase)")]
    ZeroMinLength,

    #[error("Minimum length {min} is greater than maximum length {max}")]
    InvalidLengthRange { min: usize, max: usize },

    #[error(
        "Candidate count for {alphabet_len} symbols up to length {max_len} does not fit in 64 bits"
    )]
    CandidateSpaceTooLarge { alphabet_len: usize, max_len: usize },

    #[error("Failed to read wordlist '{path}': {source}")]
    Wordlist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
