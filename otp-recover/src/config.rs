use std::path::{Path, PathBuf};

use otp_digest::{
    Alphabet, Candidates, DEFAULT_ALPHABET, DEFAULT_MAX_LEN, DEFAULT_MIN_LEN, Dictionary,
    Exhaustive, TargetDigest, exhaustive_count,
};

use crate::error::Error;

/// Pin from the pairing session the default target was captured in.
pub const DEFAULT_PIN: &str = "9067";

/// Salt sent alongside the default target in the pairing request.
pub const DEFAULT_SALT: &str = "7e4f274a9a39bd8b3f36ef811d318076";

/// Digest observed in the pairing request whose passphrase is unknown.
pub const DEFAULT_TARGET: &str =
    "1DBFA68BC208F14DEF7D6B9355CA49823E3EAED6B8A32B6E031A7AFB28D4F709";

/// Everything a search needs: credentials, target and candidate space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub pin: String,
    pub salt: String,
    pub target: TargetDigest,
    pub dictionary: Dictionary,
    pub alphabet: Alphabet,
    pub min_len: usize,
    pub max_len: usize,
}

impl SearchConfig {
    /// Creates a config for the given credentials and target with the default
    /// dictionary, alphabet and length range.
    pub fn new(pin: impl Into<String>, salt: impl Into<String>, target: TargetDigest) -> Self {
        Self {
            pin: pin.into(),
            salt: salt.into(),
            target,
            dictionary: Dictionary::default(),
            alphabet: Alphabet::default(),
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.min_len == 0 {
            return Err(Error::ZeroMinLength);
        }
        if self.min_len > self.max_len {
            return Err(Error::InvalidLengthRange { min: self.min_len, max: self.max_len });
        }
        if self.exhaustive_total().is_none() {
            return Err(Error::CandidateSpaceTooLarge {
                alphabet_len: self.alphabet.len(),
                max_len: self.max_len,
            });
        }
        Ok(())
    }

    pub fn exhaustive(&self) -> Exhaustive {
        Exhaustive::new(self.alphabet.clone(), self.min_len, self.max_len)
    }

    /// A fresh candidate stream: dictionary, then the exhaustive walk.
    pub fn candidates(&self) -> Candidates {
        Candidates::new(&self.dictionary, self.exhaustive())
    }

    /// Size of the exhaustive phase before dictionary overlap is removed.
    pub fn exhaustive_total(&self) -> Option<u64> {
        exhaustive_count(self.alphabet.len(), self.min_len, self.max_len)
    }

    /// Exhaustive candidates actually hashed: dictionary words the walk would
    /// produce again are skipped.
    pub fn exhaustive_unique_total(&self) -> Option<u64> {
        let overlap = self.dictionary.overlap(&self.alphabet, self.min_len, self.max_len);
        self.exhaustive_total().map(|total| total - overlap)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        let target = DEFAULT_TARGET.parse().expect("DEFAULT_TARGET is valid hex");
        Self::new(DEFAULT_PIN, DEFAULT_SALT, target)
    }
}

/// Unparsed search settings, as they arrive from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub pin: String,
    pub salt: String,
    pub target: TargetDigest,
    pub alphabet: String,
    pub min_len: usize,
    pub max_len: usize,
    /// Words appended to the dictionary, one per line.
    pub wordlist: Option<PathBuf>,
    /// Start the dictionary from [`otp_digest::DEFAULT_WORDS`] rather than empty.
    pub default_words: bool,
}

impl SearchOptions {
    /// Builds and validates the config these options describe.
    pub fn into_config(self) -> Result<SearchConfig, Error> {
        let mut dictionary = if self.default_words {
            Dictionary::default()
        } else {
            Dictionary::new(Vec::<String>::new())
        };
        if let Some(path) = &self.wordlist {
            dictionary.extend(load_wordlist(path)?);
        }

        let config = SearchConfig {
            alphabet: Alphabet::new(&self.alphabet)?,
            dictionary,
            min_len: self.min_len,
            max_len: self.max_len,
            ..SearchConfig::new(self.pin, self.salt, self.target)
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        let config = SearchConfig::default();
        Self {
            pin: config.pin,
            salt: config.salt,
            target: config.target,
            alphabet: DEFAULT_ALPHABET.to_string(),
            min_len: config.min_len,
            max_len: config.max_len,
            wordlist: None,
            default_words: true,
        }
    }
}

/// Reads one candidate per line. Line endings (`\n` or `\r\n`) are stripped;
/// nothing else is trimmed, since whitespace can be part of a passphrase.
pub fn load_wordlist(path: &Path) -> Result<Vec<String>, Error> {
    let contents = std::fs::read_to_string(path)
        .map_err(|source| Error::Wordlist { path: path.to_path_buf(), source })?;

    Ok(contents.lines().map(str::to_owned).collect())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use otp_digest::DEFAULT_WORDS;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.pin, "9067");
        assert_eq!(config.salt, "7e4f274a9a39bd8b3f36ef811d318076");
        assert_eq!(config.target.to_string(), DEFAULT_TARGET);
        assert_eq!(config.dictionary.len(), DEFAULT_WORDS.len());
        assert_eq!(config.alphabet.len(), 36);
        assert_eq!((config.min_len, config.max_len), (1, 5));
        assert_eq!(config.exhaustive_total(), Some(62_193_780));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_min_len() {
        let config = SearchConfig { min_len: 0, ..SearchConfig::default() };
        assert!(matches!(config.validate(), Err(Error::ZeroMinLength)));
    }

    #[test]
    fn test_validate_inverted_range() {
        let config = SearchConfig { min_len: 4, max_len: 3, ..SearchConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidLengthRange { min: 4, max: 3 })
        ));
    }

    #[test]
    fn test_validate_candidate_space_overflow() {
        let printable: String = (b'!'..=b'~').map(char::from).collect();
        let config = SearchConfig {
            alphabet: Alphabet::new(&printable).unwrap(),
            max_len: 12,
            ..SearchConfig::default()
        };
        assert_eq!(config.alphabet.len(), 94);
        assert_eq!(config.exhaustive_total(), None);
        assert!(matches!(
            config.validate(),
            Err(Error::CandidateSpaceTooLarge { alphabet_len: 94, max_len: 12 })
        ));
    }

    #[test]
    fn test_validate_long_lengths_over_small_alphabet() {
        let config = SearchConfig {
            alphabet: Alphabet::new("ab").unwrap(),
            max_len: 40,
            ..SearchConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.exhaustive_total(), Some((1u64 << 41) - 2));
    }

    #[test]
    fn test_exhaustive_unique_total() {
        let config = SearchConfig::default();
        // 15 default words are also 1-5 char strings over a-z0-9.
        assert_eq!(config.exhaustive_unique_total(), Some(62_193_780 - 15));

        let config = SearchConfig { alphabet: Alphabet::new("ab").unwrap(), ..config };
        assert_eq!(config.exhaustive_unique_total(), config.exhaustive_total());
    }

    #[test]
    fn test_options_default_matches_config() {
        assert_eq!(SearchOptions::default().into_config().unwrap(), SearchConfig::default());
    }

    #[test]
    fn test_options_wordlist_without_default_words() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "hunter2\nhunter2\nletmein\n").unwrap();

        let options = SearchOptions {
            wordlist: Some(file.path().to_path_buf()),
            default_words: false,
            alphabet: "xyz".to_string(),
            max_len: 3,
            ..SearchOptions::default()
        };
        let config = options.into_config().unwrap();

        assert_eq!(config.dictionary.words(), ["hunter2", "letmein"]);
        assert_eq!(config.alphabet.to_string(), "xyz");
        assert_eq!(config.max_len, 3);
    }

    #[test]
    fn test_options_wordlist_extends_default_words() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "admin\nhunter2\n").unwrap();

        let options =
            SearchOptions { wordlist: Some(file.path().to_path_buf()), ..SearchOptions::default() };
        let config = options.into_config().unwrap();

        assert_eq!(config.dictionary.len(), DEFAULT_WORDS.len() + 1);
        assert_eq!(config.dictionary.words().last().map(String::as_str), Some("hunter2"));
    }

    #[test]
    fn test_options_invalid_alphabet() {
        let options = SearchOptions { alphabet: "abca".to_string(), ..SearchOptions::default() };
        assert!(matches!(
            options.into_config(),
            Err(Error::Digest(otp_digest::Error::DuplicateSymbol { symbol: 'a' }))
        ));
    }

    #[test]
    fn test_options_missing_wordlist() {
        let dir = tempfile::tempdir().unwrap();
        let options = SearchOptions {
            wordlist: Some(dir.path().join("missing.txt")),
            ..SearchOptions::default()
        };
        assert!(matches!(options.into_config(), Err(Error::Wordlist { .. })));
    }

    #[test]
    fn test_options_validated() {
        let options = SearchOptions { min_len: 0, ..SearchOptions::default() };
        assert!(matches!(options.into_config(), Err(Error::ZeroMinLength)));
    }

    #[test]
    fn test_candidates_restart() {
        let config = SearchConfig { max_len: 1, ..SearchConfig::default() };
        let first: Vec<String> = config.candidates().map(|c| c.text).collect();
        let second: Vec<String> = config.candidates().map(|c| c.text).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), DEFAULT_WORDS.len() + 36);
    }

    #[test]
    fn test_load_wordlist() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "alpha\r\nbeta\n\n with space \ngamma").unwrap();

        let words = load_wordlist(file.path()).unwrap();
        assert_eq!(words, ["alpha", "beta", "", " with space ", "gamma"]);
    }

    #[test]
    fn test_load_wordlist_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        match load_wordlist(&path) {
            Err(Error::Wordlist { path: reported, source }) => {
                assert_eq!(reported, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected wordlist error, got {other:?}"),
        }
    }
}
