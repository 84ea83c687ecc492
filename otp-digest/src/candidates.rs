//! Candidate passphrase enumeration.
//!
//! Candidates come in two phases: a dictionary of likely passphrases, then an
//! exhaustive walk of every string over an alphabet for a range of lengths.
//! Both are lazy iterators so a search can stop at the first match without
//! materialising the candidate space.

use std::collections::HashSet;
use std::fmt;

use crate::error::Error;

/// Lowercase ASCII letters followed by digits.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Shortest exhaustive candidate length searched by default.
pub const DEFAULT_MIN_LEN: usize = 1;

/// Longest exhaustive candidate length searched by default.
pub const DEFAULT_MAX_LEN: usize = 5;

/// Passphrases tried before the exhaustive phase, in order.
pub const DEFAULT_WORDS: &[&str] = &[
    "",
    "default",
    "password",
    "123456",
    "admin",
    "test",
    "user",
    "guest",
    "apollo",
    "artemis",
    "moonlight",
    "sunshine",
    "nvidia",
    "gamestream",
    "pass",
    "secret",
    "key",
    "auth",
    "otp",
    "pin",
    "1234",
    "0000",
    "server",
    "client",
    "pairing",
    "cert",
    "ssl",
    "tls",
    "https",
];

/// Which enumeration phase produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Dictionary,
    Exhaustive,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Dictionary => f.write_str("dictionary"),
            Phase::Exhaustive => f.write_str("exhaustive"),
        }
    }
}

/// An ordered set of distinct symbols candidates are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    pub fn new(symbols: &str) -> Result<Self, Error> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::with_capacity(symbols.len());
        for symbol in symbols.chars() {
            if !seen.insert(symbol) {
                return Err(Error::DuplicateSymbol { symbol });
            }
            ordered.push(symbol);
        }

        if ordered.is_empty() {
            return Err(Error::EmptyAlphabet);
        }

        Ok(Self { symbols: ordered })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The lowest symbol in enumeration order.
    pub fn first(&self) -> char {
        self.symbols[0]
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self { symbols: DEFAULT_ALPHABET.chars().collect() }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Number of strings over an alphabet of `alphabet_len` symbols with lengths
/// in `min_len..=max_len`, or `None` if it does not fit in a u64.
pub fn exhaustive_count(alphabet_len: usize, min_len: usize, max_len: usize) -> Option<u64> {
    let base = alphabet_len as u64;
    let mut total = 0u64;
    for len in min_len..=max_len {
        let exp = u32::try_from(len).ok()?;
        total = total.checked_add(base.checked_pow(exp)?)?;
    }
    Some(total)
}

/// Every string over an alphabet for each length in `min_len..=max_len`.
///
/// Lengths are visited in increasing order. Within a length, strings are
/// produced in alphabet order, most significant symbol first, which is the
/// same as counting in base `alphabet.len()`.
#[derive(Debug, Clone)]
pub struct Exhaustive {
    alphabet: Alphabet,
    max_len: usize,
    // Odometer: one alphabet index per position of the next candidate.
    indices: Vec<usize>,
    exhausted: bool,
}

impl Exhaustive {
    pub fn new(alphabet: Alphabet, min_len: usize, max_len: usize) -> Self {
        Self {
            alphabet,
            max_len,
            indices: vec![0; min_len],
            exhausted: min_len > max_len,
        }
    }

    /// Length of the next candidate, or `None` once the walk is finished.
    pub fn current_len(&self) -> Option<usize> {
        (!self.exhausted).then_some(self.indices.len())
    }

    fn advance(&mut self) {
        let base = self.alphabet.len();
        for index in self.indices.iter_mut().rev() {
            *index += 1;
            if *index < base {
                return;
            }
            *index = 0;
        }

        // Every position wrapped: move on to the next length, all zeros.
        if self.indices.len() >= self.max_len {
            self.exhausted = true;
        } else {
            self.indices.push(0);
        }
    }
}

impl Exhaustive {
    /// Writes the next candidate into `buf` and returns its length in symbols.
    ///
    /// `buf` is cleared and refilled, so one buffer serves the whole walk
    /// without allocating once it has grown to `max_len` symbols.
    pub fn next_into(&mut self, buf: &mut String) -> Option<usize> {
        if self.exhausted {
            return None;
        }

        let symbols = self.alphabet.symbols();
        buf.clear();
        buf.extend(self.indices.iter().map(|&i| symbols[i]));
        let len = self.indices.len();
        self.advance();

        Some(len)
    }
}

impl Iterator for Exhaustive {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut candidate = String::new();
        self.next_into(&mut candidate)?;
        Some(candidate)
    }
}

/// An ordered list of passphrases with duplicates removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Builds a dictionary keeping the first occurrence of each word.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dictionary = Self { words: Vec::new() };
        dictionary.extend(words);
        dictionary
    }

    /// Appends words not already present, preserving order.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: HashSet<String> = self.words.iter().cloned().collect();
        for word in words {
            let word = word.into();
            if seen.insert(word.clone()) {
                self.words.push(word);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of words an exhaustive walk over `alphabet` with lengths in
    /// `min_len..=max_len` would also produce.
    pub fn overlap(&self, alphabet: &Alphabet, min_len: usize, max_len: usize) -> u64 {
        self.words
            .iter()
            .filter(|word| (min_len..=max_len).contains(&word.chars().count()))
            .filter(|word| word.chars().all(|c| alphabet.contains(c)))
            .count() as u64
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS.iter().copied())
    }
}

/// A candidate passphrase and the phase that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub phase: Phase,
    pub text: String,
}

/// What [`Candidates::next_into`] wrote into the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulled {
    pub phase: Phase,
    /// Set for exhaustive strings the dictionary phase already yielded.
    pub repeat: bool,
}

/// The full two-phase candidate stream.
///
/// Dictionary words come first. Exhaustive strings that already appeared in
/// the dictionary are flagged as repeats by [`Candidates::next_into`] and
/// dropped by the iterator, so no candidate is ever yielded twice. The
/// stream is restartable by building a new one from the same inputs.
#[derive(Debug)]
pub struct Candidates {
    dictionary: std::vec::IntoIter<String>,
    seen: HashSet<String>,
    // Symbol counts of dictionary words; other lengths skip the `seen` lookup.
    seen_lens: HashSet<usize>,
    exhaustive: Exhaustive,
}

impl Candidates {
    pub fn new(dictionary: &Dictionary, exhaustive: Exhaustive) -> Self {
        Self {
            dictionary: dictionary.words.clone().into_iter(),
            seen: dictionary.words.iter().cloned().collect(),
            seen_lens: dictionary.words.iter().map(|w| w.chars().count()).collect(),
            exhaustive,
        }
    }

    /// Writes the next candidate into `buf`, reusing its allocation.
    ///
    /// Unlike the iterator, exhaustive repeats of dictionary words are not
    /// skipped; they come back with `repeat` set so callers can still account
    /// for every position of the walk.
    pub fn next_into(&mut self, buf: &mut String) -> Option<Pulled> {
        if let Some(word) = self.dictionary.next() {
            buf.clear();
            buf.push_str(&word);
            return Some(Pulled { phase: Phase::Dictionary, repeat: false });
        }

        let len = self.exhaustive.next_into(buf)?;
        let repeat = self.seen_lens.contains(&len) && self.seen.contains(buf.as_str());
        Some(Pulled { phase: Phase::Exhaustive, repeat })
    }
}

impl Iterator for Candidates {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        let mut text = String::new();
        loop {
            let pulled = self.next_into(&mut text)?;
            if !pulled.repeat {
                return Some(Candidate { phase: pulled.phase, text });
            }
        }
    }
}
