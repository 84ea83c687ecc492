//! The search driver.
//!
//! A [`Search`] pulls candidates from the configured stream, hashes each one
//! with a keyed [`OtpHasher`] and compares it against the target. It moves
//! from [`SearchState::Searching`] to the terminal [`SearchState::Done`] on the
//! first match or when the stream runs out. Running out is a normal outcome,
//! not an error.

use otp_digest::{Candidates, OtpHasher, Phase, TargetDigest, to_hex_string};
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::error::Error;

/// Exhaustive candidates shorter than this never count as landmarks.
pub const LANDMARK_MIN_LEN: usize = 4;

/// A landmark ends with this many copies of the alphabet's first symbol.
pub const LANDMARK_SUFFIX_LEN: usize = 3;

/// Number of exhaustive candidates between progress ticks.
pub const TICK_INTERVAL: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The target digest was produced by `passphrase`.
    Found { passphrase: String, phase: Phase, tested: u64 },
    /// Every candidate was tested without a match.
    Exhausted { tested: u64 },
}

impl SearchOutcome {
    pub fn passphrase(&self) -> Option<&str> {
        match self {
            SearchOutcome::Found { passphrase, .. } => Some(passphrase),
            SearchOutcome::Exhausted { .. } => None,
        }
    }

    /// Candidates hashed, including the matching one.
    pub fn tested(&self) -> u64 {
        match self {
            SearchOutcome::Found { tested, .. } | SearchOutcome::Exhausted { tested } => *tested,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Searching,
    Done(SearchOutcome),
}

/// Receives progress from a running search. Every method defaults to a no-op.
pub trait Reporter {
    /// The first candidate of `phase` is about to be tested.
    fn phase_started(&mut self, _phase: Phase) {}

    /// A dictionary candidate was hashed.
    fn dictionary_tested(&mut self, _passphrase: &str, _digest: &str) {}

    /// An exhaustive candidate reached a progress landmark.
    fn landmark(&mut self, _len: usize, _candidate: &str) {}

    /// `exhaustive_tested` exhaustive candidates have been hashed so far.
    ///
    /// Called every [`TICK_INTERVAL`] candidates and once more with the final
    /// count when the walk runs out between two intervals.
    fn tick(&mut self, _exhaustive_tested: u64) {}

    fn finished(&mut self, _outcome: &SearchOutcome) {}
}

/// A reporter that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Reporter for Silent {}

pub struct Search {
    hasher: OtpHasher,
    target: TargetDigest,
    candidates: Candidates,
    // Holds the candidate under test; refilled in place on every step.
    buffer: String,
    landmark_suffix: String,
    phase: Option<Phase>,
    tested: u64,
    exhaustive_tested: u64,
    state: SearchState,
}

impl Search {
    pub fn new(config: &SearchConfig) -> Result<Self, Error> {
        config.validate()?;

        let landmark_suffix =
            std::iter::repeat_n(config.alphabet.first(), LANDMARK_SUFFIX_LEN).collect();

        Ok(Self {
            hasher: OtpHasher::new(&config.pin, &config.salt),
            target: config.target,
            candidates: config.candidates(),
            buffer: String::with_capacity(config.max_len * 4),
            landmark_suffix,
            phase: None,
            tested: 0,
            exhaustive_tested: 0,
            state: SearchState::Searching,
        })
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn tested(&self) -> u64 {
        self.tested
    }

    /// Tests the next candidate. Once the search is done this is a no-op.
    ///
    /// Exhaustive strings already tried as dictionary words are passed over
    /// without hashing or counting, but still report their landmark.
    pub fn step<R: Reporter + ?Sized>(&mut self, reporter: &mut R) -> &SearchState {
        if matches!(self.state, SearchState::Done(_)) {
            return &self.state;
        }

        let phase = loop {
            let Some(pulled) = self.candidates.next_into(&mut self.buffer) else {
                if self.exhaustive_tested % TICK_INTERVAL != 0 {
                    reporter.tick(self.exhaustive_tested);
                }
                info!(tested = self.tested, "candidate space exhausted without a match");
                return self.finish(SearchOutcome::Exhausted { tested: self.tested }, reporter);
            };

            if self.phase != Some(pulled.phase) {
                debug!(phase = %pulled.phase, tested = self.tested, "entering phase");
                self.phase = Some(pulled.phase);
                reporter.phase_started(pulled.phase);
            }

            if !pulled.repeat {
                break pulled.phase;
            }
            if self.is_landmark(&self.buffer) {
                reporter.landmark(self.buffer.chars().count(), &self.buffer);
            }
        };

        self.tested += 1;
        let digest = self.hasher.digest(self.buffer.as_bytes());
        let found = digest == *self.target.as_bytes();

        match phase {
            Phase::Dictionary => {
                reporter.dictionary_tested(&self.buffer, &to_hex_string(&digest));
            }
            Phase::Exhaustive => {
                self.exhaustive_tested += 1;
                if self.exhaustive_tested % TICK_INTERVAL == 0 {
                    reporter.tick(self.exhaustive_tested);
                }
                if !found && self.is_landmark(&self.buffer) {
                    reporter.landmark(self.buffer.chars().count(), &self.buffer);
                }
            }
        }

        if found {
            info!(%phase, tested = self.tested, "passphrase found");
            let outcome = SearchOutcome::Found {
                passphrase: self.buffer.clone(),
                phase,
                tested: self.tested,
            };
            return self.finish(outcome, reporter);
        }

        &self.state
    }

    /// Steps until done and returns the outcome.
    pub fn run<R: Reporter + ?Sized>(mut self, reporter: &mut R) -> SearchOutcome {
        loop {
            if let SearchState::Done(outcome) = self.step(reporter) {
                return outcome.clone();
            }
        }
    }

    fn is_landmark(&self, candidate: &str) -> bool {
        candidate.ends_with(&self.landmark_suffix)
            && candidate.chars().count() >= LANDMARK_MIN_LEN
    }

    fn finish<R: Reporter + ?Sized>(
        &mut self,
        outcome: SearchOutcome,
        reporter: &mut R,
    ) -> &SearchState {
        reporter.finished(&outcome);
        self.state = SearchState::Done(outcome);
        &self.state
    }
}

/// Runs a complete search for `config`.
pub fn search<R: Reporter + ?Sized>(
    config: &SearchConfig,
    reporter: &mut R,
) -> Result<SearchOutcome, Error> {
    info!(
        digest = %config.target,
        dictionary = config.dictionary.len(),
        min_len = config.min_len,
        max_len = config.max_len,
        "starting passphrase search"
    );
    Ok(Search::new(config)?.run(reporter))
}
