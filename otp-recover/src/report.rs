use indicatif::{ProgressBar, ProgressStyle};
use otp_digest::Phase;

use crate::config::SearchConfig;
use crate::search::{Reporter, SearchOutcome};

pub fn header_lines(config: &SearchConfig) -> [String; 2] {
    [
        format!("Looking for passphrase that generates hash: {}", config.target),
        format!("Using PIN: {}, Salt: {}", config.pin, config.salt),
    ]
}

pub fn phase_heading(phase: Phase) -> &'static str {
    match phase {
        Phase::Dictionary => "\n=== Testing common passphrases ===",
        Phase::Exhaustive => "\n=== Testing short combinations ===",
    }
}

pub fn dictionary_line(passphrase: &str, digest: &str) -> String {
    format!("Passphrase '{passphrase}': {digest}")
}

pub fn landmark_line(len: usize, candidate: &str) -> String {
    format!("Testing {len}-char combinations: {candidate}...")
}

pub fn outcome_line(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Found { passphrase, .. } => {
            format!("*** MATCH FOUND! Passphrase: '{passphrase}' ***")
        }
        SearchOutcome::Exhausted { .. } => {
            "No matching passphrase found in common combinations.".to_string()
        }
    }
}

/// Prints search progress to stdout, with an optional progress bar over the
/// exhaustive phase.
pub struct ConsoleReporter {
    exhaustive_total: Option<u64>,
    show_progress: bool,
    bar: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new(config: &SearchConfig, show_progress: bool) -> Self {
        Self { exhaustive_total: config.exhaustive_unique_total(), show_progress, bar: None }
    }

    // Lines go through the bar while it is drawn so they don't tear it.
    fn print(&self, line: &str) {
        match &self.bar {
            Some(pb) => pb.println(line),
            None => println!("{line}"),
        }
    }

    fn start_bar(&mut self) {
        let pb = match self.exhaustive_total {
            Some(total) => {
                let pb = ProgressBar::new(total);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}) {msg}")
                        .expect("Invalid progress bar template")
                        .progress_chars("#>-"),
                );
                pb
            }
            None => ProgressBar::new_spinner(),
        };
        self.bar = Some(pb);
    }
}

impl Reporter for ConsoleReporter {
    fn phase_started(&mut self, phase: Phase) {
        self.print(phase_heading(phase));
        if phase == Phase::Exhaustive && self.show_progress {
            self.start_bar();
        }
    }

    fn dictionary_tested(&mut self, passphrase: &str, digest: &str) {
        self.print(&dictionary_line(passphrase, digest));
    }

    fn landmark(&mut self, len: usize, candidate: &str) {
        self.print(&landmark_line(len, candidate));
    }

    fn tick(&mut self, exhaustive_tested: u64) {
        if let Some(pb) = &self.bar {
            pb.set_position(exhaustive_tested);
        }
    }

    fn finished(&mut self, outcome: &SearchOutcome) {
        if let Some(pb) = self.bar.take() {
            pb.finish();
        }
        self.print(&outcome_line(outcome));
    }
}
