use std::path::PathBuf;

use clap::{Parser, Subcommand};
use otp_digest::{DEFAULT_ALPHABET, DEFAULT_MAX_LEN, DEFAULT_MIN_LEN, TargetDigest, otp_hash};
use otp_recover::report::header_lines;
use otp_recover::{
    ConsoleReporter, DEFAULT_PIN, DEFAULT_SALT, DEFAULT_TARGET, Error, SearchOptions, search,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "otp-recover", version)]
#[command(about = "Recover an OTP pairing passphrase from its pin, salt and digest")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    search: SearchArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the OTP digest of a single passphrase
    Hash(HashArgs),
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Pairing pin
    #[arg(long, default_value = DEFAULT_PIN)]
    pin: String,

    /// Salt sent with the pairing request
    #[arg(long, default_value = DEFAULT_SALT)]
    salt: String,

    /// Digest to search for (64 hex characters)
    #[arg(long, default_value = DEFAULT_TARGET)]
    target: TargetDigest,

    /// Symbols used for the exhaustive phase, in enumeration order
    #[arg(long, default_value = DEFAULT_ALPHABET)]
    alphabet: String,

    /// Shortest exhaustive candidate length
    #[arg(long, default_value_t = DEFAULT_MIN_LEN)]
    min_len: usize,

    /// Longest exhaustive candidate length
    #[arg(long, default_value_t = DEFAULT_MAX_LEN)]
    max_len: usize,

    /// Extra dictionary words, one per line
    #[arg(short, long)]
    wordlist: Option<PathBuf>,

    /// Start from an empty dictionary instead of the built-in word list
    #[arg(long)]
    no_default_words: bool,

    /// Disable progress bar
    #[arg(long)]
    no_progress: bool,
}

impl From<SearchArgs> for SearchOptions {
    fn from(args: SearchArgs) -> Self {
        Self {
            pin: args.pin,
            salt: args.salt,
            target: args.target,
            alphabet: args.alphabet,
            min_len: args.min_len,
            max_len: args.max_len,
            wordlist: args.wordlist,
            default_words: !args.no_default_words,
        }
    }
}

#[derive(clap::Args, Debug)]
struct HashArgs {
    /// Pairing pin
    #[arg(long, default_value = DEFAULT_PIN)]
    pin: String,

    /// Salt sent with the pairing request
    #[arg(long, default_value = DEFAULT_SALT)]
    salt: String,

    /// Passphrase to hash
    #[arg(long, default_value = "")]
    passphrase: String,

    /// Digest to compare the result against
    #[arg(long)]
    expected: Option<TargetDigest>,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Hash(args)) => {
            run_hash(&args);
            Ok(())
        }
        None => run_search(cli.search),
    }
}

fn run_hash(args: &HashArgs) {
    let hash = otp_hash(&args.pin, &args.salt, &args.passphrase);

    println!(
        "Input - PIN: {}, Salt: {}, Passphrase: {}",
        args.pin, args.salt, args.passphrase
    );
    println!("PlainText: {}{}{}", args.pin, args.salt, args.passphrase);
    println!("SHA256 Hash: {hash}");

    if let Some(expected) = &args.expected {
        println!("Expected hash: {expected}");
        println!("Match: {}", hash == expected.to_hex());
    }
}

fn run_search(args: SearchArgs) -> Result<(), Error> {
    let show_progress = !args.no_progress;
    let config = SearchOptions::from(args).into_config()?;

    for line in header_lines(&config) {
        println!("{line}");
    }

    let mut reporter = ConsoleReporter::new(&config, show_progress);
    search(&config, &mut reporter)?;

    Ok(())
}
