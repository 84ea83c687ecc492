use otp_digest::DEFAULT_ALPHABET;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates random passphrases over the default alphabet.
/// Uses a fixed seed for reproducible benchmark results.
pub fn generate_random_passphrases(count: usize) -> Vec<String> {
    let symbols = DEFAULT_ALPHABET.as_bytes();
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            let length = rng.gen_range(1..=5);
            (0..length)
                .map(|_| symbols[rng.gen_range(0..symbols.len())] as char)
                .collect()
        })
        .collect()
}
