use rand_chacha::ChaCha20Rng;
use rand::SeedableRng;

/// Derive an independent seed for stream `stream` of a master seed
/// (splitmix64 finaliser).
pub fn stream_seed(master: u64, stream: usize) -> u64 {
    let mut x = master ^ ((stream as u64).wrapping_mul(0x9E3779B97F4A7C15));
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

/// Seeded RNG when a seed is given, OS entropy otherwise.
pub fn seeded(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(s) => ChaCha20Rng::seed_from_u64(s),
        None => ChaCha20Rng::from_entropy(),
    }
}
