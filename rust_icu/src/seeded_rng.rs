use blake2::{Blake2b512, Digest};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Global seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;

/// Make a random number generator from a global seed
/// and a string id.
///
/// The global seed is a single piece of information intended
/// to control all randomness in the program. Each dataset
/// gets its own generator by passing a different id (the
/// dataset name), so the patient and bed datasets draw from
/// unrelated streams. Changing the number of patients never
/// changes the beds, and the other way round.
///
/// The id is concatenated with the global seed and the result
/// is hashed. The first 32 bytes of the hash seed the generator.
///
pub fn make_rng(global_seed: u64, id: &str) -> ChaCha8Rng {
    let message = format!("{id}{global_seed}");
    let mut hasher = Blake2b512::new();
    hasher.update(message);
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&hasher.finalize()[0..32]);
    ChaCha8Rng::from_seed(seed)
}
