// Placeholder payload generator standing in for a real data feed.

use crate::MPMC::PayloadSource;
use std::io;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Produces a random-length run of alphanumeric bytes on every fetch.
///
/// The length is drawn uniformly from `0..buf.len()`, so roughly one fetch in
/// `buf.len()` yields nothing and exercises the producer's discard path.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: fastrand::Rng,
}

impl RandomSource {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Deterministic source, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadSource for RandomSource {
    fn fetch(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let len = self.rng.usize(..buf.len());
        for (dst, src) in buf[..len].iter_mut().zip(ALPHABET.iter().cycle()) {
            *dst = *src;
        }
        Ok(len)
    }
}
