//! Reproducible generation seeds.

use std::{fmt, str::FromStr};

use rand::{RngExt as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;
use sha2::{Digest as _, Sha256};

/// A 32-byte seed that fully determines a generated puzzle.
///
/// Seeds render as 64 lowercase hex characters, which is also the format
/// [`FromStr`] accepts. The different stages of generation draw from
/// independent random streams derived from the seed by domain-separated
/// hashing, so a change to how one stage consumes randomness does not
/// perturb the others.
///
/// # Examples
///
/// ```
/// use std::str::FromStr as _;
///
/// use sudokit_generator::PuzzleSeed;
///
/// let seed = PuzzleSeed::from_str(
///     "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
/// )?;
/// assert_eq!(
///     seed.to_string(),
///     "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
/// );
/// # Ok::<(), sudokit_generator::ParseSeedError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleSeed([u8; 32]);

impl PuzzleSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a seed from the thread-local random number generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::rng().random())
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derives an independent random stream for one stage of generation.
    pub(crate) fn stream(&self, domain: &'static [u8]) -> Pcg64Mcg {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        hasher.update(self.0);
        let digest = hasher.finalize();
        let mut state = [0_u8; 16];
        state.copy_from_slice(&digest[..16]);
        Pcg64Mcg::from_seed(state)
    }
}

impl fmt::Display for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PuzzleSeed({self})")
    }
}

/// An error parsing a [`PuzzleSeed`] from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    /// The input is not exactly 64 characters long.
    #[display("seed must be 64 hex characters, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    /// The input contains a character that is not a hex digit.
    #[display("invalid hex character {_0:?}")]
    InvalidCharacter(#[error(not(source))] char),
}

impl FromStr for PuzzleSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().count() != 64 {
            return Err(ParseSeedError::InvalidLength(s.chars().count()));
        }
        let mut bytes = [0_u8; 32];
        let mut chars = s.chars();
        for byte in &mut bytes {
            let hi = hex_value(&mut chars)?;
            let lo = hex_value(&mut chars)?;
            *byte = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

fn hex_value(chars: &mut impl Iterator<Item = char>) -> Result<u8, ParseSeedError> {
    // Length is checked up front, so the iterator cannot run dry here.
    let c = chars.next().ok_or(ParseSeedError::InvalidLength(0))?;
    let value = c
        .to_digit(16)
        .ok_or(ParseSeedError::InvalidCharacter(c))?;
    #[expect(clippy::cast_possible_truncation)]
    let value = value as u8;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::Rng as _;

    use super::*;

    const SEED_HEX: &str = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1";

    #[test]
    fn test_hex_round_trip() {
        let seed = PuzzleSeed::from_str(SEED_HEX).unwrap();
        assert_eq!(seed.to_string(), SEED_HEX);
    }

    #[test]
    fn test_rejects_bad_length() {
        assert_eq!(
            PuzzleSeed::from_str("c1d4"),
            Err(ParseSeedError::InvalidLength(4)),
        );
    }

    #[test]
    fn test_rejects_bad_character() {
        let s = format!("g{}", &SEED_HEX[1..]);
        assert_eq!(
            PuzzleSeed::from_str(&s),
            Err(ParseSeedError::InvalidCharacter('g')),
        );
    }

    #[test]
    fn test_streams_are_independent() {
        let seed = PuzzleSeed::from_str(SEED_HEX).unwrap();
        let a = seed.stream(b"a").next_u64();
        let b = seed.stream(b"b").next_u64();
        assert_ne!(a, b);
    }

    #[test]
    fn test_streams_are_deterministic() {
        let seed = PuzzleSeed::from_str(SEED_HEX).unwrap();
        assert_eq!(seed.stream(b"a").next_u64(), seed.stream(b"a").next_u64());
    }

    #[test]
    fn test_random_seeds_differ() {
        assert_ne!(PuzzleSeed::random(), PuzzleSeed::random());
    }

    proptest! {
        #[test]
        fn prop_bytes_round_trip_through_hex(bytes in proptest::array::uniform32(0_u8..)) {
            let seed = PuzzleSeed::new(bytes);
            let parsed = PuzzleSeed::from_str(&seed.to_string()).unwrap();
            prop_assert_eq!(parsed, seed);
        }
    }
}
