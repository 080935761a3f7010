use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed integers for the generator.
///
/// Every `rand::Rng` is a `RandomSource`. The trait exists so that tests
/// (and callers with special needs) can feed the generator a scripted
/// sequence of draws.
pub trait RandomSource {
	/// Returns an integer uniformly distributed in `[0, bound)`.
	///
	/// Callers always pass `bound > 0`.
	fn below(&mut self, bound: u64) -> u64;
}

impl<R: Rng> RandomSource for R {
	fn below(&mut self, bound: u64) -> u64 {
		self.random_range(0..bound)
	}
}

/// Seed of a repeatable password sequence.
///
/// The same seed always yields the same `StdRng` stream for a given build,
/// and therefore the same passwords.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seed(pub u64);

impl Seed {
	/// Interprets user text as a seed.
	///
	/// A non-zero decimal integer is used as-is; anything else (words,
	/// negative numbers, `0`) is hashed with `str_hash`.
	pub fn parse(text: &str) -> Self {
		match text.trim().parse::<u64>() {
			Ok(n) if n != 0 => Seed(n),
			_ => Seed(str_hash(text) as u64),
		}
	}

	/// Seed taken from the wall clock, in whole seconds since the Unix epoch.
	pub fn from_time() -> Self {
		let secs = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|d| d.as_secs())
			.unwrap_or_default();
		Seed(secs)
	}

	/// Fresh seed drawn from the thread-local, OS-seeded generator.
	pub fn random() -> Self {
		Seed(rand::rng().random())
	}

	/// Creates the pseudo-random generator for this seed.
	pub fn rng(self) -> StdRng {
		seeded(self.0)
	}
}

impl FromStr for Seed {
	type Err = Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Seed::parse(s))
	}
}

impl fmt::Display for Seed {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Repeatable, non-cryptographic generator for `seed`.
pub fn seeded(seed: u64) -> StdRng {
	StdRng::seed_from_u64(seed)
}

/// Mixes a batch seed with a password index (SplitMix64 finalizer).
///
/// Used to give each password of a parallel batch its own independent
/// stream, so the result does not depend on how the work was split.
pub fn derive_seed(seed: u64, index: u64) -> u64 {
	let mut z = seed.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
	z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
	z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
	z ^ (z >> 31)
}

/// Small string hash turning a seed phrase into a 32-bit seed.
///
/// Starts from `0xDEADBEEF * len` and folds the bytes in from the end,
/// stopping early at a NUL byte. Each byte is sign-extended, as read
/// through a signed `char`.
pub fn str_hash(text: &str) -> u32 {
	let bytes = text.as_bytes();
	let mut hash = 0xDEAD_BEEFu32.wrapping_mul(bytes.len() as u32);
	for &byte in bytes.iter().rev().take_while(|&&b| b != 0) {
		hash = (byte as i8 as u32) ^ hash.wrapping_add(hash.rotate_left(5));
	}
	hash
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn str_hash_known_values() {
		assert_eq!(str_hash(""), 0);
		assert_eq!(str_hash("a"), 0xB465_9C8B);
		assert_eq!(str_hash("hello"), 0x4E28_23C5);
		assert_eq!(str_hash("correct horse"), 0x3186_480F);
		assert_eq!(str_hash("é"), 0x8232_766D);
	}

	#[test]
	fn seed_parsing() {
		assert_eq!(Seed::parse("42"), Seed(42));
		assert_eq!(Seed::parse(" 42 "), Seed(42));
		assert_eq!(Seed::parse("hello"), Seed(0x4E28_23C5));
		assert_eq!(Seed::parse("0"), Seed(str_hash("0") as u64));
		assert_eq!("hello".parse::<Seed>(), Ok(Seed(0x4E28_23C5)));
	}

	#[test]
	fn seeded_streams_repeat() {
		let mut a = seeded(7);
		let mut b = seeded(7);
		let left: Vec<u64> = (0..16).map(|_| a.below(1000)).collect();
		let right: Vec<u64> = (0..16).map(|_| b.below(1000)).collect();
		assert_eq!(left, right);
		assert!(left.iter().all(|&n| n < 1000));
	}

	#[test]
	fn derived_seeds_differ_per_index() {
		let seeds: Vec<u64> = (0..64).map(|i| derive_seed(1, i)).collect();
		let mut unique = seeds.clone();
		unique.sort_unstable();
		unique.dedup();
		assert_eq!(unique.len(), seeds.len());
		assert_eq!(derive_seed(1, 5), derive_seed(1, 5));
	}
}
