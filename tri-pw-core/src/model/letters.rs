use std::fmt;

use crate::error::LetterError;

/// Number of letters in the alphabet the tables are indexed by.
pub const ALPHABET_LEN: usize = 26;

/// Letter class per alphabet rank: `V`owel, `C`onsonant, or `?` (neither).
/// 'y' is the only letter in the last group.
const CLASSES: &[u8; ALPHABET_LEN] = b"VCCCVCCCVCCCCCVCCCCCVCCC?C";

/// Phonetic class of a letter, used to reject hard-to-pronounce starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterClass {
	Vowel,
	Consonant,
	Other,
}

/// A lowercase ASCII letter stored as its rank in the alphabet (0..=25).
///
/// The rank is validated on construction, so every `Letter` can index a
/// frequency table dimension without further checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(u8);

impl Letter {
	/// Builds a letter from its alphabet rank.
	///
	/// # Errors
	/// Returns `LetterError::RankOutOfRange` if `rank > 25`.
	pub fn from_rank(rank: usize) -> Result<Self, LetterError> {
		if rank >= ALPHABET_LEN {
			return Err(LetterError::RankOutOfRange(rank));
		}
		Ok(Self(rank as u8))
	}

	/// Builds a letter from a lowercase ASCII byte.
	///
	/// # Errors
	/// Returns `LetterError::OutOfRange` for anything outside `b'a'..=b'z'`,
	/// uppercase included.
	pub fn from_ascii(byte: u8) -> Result<Self, LetterError> {
		match byte {
			b'a'..=b'z' => Ok(Self(byte - b'a')),
			_ => Err(LetterError::OutOfRange(byte as char)),
		}
	}

	/// Rank in the alphabet, `0` for 'a'.
	pub fn rank(self) -> usize {
		self.0 as usize
	}

	/// Lowercase ASCII byte for this letter.
	pub fn to_ascii(self) -> u8 {
		b'a' + self.0
	}

	pub fn class(self) -> LetterClass {
		match CLASSES[self.rank()] {
			b'V' => LetterClass::Vowel,
			b'C' => LetterClass::Consonant,
			_ => LetterClass::Other,
		}
	}

	pub fn is_consonant(self) -> bool {
		self.class() == LetterClass::Consonant
	}

	/// Iterates the whole alphabet in rank order.
	pub fn all() -> impl Iterator<Item = Letter> {
		(0..ALPHABET_LEN as u8).map(Letter)
	}
}

impl TryFrom<char> for Letter {
	type Error = LetterError;

	fn try_from(c: char) -> Result<Self, Self::Error> {
		if c.is_ascii() {
			Letter::from_ascii(c as u8)
		} else {
			Err(LetterError::OutOfRange(c))
		}
	}
}

impl From<Letter> for char {
	fn from(letter: Letter) -> Self {
		letter.to_ascii() as char
	}
}

impl fmt::Display for Letter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", char::from(*self))
	}
}

/// Three consecutive letters, the unit the frequency table is sampled by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trigraph(pub [Letter; 3]);

impl Trigraph {
	/// True when the first two letters are both consonants. Such starts are
	/// redrawn by the generator.
	pub fn has_consonant_start(&self) -> bool {
		self.0[0].is_consonant() && self.0[1].is_consonant()
	}

	pub fn letters(&self) -> &[Letter; 3] {
		&self.0
	}
}

impl fmt::Display for Trigraph {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for letter in &self.0 {
			write!(f, "{letter}")?;
		}
		Ok(())
	}
}
