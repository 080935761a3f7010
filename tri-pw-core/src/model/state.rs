use crate::error::GenerateError;
use super::letters::{Letter, Trigraph};

/// Maximum number of letters in one generated password.
pub const MAX_OUT_LEN: usize = 255;

/// Output buffer of a single password generation.
///
/// A `GenerationState` is created for one password, owned by the call that
/// generates it, and consumed by `finish`. Generations never share a state.
///
/// ## Invariants
/// - `letters.len() <= MAX_OUT_LEN`
/// - Every entry is a validated `Letter`, so the output is always lowercase
///   ASCII.
#[derive(Debug)]
pub struct GenerationState {
	letters: Vec<Letter>,
}

impl GenerationState {
	/// Creates an empty buffer with room for `MAX_OUT_LEN` letters.
	pub fn new() -> Self {
		Self { letters: Vec::with_capacity(MAX_OUT_LEN) }
	}

	/// Number of letters written so far.
	pub fn len(&self) -> usize {
		self.letters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.letters.is_empty()
	}

	/// Appends one letter.
	///
	/// # Errors
	/// Returns `GenerateError::BufferFull` once `MAX_OUT_LEN` letters have
	/// been written.
	pub fn push(&mut self, letter: Letter) -> Result<(), GenerateError> {
		if self.letters.len() >= MAX_OUT_LEN {
			return Err(GenerateError::BufferFull(MAX_OUT_LEN));
		}
		self.letters.push(letter);
		Ok(())
	}

	/// Appends the three letters of a trigraph.
	pub fn push_trigraph(&mut self, trigraph: &Trigraph) -> Result<(), GenerateError> {
		for letter in trigraph.letters() {
			self.push(*letter)?;
		}
		Ok(())
	}

	/// The two most recently written letters, oldest first.
	pub fn last_pair(&self) -> Option<(Letter, Letter)> {
		match self.letters.as_slice() {
			[.., a, b] => Some((*a, *b)),
			_ => None,
		}
	}

	/// Drops letters past `len`. No-op if the buffer is already shorter.
	pub fn truncate(&mut self, len: usize) {
		self.letters.truncate(len);
	}

	/// Consumes the buffer and returns it as a lowercase string.
	pub fn finish(self) -> String {
		self.letters.into_iter().map(char::from).collect()
	}
}

impl Default for GenerationState {
	fn default() -> Self {
		Self::new()
	}
}
