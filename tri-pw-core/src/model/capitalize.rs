use crate::error::CapitalizeError;
use super::state::MAX_OUT_LEN;

/// Word size that leaves a password entirely lowercase.
pub const CAP_NONE: i32 = 0;

/// Word size that capitalizes only the first letter of any password.
pub const CAP_FIRST: i32 = MAX_OUT_LEN as i32;

/// Uppercases the letters at positions `0, w, 2w, …` of `password`.
///
/// # Parameters
/// - `word_size`: stride between capitalized letters.
///   `CAP_NONE` (0) leaves the text untouched, `1` uppercases everything,
///   any stride `>= password.len()` (such as `CAP_FIRST`) only touches the
///   first letter.
///
/// # Errors
/// Returns `CapitalizeError::NegativeWordSize` for a negative stride; the
/// password is left unchanged in that case.
///
/// # Notes
/// - Positions are byte offsets. Only `a..=z` bytes change; anything else at
///   a stride position (digits, punctuation, non-ASCII) is skipped.
pub fn capitalize(password: &mut String, word_size: i32) -> Result<(), CapitalizeError> {
	if word_size < 0 {
		return Err(CapitalizeError::NegativeWordSize(word_size));
	}
	if word_size == CAP_NONE {
		return Ok(());
	}

	let len = password.len();
	for i in (0..len).step_by(word_size as usize) {
		// Lowercase ASCII always sits on a char boundary; anything else is skipped.
		if let Some(letter) = password.get_mut(i..i + 1) {
			if letter.as_bytes()[0].is_ascii_lowercase() {
				letter.make_ascii_uppercase();
			}
		}
	}
	Ok(())
}
