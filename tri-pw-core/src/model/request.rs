use crate::error::RequestError;
use crate::random::Seed;
use super::state::MAX_OUT_LEN;

/// Password length used when none is given.
pub const DEFAULT_LENGTH: usize = 9;

/// Number of passwords generated when no quantity is given.
pub const DEFAULT_QUANTITY: usize = 8;

/// Largest number of passwords a single request may ask for.
pub const MAX_QUANTITY: usize = 1_000_000;

/// Capitalization word size used when none is given.
pub const DEFAULT_WORD_SIZE: i32 = 6;

/// User-facing configuration of a password batch.
///
/// Every field is optional; a missing field falls back to its default when
/// the request is resolved. Values are kept signed so that nonsensical
/// negative input can be reported instead of wrapping around.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordRequest {
	/// Length of each password (0..=255).
	pub length: Option<i64>,

	/// Number of passwords to generate.
	pub quantity: Option<i64>,

	/// Capitalization stride, see `capitalize`.
	pub word_size: Option<i32>,

	/// Seed of the random sequence. Defaults to the current time.
	pub seed: Option<Seed>,
}

/// A validated `PasswordRequest` with every default filled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedRequest {
	pub length: usize,
	pub quantity: usize,
	pub word_size: i32,
	pub seed: Seed,
}

impl PasswordRequest {
	/// Fills in defaults and validates every field.
	///
	/// # Errors
	/// - `NegativeLength` / `LengthTooLong` when the length is outside
	///   `0..=MAX_OUT_LEN`
	/// - `NegativeQuantity` / `QuantityTooLarge` when the quantity is outside
	///   `0..=MAX_QUANTITY`
	/// - `NegativeWordSize` for a word size below 0
	///
	/// # Notes
	/// - A length or quantity of 0 is valid and produces no passwords.
	pub fn resolve(&self) -> Result<ResolvedRequest, RequestError> {
		let length = match self.length {
			None => DEFAULT_LENGTH,
			Some(l) if l < 0 => return Err(RequestError::NegativeLength(l)),
			Some(l) if l > MAX_OUT_LEN as i64 => {
				return Err(RequestError::LengthTooLong { requested: l, max: MAX_OUT_LEN });
			}
			Some(l) => l as usize,
		};

		let quantity = match self.quantity {
			None => DEFAULT_QUANTITY,
			Some(q) if q < 0 => return Err(RequestError::NegativeQuantity(q)),
			Some(q) if q > MAX_QUANTITY as i64 => {
				return Err(RequestError::QuantityTooLarge { requested: q, max: MAX_QUANTITY });
			}
			Some(q) => q as usize,
		};

		let word_size = match self.word_size {
			None => DEFAULT_WORD_SIZE,
			Some(w) if w < 0 => return Err(RequestError::NegativeWordSize(w)),
			Some(w) => w,
		};

		let seed = self.seed.unwrap_or_else(Seed::from_time);

		Ok(ResolvedRequest { length, quantity, word_size, seed })
	}
}

impl ResolvedRequest {
	/// True when the request produces no output at all.
	pub fn is_noop(&self) -> bool {
		self.length == 0 || self.quantity == 0
	}
}
