use std::collections::BTreeMap;
use std::sync::mpsc;
use std::thread;

use crate::error::{CapitalizeError, Error, GenerateError, RequestError, TableError};
use crate::random::{RandomSource, derive_seed, seeded};
use super::capitalize::capitalize;
use super::letters::{Letter, Trigraph};
use super::request::{MAX_QUANTITY, ResolvedRequest};
use super::state::{GenerationState, MAX_OUT_LEN};
use super::table::FrequencyTable;

/// Batches collected in memory are refused above `MAX_QUANTITY` passwords.
fn check_quantity(request: &ResolvedRequest) -> Result<(), Error> {
	if request.quantity > MAX_QUANTITY {
		return Err(RequestError::QuantityTooLarge {
			requested: i64::try_from(request.quantity).unwrap_or(i64::MAX),
			max: MAX_QUANTITY,
		}
		.into());
	}
	Ok(())
}

/// Letters used when the table has no continuation for the current pair.
const FALLBACK_VOWELS: &[u8; 6] = b"aeiouy";

/// Result of a single generation: the lowercase password and the number of
/// letters actually produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generated {
	pub password: String,
	pub length: usize,
}

impl Generated {
	/// True if the produced length differs from the requested one.
	///
	/// Not expected with a valid table; batches report it as a warning.
	pub fn is_anomalous(&self, requested: usize) -> bool {
		self.length != requested
	}
}

/// Pronounceable password generator over a trigraph frequency table.
///
/// # Responsibilities
/// - Pick a weighted starting trigraph, redrawing hard-to-pronounce starts
/// - Extend the password one letter at a time from the conditional
///   distribution of the last two letters
/// - Produce capitalized batches, sequentially or in parallel
///
/// The generator only borrows the table; it is `Copy` and can be handed to
/// any number of threads.
#[derive(Clone, Copy, Debug)]
pub struct Generator<'t> {
	table: &'t FrequencyTable,
}

impl<'t> Generator<'t> {
	/// Creates a generator after checking that the table can drive it.
	///
	/// # Errors
	/// - `TableError::Empty` if the table has no weight at all.
	/// - `TableError::NoPronounceableStart` if every weighted trigraph starts
	///   with two consonants, which would make start selection loop forever.
	pub fn new(table: &'t FrequencyTable) -> Result<Self, TableError> {
		if table.total() == 0 {
			return Err(TableError::Empty);
		}
		if table.pronounceable_weight() == 0 {
			return Err(TableError::NoPronounceableStart);
		}
		Ok(Self { table })
	}

	pub fn table(&self) -> &'t FrequencyTable {
		self.table
	}

	/// Draws starting trigraphs until one does not begin with two consonants.
	///
	/// # Errors
	/// Returns `GenerateError::TableExhausted` if a draw falls outside the
	/// table's total weight, which only a misbehaving `RandomSource` can cause.
	pub fn pick_start<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Trigraph, GenerateError> {
		let total = self.table.total();
		let mut rejected = 0u32;
		loop {
			let draw = rng.below(total);
			let trigraph = self
				.table
				.trigraph_at(draw)
				.ok_or(GenerateError::TableExhausted { draw, total })?;
			if !trigraph.has_consonant_start() {
				if rejected > 0 {
					log::trace!("accepted start '{trigraph}' after {rejected} rejected draws");
				}
				return Ok(trigraph);
			}
			rejected += 1;
		}
	}

	/// Draws the letter following the pair `ab`.
	///
	/// Falls back to a uniformly chosen letter of `aeiouy` when the table
	/// never saw `ab` followed by anything.
	pub fn next_letter<R: RandomSource + ?Sized>(
		&self,
		a: Letter,
		b: Letter,
		rng: &mut R,
	) -> Result<Letter, GenerateError> {
		let row_sum = self.table.row_sum(a, b);
		if row_sum == 0 {
			let vowel = FALLBACK_VOWELS[rng.below(FALLBACK_VOWELS.len() as u64) as usize];
			return Ok(Letter::from_ascii(vowel)?);
		}

		let draw = rng.below(row_sum);
		self.table
			.letter_at(a, b, draw)
			.ok_or(GenerateError::TableExhausted { draw, total: row_sum })
	}

	/// Generates one lowercase password of `length` letters.
	///
	/// # Behavior
	/// - `length == 0` returns an empty password without drawing anything.
	/// - A full starting trigraph is always drawn; for `length < 3` it is
	///   truncated afterwards, so short passwords are prefixes of what a
	///   longer request with the same draws would produce.
	/// - The password is then extended letter by letter until it reaches
	///   `length` (never more than `MAX_OUT_LEN`).
	///
	/// # Errors
	/// - `LengthOutOfRange` if `length > MAX_OUT_LEN`.
	/// - `TableExhausted` if the random source draws out of range.
	pub fn generate<R: RandomSource + ?Sized>(&self, length: usize, rng: &mut R) -> Result<Generated, GenerateError> {
		if length > MAX_OUT_LEN {
			return Err(GenerateError::LengthOutOfRange { requested: length, max: MAX_OUT_LEN });
		}
		if length == 0 {
			return Ok(Generated { password: String::new(), length: 0 });
		}

		let mut state = GenerationState::new();
		let start = self.pick_start(rng)?;
		state.push_trigraph(&start)?;

		if state.len() >= length {
			state.truncate(length);
		}

		while state.len() < length && state.len() < MAX_OUT_LEN {
			let Some((a, b)) = state.last_pair() else {
				break;
			};
			let next = self.next_letter(a, b, rng)?;
			state.push(next)?;
		}

		let produced = state.len();
		Ok(Generated { password: state.finish(), length: produced })
	}

	/// Generates and capitalizes one password, warning on a length mismatch.
	fn password<R: RandomSource + ?Sized>(&self, length: usize, word_size: i32, rng: &mut R) -> Result<String, Error> {
		let generated = self.generate(length, rng)?;
		let anomalous = generated.is_anomalous(length);
		let mut password = generated.password;
		capitalize(&mut password, word_size)?;
		if anomalous {
			log::warn!(
				"bad output length? requested = {}, produced = {}, output = \"{}\"",
				length,
				generated.length,
				password
			);
		}
		Ok(password)
	}

	/// Lazily generates the passwords of a request from a single random
	/// stream, in order.
	///
	/// The iterator stops after the first error.
	pub fn batch<'r, R: RandomSource + ?Sized>(&self, request: &ResolvedRequest, rng: &'r mut R) -> Batch<'t, 'r, R> {
		Batch { generator: *self, request: *request, rng, produced: 0, failed: false }
	}

	/// Generates every password of a request from a single random stream.
	///
	/// A negative word size or a quantity above `MAX_QUANTITY` is rejected
	/// before anything is generated. A zero length or quantity yields an
	/// empty batch.
	pub fn generate_batch<R: RandomSource + ?Sized>(&self, request: &ResolvedRequest, rng: &mut R) -> Result<Vec<String>, Error> {
		check_quantity(request)?;
		self.batch(request, rng).collect()
	}

	/// Generates every password of a request on all CPU cores.
	///
	/// # Behavior
	/// - Password `n` draws from its own generator seeded with
	///   `derive_seed(seed, n)`, so the output only depends on the seed, never
	///   on the number of threads.
	/// - The sequence differs from `generate_batch` with the same seed.
	/// - Passwords are returned in index order.
	///
	/// # Notes
	/// - Each worker owns a contiguous index range and reports
	///   `(index, result)` pairs over an MPSC channel.
	/// - Results are reordered as they arrive; only out-of-order passwords
	///   are buffered.
	/// - The first error (by arrival) is returned and stops the workers.
	pub fn generate_batch_parallel(&self, request: &ResolvedRequest) -> Result<Vec<String>, Error> {
		if request.word_size < 0 {
			return Err(CapitalizeError::NegativeWordSize(request.word_size).into());
		}
		check_quantity(request)?;
		if request.is_noop() {
			return Ok(Vec::new());
		}

		let quantity = request.quantity;
		let workers = num_cpus::get().clamp(1, quantity);
		let chunk_size = quantity.div_ceil(workers);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| -> Result<Vec<String>, Error> {
			for start in (0..quantity).step_by(chunk_size) {
				let end = start.saturating_add(chunk_size).min(quantity);
				let tx = tx.clone();
				let generator = *self;
				scope.spawn(move || {
					for index in start..end {
						let mut rng = seeded(derive_seed(request.seed.0, index as u64));
						let result = generator.password(request.length, request.word_size, &mut rng);
						if tx.send((index, result)).is_err() {
							break;
						}
					}
				});
			}
			drop(tx);

			let mut passwords = Vec::new();
			let mut pending = BTreeMap::new();
			for (index, result) in rx {
				pending.insert(index, result?);
				while let Some(password) = pending.remove(&passwords.len()) {
					passwords.push(password);
				}
			}
			Ok(passwords)
		})
	}
}

/// Iterator over the passwords of a request, see `Generator::batch`.
pub struct Batch<'t, 'r, R: RandomSource + ?Sized> {
	generator: Generator<'t>,
	request: ResolvedRequest,
	rng: &'r mut R,
	produced: usize,
	failed: bool,
}

impl<R: RandomSource + ?Sized> Iterator for Batch<'_, '_, R> {
	type Item = Result<String, Error>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed || self.request.length == 0 || self.produced >= self.request.quantity {
			return None;
		}
		if self.request.word_size < 0 {
			self.failed = true;
			return Some(Err(CapitalizeError::NegativeWordSize(self.request.word_size).into()));
		}

		self.produced += 1;
		let result = self.generator.password(self.request.length, self.request.word_size, &mut *self.rng);
		self.failed = result.is_err();
		Some(result)
	}
}
