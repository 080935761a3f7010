use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use super::letters::{ALPHABET_LEN, Letter, Trigraph};

/// Number of cells in a dense trigraph table (26 × 26 × 26).
pub const CELLS: usize = ALPHABET_LEN * ALPHABET_LEN * ALPHABET_LEN;

/// English word list the built-in table is derived from.
pub const BUILTIN_CORPUS: &str = include_str!("../../data/english.txt");

static BUILTIN: LazyLock<FrequencyTable> = LazyLock::new(|| {
	let mut counter = TrigraphCounter::new();
	counter.add_text(BUILTIN_CORPUS);
	let table = counter.build();
	log::debug!("built-in trigraph table ready, total weight {}", table.total());
	table
});

#[inline]
fn cell(a: Letter, b: Letter, c: Letter) -> usize {
	(a.rank() * ALPHABET_LEN + b.rank()) * ALPHABET_LEN + c.rank()
}

#[inline]
fn row_start(a: Letter, b: Letter) -> usize {
	(a.rank() * ALPHABET_LEN + b.rank()) * ALPHABET_LEN
}

/// Immutable trigraph frequency table.
///
/// `weight(a, b, c)` is how often the sequence `abc` was observed in the
/// corpus the table was built from. The table is dense (every one of the
/// 17,576 trigraphs has a cell) and the grand total is computed once when the
/// table is frozen.
///
/// ## Invariants
/// - `counts.len() == CELLS`
/// - `total == counts.iter().sum()`
/// - No method mutates the counts, so a table can be shared freely between
///   threads (`&FrequencyTable` or `Arc<FrequencyTable>`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
	/// Flattened `[a][b][c]` weights, `a` major.
	counts: Box<[u32]>,
	/// Sum of all weights.
	total: u64,
}

#[derive(Serialize)]
struct EncodedTableRef<'a> {
	counts: &'a [u32],
}

#[derive(Deserialize)]
struct EncodedTable {
	counts: Vec<u32>,
}

impl FrequencyTable {
	/// Returns the table built from the bundled English corpus.
	///
	/// The table is built on first use and shared for the rest of the process.
	pub fn builtin() -> &'static FrequencyTable {
		&BUILTIN
	}

	/// Freezes a flattened count vector into a table.
	///
	/// # Errors
	/// Returns `TableError::BadCellCount` if `counts` does not have exactly
	/// `CELLS` entries.
	pub fn from_counts(counts: Vec<u32>) -> Result<Self, TableError> {
		if counts.len() != CELLS {
			return Err(TableError::BadCellCount { found: counts.len(), expected: CELLS });
		}
		let total = counts.iter().map(|&c| c as u64).sum();
		Ok(Self { counts: counts.into_boxed_slice(), total })
	}

	/// Observed frequency of the trigraph `abc`.
	pub fn weight(&self, a: Letter, b: Letter, c: Letter) -> u32 {
		self.counts[cell(a, b, c)]
	}

	/// All 26 continuation weights after the pair `ab`.
	pub fn row(&self, a: Letter, b: Letter) -> &[u32] {
		let start = row_start(a, b);
		&self.counts[start..start + ALPHABET_LEN]
	}

	/// Sum of the continuation weights after the pair `ab`.
	pub fn row_sum(&self, a: Letter, b: Letter) -> u64 {
		self.row(a, b).iter().map(|&c| c as u64).sum()
	}

	/// Grand total of all weights.
	pub fn total(&self) -> u64 {
		self.total
	}

	/// Number of trigraphs observed at least once.
	pub fn observed(&self) -> usize {
		self.counts.iter().filter(|&&c| c > 0).count()
	}

	/// Total weight of trigraphs that the generator accepts as a starting
	/// point (the first two letters are not both consonants).
	///
	/// If this is zero, starting-trigraph selection could never terminate.
	pub fn pronounceable_weight(&self) -> u64 {
		let mut sum = 0;
		for a in Letter::all() {
			for b in Letter::all() {
				if !(a.is_consonant() && b.is_consonant()) {
					sum += self.row_sum(a, b);
				}
			}
		}
		sum
	}

	/// Selects the trigraph whose cumulative weight first exceeds `draw`.
	///
	/// Cells are walked with the first letter outermost and the last letter
	/// innermost. When `draw` is uniform in `[0, total)`, the trigraph `abc`
	/// is returned with probability `weight(a, b, c) / total`; zero-weight
	/// cells are never returned.
	///
	/// Returns `None` when `draw >= total`.
	pub fn trigraph_at(&self, draw: u64) -> Option<Trigraph> {
		let mut sum = 0u64;
		for (index, &count) in self.counts.iter().enumerate() {
			sum += count as u64;
			if sum > draw {
				let a = Letter::from_rank(index / (ALPHABET_LEN * ALPHABET_LEN)).ok()?;
				let b = Letter::from_rank(index / ALPHABET_LEN % ALPHABET_LEN).ok()?;
				let c = Letter::from_rank(index % ALPHABET_LEN).ok()?;
				return Some(Trigraph([a, b, c]));
			}
		}
		None
	}

	/// Selects the letter following `ab` whose cumulative row weight first
	/// exceeds `draw`.
	///
	/// Returns `None` when `draw >= row_sum(a, b)`, which includes every draw
	/// on an empty row.
	pub fn letter_at(&self, a: Letter, b: Letter, draw: u64) -> Option<Letter> {
		let mut sum = 0u64;
		for (rank, &count) in self.row(a, b).iter().enumerate() {
			sum += count as u64;
			if sum > draw {
				return Letter::from_rank(rank).ok();
			}
		}
		None
	}

	/// Encodes the table with `postcard`.
	pub fn to_bytes(&self) -> Result<Vec<u8>, TableError> {
		Ok(postcard::to_stdvec(&EncodedTableRef { counts: &self.counts })?)
	}

	/// Decodes a table written by `to_bytes`, recomputing the total.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, TableError> {
		let encoded: EncodedTable = postcard::from_bytes(bytes)?;
		Self::from_counts(encoded.counts)
	}
}

/// Mutable trigraph counter used to build a `FrequencyTable` from words.
///
/// Counting is split from the frozen table so that a table, once built, is
/// never modified. Partial counters built on different threads are combined
/// with `merge`.
#[derive(Clone, Debug)]
pub struct TrigraphCounter {
	counts: Vec<u32>,
}

impl Default for TrigraphCounter {
	fn default() -> Self {
		Self::new()
	}
}

impl TrigraphCounter {
	pub fn new() -> Self {
		Self { counts: vec![0; CELLS] }
	}

	/// Counts every overlapping trigraph of a word.
	///
	/// # Notes
	/// - ASCII letters are lowercased first.
	/// - Any other character ends the current run of letters, so `"it's"`
	///   contributes nothing and `"one-way"` contributes `one` and `way`.
	pub fn add_word(&mut self, word: &str) {
		let (mut first, mut second): (Option<Letter>, Option<Letter>) = (None, None);
		for byte in word.bytes() {
			match Letter::from_ascii(byte.to_ascii_lowercase()) {
				Ok(third) => {
					if let (Some(a), Some(b)) = (first, second) {
						let count = &mut self.counts[cell(a, b, third)];
						*count = count.saturating_add(1);
					}
					first = second;
					second = Some(third);
				}
				Err(_) => {
					first = None;
					second = None;
				}
			}
		}
	}

	/// Counts every line of a corpus text as a word.
	pub fn add_text(&mut self, text: &str) {
		for line in text.lines() {
			self.add_word(line);
		}
	}

	/// Adds the counts of another counter to this one.
	pub fn merge(&mut self, other: &Self) {
		for (count, extra) in self.counts.iter_mut().zip(&other.counts) {
			*count = count.saturating_add(*extra);
		}
	}

	/// Freezes the counter into an immutable table.
	pub fn build(self) -> FrequencyTable {
		let total = self.counts.iter().map(|&c| c as u64).sum();
		FrequencyTable { counts: self.counts.into_boxed_slice(), total }
	}
}
