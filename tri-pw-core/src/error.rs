use thiserror::Error;

/// A byte or character that is not a lowercase ASCII letter.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterError {
	#[error("'{0}' is not a letter in a..=z")]
	OutOfRange(char),
	#[error("letter rank {0} is out of range (max 25)")]
	RankOutOfRange(usize),
}

/// Problems with a frequency table, raised when it is built, decoded or
/// handed to a `Generator`.
#[derive(Error, Debug)]
pub enum TableError {
	#[error("frequency table is empty (total weight is 0)")]
	Empty,
	#[error("every weighted trigraph in the frequency table starts with two consonants")]
	NoPronounceableStart,
	#[error("frequency table has {found} cells, expected {expected}")]
	BadCellCount { found: usize, expected: usize },
	#[error("table encoding failed: {0}")]
	Encoding(#[from] postcard::Error),
	#[error("corpus I/O failed: {0}")]
	Io(#[from] std::io::Error),
}

/// Faults raised while generating a single password.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
	#[error("requested length {requested} exceeds the maximum of {max}")]
	LengthOutOfRange { requested: usize, max: usize },
	#[error("draw {draw} walked past the end of the table (total weight {total})")]
	TableExhausted { draw: u64, total: u64 },
	#[error("output buffer is full ({0} letters)")]
	BufferFull(usize),
	#[error(transparent)]
	Letter(#[from] LetterError),
}

/// Invalid word size handed to the capitalization pass.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapitalizeError {
	#[error("word size must be >= 0, got {0}")]
	NegativeWordSize(i32),
}

/// A request field that cannot be resolved into a valid configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
	#[error("length: nonsensical negative value {0}")]
	NegativeLength(i64),
	#[error("length: {requested} is too many characters; max = {max}")]
	LengthTooLong { requested: i64, max: usize },
	#[error("quantity: {0} is an invalid quantity of output strings; min = 0")]
	NegativeQuantity(i64),
	#[error("quantity: {requested} is too many output strings; max = {max}")]
	QuantityTooLarge { requested: i64, max: usize },
	#[error("word size: {0} is negative; use 0 for no capitalization")]
	NegativeWordSize(i32),
}

/// Umbrella error for the batch-level operations.
#[derive(Error, Debug)]
pub enum Error {
	#[error(transparent)]
	Table(#[from] TableError),
	#[error(transparent)]
	Generate(#[from] GenerateError),
	#[error(transparent)]
	Capitalize(#[from] CapitalizeError),
	#[error(transparent)]
	Request(#[from] RequestError),
}

impl Error {
	/// Whether the error is caused by caller input rather than by a broken
	/// table or an internal inconsistency.
	pub fn is_bad_input(&self) -> bool {
		matches!(self, Error::Request(_) | Error::Generate(GenerateError::LengthOutOfRange { .. }))
	}
}
