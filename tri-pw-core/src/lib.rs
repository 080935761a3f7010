//! Pronounceable password generation from trigraph statistics.
//!
//! This crate provides:
//! - A trigraph (3-letter) frequency table, bundled or built from a corpus
//! - Weighted sampling of a pronounceable starting trigraph
//! - Letter-by-letter extension from the conditional trigraph distribution
//! - Capitalization by word size, and sequential or parallel batches
//!
//! Passwords are meant to be memorable, not secret: the random source is a
//! seedable, non-cryptographic generator and the same seed always yields the
//! same passwords.

/// Errors for tables, generation, capitalization and requests.
pub mod error;

/// Corpus and cache file helpers.
pub mod io;

/// Letters, tables, generator and post-processing.
pub mod model;

/// Random source trait, seeding and seed-phrase hashing.
pub mod random;

pub use error::{CapitalizeError, Error, GenerateError, LetterError, RequestError, TableError};
pub use model::capitalize::{CAP_FIRST, CAP_NONE, capitalize};
pub use model::generator::{Batch, Generated, Generator};
pub use model::letters::{Letter, LetterClass, Trigraph};
pub use model::request::{MAX_QUANTITY, PasswordRequest, ResolvedRequest};
pub use model::state::MAX_OUT_LEN;
pub use model::table::{FrequencyTable, TrigraphCounter};
pub use random::{RandomSource, Seed};
