//! Top-level module for the trigraph password generator.
//!
//! This module provides:
//! - Letters and their phonetic classes (`Letter`, `Trigraph`)
//! - The immutable trigraph frequency table and its builder
//! - Corpus loading with a binary table cache
//! - The weighted-sampling `Generator` and batch generation
//! - The capitalization post-pass
//! - Request configuration with defaults (`PasswordRequest`)

/// Alphabet ranks, vowel/consonant classes and trigraphs.
pub mod letters;

/// Dense 26×26×26 frequency table (`FrequencyTable`) and the mutable
/// counter (`TrigraphCounter`) it is built with.
pub mod table;

/// Corpus word lists: parallel table construction and `.bin` caching.
pub mod corpus;

/// Per-password output buffer with bounded writes.
pub mod state;

/// Weighted trigraph sampling, extension loop and batch generation.
pub mod generator;

/// PascalCase-style capitalization of finished passwords.
pub mod capitalize;

/// Batch configuration with named optional fields and defaults.
pub mod request;
