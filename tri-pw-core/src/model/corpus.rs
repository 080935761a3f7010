use std::path::Path;
use std::sync::mpsc;
use std::thread;

use crate::error::TableError;
use crate::io::{list_files, read_words, sibling_path};
use super::table::{FrequencyTable, TrigraphCounter};

/// Extension of corpus word lists.
pub const CORPUS_EXTENSION: &str = "txt";

/// Extension of compiled table caches written next to a corpus.
pub const CACHE_EXTENSION: &str = "bin";

/// Loads the frequency table for a corpus word list.
///
/// - `filepath` is the corpus, one word per line.
/// - If a sibling `.bin` cache exists it is decoded with `postcard` and the
///   corpus itself is not read.
/// - Otherwise the table is counted with `build_table`, and the cache is
///   written for the next run.
///
/// # Errors
/// Returns an error if the corpus or cache cannot be read or written, or if
/// the cache is not a valid table.
pub fn load_table<P: AsRef<Path>>(filepath: P) -> Result<FrequencyTable, TableError> {
	let cache_path = sibling_path(&filepath, CACHE_EXTENSION)?;
	if cache_path.exists() {
		let bytes = std::fs::read(&cache_path)?;
		let table = FrequencyTable::from_bytes(&bytes)?;
		log::info!("loaded trigraph table from {}", cache_path.display());
		return Ok(table);
	}

	let lines = read_words(&filepath)?;
	let table = build_table(&lines);
	std::fs::write(&cache_path, table.to_bytes()?)?;
	log::info!(
		"built trigraph table from {} ({} words, total weight {}), cached to {}",
		filepath.as_ref().display(),
		lines.len(),
		table.total(),
		cache_path.display()
	);
	Ok(table)
}

/// Counts the trigraphs of a word list on all CPU cores.
///
/// # Behavior
/// - Splits the words into `cpus * 8` chunks.
/// - Spawns one thread per chunk, each filling its own `TrigraphCounter`.
/// - Merges the partial counters as they arrive and freezes the result.
///
/// Counting is commutative, so the table does not depend on the split.
pub fn build_table(words: &[String]) -> FrequencyTable {
	if words.is_empty() {
		return TrigraphCounter::new().build();
	}

	let cpus = num_cpus::get();
	let factor = 8;
	let chunks = cpus * factor;
	let chunk_size = words.len().div_ceil(chunks);

	let (tx, rx) = mpsc::channel();
	thread::scope(|scope| {
		for chunk in words.chunks(chunk_size) {
			let tx = tx.clone();
			scope.spawn(move || {
				let mut partial = TrigraphCounter::new();
				for word in chunk {
					partial.add_word(word);
				}
				// The receiver outlives the scope, so this cannot fail.
				let _ = tx.send(partial);
			});
		}
	});
	drop(tx);

	let mut counter = TrigraphCounter::new();
	for partial in rx.iter() {
		counter.merge(&partial);
	}
	counter.build()
}

/// Lists the corpus names (file stems of `.txt` files) in a directory.
pub fn list_corpora<P: AsRef<Path>>(dir: P) -> Result<Vec<String>, TableError> {
	let mut names: Vec<String> = list_files(dir, CORPUS_EXTENSION)?
		.into_iter()
		.filter_map(|file| file.strip_suffix(".txt").map(str::to_owned))
		.collect();
	names.sort();
	Ok(names)
}
