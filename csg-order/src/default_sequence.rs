//! Numbered-sample workflow
//!
//! Without a custom preset the pipeline reads `1.wav`, `2.wav`, ... from the
//! sample folder, either round-robin or as independent random draws.

use crate::error::{OrderError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

/// Sample numbers (1-based) for `target_length` generated slots
///
/// Round-robin yields `1, 2, .., count, 1, 2, ..`; randomized draws are
/// independent picks from `1..=count`, reproducible when `seed` is set.
pub fn build_default_sequence(
    file_count: usize,
    target_length: usize,
    randomize: bool,
    seed: Option<i64>,
) -> Vec<usize> {
    if file_count == 0 {
        return Vec::new();
    }

    if randomize {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed as u64),
            None => StdRng::from_entropy(),
        };
        (0..target_length).map(|_| rng.gen_range(1..=file_count)).collect()
    } else {
        (0..target_length).map(|i| (i % file_count) + 1).collect()
    }
}

/// Count consecutive `1.wav`, `2.wav`, ... in `folder`
pub fn count_numbered_samples(folder: &Path) -> usize {
    let mut count = 0;
    while folder.join(format!("{}.wav", count + 1)).is_file() {
        count += 1;
    }
    count
}

/// Map sample numbers onto their files in `folder`
pub fn default_sequence_paths(folder: &Path, numbers: &[usize]) -> Vec<PathBuf> {
    numbers
        .iter()
        .map(|n| folder.join(format!("{}.wav", n)))
        .collect()
}

/// Discover the numbered samples in `folder` and build their file sequence
pub fn resolve_default_sequence(
    folder: &Path,
    target_length: usize,
    randomize: bool,
    seed: Option<i64>,
) -> Result<Vec<PathBuf>> {
    let count = count_numbered_samples(folder);
    if count == 0 {
        return Err(OrderError::NoNumberedSamples(folder.to_path_buf()));
    }
    tracing::info!(folder = %folder.display(), count, "Found numbered samples");

    let numbers = build_default_sequence(count, target_length, randomize, seed);
    Ok(default_sequence_paths(folder, &numbers))
}
