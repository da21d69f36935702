//! On-disk sample folder builder
//!
//! Writes short silent WAV files into a temporary directory so scans see
//! real audio files.

use csg_order::Symbol;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary sample folder, removed on drop
pub struct SampleTree {
    dir: TempDir,
}

impl SampleTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a 10 ms mono WAV at `relative` (parent folders created)
    pub fn add(&self, relative: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create sample folder");
        }

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).expect("create wav");
        for _ in 0..480 {
            writer.write_sample(0i16).expect("write sample");
        }
        writer.finalize().expect("finalize wav");

        path.canonicalize().expect("canonicalize sample path")
    }
}

/// Symbols from string literals
pub fn symbols(list: &[&str]) -> Vec<Symbol> {
    list.iter().map(|s| Symbol::new(s)).collect()
}

/// Path of a checked-in fixture document
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
