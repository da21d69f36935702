//! Pre-flight check of a resolved sequence before generation

use crate::error::{OrderError, Result};
use std::collections::HashSet;
use std::path::PathBuf;

/// A file sequence verified to exist on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePlan {
    pub files: Vec<PathBuf>,
    /// Number of distinct source files in the sequence
    pub distinct: usize,
}

impl SequencePlan {
    /// Check that `files` covers all `slots` generated notes and every
    /// entry still exists
    ///
    /// The first missing file is reported.
    pub fn verify(files: Vec<PathBuf>, slots: usize) -> Result<Self> {
        if files.is_empty() {
            return Err(OrderError::EmptySequence);
        }
        if files.len() < slots {
            return Err(OrderError::SequenceTooShort {
                resolved: files.len(),
                slots,
            });
        }
        if let Some(missing) = files.iter().find(|p| !p.is_file()) {
            return Err(OrderError::MissingSample(missing.clone()));
        }

        let distinct = files
            .iter()
            .map(|p| p.canonicalize().unwrap_or_else(|_| p.clone()))
            .collect::<HashSet<_>>()
            .len();

        tracing::info!(files = files.len(), distinct, "Sequence ready for generation");
        Ok(Self { files, distinct })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
