//! Error types for csg-order
//!
//! - [`PresetError`]: a preset or template document is structurally or
//!   semantically invalid
//! - [`ResolutionError`]: a valid preset cannot be turned into a sequence of
//!   the requested length
//! - [`OrderError`]: the sample folder or a resolved sequence is not ready
//!   for generation
//!
//! Messages are meant to be shown to the user verbatim.

use crate::symbol::Symbol;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid preset, template or settings document
#[derive(Debug, Error)]
pub enum PresetError {
    /// Required key absent from an imported document
    #[error("Missing {kind} key: {key}")]
    MissingKey { kind: &'static str, key: &'static str },

    #[error("Preset must declare at least one allowed symbol")]
    EmptyAlphabet,

    #[error("Preset order cannot be empty")]
    EmptyOrder,

    /// Order token that is not part of the declared alphabet
    #[error("Unknown token in order: {0}")]
    UnknownToken(Symbol),

    #[error("Unsupported selection policy: {0}")]
    UnsupportedSelection(String),

    #[error("Unsupported length policy: {0}")]
    UnsupportedLength(String),

    #[error("Unsupported missing-symbol policy: {0}")]
    UnsupportedMissing(String),

    /// Document written by a newer format revision
    #[error("Unsupported document version {found} (supported up to {supported})")]
    UnsupportedVersion { found: u64, supported: u64 },

    /// Policy seed that cannot be read as an integer
    #[error("Invalid policy seed: {0}")]
    InvalidSeed(String),

    /// Generation setting outside its allowed range
    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    /// Document is not well-formed JSON or has wrongly typed fields
    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Preset file I/O error {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
}

/// A preset that cannot produce the requested sequence
///
/// Variants raised for a specific symbol expose it through [`ResolutionError::symbol`].
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The preset failed validation before resolution started
    #[error(transparent)]
    InvalidPreset(#[from] PresetError),

    /// Order was empty after normalization (validation was bypassed)
    #[error("Preset order cannot be empty")]
    EmptyOrder,

    /// `on_missing_symbol = error` and the bucket was empty
    #[error("Missing symbol {symbol}")]
    MissingSymbol { symbol: Symbol },

    /// `on_missing_symbol = ask`; the caller must obtain a decision
    #[error("User confirmation required for missing symbol {symbol}")]
    ConfirmationRequired { symbol: Symbol },

    /// A full pass through the order added nothing to the sequence
    #[error("Unable to fill sequence with available symbols")]
    UnableToFill,

    /// Iteration ceiling reached
    #[error("Resolution loop guard triggered after {iterations} tokens")]
    LoopGuard { iterations: usize },

    #[error("Unable to pad sequence to requested length ({resolved} of {target})")]
    PadShortfall { resolved: usize, target: usize },

    #[error("Resolved length {resolved} does not match target {target}")]
    LengthMismatch { resolved: usize, target: usize },
}

impl ResolutionError {
    /// Offending symbol, when the failure is tied to one
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            ResolutionError::MissingSymbol { symbol }
            | ResolutionError::ConfirmationRequired { symbol } => Some(symbol),
            _ => None,
        }
    }

    /// True when the caller should ask the user how to proceed
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, ResolutionError::ConfirmationRequired { .. })
    }
}

/// Sample-folder and pre-flight failures outside preset resolution
#[derive(Debug, Error)]
pub enum OrderError {
    /// Resolved sequence is empty, nothing to hand to the sound engine
    #[error("Custom preset is empty")]
    EmptySequence,

    /// Fewer files than generated slots
    #[error("Custom sequence shorter than semitone count ({resolved} of {slots})")]
    SequenceTooShort { resolved: usize, slots: usize },

    /// A sequence entry no longer exists on disk
    #[error("Missing sample for custom preset: {0}")]
    MissingSample(PathBuf),

    /// Folder holds no `1.wav`, `2.wav`, ... samples
    #[error("No sequential samples found (1.wav, 2.wav, ...) in {0}")]
    NoNumberedSamples(PathBuf),
}

/// Result type for csg-order operations
pub type Result<T> = std::result::Result<T, OrderError>;
