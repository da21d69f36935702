//! csg-order library interface
//!
//! Custom order presets for the chromatic scale generator: map a pattern
//! of symbols ("A, then E, then I ...") onto sample files found on disk and
//! produce the exact file sequence the generation pipeline will process.
//!
//! Pipeline: [`scanner`] (using [`detector`]) builds symbol buckets,
//! [`resolver`] turns a [`preset::Preset`] plus buckets into a sequence,
//! [`persistence`] reads and writes preset and template files.

pub mod default_sequence;
pub mod detector;
pub mod error;
pub mod library;
pub mod persistence;
pub mod plan;
pub mod preset;
pub mod resolver;
pub mod scanner;
pub mod settings;
pub mod symbol;

pub use crate::error::{OrderError, PresetError, ResolutionError, Result};
pub use crate::preset::{
    LengthPolicy, MissingSymbolPolicy, Preset, SelectionMode, SelectionPolicy, Template,
};
pub use crate::resolver::{resolve_sequence, PreviewItem, ResolutionResult};
pub use crate::scanner::{
    scan_symbol_buckets, BucketScanResult, BucketScanner, Buckets, ScanCache,
};
pub use crate::symbol::{Symbol, DEFAULT_SYMBOLS};
