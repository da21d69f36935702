//! Shared generation constants

/// Output file written by the generation pipeline; never treated as a source sample
pub const RESERVED_OUTPUT_NAME: &str = "chromatic.wav";

/// Extension of every sample the pipeline can load
pub const SAMPLE_EXTENSION: &str = "wav";

/// Chromatic note names, index 0 = C
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Lowest selectable start octave
pub const MIN_OCTAVE: u8 = 1;

/// Highest selectable start octave
pub const MAX_OCTAVE: u8 = 8;

/// Upper bound for the number of generated semitones
pub const MAX_SEMITONES: u32 = 128;

/// Upper bound for the silence between two generated notes (seconds)
pub const MAX_GAP_SEC: f64 = 5.0;
