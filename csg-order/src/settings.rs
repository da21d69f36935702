//! Typed view over a template's generation settings
//!
//! Templates store settings as an open map so that keys added by newer
//! front ends survive a load/save cycle. [`GenerationSettings`] reads the
//! keys this crate understands, checks their ranges and writes them back
//! without disturbing anything else in the map.

use crate::error::PresetError;
use csg_common::constants::{MAX_GAP_SEC, MAX_OCTAVE, MAX_SEMITONES, MIN_OCTAVE, NOTE_NAMES};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sample selection workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Numbered files `1.wav`, `2.wav`, ...
    #[default]
    Normal,
    /// Symbol preset resolution
    Custom,
}

/// Parameters handed to the sound-generation pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub semitones: u32,
    pub gap_seconds: f64,
    pub pitched: bool,
    pub normalize: bool,
    pub randomize: bool,
    pub dump_samples: bool,
    pub slicex_markers: bool,
    /// Index into the chromatic note names, 0 = C
    pub start_note_index: u8,
    pub start_octave: u8,
    pub mode: GenerationMode,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            semitones: 36,
            gap_seconds: 0.3,
            pitched: true,
            normalize: false,
            randomize: false,
            dump_samples: false,
            slicex_markers: false,
            start_note_index: 0,
            start_octave: 3,
            mode: GenerationMode::Normal,
        }
    }
}

impl GenerationSettings {
    /// Read the known keys of `map`; absent keys take their defaults
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, PresetError> {
        let settings: GenerationSettings = serde_json::from_value(Value::Object(map.clone()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Write the known keys into `map`, keeping every other entry
    pub fn apply_to(&self, map: &mut Map<String, Value>) -> Result<(), PresetError> {
        self.validate()?;
        if let Value::Object(own) = serde_json::to_value(self)? {
            map.extend(own);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), PresetError> {
        if self.semitones == 0 || self.semitones > MAX_SEMITONES {
            return Err(PresetError::InvalidSetting {
                key: "semitones",
                reason: format!("must be between 1 and {}", MAX_SEMITONES),
            });
        }
        if !(0.0..=MAX_GAP_SEC).contains(&self.gap_seconds) {
            return Err(PresetError::InvalidSetting {
                key: "gap_seconds",
                reason: format!("must be between 0 and {} seconds", MAX_GAP_SEC),
            });
        }
        if usize::from(self.start_note_index) >= NOTE_NAMES.len() {
            return Err(PresetError::InvalidSetting {
                key: "start_note_index",
                reason: format!("must be below {}", NOTE_NAMES.len()),
            });
        }
        if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&self.start_octave) {
            return Err(PresetError::InvalidSetting {
                key: "start_octave",
                reason: format!("must be between {} and {}", MIN_OCTAVE, MAX_OCTAVE),
            });
        }
        Ok(())
    }

    /// Note name of generated slot `index`, e.g. `C#3`
    pub fn note_label(&self, index: usize) -> String {
        note_label(index, self.start_note_index, self.start_octave)
    }
}

/// Note name for slot `index` counted in semitones from the start note
pub fn note_label(index: usize, start_note_index: u8, start_octave: u8) -> String {
    let total = usize::from(start_note_index) + index;
    let name = NOTE_NAMES[total % NOTE_NAMES.len()];
    let octave = usize::from(start_octave) + total / NOTE_NAMES.len();
    format!("{}{}", name, octave)
}
