//! Preset directory listing
//!
//! Loads every `.csgorder.json` and `.csgtemplate.json` in a folder. A file
//! that fails to load is reported as a warning and the rest still load.

use crate::error::PresetError;
use crate::persistence::{import_preset, import_template, PRESET_SUFFIX, TEMPLATE_SUFFIX};
use crate::preset::{Preset, Template};
use std::path::{Path, PathBuf};

/// Everything found in a preset directory, sorted by file name
#[derive(Debug, Clone, Default)]
pub struct PresetLibrary {
    pub presets: Vec<(PathBuf, Preset)>,
    pub templates: Vec<(PathBuf, Template)>,
    pub warnings: Vec<String>,
}

impl PresetLibrary {
    /// Load the library in `dir`; a missing directory is an empty library
    pub fn load(dir: &Path) -> Result<Self, PresetError> {
        let mut library = PresetLibrary::default();
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "Preset directory missing");
            return Ok(library);
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| PresetError::Io(dir.to_path_buf(), e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        paths.sort();

        for path in paths {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();

            if name.ends_with(PRESET_SUFFIX) {
                match import_preset(&path) {
                    Ok(preset) => library.presets.push((path, preset)),
                    Err(e) => library.reject(&path, e),
                }
            } else if name.ends_with(TEMPLATE_SUFFIX) {
                match import_template(&path) {
                    Ok(template) => library.templates.push((path, template)),
                    Err(e) => library.reject(&path, e),
                }
            }
        }

        tracing::info!(
            dir = %dir.display(),
            presets = library.presets.len(),
            templates = library.templates.len(),
            rejected = library.warnings.len(),
            "Loaded preset library"
        );
        Ok(library)
    }

    fn reject(&mut self, path: &Path, error: PresetError) {
        tracing::warn!(path = %path.display(), error = %error, "Skipping invalid preset file");
        self.warnings.push(format!("{}: {}", path.display(), error));
    }

    /// Preset by name (case-insensitive)
    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets
            .iter()
            .map(|(_, p)| p)
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Template by name (case-insensitive)
    pub fn template(&self, name: &str) -> Option<&Template> {
        self.templates
            .iter()
            .map(|(_, t)| t)
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }
}
