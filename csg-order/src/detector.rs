//! Symbol detection for a single sample file
//!
//! A file belongs to a symbol through either:
//! - a filename tag: `__` + letters right before the `.wav` extension
//!   (`voice__AY.wav` → `AY`), or
//! - its immediate parent folder name (`A/take1.wav` → `A`).
//!
//! The tag wins when both name a valid symbol. A disagreement is reported as
//! a warning but never blocks classification.

use crate::symbol::Symbol;
use csg_common::constants::SAMPLE_EXTENSION;
use std::collections::HashSet;
use std::path::Path;

/// Where a detected symbol came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolSource {
    Tag,
    Folder,
}

/// Outcome of [`detect_symbol`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDetection {
    pub symbol: Option<Symbol>,
    pub source: Option<SymbolSource>,
    pub warning: Option<String>,
}

impl SymbolDetection {
    fn none() -> Self {
        Self {
            symbol: None,
            source: None,
            warning: None,
        }
    }
}

/// Extract the filename tag, regardless of any alphabet
///
/// Matches `__` followed by one or more ASCII letters immediately before a
/// case-insensitive `.wav` extension.
pub fn filename_tag(path: &Path) -> Option<Symbol> {
    let is_wav = path
        .extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(SAMPLE_EXTENSION))
        .unwrap_or(false);
    if !is_wav {
        return None;
    }

    let stem = path.file_stem()?.to_string_lossy();
    let letters_start = stem
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map(|(i, _)| i)?;

    if stem[..letters_start].ends_with("__") {
        Some(Symbol::new(&stem[letters_start..]))
    } else {
        None
    }
}

fn folder_symbol(path: &Path) -> Option<Symbol> {
    let parent = path.parent()?;
    let name = parent.file_name()?;
    Some(Symbol::new(&name.to_string_lossy()))
}

/// Determine which allowed symbol (if any) `path` belongs to
pub fn detect_symbol(path: &Path, allowed: &HashSet<Symbol>) -> SymbolDetection {
    let tag = filename_tag(path).filter(|s| allowed.contains(s));
    let folder = folder_symbol(path).filter(|s| allowed.contains(s));

    match (tag, folder) {
        (Some(tag), folder) => {
            let warning = match folder {
                Some(folder) if folder != tag => Some(format!(
                    "Filename tag overrides folder symbol for {}: {} (folder {})",
                    path.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    tag,
                    folder
                )),
                _ => None,
            };
            SymbolDetection {
                symbol: Some(tag),
                source: Some(SymbolSource::Tag),
                warning,
            }
        }
        (None, Some(folder)) => SymbolDetection {
            symbol: Some(folder),
            source: Some(SymbolSource::Folder),
            warning: None,
        },
        (None, None) => SymbolDetection::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet(symbols: &[&str]) -> HashSet<Symbol> {
        symbols.iter().map(|s| Symbol::new(s)).collect()
    }

    #[test]
    fn test_filename_tag_extraction() {
        assert_eq!(filename_tag(Path::new("voice__ay.wav")), Some(Symbol::new("AY")));
        assert_eq!(filename_tag(Path::new("x/a__b__E.WAV")), Some(Symbol::new("E")));
        assert_eq!(filename_tag(Path::new("a___E.wav")), Some(Symbol::new("E")));
        assert_eq!(filename_tag(Path::new("voice_A.wav")), None);
        assert_eq!(filename_tag(Path::new("voice__A1.wav")), None);
        assert_eq!(filename_tag(Path::new("voice__A.mp3")), None);
        assert_eq!(filename_tag(Path::new("voice__.wav")), None);
    }

    #[test]
    fn test_tag_wins_over_folder_with_warning() {
        let detection = detect_symbol(Path::new("/s/A/voice__E.wav"), &alphabet(&["A", "E"]));
        assert_eq!(detection.symbol, Some(Symbol::new("E")));
        assert_eq!(detection.source, Some(SymbolSource::Tag));
        let warning = detection.warning.unwrap();
        assert!(warning.contains("voice__E.wav"));
        assert!(warning.contains("E (folder A)"));
    }

    #[test]
    fn test_matching_tag_and_folder_is_silent() {
        let detection = detect_symbol(Path::new("/s/e/take__E.wav"), &alphabet(&["E"]));
        assert_eq!(detection.symbol, Some(Symbol::new("E")));
        assert!(detection.warning.is_none());
    }

    #[test]
    fn test_folder_fallback() {
        let detection = detect_symbol(Path::new("/s/ay/take1.wav"), &alphabet(&["AY"]));
        assert_eq!(detection.symbol, Some(Symbol::new("AY")));
        assert_eq!(detection.source, Some(SymbolSource::Folder));
        assert!(detection.warning.is_none());
    }

    #[test]
    fn test_out_of_alphabet_tag_falls_back_to_folder() {
        let detection = detect_symbol(Path::new("/s/A/take__QQ.wav"), &alphabet(&["A"]));
        assert_eq!(detection.symbol, Some(Symbol::new("A")));
        assert_eq!(detection.source, Some(SymbolSource::Folder));
    }

    #[test]
    fn test_nothing_matches() {
        let detection = detect_symbol(Path::new("/s/misc/take__QQ.wav"), &alphabet(&["A"]));
        assert_eq!(detection, SymbolDetection::none());
    }
}
