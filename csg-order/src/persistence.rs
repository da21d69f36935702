//! Preset and template files
//!
//! Documents are pretty-printed JSON with an integer `version` field.
//! Presets are validated before they are written and again after they are
//! read back. Only `name`, `symbols` and `order` are required in a preset
//! document; the policies fall back to `first` / `pad` / `skip`.

use crate::error::PresetError;
use crate::preset::{Preset, SelectionPolicy, Template};
use crate::symbol::Symbol;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Current document format revision
pub const FORMAT_VERSION: u64 = 1;

/// File suffix for preset documents
pub const PRESET_SUFFIX: &str = ".csgorder.json";

/// File suffix for template documents
pub const TEMPLATE_SUFFIX: &str = ".csgtemplate.json";

#[derive(Debug, Serialize)]
struct PolicyDocument {
    mode: String,
    seed: Option<i64>,
}

#[derive(Debug, Serialize)]
struct PresetDocument {
    name: String,
    symbols: Vec<Symbol>,
    order: Vec<Symbol>,
    policy: PolicyDocument,
    length_policy: String,
    on_missing_symbol: String,
    version: u64,
}

#[derive(Debug, Serialize)]
struct TemplateDocument {
    name: String,
    preset: PresetDocument,
    settings: Map<String, Value>,
    version: u64,
}

#[derive(Debug, Deserialize)]
struct RawPolicy {
    mode: Option<String>,
    seed: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawPreset {
    name: Option<String>,
    symbols: Option<Vec<Symbol>>,
    order: Option<Vec<Symbol>>,
    policy: Option<RawPolicy>,
    length_policy: Option<String>,
    on_missing_symbol: Option<String>,
    version: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawTemplate {
    name: Option<String>,
    preset: Option<Value>,
    settings: Option<Map<String, Value>>,
    version: Option<u64>,
}

impl From<&Preset> for PresetDocument {
    fn from(preset: &Preset) -> Self {
        Self {
            name: preset.name.clone(),
            symbols: preset.symbols.clone(),
            order: preset.order.clone(),
            policy: PolicyDocument {
                mode: preset.policy.mode.as_str().to_string(),
                seed: preset.policy.seed,
            },
            length_policy: preset.length_policy.as_str().to_string(),
            on_missing_symbol: preset.on_missing_symbol.as_str().to_string(),
            version: FORMAT_VERSION,
        }
    }
}

fn check_version(version: Option<u64>) -> Result<(), PresetError> {
    match version {
        Some(found) if found > FORMAT_VERSION => Err(PresetError::UnsupportedVersion {
            found,
            supported: FORMAT_VERSION,
        }),
        _ => Ok(()),
    }
}

fn required<T>(value: Option<T>, kind: &'static str, key: &'static str) -> Result<T, PresetError> {
    value.ok_or(PresetError::MissingKey { kind, key })
}

/// Seed as written by any front end: integer, float (truncated), numeric
/// string or boolean
fn parse_seed(raw: Option<Value>) -> Result<Option<i64>, PresetError> {
    let invalid = |v: &Value| PresetError::InvalidSeed(v.to_string());
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(i64::from(b))),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(seed) => Ok(Some(seed)),
            None => match n.as_f64() {
                Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => {
                    Ok(Some(f.trunc() as i64))
                }
                _ => Err(invalid(&Value::Number(n))),
            },
        },
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| PresetError::InvalidSeed(s.clone())),
        Some(other) => Err(invalid(&other)),
    }
}

fn preset_from_value(value: Value) -> Result<Preset, PresetError> {
    let raw: RawPreset = serde_json::from_value(value)?;
    check_version(raw.version)?;

    let name = required(raw.name, "preset", "name")?;
    let symbols = required(raw.symbols, "preset", "symbols")?;
    let order = required(raw.order, "preset", "order")?;

    let policy = match raw.policy {
        Some(policy) => SelectionPolicy {
            mode: policy.mode.as_deref().unwrap_or("first").parse()?,
            seed: parse_seed(policy.seed)?,
        },
        None => SelectionPolicy::default(),
    };

    let preset = Preset {
        name,
        symbols,
        order,
        policy,
        length_policy: raw.length_policy.as_deref().unwrap_or("pad").parse()?,
        on_missing_symbol: raw.on_missing_symbol.as_deref().unwrap_or("skip").parse()?,
    };
    preset.validate()?;
    Ok(preset)
}

/// Serialize a preset to its JSON document
pub fn preset_to_json(preset: &Preset) -> Result<String, PresetError> {
    preset.validate()?;
    Ok(serde_json::to_string_pretty(&PresetDocument::from(preset))?)
}

/// Parse and validate a preset JSON document
pub fn preset_from_json(json: &str) -> Result<Preset, PresetError> {
    preset_from_value(serde_json::from_str(json)?)
}

/// Serialize a template (with its embedded preset) to JSON
pub fn template_to_json(template: &Template) -> Result<String, PresetError> {
    template.validate()?;
    let document = TemplateDocument {
        name: template.name.clone(),
        preset: PresetDocument::from(&template.preset),
        settings: template.settings.clone(),
        version: FORMAT_VERSION,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parse and validate a template JSON document
pub fn template_from_json(json: &str) -> Result<Template, PresetError> {
    let raw: RawTemplate = serde_json::from_str(json)?;
    check_version(raw.version)?;

    let name = required(raw.name, "template", "name")?;
    let preset = preset_from_value(required(raw.preset, "template", "preset")?)?;
    Ok(Template {
        name,
        preset,
        settings: raw.settings.unwrap_or_default(),
    })
}

fn write_document(path: &Path, content: &str) -> Result<(), PresetError> {
    std::fs::write(path, content).map_err(|e| PresetError::Io(path.to_path_buf(), e))?;
    tracing::info!(path = %path.display(), "Wrote document");
    Ok(())
}

fn read_document(path: &Path) -> Result<String, PresetError> {
    std::fs::read_to_string(path).map_err(|e| PresetError::Io(path.to_path_buf(), e))
}

pub fn export_preset(preset: &Preset, path: &Path) -> Result<(), PresetError> {
    write_document(path, &preset_to_json(preset)?)
}

pub fn import_preset(path: &Path) -> Result<Preset, PresetError> {
    preset_from_json(&read_document(path)?)
}

pub fn export_template(template: &Template, path: &Path) -> Result<(), PresetError> {
    write_document(path, &template_to_json(template)?)
}

pub fn import_template(path: &Path) -> Result<Template, PresetError> {
    template_from_json(&read_document(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::{LengthPolicy, MissingSymbolPolicy, SelectionMode};
    use serde_json::json;

    fn tokens(list: &[&str]) -> Vec<Symbol> {
        list.iter().map(|s| Symbol::new(s)).collect()
    }

    #[test]
    fn test_preset_document_shape() {
        let preset = Preset::new("Verse", tokens(&["A", "E"]), tokens(&["E", "A"]))
            .with_policy(SelectionPolicy::random(Some(128)));
        let value: Value = serde_json::from_str(&preset_to_json(&preset).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Verse",
                "symbols": ["A", "E"],
                "order": ["E", "A"],
                "policy": {"mode": "random", "seed": 128},
                "length_policy": "pad",
                "on_missing_symbol": "skip",
                "version": 1
            })
        );
    }

    #[test]
    fn test_import_applies_defaults_and_case_folding() {
        let preset =
            preset_from_json(r#"{"name": "Lazy", "symbols": ["a", "e"], "order": ["e"]}"#).unwrap();
        assert_eq!(preset.policy.mode, SelectionMode::First);
        assert_eq!(preset.length_policy, LengthPolicy::Pad);
        assert_eq!(preset.on_missing_symbol, MissingSymbolPolicy::Skip);
        assert_eq!(preset.order, tokens(&["E"]));

        let preset = preset_from_json(
            r#"{"name": "Loud", "symbols": ["A"], "order": ["A"],
                "policy": {"mode": "CYCLE"}, "length_policy": "Truncate",
                "on_missing_symbol": "ASK"}"#,
        )
        .unwrap();
        assert_eq!(preset.policy.mode, SelectionMode::Cycle);
        assert_eq!(preset.length_policy, LengthPolicy::Truncate);
        assert_eq!(preset.on_missing_symbol, MissingSymbolPolicy::Ask);
    }

    #[test]
    fn test_seed_accepts_integer_like_values() {
        let doc = |seed: &str| {
            format!(
                r#"{{"name": "S", "symbols": ["A"], "order": ["A"],
                    "policy": {{"mode": "random", "seed": {}}}}}"#,
                seed
            )
        };
        assert_eq!(preset_from_json(&doc("7")).unwrap().policy.seed, Some(7));
        assert_eq!(preset_from_json(&doc("7.0")).unwrap().policy.seed, Some(7));
        assert_eq!(preset_from_json(&doc("-2.9")).unwrap().policy.seed, Some(-2));
        assert_eq!(preset_from_json(&doc(r#"" 42 ""#)).unwrap().policy.seed, Some(42));
        assert_eq!(preset_from_json(&doc("null")).unwrap().policy.seed, None);

        let err = preset_from_json(&doc(r#""seven""#)).unwrap_err();
        assert!(matches!(err, PresetError::InvalidSeed(_)));
        assert!(matches!(preset_from_json(&doc("[1]")), Err(PresetError::InvalidSeed(_))));
    }

    #[test]
    fn test_missing_key_is_named() {
        let err = preset_from_json(r#"{"name": "NoOrder", "symbols": ["A"]}"#).unwrap_err();
        assert_eq!(err.to_string(), "Missing preset key: order");

        let err = template_from_json(r#"{"name": "T", "settings": {}}"#).unwrap_err();
        assert_eq!(err.to_string(), "Missing template key: preset");
    }

    #[test]
    fn test_import_revalidates() {
        let err =
            preset_from_json(r#"{"name": "Bad", "symbols": ["A"], "order": ["Q"]}"#).unwrap_err();
        assert!(matches!(err, PresetError::UnknownToken(_)));

        let err = preset_from_json(
            r#"{"name": "Bad", "symbols": ["A"], "order": ["A"], "length_policy": "stretch"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PresetError::UnsupportedLength(_)));
    }

    #[test]
    fn test_newer_version_rejected() {
        let json = r#"{"name": "F", "symbols": ["A"], "order": ["A"], "version": 2}"#;
        let err = preset_from_json(json).unwrap_err();
        assert!(matches!(err, PresetError::UnsupportedVersion { found: 2, supported: 1 }));
    }

    #[test]
    fn test_export_validates_first() {
        let preset = Preset::new("Bad", tokens(&["A"]), vec![]);
        assert!(matches!(preset_to_json(&preset), Err(PresetError::EmptyOrder)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(preset_from_json("{not json"), Err(PresetError::Malformed(_))));
        assert!(matches!(
            preset_from_json(r#"{"name": "X", "symbols": "A", "order": ["A"]}"#),
            Err(PresetError::Malformed(_))
        ));
    }
}
