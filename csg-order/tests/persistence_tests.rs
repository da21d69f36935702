//! Preset and template file tests
//!
//! Round-trips through real files and loads the checked-in fixtures.

mod helpers;

use csg_order::library::PresetLibrary;
use csg_order::persistence::{export_preset, export_template, import_preset, import_template};
use csg_order::settings::{GenerationMode, GenerationSettings};
use csg_order::symbol::default_symbols;
use csg_order::{
    LengthPolicy, MissingSymbolPolicy, Preset, PresetError, SelectionMode, SelectionPolicy,
    Template,
};
use helpers::{fixture_path, symbols};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_preset_round_trip() {
    let dir = TempDir::new().unwrap();
    let preset = Preset::new("Verse 2", default_symbols(), symbols(&["A", "E", "I", "O"]))
        .with_policy(SelectionPolicy::cycle());

    let path = dir.path().join("verse.csgorder.json");
    export_preset(&preset, &path).unwrap();
    assert_eq!(import_preset(&path).unwrap(), preset);
}

#[test]
fn test_seeded_preset_round_trip() {
    let dir = TempDir::new().unwrap();
    let preset = Preset::new("Seeded", symbols(&["A", "AY"]), symbols(&["AY", "A", "AY"]))
        .with_policy(SelectionPolicy::random(Some(-3)))
        .with_length_policy(LengthPolicy::Truncate)
        .with_missing_policy(MissingSymbolPolicy::Ask);

    let path = dir.path().join("seeded.csgorder.json");
    export_preset(&preset, &path).unwrap();
    assert_eq!(import_preset(&path).unwrap(), preset);
}

#[test]
fn test_template_round_trip() {
    let dir = TempDir::new().unwrap();
    let preset = Preset::new("Memory", default_symbols(), symbols(&["A", "E"]));
    let settings = json!({"semitones": 36, "mode": "custom", "preset": "Memory"});
    let template = Template::new("MEM", preset, settings.as_object().unwrap().clone());

    let path = dir.path().join("mem.csgtemplate.json");
    export_template(&template, &path).unwrap();
    assert_eq!(import_template(&path).unwrap(), template);
}

#[test]
fn test_export_refuses_invalid_preset() {
    let dir = TempDir::new().unwrap();
    let preset = Preset::new("Bad", symbols(&["A"]), symbols(&["Q"]));
    let path = dir.path().join("bad.csgorder.json");

    assert!(matches!(export_preset(&preset, &path), Err(PresetError::UnknownToken(_))));
    assert!(!path.exists());
}

#[test]
fn test_import_missing_file() {
    let err = import_preset(&fixture_path("does_not_exist.csgorder.json")).unwrap_err();
    assert!(matches!(err, PresetError::Io(_, _)));
}

#[test]
fn test_fixture_files_load() {
    let preset = import_preset(&fixture_path("verse2_cycle.csgorder.json")).unwrap();
    assert_eq!(preset.name, "Verse 2 Cycle");
    assert_eq!(preset.policy.mode, SelectionMode::Cycle);

    let template = import_template(&fixture_path("mem_36semi_template.csgtemplate.json")).unwrap();
    assert_eq!(template.preset.order[0].as_str(), "A");
    let settings = GenerationSettings::from_map(&template.settings).unwrap();
    assert_eq!(settings.semitones, 36);
    assert_eq!(settings.mode, GenerationMode::Custom);
}

#[test]
fn test_random_fixture_is_canonicalized() {
    let path = fixture_path("random_bounce_template.csgtemplate.json");
    let template = import_template(&path).unwrap();
    assert_eq!(template.preset.policy.mode, SelectionMode::Random);
    assert_eq!(template.preset.policy.seed, Some(128));
    assert_eq!(template.preset.order, symbols(&["A", "AY", "O", "AY"]));
    assert_eq!(template.preset.on_missing_symbol, MissingSymbolPolicy::Error);

    let settings = GenerationSettings::from_map(&template.settings).unwrap();
    assert_eq!(settings.note_label(0), "A2");
    assert_eq!(settings.note_label(3), "C3");
}

#[test]
fn test_library_loads_fixtures() {
    let library = PresetLibrary::load(&fixture_path("")).unwrap();
    assert_eq!(library.presets.len(), 1);
    assert_eq!(library.templates.len(), 2);
    assert!(library.warnings.is_empty());
    assert!(library.preset("verse 2 cycle").is_some());
    assert!(library.template("Random Bounce").is_some());
}

#[test]
fn test_library_reports_invalid_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("broken.csgorder.json"), "{\"name\": \"x\"}").unwrap();
    std::fs::write(dir.path().join("readme.txt"), "not a preset").unwrap();
    let good = Preset::new("Good", symbols(&["A"]), symbols(&["A"]));
    export_preset(&good, &dir.path().join("good.csgorder.json")).unwrap();

    let library = PresetLibrary::load(dir.path()).unwrap();
    assert_eq!(library.presets.len(), 1);
    assert_eq!(library.warnings.len(), 1);
    assert!(library.warnings[0].contains("Missing preset key: symbols"));
}

#[test]
fn test_library_missing_dir_is_empty() {
    let library = PresetLibrary::load(&fixture_path("no_such_dir")).unwrap();
    assert!(library.presets.is_empty());
    assert!(library.templates.is_empty());
}
