//! csg-order - custom order preset tool
//!
//! Scans a sample folder into symbol buckets, resolves presets and templates
//! into the file sequence the chromatic scale generator will load, and
//! creates or inspects preset files.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use csg_common::config::{default_config_path, load_toml_config, RootFolderResolver, TomlConfig};
use csg_order::default_sequence::{count_numbered_samples, resolve_default_sequence};
use csg_order::library::PresetLibrary;
use csg_order::persistence::{
    export_preset, import_preset, import_template, preset_to_json, template_to_json,
    TEMPLATE_SUFFIX,
};
use csg_order::plan::SequencePlan;
use csg_order::settings::{note_label, GenerationSettings};
use csg_order::symbol::{default_symbols, parse_symbol_list};
use csg_order::{
    resolve_sequence, BucketScanner, LengthPolicy, MissingSymbolPolicy, Preset, SelectionMode,
    SelectionPolicy, Symbol,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Command-line arguments for csg-order
#[derive(Parser, Debug)]
#[command(name = "csg-order")]
#[command(about = "Custom order presets for the chromatic scale generator")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to <config dir>/csg/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Sample folder
    #[arg(short, long, global = true)]
    root_folder: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify the samples under the root folder into symbol buckets
    Scan {
        /// Symbol alphabet, e.g. "A,E,I,O,U,AY"
        #[arg(short, long)]
        symbols: Option<String>,

        /// Ignore cached scan results
        #[arg(long)]
        no_cache: bool,
    },

    /// Resolve a preset or template into a file sequence
    Resolve {
        #[command(flatten)]
        source: PresetSource,

        /// Number of generated notes (defaults to the template's semitones)
        #[arg(short, long)]
        length: Option<usize>,

        /// Verify every resolved file exists
        #[arg(long)]
        check: bool,
    },

    /// Build the numbered-sample sequence (1.wav, 2.wav, ...)
    DefaultSequence {
        #[arg(short, long, default_value_t = 12)]
        length: usize,

        /// Draw samples at random instead of round-robin
        #[arg(long)]
        random: bool,

        #[arg(long)]
        seed: Option<i64>,
    },

    /// Count the numbered samples (1.wav, 2.wav, ...) in the root folder
    CountSamples,

    /// Write a new preset file
    NewPreset {
        #[arg(long)]
        name: String,

        /// Symbol alphabet (defaults to A,E,I,O,U,AY)
        #[arg(long)]
        symbols: Option<String>,

        /// Token order, e.g. "A,E,I,O"
        #[arg(long)]
        order: String,

        #[arg(long, default_value = "first")]
        mode: SelectionMode,

        #[arg(long)]
        seed: Option<i64>,

        #[arg(long, default_value = "pad")]
        length_policy: LengthPolicy,

        #[arg(long, default_value = "skip")]
        on_missing: MissingSymbolPolicy,

        /// Output file (.csgorder.json)
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Validate and print a preset or template file
    Show { file: PathBuf },

    /// List the presets and templates in the preset directory
    List {
        /// Preset directory (defaults to the configured preset_dir)
        dir: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct PresetSource {
    /// Preset file (.csgorder.json)
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Template file (.csgtemplate.json)
    #[arg(long)]
    template: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.clone().or_else(default_config_path) {
        Some(path) => load_toml_config(&path).context("Failed to load configuration")?,
        None => TomlConfig::default(),
    };

    let mut logging = config.logging.clone();
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    csg_common::logging::init_tracing(&logging)?;

    info!("Starting csg-order v{}", env!("CARGO_PKG_VERSION"));

    let root_folder = RootFolderResolver::new()
        .with_config(&config)
        .with_cli_arg(cli.root_folder.clone())
        .resolve();
    info!("Root folder: {}", root_folder.display());

    match cli.command {
        Command::Scan { symbols, no_cache } => {
            let alphabet = alphabet(symbols.as_deref(), &config);
            run_scan(&root_folder, &alphabet, !no_cache)
        }
        Command::Resolve {
            source,
            length,
            check,
        } => run_resolve(&root_folder, source, length, check),
        Command::DefaultSequence { length, random, seed } => {
            let paths = resolve_default_sequence(&root_folder, length, random, seed)?;
            for (i, path) in paths.iter().enumerate() {
                println!("{:>3}  {}", i + 1, path.display());
            }
            Ok(())
        }
        Command::CountSamples => {
            let count = count_numbered_samples(&root_folder);
            println!("{} numbered sample(s) in {}", count, root_folder.display());
            Ok(())
        }
        Command::NewPreset {
            name,
            symbols,
            order,
            mode,
            seed,
            length_policy,
            on_missing,
            out,
        } => {
            let preset = Preset::new(
                name,
                alphabet(symbols.as_deref(), &config),
                parse_symbol_list(&order),
            )
            .with_policy(SelectionPolicy { mode, seed })
            .with_length_policy(length_policy)
            .with_missing_policy(on_missing);
            export_preset(&preset, &out)?;
            println!("Saved preset '{}' to {}", preset.name, out.display());
            Ok(())
        }
        Command::Show { file } => {
            if is_template(&file) {
                println!("{}", template_to_json(&import_template(&file)?)?);
            } else {
                println!("{}", preset_to_json(&import_preset(&file)?)?);
            }
            Ok(())
        }
        Command::List { dir } => {
            let dir = match dir.or_else(|| config.preset_dir.clone()) {
                Some(dir) => dir,
                None => bail!("No preset directory given and none configured (preset_dir)"),
            };
            let library = PresetLibrary::load(&dir)?;
            for (path, preset) in &library.presets {
                println!("preset    {:<24} {}", preset.name, path.display());
            }
            for (path, template) in &library.templates {
                println!("template  {:<24} {}", template.name, path.display());
            }
            for warning in &library.warnings {
                println!("warning   {}", warning);
            }
            Ok(())
        }
    }
}

fn alphabet(cli_symbols: Option<&str>, config: &TomlConfig) -> Vec<Symbol> {
    if let Some(list) = cli_symbols {
        return parse_symbol_list(list);
    }
    match &config.default_symbols {
        Some(list) => list.iter().map(|s| Symbol::new(s)).collect(),
        None => default_symbols(),
    }
}

fn is_template(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(TEMPLATE_SUFFIX)
}

fn run_scan(root: &Path, alphabet: &[Symbol], use_cache: bool) -> Result<()> {
    let scanner = BucketScanner::new();
    let result = scanner.scan(root, alphabet, use_cache);

    for (symbol, files) in &result.buckets {
        println!("{:<6} {} file(s)", symbol, files.len());
        for file in files {
            println!("         {}", file.display());
        }
    }
    for (tag, files) in &result.unknown_symbols {
        println!("unknown tag {}: {} file(s)", tag, files.len());
    }
    if !result.unlabeled.is_empty() {
        println!("unlabeled: {} file(s)", result.unlabeled.len());
    }
    for warning in &result.warnings {
        println!("warning: {}", warning);
    }
    Ok(())
}

fn run_resolve(
    root: &Path,
    source: PresetSource,
    length: Option<usize>,
    check: bool,
) -> Result<()> {
    let (preset, settings) = match (source.preset, source.template) {
        (Some(path), _) => (import_preset(&path)?, GenerationSettings::default()),
        (None, Some(path)) => {
            let template = import_template(&path)?;
            let settings = GenerationSettings::from_map(&template.settings)?;
            (template.preset, settings)
        }
        (None, None) => bail!("Either --preset or --template is required"),
    };
    let target = length.unwrap_or(settings.semitones as usize);

    let scanner = BucketScanner::new();
    let scan = scanner.scan(root, &preset.symbols, true);
    for warning in &scan.warnings {
        println!("warning: {}", warning);
    }

    let result = match resolve_sequence(&preset, &scan.buckets, target) {
        Ok(result) => result,
        Err(e) if e.needs_confirmation() => {
            bail!("{} (re-run with a preset whose on_missing_symbol is skip or error)", e)
        }
        Err(e) => return Err(e.into()),
    };

    let mut slot = 0usize;
    for item in &result.preview {
        match &item.path {
            Some(path) => {
                let label = note_label(slot, settings.start_note_index, settings.start_octave);
                println!("{:<5} {:<4} {}", label, item.token, path.display());
                slot += 1;
            }
            None => {
                let note = item.note.as_deref().unwrap_or("");
                println!("{:<5} {:<4} ({})", "-", item.token, note);
            }
        }
    }
    for warning in &result.warnings {
        println!("warning: {}", warning);
    }
    println!("{} of {} note(s) resolved", result.sequence.len(), target);

    if check {
        let plan = SequencePlan::verify(result.sequence, target)?;
        println!("Custom order will use {} distinct file(s)", plan.distinct);
    }
    Ok(())
}
