//! Order presets and templates
//!
//! A preset declares a symbol alphabet, the token order to generate and
//! three policies:
//! - [`SelectionMode`]: which file a token picks from its bucket
//! - [`LengthPolicy`]: how the order is stretched or cut to the target length
//! - [`MissingSymbolPolicy`]: what an empty bucket does
//!
//! Policies are closed enums parsed once from their string form, so an
//! unsupported value is rejected when the document is read.

use crate::error::PresetError;
use crate::symbol::Symbol;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How a token picks a file from its bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Always the first file
    #[default]
    First,
    /// Round-robin per symbol
    Cycle,
    /// Uniform random draw per token
    Random,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::First => "first",
            SelectionMode::Cycle => "cycle",
            SelectionMode::Random => "random",
        }
    }
}

impl FromStr for SelectionMode {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" => Ok(SelectionMode::First),
            "cycle" => Ok(SelectionMode::Cycle),
            "random" => Ok(SelectionMode::Random),
            other => Err(PresetError::UnsupportedSelection(other.to_string())),
        }
    }
}

/// Selection mode plus an optional seed for reproducible random picks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionPolicy {
    pub mode: SelectionMode,
    pub seed: Option<i64>,
}

impl SelectionPolicy {
    pub fn first() -> Self {
        Self::default()
    }

    pub fn cycle() -> Self {
        Self {
            mode: SelectionMode::Cycle,
            seed: None,
        }
    }

    pub fn random(seed: Option<i64>) -> Self {
        Self {
            mode: SelectionMode::Random,
            seed,
        }
    }
}

/// How the resolved sequence meets the target length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthPolicy {
    /// Repeat the order until the target is reached
    #[default]
    Pad,
    /// At most one pass, capped at the target
    Truncate,
    /// Repeat like `Pad` but require an exact match
    Error,
}

impl LengthPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthPolicy::Pad => "pad",
            LengthPolicy::Truncate => "truncate",
            LengthPolicy::Error => "error",
        }
    }
}

impl FromStr for LengthPolicy {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pad" => Ok(LengthPolicy::Pad),
            "truncate" => Ok(LengthPolicy::Truncate),
            "error" => Ok(LengthPolicy::Error),
            other => Err(PresetError::UnsupportedLength(other.to_string())),
        }
    }
}

/// What happens when a token's bucket is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingSymbolPolicy {
    /// Warn and leave a skipped preview row
    #[default]
    Skip,
    /// Stop and let the caller ask the user
    Ask,
    /// Fail the resolution
    Error,
}

impl MissingSymbolPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingSymbolPolicy::Skip => "skip",
            MissingSymbolPolicy::Ask => "ask",
            MissingSymbolPolicy::Error => "error",
        }
    }
}

impl FromStr for MissingSymbolPolicy {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(MissingSymbolPolicy::Skip),
            "ask" => Ok(MissingSymbolPolicy::Ask),
            "error" => Ok(MissingSymbolPolicy::Error),
            other => Err(PresetError::UnsupportedMissing(other.to_string())),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(SelectionMode, LengthPolicy, MissingSymbolPolicy);

/// A saved order pattern and its resolution policies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub name: String,
    /// Declared alphabet, in declaration order
    pub symbols: Vec<Symbol>,
    /// Token order; repeats allowed
    pub order: Vec<Symbol>,
    pub policy: SelectionPolicy,
    pub length_policy: LengthPolicy,
    pub on_missing_symbol: MissingSymbolPolicy,
}

impl Preset {
    /// Preset with default policies (`first`, `pad`, `skip`)
    pub fn new(name: impl Into<String>, symbols: Vec<Symbol>, order: Vec<Symbol>) -> Self {
        Self {
            name: name.into(),
            symbols,
            order,
            policy: SelectionPolicy::default(),
            length_policy: LengthPolicy::default(),
            on_missing_symbol: MissingSymbolPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_length_policy(mut self, length_policy: LengthPolicy) -> Self {
        self.length_policy = length_policy;
        self
    }

    pub fn with_missing_policy(mut self, on_missing_symbol: MissingSymbolPolicy) -> Self {
        self.on_missing_symbol = on_missing_symbol;
        self
    }

    /// Check the preset invariants
    ///
    /// The alphabet and order must be non-empty and every order token must
    /// belong to the alphabet. Policy values are enforced by their types.
    pub fn validate(&self) -> Result<(), PresetError> {
        let allowed = self.allowed();
        if allowed.is_empty() {
            return Err(PresetError::EmptyAlphabet);
        }
        if self.order.is_empty() {
            return Err(PresetError::EmptyOrder);
        }
        if let Some(token) = self.order.iter().find(|t| !allowed.contains(*t)) {
            return Err(PresetError::UnknownToken(token.clone()));
        }
        Ok(())
    }

    /// Copy with every token in canonical uppercase form
    ///
    /// [`Symbol`] is uppercased on construction, so the copy only differs
    /// from the receiver in ownership.
    pub fn normalized(&self) -> Preset {
        self.clone()
    }

    /// The declared alphabet as a set
    pub fn allowed(&self) -> HashSet<Symbol> {
        self.symbols.iter().cloned().collect()
    }
}

/// A preset bundled with a snapshot of generation settings
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: String,
    pub preset: Preset,
    /// Open key/value map; see [`GenerationSettings`](crate::settings::GenerationSettings)
    pub settings: Map<String, Value>,
}

impl Template {
    pub fn new(name: impl Into<String>, preset: Preset, settings: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            preset,
            settings,
        }
    }

    /// Templates carry no invariants beyond their preset's
    pub fn validate(&self) -> Result<(), PresetError> {
        self.preset.validate()
    }
}
