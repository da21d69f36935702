//! Sequence resolution
//!
//! Turns a preset and a bucket map into the ordered list of files the
//! generation pipeline will load. Resolution is pure in-memory work: the
//! buckets are only read, no file is touched.
//!
//! The order is walked cyclically. Each token picks a file according to the
//! selection mode; an empty bucket is handled by the missing-symbol policy;
//! the length policy decides when to stop.

use crate::error::ResolutionError;
use crate::preset::{LengthPolicy, MissingSymbolPolicy, Preset, SelectionMode};
use crate::scanner::Buckets;
use crate::symbol::Symbol;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::path::PathBuf;

/// Preview note for a token whose bucket was empty
pub const SKIPPED_NOTE: &str = "skipped";

/// One processed token, resolved or skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewItem {
    pub token: Symbol,
    pub path: Option<PathBuf>,
    pub note: Option<String>,
}

impl PreviewItem {
    pub fn is_skipped(&self) -> bool {
        self.path.is_none()
    }
}

/// Output of [`resolve_sequence`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionResult {
    /// Resolved files in encounter order
    pub sequence: Vec<PathBuf>,
    /// One row per processed token, including skipped ones
    pub preview: Vec<PreviewItem>,
    pub warnings: Vec<String>,
}

/// Per-call file picker
///
/// Cycle cursors and the random generator live only as long as one
/// resolution, so separate calls never share state.
struct Picker {
    mode: SelectionMode,
    cursors: HashMap<Symbol, usize>,
    rng: Option<StdRng>,
}

impl Picker {
    fn new(preset: &Preset) -> Self {
        let rng = match preset.policy.mode {
            SelectionMode::Random => Some(match preset.policy.seed {
                Some(seed) => StdRng::seed_from_u64(seed as u64),
                None => StdRng::from_entropy(),
            }),
            _ => None,
        };
        Self {
            mode: preset.policy.mode,
            cursors: HashMap::new(),
            rng,
        }
    }

    fn pick(&mut self, symbol: &Symbol, buckets: &Buckets) -> Option<PathBuf> {
        let pool = buckets.get(symbol).filter(|files| !files.is_empty())?;

        let index = match self.mode {
            SelectionMode::First => 0,
            SelectionMode::Cycle => {
                let cursor = self.cursors.entry(symbol.clone()).or_insert(0);
                let index = *cursor % pool.len();
                *cursor = (index + 1) % pool.len();
                index
            }
            SelectionMode::Random => match self.rng.as_mut() {
                Some(rng) => rng.gen_range(0..pool.len()),
                None => 0,
            },
        };
        pool.get(index).cloned()
    }
}

/// Upper bound on processed tokens before giving up
fn loop_ceiling(target_length: usize, tokens_per_pass: usize) -> usize {
    target_length
        .saturating_mul(tokens_per_pass.max(1))
        .saturating_mul(2)
}

/// Resolve `preset` against `buckets` into `target_length` files
///
/// With `pad` or `error` the order repeats until the target is met; with
/// `truncate` at most one pass is made and the result may be shorter. The
/// result never holds more than `target_length` files. With `pad` the
/// preview is also cut to `target_length` rows, skipped rows included. Any
/// failure discards the partial sequence.
pub fn resolve_sequence(
    preset: &Preset,
    buckets: &Buckets,
    target_length: usize,
) -> Result<ResolutionResult, ResolutionError> {
    let preset = preset.normalized();
    preset.validate()?;

    let order = &preset.order;
    let tokens_per_pass = order.len();
    if tokens_per_pass == 0 {
        return Err(ResolutionError::EmptyOrder);
    }

    let truncate = preset.length_policy == LengthPolicy::Truncate;
    let ceiling = loop_ceiling(target_length, tokens_per_pass);
    let mut picker = Picker::new(&preset);
    let mut result = ResolutionResult::default();
    let mut tokens_processed = 0usize;
    let mut pass_start_len = 0usize;

    loop {
        if result.sequence.len() >= target_length {
            break;
        }
        if truncate && tokens_processed >= tokens_per_pass {
            break;
        }

        let token = &order[tokens_processed % tokens_per_pass];
        tokens_processed += 1;

        match picker.pick(token, buckets) {
            Some(path) => {
                result.preview.push(PreviewItem {
                    token: token.clone(),
                    path: Some(path.clone()),
                    note: None,
                });
                result.sequence.push(path);
            }
            None => {
                match preset.on_missing_symbol {
                    MissingSymbolPolicy::Error => {
                        return Err(ResolutionError::MissingSymbol { symbol: token.clone() });
                    }
                    MissingSymbolPolicy::Ask => {
                        return Err(ResolutionError::ConfirmationRequired { symbol: token.clone() });
                    }
                    MissingSymbolPolicy::Skip => {
                        tracing::warn!(symbol = %token, "Missing symbol, skipping token");
                        result.warnings.push(format!("Missing symbol {}", token));
                    }
                }
                result.preview.push(PreviewItem {
                    token: token.clone(),
                    path: None,
                    note: Some(SKIPPED_NOTE.to_string()),
                });
            }
        }

        if truncate {
            if tokens_processed >= tokens_per_pass || result.sequence.len() >= target_length {
                break;
            }
        } else {
            if result.sequence.len() >= target_length {
                break;
            }
            if tokens_processed % tokens_per_pass == 0 {
                if result.sequence.len() == pass_start_len {
                    return Err(ResolutionError::UnableToFill);
                }
                pass_start_len = result.sequence.len();
            }
        }

        if tokens_processed > ceiling {
            return Err(ResolutionError::LoopGuard {
                iterations: tokens_processed,
            });
        }
    }

    let resolved = result.sequence.len();
    match preset.length_policy {
        LengthPolicy::Pad if resolved < target_length => {
            return Err(ResolutionError::PadShortfall {
                resolved,
                target: target_length,
            });
        }
        LengthPolicy::Error if resolved != target_length => {
            return Err(ResolutionError::LengthMismatch {
                resolved,
                target: target_length,
            });
        }
        _ => {}
    }

    match preset.length_policy {
        LengthPolicy::Pad => {
            result.sequence.truncate(target_length);
            result.preview.truncate(target_length);
        }
        LengthPolicy::Truncate => cap_to_target(&mut result, target_length),
        LengthPolicy::Error => {}
    }

    tracing::debug!(
        preset = %preset.name,
        target = target_length,
        resolved = result.sequence.len(),
        tokens = tokens_processed,
        skipped = result.warnings.len(),
        "Resolved sequence"
    );
    Ok(result)
}

/// Cut sequence and preview together after the `target`-th resolved file
fn cap_to_target(result: &mut ResolutionResult, target: usize) {
    if result.sequence.len() <= target {
        return;
    }
    result.sequence.truncate(target);

    let mut resolved = 0usize;
    let cut = result
        .preview
        .iter()
        .position(|item| {
            if !item.is_skipped() {
                resolved += 1;
            }
            resolved > target
        })
        .unwrap_or(result.preview.len());
    result.preview.truncate(cut);
}
