//! Symbol bucket scanner
//!
//! Walks a sample folder, classifies every `.wav` file with
//! [`detect_symbol`](crate::detector::detect_symbol) and groups the results
//! into per-symbol buckets.
//!
//! Results are cached by `(root, sorted alphabet, fingerprint)` where the
//! fingerprint covers every candidate file's relative path and modification
//! time. Adding, removing or touching a file changes the fingerprint and
//! forces a fresh scan; so does a different alphabet over the same files.

use crate::detector::{detect_symbol, filename_tag};
use crate::symbol::Symbol;
use csg_common::constants::{RESERVED_OUTPUT_NAME, SAMPLE_EXTENSION};
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

/// Symbol → files, in sorted path order
pub type Buckets = BTreeMap<Symbol, Vec<PathBuf>>;

/// Classification of every sample under a root folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketScanResult {
    /// One entry per allowed symbol, empty when no file matched
    pub buckets: Buckets,
    /// Files with neither a usable tag nor a symbol folder
    pub unlabeled: Vec<PathBuf>,
    /// Files tagged with a symbol outside the alphabet
    pub unknown_symbols: BTreeMap<Symbol, Vec<PathBuf>>,
    /// Tag/folder conflicts, one line per file
    pub warnings: Vec<String>,
}

impl BucketScanResult {
    /// Number of files placed in a bucket
    pub fn classified_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Allowed symbols whose bucket stayed empty
    pub fn empty_symbols(&self) -> Vec<&Symbol> {
        self.buckets
            .iter()
            .filter(|(_, files)| files.is_empty())
            .map(|(symbol, _)| symbol)
            .collect()
    }
}

/// Content-change signature: sorted (relative path, mtime in ns) pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fingerprint(Vec<(String, u128)>);

impl Fingerprint {
    fn compute(files: &[PathBuf], root: &Path) -> Self {
        let mut entries: Vec<(String, u128)> = files
            .iter()
            .map(|file| {
                let rel = file
                    .strip_prefix(root)
                    .unwrap_or(file)
                    .to_string_lossy()
                    .replace('\\', "/");
                // A file that vanished mid-scan still contributes its path
                let stamp = std::fs::metadata(file)
                    .and_then(|m| m.modified())
                    .ok()
                    .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                    .map(|d| d.as_nanos())
                    .unwrap_or(0);
                (rel, stamp)
            })
            .collect();
        entries.sort();
        Fingerprint(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// SHA-256 over every entry, used as the compact cache key component
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for (rel, stamp) in &self.0 {
            hasher.update(rel.as_bytes());
            hasher.update([0u8]);
            hasher.update(stamp.to_le_bytes());
        }
        hasher.finalize().into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ScanKey {
    root: PathBuf,
    symbols: Vec<Symbol>,
    fingerprint: [u8; 32],
}

/// Scan results keyed by root, alphabet and fingerprint
///
/// Entries are never evicted automatically; call [`ScanCache::invalidate`]
/// or [`ScanCache::clear`] to drop them.
#[derive(Debug, Default)]
pub struct ScanCache {
    entries: Mutex<HashMap<ScanKey, Arc<BucketScanResult>>>,
}

impl ScanCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ScanKey, Arc<BucketScanResult>>> {
        // A panic while holding the lock cannot leave a half-written entry
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn get(&self, key: &ScanKey) -> Option<Arc<BucketScanResult>> {
        self.lock().get(key).cloned()
    }

    fn insert(&self, key: ScanKey, result: Arc<BucketScanResult>) {
        self.lock().insert(key, result);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every cached scan of `root` (any alphabet, any fingerprint)
    pub fn invalidate(&self, root: &Path) -> usize {
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| key.root != root);
        before - entries.len()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

static GLOBAL_CACHE: Lazy<Arc<ScanCache>> = Lazy::new(|| Arc::new(ScanCache::new()));

/// Process-wide cache used by [`scan_symbol_buckets`]
pub fn global_cache() -> Arc<ScanCache> {
    Arc::clone(&GLOBAL_CACHE)
}

/// Sample folder scanner bound to one cache
#[derive(Debug, Clone)]
pub struct BucketScanner {
    cache: Arc<ScanCache>,
}

impl BucketScanner {
    /// Scanner with its own private cache
    pub fn new() -> Self {
        Self {
            cache: Arc::new(ScanCache::new()),
        }
    }

    /// Scanner sharing an existing cache
    pub fn with_cache(cache: Arc<ScanCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &ScanCache {
        &self.cache
    }

    /// Classify every sample under `root` into symbol buckets
    ///
    /// A missing root yields empty buckets rather than an error. With
    /// `use_cache`, an unchanged tree returns the previously computed result
    /// (the same `Arc`).
    pub fn scan(&self, root: &Path, allowed: &[Symbol], use_cache: bool) -> Arc<BucketScanResult> {
        let mut declared: Vec<Symbol> = Vec::new();
        for symbol in allowed {
            if !declared.contains(symbol) {
                declared.push(symbol.clone());
            }
        }

        let root = match root.canonicalize() {
            Ok(root) if root.is_dir() => root,
            _ => {
                tracing::debug!(
                    root = %root.display(),
                    "Scan root missing, returning empty buckets"
                );
                return Arc::new(classify(&[], &declared));
            }
        };
        let mut sorted_symbols = declared.clone();
        sorted_symbols.sort();

        let files = collect_samples(&root);
        let fingerprint = Fingerprint::compute(&files, &root);
        let key = ScanKey {
            root: root.clone(),
            symbols: sorted_symbols,
            fingerprint: fingerprint.digest(),
        };

        if use_cache {
            if let Some(cached) = self.cache.get(&key) {
                tracing::debug!(root = %root.display(), files = files.len(), "Scan cache hit");
                return cached;
            }
        }

        let result = Arc::new(classify(&files, &declared));
        tracing::info!(
            root = %root.display(),
            files = files.len(),
            classified = result.classified_count(),
            unlabeled = result.unlabeled.len(),
            unknown = result.unknown_symbols.len(),
            warnings = result.warnings.len(),
            "Scanned symbol buckets"
        );

        if use_cache {
            self.cache.insert(key, Arc::clone(&result));
        }
        result
    }
}

impl Default for BucketScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan using the process-wide cache
pub fn scan_symbol_buckets(
    root: &Path,
    allowed: &[Symbol],
    use_cache: bool,
) -> Arc<BucketScanResult> {
    BucketScanner::with_cache(global_cache()).scan(root, allowed, use_cache)
}

/// Every `.wav` under `root` except the pipeline's own output, sorted by path
fn collect_samples(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                if is_sample(path) {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) => {
                tracing::warn!("Error accessing entry: {}", e);
            }
        }
    }

    files.sort();
    files
}

fn is_sample(path: &Path) -> bool {
    let is_wav = path
        .extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(SAMPLE_EXTENSION))
        .unwrap_or(false);
    let reserved = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase() == RESERVED_OUTPUT_NAME)
        .unwrap_or(false);
    is_wav && !reserved
}

fn classify(files: &[PathBuf], declared: &[Symbol]) -> BucketScanResult {
    let allowed: HashSet<Symbol> = declared.iter().cloned().collect();
    let mut result = BucketScanResult {
        buckets: declared.iter().map(|s| (s.clone(), Vec::new())).collect(),
        ..Default::default()
    };

    for file in files {
        let detection = detect_symbol(file, &allowed);
        if let Some(warning) = detection.warning {
            tracing::warn!("{}", warning);
            result.warnings.push(warning);
        }

        match detection.symbol {
            Some(symbol) => {
                tracing::debug!(
                    path = %file.display(),
                    symbol = %symbol,
                    source = ?detection.source,
                    "Classified sample"
                );
                result.buckets.entry(symbol).or_default().push(file.clone());
            }
            None => match filename_tag(file) {
                Some(tag) => result.unknown_symbols.entry(tag).or_default().push(file.clone()),
                None => result.unlabeled.push(file.clone()),
            },
        }
    }

    result.unlabeled.sort();
    for paths in result.unknown_symbols.values_mut() {
        paths.sort();
    }
    result
}
