//! Symbol tokens
//!
//! A symbol names one class of interchangeable samples (e.g. a vowel).
//! Input is case-insensitive; the stored form is always uppercase.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Alphabet used when no preset supplies one
pub const DEFAULT_SYMBOLS: [&str; 6] = ["A", "E", "I", "O", "U", "AY"];

/// Canonical (uppercase) symbol token
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn new(token: &str) -> Self {
        Symbol(token.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(token: &str) -> Self {
        Symbol::new(token)
    }
}

impl From<String> for Symbol {
    fn from(token: String) -> Self {
        Symbol::new(&token)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Parse a comma- or whitespace-separated list such as `"a, e,ay"`
pub fn parse_symbol_list(input: &str) -> Vec<Symbol> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(Symbol::new)
        .collect()
}

/// The built-in vowel alphabet
pub fn default_symbols() -> Vec<Symbol> {
    DEFAULT_SYMBOLS.iter().map(|s| Symbol::new(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_is_uppercased() {
        assert_eq!(Symbol::new("ay").as_str(), "AY");
        assert_eq!(Symbol::new(" e ").as_str(), "E");
        assert_eq!(Symbol::from("Ou"), Symbol::new("OU"));
    }

    #[test]
    fn test_parse_symbol_list() {
        let parsed = parse_symbol_list("a, e,ay  o");
        let expected: Vec<Symbol> = ["A", "E", "AY", "O"].iter().map(|s| Symbol::new(s)).collect();
        assert_eq!(parsed, expected);
        assert!(parse_symbol_list(" , ").is_empty());
    }

    #[test]
    fn test_serde_canonicalizes() {
        let symbol: Symbol = serde_json::from_str("\"ay\"").unwrap();
        assert_eq!(symbol.as_str(), "AY");
        assert_eq!(serde_json::to_string(&symbol).unwrap(), "\"AY\"");
    }
}
