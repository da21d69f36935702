//! Test Helper Utilities
//!
//! Shared utilities for csg-order integration tests. Each test binary uses
//! only part of them.

#![allow(dead_code, unused_imports)]

pub mod sample_tree;

pub use sample_tree::{fixture_path, symbols, SampleTree};
