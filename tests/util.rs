//! Shared test utilities for integration tests
//!
//! Provides a small document corpus with one near-duplicate pair
//! and one unrelated document.

#![allow(dead_code)]

use assert_fs::prelude::*;

pub const ORIGINAL: &str = "The quick brown fox jumps over the lazy dog. \
The dog sleeps in the warm afternoon sun while the farmer mends the old fence \
and the children read quietly under the large oak tree near the river bank.";

pub const EDITED: &str = "The quick brown fox jumps over the lazy dog. \
The dog sleeps in the warm afternoon sun while the farmer mends the old gate \
and the children read quietly under the large oak tree near the river bank.";

pub const UNRELATED: &str = "Compilers lower typed syntax trees into an intermediate \
representation, run borrow checking, then schedule register allocation passes.";

/// Corpus with docs/original.txt, docs/edited.txt, docs/unrelated.md
/// and a hidden docs/.draft.txt.
pub fn make_corpus() -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    tmp.child("docs/original.txt")
        .write_str(ORIGINAL)
        .expect("write original");
    tmp.child("docs/edited.txt")
        .write_str(EDITED)
        .expect("write edited");
    tmp.child("docs/unrelated.md")
        .write_str(UNRELATED)
        .expect("write unrelated");
    tmp.child("docs/.draft.txt")
        .write_str("hidden draft")
        .expect("write draft");

    tmp
}
