//! **simprint** - Weighted 64-bit simhash fingerprints for near-duplicate detection
//!
//! Features are encoded to canonical bytes, hashed with FNV-1a 64 and folded
//! into a 64-bit token by weighted bit voting. Two tokens are compared by
//! Hamming distance and a truncated percentage similarity.
//!
//! ```
//! use simprint::{FingerprintBuilder, compute_similarity};
//!
//! let mut a = FingerprintBuilder::new();
//! a.add_feature("hello", 5).unwrap();
//! a.add_feature("world", 1).unwrap();
//!
//! let mut b = FingerprintBuilder::new();
//! b.add_feature("hello", 5).unwrap();
//! b.add_feature("golang", 1).unwrap();
//!
//! assert!(compute_similarity(&a.generate_token(), &b.generate_token()) >= 90.0);
//! ```

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Fingerprinting core - encoding, accumulation and scoring
pub mod core
{
    /// Canonical byte encoding of typed feature values
    pub mod encode;
    pub use encode::{Encode, EncodingError, FeatureValue, Structured};

    /// FNV-1a hashing, vote accumulation and finalization
    pub mod fingerprint;
    pub use fingerprint::{Feature, FingerprintBuilder, Fnv1a64, VoteVector};

    /// Token type and hex parsing
    pub mod token;
    pub use token::{ParseError, Token, parse_token, parse_token_lenient};

    /// Hamming distance and truncated percentage similarity
    pub mod similarity;
    pub use similarity::{TokenPolicy, compute_similarity, compute_similarity_strict, hamming_distance};

    /// Word, shingle and char n-gram extraction from plain text
    pub mod features;
    pub use features::{ExtractMode, FeatureConfig, FeatureExtractor, fingerprint_text};
}

/// Command handlers behind the `simprint` binary
pub mod cli_ext
{
    /// `fingerprint` subcommand
    pub mod fingerprint_cmd;

    /// `compare` subcommand
    pub mod compare_cmd;
}

/// Infrastructure - Configuration, I/O and directory walking
pub mod infra
{
    /// Layered configuration with TOML/YAML/JSON files and SIMPRINT_* env vars
    pub mod config;
    pub use self::config::{Config, init as config_init, load_config};

    /// Memory-mapped document reading for large files (>1MB threshold)
    pub mod io;
    pub use io::{FileContent, read_file_smart};

    /// Gitignore-aware expansion of path arguments
    pub mod walk;
    pub use walk::DocumentWalker;
}

// Strategic re-exports for library consumers
pub use cli::{AppContext, Cli, Commands};
pub use crate::core::{
    EncodingError, Feature, FeatureValue, FingerprintBuilder, ParseError, Structured, Token, compute_similarity,
    compute_similarity_strict, hamming_distance,
};
pub use infra::{Config, load_config};
