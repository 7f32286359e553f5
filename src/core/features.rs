//! Plain-text feature extraction for whole documents.
//!
//! Splits text into words, word shingles or character n-grams and weights
//! each distinct feature by how often it occurs. Terms keep first-seen order
//! so debug output is stable, although the resulting token does not depend
//! on it.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::fingerprint::FingerprintBuilder;
use crate::core::token::Token;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Alphabetic}\p{Nd}_]+").expect("static word pattern is valid"));

/// Unit of text that becomes one feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExtractMode
{
    /// Single words
    #[default]
    Words,
    /// `ngram` consecutive words joined by a space
    Shingles,
    /// `ngram` consecutive characters, whitespace collapsed
    Chars,
}

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig
{
    pub mode: ExtractMode,

    /// Window size for shingles and char n-grams
    pub ngram: usize,

    /// Fold case before extraction
    pub lowercase: bool,

    /// Words shorter than this (in chars) are dropped
    pub min_len: usize,
}

impl Default for FeatureConfig
{
    fn default() -> Self
    {
        Self { mode: ExtractMode::Words, ngram: 3, lowercase: true, min_len: 1 }
    }
}

/// Turns text into weighted features.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor
{
    config: FeatureConfig,
}

impl FeatureExtractor
{
    pub fn with_config(config: FeatureConfig) -> Self
    {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig
    {
        &self.config
    }

    /// Term frequencies of every feature in `text`, in first-seen order.
    pub fn extract(
        &self,
        text: &str,
    ) -> IndexMap<String, u64>
    {
        let folded;
        let text = if self
            .config
            .lowercase
        {
            folded = text.to_lowercase();
            folded.as_str()
        }
        else
        {
            text
        };

        let n = self
            .config
            .ngram
            .max(1);
        let mut counts: IndexMap<String, u64> = IndexMap::new();

        match self
            .config
            .mode
        {
            ExtractMode::Words =>
            {
                for w in self.words(text)
                {
                    *counts
                        .entry(w.to_string())
                        .or_default() += 1;
                }
            }
            ExtractMode::Shingles =>
            {
                let words: Vec<&str> = self
                    .words(text)
                    .collect();

                // Fewer words than the window still yields one shingle
                if !words.is_empty() && words.len() < n
                {
                    counts.insert(words.join(" "), 1);
                }
                for win in words.windows(n)
                {
                    *counts
                        .entry(win.join(" "))
                        .or_default() += 1;
                }
            }
            ExtractMode::Chars =>
            {
                let squeezed: Vec<char> = text
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .chars()
                    .collect();

                if !squeezed.is_empty() && squeezed.len() < n
                {
                    counts.insert(squeezed.iter().collect(), 1);
                }
                for win in squeezed.windows(n)
                {
                    *counts
                        .entry(win.iter().collect())
                        .or_default() += 1;
                }
            }
        }

        debug!(mode = ?self.config.mode, distinct = counts.len(), "extracted features");
        counts
    }

    /// Builder loaded with every feature of `text`.
    pub fn builder(
        &self,
        text: &str,
    ) -> FingerprintBuilder
    {
        let counts = self.extract(text);
        let mut b = FingerprintBuilder::with_capacity(counts.len());
        for (term, weight) in counts
        {
            b.add_encoded(term.into_bytes(), weight);
        }
        b
    }

    pub fn fingerprint(
        &self,
        text: &str,
    ) -> Token
    {
        self.builder(text)
            .fingerprint()
    }

    fn words<'t>(
        &self,
        text: &'t str,
    ) -> impl Iterator<Item = &'t str>
    {
        let min = self
            .config
            .min_len;
        WORD.find_iter(text)
            .map(|m| m.as_str())
            .filter(move |w| {
                w.chars()
                    .count()
                    >= min
            })
    }
}

/// Fingerprint `text` with the given settings.
pub fn fingerprint_text(
    text: &str,
    config: &FeatureConfig,
) -> Token
{
    FeatureExtractor::with_config(config.clone()).fingerprint(text)
}
