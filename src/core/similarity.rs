//! Hamming distance and percentage similarity between tokens.
//!
//! The score is `1 - d/64`, scaled to a percentage and **truncated** (not
//! rounded) to two decimals: `trunc(r * 10000) / 100`. A distance of 1 is
//! therefore 98.43, never 98.44.

use serde::{Deserialize, Serialize};

use crate::core::fingerprint::BITS;
use crate::core::token::{ParseError, parse_token, parse_token_lenient};

/// Number of differing bits between `a` and `b` (0..=64).
pub fn hamming_distance(
    a: u64,
    b: u64,
) -> u32
{
    (a ^ b).count_ones()
}

/// Percentage similarity for a given Hamming distance.
pub fn similarity_from_distance(distance: u32) -> f64
{
    let ratio = 1.0 - f64::from(distance) / BITS as f64;
    ((ratio * 10000.0) as i64) as f64 / 100.0
}

/// Similarity of two hex tokens; malformed tokens read as `0`.
///
/// ```
/// use simprint::compute_similarity;
///
/// assert_eq!(compute_similarity("FF", "FF"), 100.0);
/// assert_eq!(compute_similarity("0", "1"), 98.43);
/// ```
pub fn compute_similarity(
    token_a: &str,
    token_b: &str,
) -> f64
{
    let d = hamming_distance(parse_token_lenient(token_a), parse_token_lenient(token_b));
    similarity_from_distance(d)
}

/// Similarity of two hex tokens, rejecting malformed input.
pub fn compute_similarity_strict(
    token_a: &str,
    token_b: &str,
) -> Result<f64, ParseError>
{
    let d = hamming_distance(parse_token(token_a)?, parse_token(token_b)?);
    Ok(similarity_from_distance(d))
}

/// How malformed token text is treated when scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPolicy
{
    /// Malformed tokens read as zero, oversized ones as all ones.
    Lenient,
    /// Malformed tokens are an error.
    #[default]
    Strict,
}

impl TokenPolicy
{
    pub fn parse(
        self,
        token: &str,
    ) -> Result<u64, ParseError>
    {
        match self
        {
            TokenPolicy::Lenient => Ok(parse_token_lenient(token)),
            TokenPolicy::Strict => parse_token(token),
        }
    }

    pub fn similarity(
        self,
        token_a: &str,
        token_b: &str,
    ) -> Result<f64, ParseError>
    {
        match self
        {
            TokenPolicy::Lenient => Ok(compute_similarity(token_a, token_b)),
            TokenPolicy::Strict => compute_similarity_strict(token_a, token_b),
        }
    }
}
