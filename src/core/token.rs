//! The finalized fingerprint and its hex form.
//!
//! Tokens render as uppercase hex **without** zero padding, so a token is
//! anywhere from 1 to 16 characters long. Other implementations compare
//! these strings byte-for-byte; do not pad them here.

use std::fmt;
use std::str::FromStr;

use miette::Diagnostic;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Malformed token text.
#[derive(Debug, Clone, PartialEq, Eq, Diagnostic, thiserror::Error)]
pub enum ParseError
{
    #[error("empty token")]
    #[diagnostic(code(simprint::token::empty), help("tokens are 1 to 16 hex digits, e.g. `9F3A0C21`"))]
    Empty,

    #[error("invalid hex digit {found:?} at position {position} in token {token:?}")]
    #[diagnostic(
        code(simprint::token::invalid_digit),
        help("only 0-9, A-F and a-f are allowed; no sign or 0x prefix")
    )]
    InvalidDigit
    {
        token: String,
        found: char,
        position: usize,
    },

    #[error("token {token:?} does not fit in 64 bits")]
    #[diagnostic(code(simprint::token::overflow), help("tokens have at most 16 significant hex digits"))]
    Overflow
    {
        token: String,
    },
}

/// A 64-bit simhash fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Token(pub u64);

impl Token
{
    pub fn value(self) -> u64
    {
        self.0
    }

    /// Number of differing bits.
    pub fn hamming_distance(
        self,
        other: Token,
    ) -> u32
    {
        crate::core::similarity::hamming_distance(self.0, other.0)
    }

    /// Truncated percentage similarity, see [`crate::core::similarity`].
    pub fn similarity(
        self,
        other: Token,
    ) -> f64
    {
        crate::core::similarity::similarity_from_distance(self.hamming_distance(other))
    }

    /// Fixed-width 16 digit rendering, for display only.
    pub fn to_padded_hex(self) -> String
    {
        format!("{:016X}", self.0)
    }
}

impl fmt::Display for Token
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        write!(f, "{:X}", self.0)
    }
}

impl fmt::UpperHex for Token
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl From<u64> for Token
{
    fn from(v: u64) -> Self
    {
        Token(v)
    }
}

impl From<Token> for u64
{
    fn from(t: Token) -> Self
    {
        t.0
    }
}

impl FromStr for Token
{
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        parse_token(s).map(Token)
    }
}

impl Serialize for Token
{
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Token
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error>
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(serde::de::Error::custom)
    }
}

/// Parse base-16 text into a `u64`.
///
/// Accepts either digit case and any number of leading zeros. Signs,
/// prefixes, separators and values wider than 64 bits are rejected.
pub fn parse_token(s: &str) -> Result<u64, ParseError>
{
    if s.is_empty()
    {
        return Err(ParseError::Empty);
    }

    let mut value: u64 = 0;
    for (position, c) in s
        .chars()
        .enumerate()
    {
        let digit = c
            .to_digit(16)
            .ok_or_else(|| ParseError::InvalidDigit { token: s.to_string(), found: c, position })?;

        value = value
            .checked_mul(16)
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or_else(|| ParseError::Overflow { token: s.to_string() })?;
    }

    Ok(value)
}

/// Parse with the compatibility fallbacks: malformed text reads as `0`,
/// oversized values saturate to `u64::MAX`.
pub fn parse_token_lenient(s: &str) -> u64
{
    match parse_token(s)
    {
        Ok(v) => v,
        Err(ParseError::Overflow { .. }) => u64::MAX,
        Err(_) => 0,
    }
}
