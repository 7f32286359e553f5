//! Weighted simhash accumulation.
//!
//! Each feature's bytes are hashed with 64-bit FNV-1a. Every bit of that hash
//! casts a vote of `+weight` (bit set) or `-weight` (bit clear) into one of 64
//! signed slots. The final token sets bit `i` when slot `i` is `>= 0`, so ties
//! at exactly zero resolve to 1. An empty builder, or one whose votes cancel
//! out, therefore yields set bits rather than clear ones.

use std::hash::Hasher;

use tracing::{instrument, trace};

use crate::core::encode::{Encode, EncodingError};
use crate::core::token::Token;

/// Number of bits in a fingerprint.
pub const BITS: usize = 64;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

/// Stable 64-bit FNV-1a hasher.
///
/// `std`'s `DefaultHasher` makes no cross-version stability promise, and
/// tokens must match across implementations, so the algorithm is spelled out.
#[derive(Debug, Clone, Copy)]
pub struct Fnv1a64
{
    state: u64,
}

impl Fnv1a64
{
    pub fn new() -> Self
    {
        Self { state: FNV_OFFSET_BASIS }
    }

    /// One-shot hash of a byte slice.
    pub fn hash(bytes: &[u8]) -> u64
    {
        let mut h = Self::new();
        h.write(bytes);
        h.finish()
    }
}

impl Default for Fnv1a64
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl Hasher for Fnv1a64
{
    fn finish(&self) -> u64
    {
        self.state
    }

    fn write(
        &mut self,
        bytes: &[u8],
    )
    {
        for &b in bytes
        {
            self.state ^= u64::from(b);
            self.state = self
                .state
                .wrapping_mul(FNV_PRIME);
        }
    }
}

/// One weighted, already-encoded feature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feature
{
    encoded: Vec<u8>,
    weight: u64,
}

impl Feature
{
    pub fn new(
        encoded: Vec<u8>,
        weight: u64,
    ) -> Self
    {
        Self { encoded, weight }
    }

    pub fn encoded(&self) -> &[u8]
    {
        &self.encoded
    }

    pub fn weight(&self) -> u64
    {
        self.weight
    }

    /// Per-bit votes of this feature alone.
    pub(crate) fn vectorize(&self) -> VoteVector
    {
        let hash = Fnv1a64::hash(&self.encoded);
        // Weights above i64::MAX wrap, matching two's-complement reference behaviour
        let w = self.weight as i64;

        let mut v = VoteVector::zeroed();
        for (i, slot) in v
            .0
            .iter_mut()
            .enumerate()
        {
            *slot = if (hash >> i) & 1 == 1 { w } else { w.wrapping_neg() };
        }

        v
    }
}

/// 64 signed accumulators, one per output bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteVector(pub [i64; BITS]);

impl VoteVector
{
    pub fn zeroed() -> Self
    {
        Self([0; BITS])
    }

    /// Add another vector slot by slot.
    pub fn absorb(
        &mut self,
        other: &VoteVector,
    )
    {
        for (acc, v) in self
            .0
            .iter_mut()
            .zip(other.0.iter())
        {
            *acc = acc.wrapping_add(*v);
        }
    }

    /// Collapse to a token; bit `i` is set when slot `i` is non-negative.
    pub fn finalize(&self) -> Token
    {
        let bits = self
            .0
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v >= 0)
            .fold(0u64, |acc, (i, _)| acc | (1u64 << i));

        Token(bits)
    }
}

/// Collects the weighted features of one document.
///
/// ```
/// use simprint::FingerprintBuilder;
///
/// let mut doc = FingerprintBuilder::new();
/// doc.add_feature("hello", 5).unwrap();
/// doc.add_feature(&42i64, 1).unwrap();
///
/// let token = doc.generate_token();
/// assert!((1..=16).contains(&token.len()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingerprintBuilder
{
    features: Vec<Feature>,
}

impl FingerprintBuilder
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self
    {
        Self { features: Vec::with_capacity(capacity) }
    }

    /// Encode `value` and record it with `weight`.
    ///
    /// # Errors
    /// Returns [`EncodingError`] when the value cannot be encoded; the
    /// feature list is left untouched in that case.
    pub fn add_feature<V: Encode + ?Sized>(
        &mut self,
        value: &V,
        weight: u64,
    ) -> Result<(), EncodingError>
    {
        let encoded = value.encode()?;
        self.add_encoded(encoded, weight);
        Ok(())
    }

    /// Record bytes that are already in canonical form.
    pub fn add_encoded(
        &mut self,
        encoded: Vec<u8>,
        weight: u64,
    )
    {
        trace!(len = encoded.len(), weight, "add feature");
        self.features
            .push(Feature::new(encoded, weight));
    }

    pub fn features(&self) -> &[Feature]
    {
        &self.features
    }

    pub fn len(&self) -> usize
    {
        self.features
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.features
            .is_empty()
    }

    /// Sum of all feature votes.
    pub fn votes(&self) -> VoteVector
    {
        let mut total = VoteVector::zeroed();
        for f in &self.features
        {
            total.absorb(&f.vectorize());
        }
        total
    }

    /// Finalize the current feature set into a token.
    #[instrument(level = "debug", skip(self), fields(features = self.features.len()))]
    pub fn fingerprint(&self) -> Token
    {
        self.votes()
            .finalize()
    }

    /// Finalize and render as unpadded uppercase hex.
    pub fn generate_token(&self) -> String
    {
        self.fingerprint()
            .to_string()
    }
}

impl Extend<Feature> for FingerprintBuilder
{
    fn extend<I: IntoIterator<Item = Feature>>(
        &mut self,
        iter: I,
    )
    {
        self.features
            .extend(iter);
    }
}

impl FromIterator<Feature> for FingerprintBuilder
{
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self
    {
        Self { features: iter.into_iter().collect() }
    }
}
