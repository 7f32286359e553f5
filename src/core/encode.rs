//! Canonical byte encoding of feature values.
//!
//! Every feature is reduced to a byte sequence before hashing. Numbers are
//! written little-endian at the width of their declared type, so `42i32` and
//! `42i64` encode differently on purpose: callers must pick one type per
//! feature kind and stick to it across the documents they compare.

use serde::Serialize;
use serde_json::Value;

/// Failure to turn a value into canonical bytes.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError
{
    /// The structured arm could not serialize the value.
    #[error("failed to serialize structured feature: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Signed integer at its declared width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignedInt
{
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    /// Platform-width integer, always written as 8 bytes.
    Default(isize),
}

/// Unsigned integer at its declared width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsignedInt
{
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    /// Platform-width integer, always written as 8 bytes.
    Default(usize),
}

/// IEEE-754 float at its declared width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FloatValue
{
    F32(f32),
    F64(f64),
}

/// The closed set of feature kinds the encoder understands.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue<'a>
{
    Text(&'a str),
    Signed(SignedInt),
    Unsigned(UnsignedInt),
    Float(FloatValue),
    Bytes(&'a [u8]),
    Structured(Value),
}

impl FeatureValue<'_>
{
    /// Build the structured variant from any serde value.
    pub fn structured<T: Serialize + ?Sized>(value: &T) -> Result<Self, EncodingError>
    {
        Ok(FeatureValue::Structured(serde_json::to_value(value)?))
    }

    /// Canonical bytes for this value.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodingError>
    {
        let bytes = match self
        {
            FeatureValue::Text(s) => s
                .as_bytes()
                .to_vec(),
            FeatureValue::Signed(n) => match *n
            {
                SignedInt::I8(v) => v
                    .to_le_bytes()
                    .to_vec(),
                SignedInt::I16(v) => v
                    .to_le_bytes()
                    .to_vec(),
                SignedInt::I32(v) => v
                    .to_le_bytes()
                    .to_vec(),
                SignedInt::I64(v) => v
                    .to_le_bytes()
                    .to_vec(),
                SignedInt::Default(v) => (v as i64)
                    .to_le_bytes()
                    .to_vec(),
            },
            FeatureValue::Unsigned(n) => match *n
            {
                UnsignedInt::U8(v) => vec![v],
                UnsignedInt::U16(v) => v
                    .to_le_bytes()
                    .to_vec(),
                UnsignedInt::U32(v) => v
                    .to_le_bytes()
                    .to_vec(),
                UnsignedInt::U64(v) => v
                    .to_le_bytes()
                    .to_vec(),
                UnsignedInt::Default(v) => (v as u64)
                    .to_le_bytes()
                    .to_vec(),
            },
            FeatureValue::Float(f) => match *f
            {
                FloatValue::F32(v) => v
                    .to_le_bytes()
                    .to_vec(),
                FloatValue::F64(v) => v
                    .to_le_bytes()
                    .to_vec(),
            },
            FeatureValue::Bytes(b) => b.to_vec(),
            // serde_json::Map is ordered by key, so the output is canonical
            FeatureValue::Structured(v) => serde_json::to_vec(v)?,
        };

        Ok(bytes)
    }
}

/// Anything that can be turned into feature bytes.
pub trait Encode
{
    fn encode(&self) -> Result<Vec<u8>, EncodingError>;
}

impl Encode for FeatureValue<'_>
{
    fn encode(&self) -> Result<Vec<u8>, EncodingError>
    {
        self.to_bytes()
    }
}

impl Encode for str
{
    fn encode(&self) -> Result<Vec<u8>, EncodingError>
    {
        FeatureValue::Text(self).to_bytes()
    }
}

impl Encode for String
{
    fn encode(&self) -> Result<Vec<u8>, EncodingError>
    {
        FeatureValue::Text(self).to_bytes()
    }
}

impl Encode for [u8]
{
    fn encode(&self) -> Result<Vec<u8>, EncodingError>
    {
        FeatureValue::Bytes(self).to_bytes()
    }
}

impl Encode for Vec<u8>
{
    fn encode(&self) -> Result<Vec<u8>, EncodingError>
    {
        FeatureValue::Bytes(self).to_bytes()
    }
}

impl<T: Encode + ?Sized> Encode for &T
{
    fn encode(&self) -> Result<Vec<u8>, EncodingError>
    {
        (**self).encode()
    }
}

macro_rules! encode_number {
    ($($ty:ty => $variant:ident($inner:ident)),* $(,)?) => {
        $(
            impl From<$ty> for FeatureValue<'static>
            {
                fn from(v: $ty) -> Self
                {
                    FeatureValue::$variant($inner::from(v))
                }
            }

            impl Encode for $ty
            {
                fn encode(&self) -> Result<Vec<u8>, EncodingError>
                {
                    FeatureValue::from(*self).to_bytes()
                }
            }
        )*
    };
}

macro_rules! width_from {
    ($($inner:ident: $($ty:ty => $arm:ident),*;)*) => {
        $($(
            impl From<$ty> for $inner
            {
                fn from(v: $ty) -> Self
                {
                    $inner::$arm(v)
                }
            }
        )*)*
    };
}

width_from! {
    SignedInt: i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Default;
    UnsignedInt: u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Default;
    FloatValue: f32 => F32, f64 => F64;
}

encode_number! {
    i8 => Signed(SignedInt),
    i16 => Signed(SignedInt),
    i32 => Signed(SignedInt),
    i64 => Signed(SignedInt),
    isize => Signed(SignedInt),
    u8 => Unsigned(UnsignedInt),
    u16 => Unsigned(UnsignedInt),
    u32 => Unsigned(UnsignedInt),
    u64 => Unsigned(UnsignedInt),
    usize => Unsigned(UnsignedInt),
    f32 => Float(FloatValue),
    f64 => Float(FloatValue),
}

/// Wrapper that routes any serde value through the structured arm.
///
/// Object keys are emitted in sorted order, not struct declaration order,
/// so reordering fields never changes a token. The flip side is that a
/// struct feature does not hash the same as an encoder that writes fields
/// in declaration order, and tokens built from structured features are not
/// interchangeable with such producers.
///
/// ```
/// use simprint::core::encode::{Encode, Structured};
///
/// #[derive(serde::Serialize)]
/// struct Tag { name: &'static str, level: u8 }
///
/// let bytes = Structured(&Tag { name: "x", level: 2 }).encode().unwrap();
/// assert_eq!(bytes, br#"{"level":2,"name":"x"}"#);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Structured<'a, T: ?Sized>(pub &'a T);

impl<T: Serialize + ?Sized> Encode for Structured<'_, T>
{
    fn encode(&self) -> Result<Vec<u8>, EncodingError>
    {
        FeatureValue::structured(self.0)?.to_bytes()
    }
}
