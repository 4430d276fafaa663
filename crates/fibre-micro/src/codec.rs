// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Text codec - fixed-buffer value formatting and parsing
//!
//! Implements the conversion contract used by leaf registries:
//!
//! - `to_text(value, buffer, precision)` writes the textual form of one value
//!   into a caller buffer and returns the number of bytes written
//! - `from_text(buffer, precision)` parses exactly one value
//!
//! ## Supported Types
//!
//! - Integers: u8, u16, u32, u64, i8, i16, i32, i64 (decimal)
//! - Floats: f32, f64 (shortest round-trip form, or `precision` decimals).
//!   The shortest form switches to exponent notation when that is shorter,
//!   so any finite value fits in [`MAX_TEXT_LEN`](crate::MAX_TEXT_LEN).
//! - bool: written as `1` / `0`, parsed from `1`, `0`, `true`, `false`
//!
//! ## Buffer Discipline
//!
//! Formatting measures the text first and only writes when it fits, so a
//! failed `to_text` never leaves a partial value in the caller's buffer.
//! Parsing stops at the first NUL byte and ignores surrounding ASCII
//! whitespace.

use core::fmt::{self, Write};

use crate::error::{Error, Result};

/// Value that can be converted to and from text without allocating
pub trait TextCodec: Sized {
    /// Write the value into `buf`, returning the number of bytes written.
    ///
    /// `precision` is the number of decimals for floating point values;
    /// `0` selects the shortest representation that parses back exactly.
    /// Other types ignore it.
    fn to_text(&self, buf: &mut [u8], precision: usize) -> Result<usize>;

    /// Parse one value from `text`.
    fn from_text(text: &[u8], precision: usize) -> Result<Self>;
}

/// Format `value` into `buf` (see [`TextCodec::to_text`])
pub fn to_text<T: TextCodec>(value: &T, buf: &mut [u8], precision: usize) -> Result<usize> {
    value.to_text(buf, precision)
}

/// Parse a `T` from `text` (see [`TextCodec::from_text`])
pub fn from_text<T: TextCodec>(text: &[u8], precision: usize) -> Result<T> {
    T::from_text(text, precision)
}

/// Counts formatted bytes without storing them
struct Counter(usize);

impl Write for Counter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// `fmt::Write` sink over a fixed byte slice
struct SliceWriter<'b> {
    buf: &'b mut [u8],
    pos: usize,
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}

/// Formatted length of `args`
fn measure(args: fmt::Arguments<'_>) -> Result<usize> {
    let mut counter = Counter(0);
    fmt::write(&mut counter, args).map_err(|_| Error::BufferTooSmall)?;
    Ok(counter.0)
}

/// Measure, then write `args` into `buf`
fn write_args(buf: &mut [u8], args: fmt::Arguments<'_>) -> Result<usize> {
    if measure(args)? > buf.len() {
        return Err(Error::BufferTooSmall);
    }

    let mut writer = SliceWriter { buf, pos: 0 };
    fmt::write(&mut writer, args).map_err(|_| Error::BufferTooSmall)?;
    Ok(writer.pos)
}

/// Borrow the meaningful part of a wire buffer as trimmed UTF-8
fn text_str(text: &[u8]) -> Result<&str> {
    let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
    let s = core::str::from_utf8(&text[..end]).map_err(|_| Error::ParseError)?;
    Ok(s.trim())
}

macro_rules! impl_integer_codec {
    ($($t:ty),* $(,)?) => {
        $(
            impl TextCodec for $t {
                fn to_text(&self, buf: &mut [u8], _precision: usize) -> Result<usize> {
                    write_args(buf, format_args!("{}", self))
                }

                fn from_text(text: &[u8], _precision: usize) -> Result<Self> {
                    text_str(text)?.parse::<$t>().map_err(|_| Error::ParseError)
                }
            }
        )*
    };
}

impl_integer_codec!(u8, u16, u32, u64, i8, i16, i32, i64);

macro_rules! impl_float_codec {
    ($($t:ty),* $(,)?) => {
        $(
            impl TextCodec for $t {
                fn to_text(&self, buf: &mut [u8], precision: usize) -> Result<usize> {
                    if precision == 0 {
                        // Plain digits unless the exponent form is shorter (1e100, 1e-100)
                        let plain = measure(format_args!("{}", self))?;
                        if plain <= measure(format_args!("{:e}", self))? {
                            write_args(buf, format_args!("{}", self))
                        } else {
                            write_args(buf, format_args!("{:e}", self))
                        }
                    } else {
                        write_args(buf, format_args!("{:.*}", precision, self))
                    }
                }

                fn from_text(text: &[u8], _precision: usize) -> Result<Self> {
                    text_str(text)?.parse::<$t>().map_err(|_| Error::ParseError)
                }
            }
        )*
    };
}

impl_float_codec!(f32, f64);

impl TextCodec for bool {
    fn to_text(&self, buf: &mut [u8], _precision: usize) -> Result<usize> {
        write_args(buf, format_args!("{}", u8::from(*self)))
    }

    fn from_text(text: &[u8], _precision: usize) -> Result<Self> {
        match text_str(text)? {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(Error::ParseError),
        }
    }
}

/// Small by-value leaf value
///
/// Carried inside a [`Payload`](crate::Payload) when a member is computed on
/// demand instead of stored in the object graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    /// Boolean value
    Bool(bool),
    /// Signed integer (any width up to 64 bits)
    Int(i64),
    /// Unsigned integer (any width up to 64 bits)
    UInt(u64),
    /// Single precision float
    F32(f32),
    /// Double precision float
    F64(f64),
}

impl Scalar {
    /// Wrap any leaf value by its underlying representation
    pub fn from_value<T: crate::LeafValue>(value: T) -> Self {
        value.to_repr().into()
    }

    /// Format the wrapped value (see [`TextCodec::to_text`])
    pub fn to_text(&self, buf: &mut [u8], precision: usize) -> Result<usize> {
        match self {
            Scalar::Bool(v) => v.to_text(buf, precision),
            Scalar::Int(v) => v.to_text(buf, precision),
            Scalar::UInt(v) => v.to_text(buf, precision),
            Scalar::F32(v) => v.to_text(buf, precision),
            Scalar::F64(v) => v.to_text(buf, precision),
        }
    }
}

macro_rules! impl_scalar_from {
    ($variant:ident($inner:ty): $($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(value: $t) -> Self {
                    Scalar::$variant(<$inner>::from(value))
                }
            }
        )*
    };
}

impl_scalar_from!(Bool(bool): bool);
impl_scalar_from!(Int(i64): i8, i16, i32, i64);
impl_scalar_from!(UInt(u64): u8, u16, u32, u64);
impl_scalar_from!(F32(f32): f32);
impl_scalar_from!(F64(f64): f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_to_text() {
        let mut buf = [0u8; 24];
        let len = to_text(&-1234i32, &mut buf, 0).unwrap();
        assert_eq!(&buf[..len], b"-1234");

        let len = to_text(&u64::MAX, &mut buf, 0).unwrap();
        assert_eq!(&buf[..len], b"18446744073709551615");
    }

    #[test]
    fn test_buffer_too_small_leaves_buffer_untouched() {
        let mut buf = [b'#'; 3];
        assert_eq!(to_text(&12345u32, &mut buf, 0), Err(Error::BufferTooSmall));
        assert_eq!(&buf, b"###");
    }

    #[test]
    fn test_exact_fit() {
        let mut buf = [0u8; 3];
        assert_eq!(to_text(&255u8, &mut buf, 0), Ok(3));
        assert_eq!(&buf, b"255");
    }

    #[test]
    fn test_float_precision() {
        let mut buf = [0u8; 32];
        let len = to_text(&0.1f32, &mut buf, 0).unwrap();
        assert_eq!(&buf[..len], b"0.1");

        let len = to_text(&3.14159f64, &mut buf, 2).unwrap();
        assert_eq!(&buf[..len], b"3.14");
    }

    #[test]
    fn test_float_extremes_use_exponent_form() {
        let mut buf = [0u8; crate::MAX_TEXT_LEN];
        let len = to_text(&1e100f64, &mut buf, 0).unwrap();
        assert_eq!(&buf[..len], b"1e100");

        let len = to_text(&1e-100f64, &mut buf, 0).unwrap();
        assert_eq!(&buf[..len], b"1e-100");

        let len = to_text(&f64::MIN_POSITIVE, &mut buf, 0).unwrap();
        assert_eq!(from_text::<f64>(&buf[..len], 0), Ok(f64::MIN_POSITIVE));

        let len = to_text(&f32::MAX, &mut buf, 0).unwrap();
        assert_eq!(from_text::<f32>(&buf[..len], 0), Ok(f32::MAX));

        let len = to_text(&1234.5f64, &mut buf, 0).unwrap();
        assert_eq!(&buf[..len], b"1234.5");
    }

    #[test]
    fn test_parse_trims_and_stops_at_nul() {
        assert_eq!(from_text::<i16>(b"  -42 \n", 0), Ok(-42));
        assert_eq!(from_text::<u32>(b"17\0garbage", 0), Ok(17));
        assert_eq!(from_text::<f32>(b"2.5", 0), Ok(2.5));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(from_text::<u8>(b"256", 0), Err(Error::ParseError));
        assert_eq!(from_text::<i32>(b"12abc", 0), Err(Error::ParseError));
        assert_eq!(from_text::<i32>(b"", 0), Err(Error::ParseError));
        assert_eq!(from_text::<u16>(&[0xff, 0xfe], 0), Err(Error::ParseError));
    }

    #[test]
    fn test_bool() {
        let mut buf = [0u8; 4];
        let len = to_text(&true, &mut buf, 0).unwrap();
        assert_eq!(&buf[..len], b"1");

        assert_eq!(from_text::<bool>(b"0", 0), Ok(false));
        assert_eq!(from_text::<bool>(b"true", 0), Ok(true));
        assert_eq!(from_text::<bool>(b"yes", 0), Err(Error::ParseError));
    }

    #[test]
    fn test_scalar_widening() {
        assert_eq!(Scalar::from(-3i8), Scalar::Int(-3));
        assert_eq!(Scalar::from(7u16), Scalar::UInt(7));

        let mut buf = [0u8; 8];
        let len = Scalar::F32(1.5).to_text(&mut buf, 0).unwrap();
        assert_eq!(&buf[..len], b"1.5");
    }
}
