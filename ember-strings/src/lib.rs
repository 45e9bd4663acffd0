//! Character classification and NUL-terminated string helpers.
//!
//! Engine code passes strings around as buffers of code units that end at the first NUL unit,
//! the way native character libraries expect them. This crate provides the classification and
//! comparison primitives for both unit widths:
//!
//! - *narrow* characters are bytes ([`u8`]) classified with C-locale rules;
//! - *wide* characters are UTF-16 code units ([`Char`]) classified with the Unicode rules of the
//!   standard library. Surrogate halves are never letters, digits, punctuation or whitespace,
//!   and case mapping leaves them untouched.
//!
//! Every operation is generic over [`CharUnit`], so the same function serves both widths:
//!
//! ```
//! use ember_strings::{compare_ignore_case, length, Char};
//!
//! let wide: Vec<Char> = "Engine\0garbage".encode_utf16().collect();
//! assert_eq!(length(&wide), 6);
//! assert!(compare_ignore_case(b"ENGINE\0", b"engine\0").is_eq());
//! ```

mod convert;
mod string;
mod unit;

pub use convert::{convert_ansi_to_utf16, convert_utf16_to_ansi};
pub use string::{
    compare, compare_ignore_case, compare_ignore_case_n, compare_n, copy, copy_n, find, length,
    length_opt,
};
pub use unit::CharUnit;

/// A wide character: one UTF-16 code unit.
pub type Char = u16;

/// Returns `true` for uppercase letters.
#[inline]
pub fn is_upper<C: CharUnit>(c: C) -> bool {
    c.is_upper()
}

/// Returns `true` for lowercase letters.
#[inline]
pub fn is_lower<C: CharUnit>(c: C) -> bool {
    c.is_lower()
}

#[inline]
pub fn is_alpha<C: CharUnit>(c: C) -> bool {
    c.is_alpha()
}

/// Returns `true` for printable characters that are neither alphanumeric nor whitespace.
#[inline]
pub fn is_punct<C: CharUnit>(c: C) -> bool {
    c.is_punct()
}

#[inline]
pub fn is_alnum<C: CharUnit>(c: C) -> bool {
    c.is_alnum()
}

/// Returns `true` for the decimal digits `0` to `9`, for both unit widths.
#[inline]
pub fn is_digit<C: CharUnit>(c: C) -> bool {
    c.is_digit()
}

#[inline]
pub fn is_hex_digit<C: CharUnit>(c: C) -> bool {
    c.is_hex_digit()
}

#[inline]
pub fn is_whitespace<C: CharUnit>(c: C) -> bool {
    c.is_whitespace()
}

/// Maps `c` to uppercase when the mapping is a single unit of the same width.
#[inline]
pub fn to_upper<C: CharUnit>(c: C) -> C {
    c.to_upper()
}

/// Maps `c` to lowercase when the mapping is a single unit of the same width.
#[inline]
pub fn to_lower<C: CharUnit>(c: C) -> C {
    c.to_lower()
}
