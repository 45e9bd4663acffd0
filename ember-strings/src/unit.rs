use std::fmt;

use unicode_general_category::{get_general_category, GeneralCategory};

/// A code unit of a NUL-terminated string.
///
/// Implemented for [`u8`] (narrow, C locale) and [`u16`] (wide, UTF-16).
pub trait CharUnit: Copy + Ord + fmt::Debug + 'static {
    /// The terminator unit.
    const NUL: Self;

    fn is_upper(self) -> bool;
    fn is_lower(self) -> bool;
    fn is_alpha(self) -> bool;
    fn is_punct(self) -> bool;
    fn is_alnum(self) -> bool;
    fn is_digit(self) -> bool;
    fn is_hex_digit(self) -> bool;
    fn is_whitespace(self) -> bool;
    fn to_upper(self) -> Self;
    fn to_lower(self) -> Self;
}

impl CharUnit for u8 {
    const NUL: Self = 0;

    #[inline]
    fn is_upper(self) -> bool {
        self.is_ascii_uppercase()
    }

    #[inline]
    fn is_lower(self) -> bool {
        self.is_ascii_lowercase()
    }

    #[inline]
    fn is_alpha(self) -> bool {
        self.is_ascii_alphabetic()
    }

    #[inline]
    fn is_punct(self) -> bool {
        self.is_ascii_punctuation()
    }

    #[inline]
    fn is_alnum(self) -> bool {
        self.is_ascii_alphanumeric()
    }

    #[inline]
    fn is_digit(self) -> bool {
        self.is_ascii_digit()
    }

    #[inline]
    fn is_hex_digit(self) -> bool {
        self.is_ascii_hexdigit()
    }

    // `u8::is_ascii_whitespace` leaves out the vertical tab, `isspace` does not.
    #[inline]
    fn is_whitespace(self) -> bool {
        matches!(self, b' ' | b'\t'..=b'\r')
    }

    #[inline]
    fn to_upper(self) -> Self {
        self.to_ascii_uppercase()
    }

    #[inline]
    fn to_lower(self) -> Self {
        self.to_ascii_lowercase()
    }
}

impl CharUnit for u16 {
    const NUL: Self = 0;

    #[inline]
    fn is_upper(self) -> bool {
        scalar(self).is_some_and(char::is_uppercase)
    }

    #[inline]
    fn is_lower(self) -> bool {
        scalar(self).is_some_and(char::is_lowercase)
    }

    #[inline]
    fn is_alpha(self) -> bool {
        scalar(self).is_some_and(char::is_alphabetic)
    }

    #[inline]
    fn is_punct(self) -> bool {
        scalar(self)
            .is_some_and(|c| is_graphic(c) && !c.is_whitespace() && !c.is_alphanumeric())
    }

    #[inline]
    fn is_alnum(self) -> bool {
        scalar(self).is_some_and(char::is_alphanumeric)
    }

    #[inline]
    fn is_digit(self) -> bool {
        scalar(self).is_some_and(|c| c.is_ascii_digit())
    }

    #[inline]
    fn is_hex_digit(self) -> bool {
        scalar(self).is_some_and(|c| c.is_ascii_hexdigit())
    }

    #[inline]
    fn is_whitespace(self) -> bool {
        scalar(self).is_some_and(char::is_whitespace)
    }

    fn to_upper(self) -> Self {
        match scalar(self) {
            Some(c) => single_unit(c.to_uppercase()).unwrap_or(self),
            None => self,
        }
    }

    fn to_lower(self) -> Self {
        match scalar(self) {
            Some(c) => single_unit(c.to_lowercase()).unwrap_or(self),
            None => self,
        }
    }
}

/// The scalar value a wide unit stands for, `None` for surrogate halves.
#[inline]
fn scalar(unit: u16) -> Option<char> {
    char::from_u32(unit as u32)
}

/// Whether `c` is printable. Noncharacters are `Unassigned`.
fn is_graphic(c: char) -> bool {
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
            | GeneralCategory::Unassigned
    )
}

/// Collapses a case mapping into one UTF-16 unit, or `None` if it expands or leaves the BMP.
fn single_unit(mut mapping: impl Iterator<Item = char>) -> Option<u16> {
    match (mapping.next(), mapping.next()) {
        (Some(c), None) => u16::try_from(c as u32).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(c: char) -> u16 {
        c as u32 as u16
    }

    #[test]
    fn narrow_whitespace_matches_isspace() {
        for c in [b' ', b'\t', b'\n', 0x0b, 0x0c, b'\r'] {
            assert!(c.is_whitespace(), "{c:#x}");
        }
        assert!(!0xa0u8.is_whitespace());
        assert!(!b'_'.is_whitespace());
    }

    #[test]
    fn narrow_non_ascii_is_unclassified() {
        for c in 0x80..=0xffu8 {
            assert!(!c.is_alpha() && !c.is_punct() && !c.is_whitespace());
            assert_eq!(c.to_upper(), c);
            assert_eq!(c.to_lower(), c);
        }
    }

    #[test]
    fn wide_case_mapping() {
        assert_eq!(wide('é').to_upper(), wide('É'));
        assert_eq!(wide('Ж').to_lower(), wide('ж'));
        // Expanding mappings stay put.
        assert_eq!(wide('ß').to_upper(), wide('ß'));
        assert_eq!(wide('İ').to_lower(), wide('İ'));
    }

    #[test]
    fn wide_surrogates_are_inert() {
        for unit in [0xd800u16, 0xdbff, 0xdc00, 0xdfff] {
            assert!(!unit.is_alpha());
            assert!(!unit.is_punct());
            assert!(!unit.is_whitespace());
            assert_eq!(unit.to_upper(), unit);
            assert_eq!(unit.to_lower(), unit);
        }
    }

    #[test]
    fn wide_punctuation() {
        assert!(wide('!').is_punct());
        assert!(wide('¿').is_punct());
        assert!(wide('€').is_punct());
        assert!(!wide('é').is_punct());
        assert!(!wide('\u{3000}').is_punct());
        assert!(!wide('\u{7f}').is_punct());
    }

    #[test]
    fn wide_unprintable_is_not_punctuation() {
        // Unassigned, private use, noncharacters and a format character.
        for unit in [0x0378u16, 0x0380, 0xe000, 0xf8ff, 0xfdd0, 0xfdef, 0xfffe, 0xffff, 0x200b] {
            assert!(!unit.is_punct(), "{unit:#x}");
        }
        assert!(wide('\u{0301}').is_punct());
    }

    #[test]
    fn wide_digits_are_ascii_only() {
        assert!(wide('7').is_digit());
        assert!(!wide('٣').is_digit());
        assert!(wide('٣').is_alnum());
        assert!(wide('F').is_hex_digit());
        assert!(!wide('Ｆ').is_hex_digit());
    }
}
