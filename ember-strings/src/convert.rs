//! Conversions between narrow (Latin-1) and wide (UTF-16) strings.

use crate::string::length;

/// Narrow replacement for wide units that have no Latin-1 encoding.
const REPLACEMENT: u8 = b'?';

/// Widens the terminated Latin-1 string `from` into `to`.
///
/// Conversion stops at the terminator of `from` or when `to` is full. `to` is terminated when
/// there is room left. Returns the number of units written, not counting the terminator.
pub fn convert_ansi_to_utf16(from: &[u8], to: &mut [u16]) -> usize {
    let written = length(from).min(to.len());
    for (dst, &src) in to.iter_mut().zip(&from[..written]) {
        *dst = u16::from(src);
    }
    if let Some(terminator) = to.get_mut(written) {
        *terminator = 0;
    }
    written
}

/// Narrows the terminated UTF-16 string `from` into `to`.
///
/// Units above `0xFF` become `?`. Surrogate pairs are not combined, so every unit of `from`
/// produces exactly one byte.
pub fn convert_utf16_to_ansi(from: &[u16], to: &mut [u8]) -> usize {
    let written = length(from).min(to.len());
    for (dst, &src) in to.iter_mut().zip(&from[..written]) {
        *dst = u8::try_from(src).unwrap_or(REPLACEMENT);
    }
    if let Some(terminator) = to.get_mut(written) {
        *terminator = 0;
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widen_latin1() {
        let mut to = [0xffffu16; 6];
        assert_eq!(convert_ansi_to_utf16(b"caf\xe9\0rest", &mut to), 4);
        assert_eq!(&to[..5], &[b'c' as u16, b'a' as u16, b'f' as u16, 0xe9, 0]);
        assert_eq!(to[5], 0xffff);
    }

    #[test]
    fn narrow_replaces_unrepresentable() {
        let from: Vec<u16> = "a€é😀".encode_utf16().collect();
        let mut to = [0xffu8; 8];
        assert_eq!(convert_utf16_to_ansi(&from, &mut to), 5);
        assert_eq!(&to[..6], b"a?\xe9??\0");
    }

    #[test]
    fn full_destination_is_not_terminated() {
        let mut to = [0xffu8; 3];
        assert_eq!(convert_utf16_to_ansi(&[0x41, 0x42, 0x43, 0x44], &mut to), 3);
        assert_eq!(&to, b"ABC");

        let mut to = [0u16; 0];
        assert_eq!(convert_ansi_to_utf16(b"abc", &mut to), 0);
    }
}
