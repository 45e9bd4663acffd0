use std::cmp::Ordering;

use ember::strings::{
    compare, compare_ignore_case, compare_ignore_case_n, compare_n, convert_ansi_to_utf16,
    convert_utf16_to_ansi, copy, copy_n, find, is_alnum, is_alpha, is_digit, is_hex_digit,
    is_lower, is_punct, is_upper, is_whitespace, length, length_opt, to_lower, to_upper, Char,
};
use unicode_general_category::{get_general_category, GeneralCategory as Gc};

/// What `iswpunct` says about `c`, or `None` when the category alone does not decide it.
fn expected_punct(c: char) -> Option<bool> {
    if c.is_alphanumeric() || c.is_whitespace() {
        return Some(false);
    }
    match get_general_category(c) {
        Gc::Control | Gc::Format | Gc::PrivateUse | Gc::Surrogate | Gc::Unassigned => Some(false),
        Gc::SpaceSeparator | Gc::LineSeparator | Gc::ParagraphSeparator => Some(false),
        Gc::ConnectorPunctuation
        | Gc::DashPunctuation
        | Gc::OpenPunctuation
        | Gc::ClosePunctuation
        | Gc::InitialPunctuation
        | Gc::FinalPunctuation
        | Gc::OtherPunctuation
        | Gc::MathSymbol
        | Gc::CurrencySymbol
        | Gc::ModifierSymbol
        | Gc::OtherSymbol
        | Gc::NonspacingMark
        | Gc::SpacingMark
        | Gc::EnclosingMark => Some(true),
        // Letters and numbers the category tables know but `char` does not yet.
        _ => None,
    }
}

fn wide(s: &str) -> Vec<Char> {
    s.encode_utf16().chain(Some(0)).collect()
}

#[test]
fn narrow_classification_follows_c_locale() {
    for c in 0..=u8::MAX {
        assert_eq!(is_upper(c), c.is_ascii_uppercase(), "{c:#x}");
        assert_eq!(is_lower(c), c.is_ascii_lowercase(), "{c:#x}");
        assert_eq!(is_alpha(c), c.is_ascii_alphabetic(), "{c:#x}");
        assert_eq!(is_alnum(c), c.is_ascii_alphanumeric(), "{c:#x}");
        assert_eq!(is_digit(c), c.is_ascii_digit(), "{c:#x}");
        assert_eq!(is_hex_digit(c), c.is_ascii_hexdigit(), "{c:#x}");
        assert_eq!(is_punct(c), c.is_ascii_graphic() && !c.is_ascii_alphanumeric(), "{c:#x}");
        assert_eq!(is_whitespace(c), c.is_ascii_whitespace() || c == 0x0b, "{c:#x}");
        assert_eq!(to_upper(c), c.to_ascii_uppercase(), "{c:#x}");
        assert_eq!(to_lower(c), c.to_ascii_lowercase(), "{c:#x}");
    }
}

#[test]
fn wide_classification_follows_unicode() {
    for unit in 0..=u16::MAX {
        let Some(c) = char::from_u32(unit as u32) else {
            assert!(!is_upper(unit) && !is_lower(unit) && !is_alpha(unit), "{unit:#x}");
            assert!(!is_alnum(unit) && !is_punct(unit) && !is_whitespace(unit), "{unit:#x}");
            assert!(!is_digit(unit) && !is_hex_digit(unit), "{unit:#x}");
            assert_eq!(to_upper(unit), unit);
            assert_eq!(to_lower(unit), unit);
            continue;
        };

        assert_eq!(is_upper(unit), c.is_uppercase(), "{c:?}");
        assert_eq!(is_lower(unit), c.is_lowercase(), "{c:?}");
        assert_eq!(is_alpha(unit), c.is_alphabetic(), "{c:?}");
        assert_eq!(is_alnum(unit), c.is_alphanumeric(), "{c:?}");
        assert_eq!(is_whitespace(unit), c.is_whitespace(), "{c:?}");
        assert_eq!(is_digit(unit), c.is_ascii_digit(), "{c:?}");
        assert_eq!(is_hex_digit(unit), c.is_ascii_hexdigit(), "{c:?}");
        if let Some(expected) = expected_punct(c) {
            assert_eq!(is_punct(unit), expected, "{c:?}");
        }
    }
}

#[test]
fn wide_unprintable_units_are_not_punctuation() {
    let noncharacters = (0xfdd0u16..=0xfdef).chain([0xfffe, 0xffff]);
    let private_use = 0xe000..=0xf8ff;
    for unit in noncharacters.chain(private_use).chain([0x0378, 0x0380, 0x200b, 0xfeff, 0x00ad]) {
        assert!(!is_punct(unit), "{unit:#x}");
    }
}

#[test]
fn wide_case_mapping_is_single_unit() {
    for unit in 0..=u16::MAX {
        let Some(c) = char::from_u32(unit as u32) else { continue };

        let mut upper = c.to_uppercase();
        let expected = match (upper.next(), upper.next()) {
            (Some(u), None) if (u as u32) <= 0xffff => u as u32 as u16,
            _ => unit,
        };
        assert_eq!(to_upper(unit), expected, "{c:?}");

        let mut lower = c.to_lowercase();
        let expected = match (lower.next(), lower.next()) {
            (Some(l), None) if (l as u32) <= 0xffff => l as u32 as u16,
            _ => unit,
        };
        assert_eq!(to_lower(unit), expected, "{c:?}");
    }
}

#[test]
fn length_stops_at_terminator() {
    assert_eq!(length(b"abc\0def"), 3);
    assert_eq!(length(b"abc"), 3);
    assert_eq!(length::<u8>(b""), 0);
    assert_eq!(length(&wide("fenêtre")), 7);
    assert_eq!(length_opt::<u8>(None), 0);
    assert_eq!(length_opt(Some(&b"ab\0"[..])), 2);
}

#[test]
fn compare_matches_slice_ordering() {
    let words: [&[u8]; 8] =
        [b"", b"a", b"ab", b"abc", b"abd", b"b", b"\xff", b"Zebra"];
    for a in words {
        for b in words {
            let mut ta = a.to_vec();
            ta.push(0);
            let mut tb = b.to_vec();
            tb.push(0);
            assert_eq!(compare(&ta, &tb), a.cmp(b), "{a:?} vs {b:?}");
            // Trailing garbage after the terminator is ignored.
            tb.extend_from_slice(b"junk");
            assert_eq!(compare(&ta, &tb), a.cmp(b), "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn compare_units_are_unsigned() {
    assert_eq!(compare(b"\x80\0", b"\x7f\0"), Ordering::Greater);
    assert_eq!(compare(&[0xd800u16, 0], &[0x41, 0]), Ordering::Greater);
}

#[test]
fn compare_n_honors_bound() {
    assert_eq!(compare_n(b"apple\0", b"apply\0", 0), Ordering::Equal);
    assert_eq!(compare_n(b"apple\0", b"apply\0", 4), Ordering::Equal);
    assert_eq!(compare_n(b"apple\0", b"apply\0", 5), Ordering::Less);
    assert_eq!(compare_n(b"app\0", b"apple\0", 3), Ordering::Equal);
    assert_eq!(compare_n(b"app\0", b"apple\0", 4), Ordering::Less);
    assert_eq!(compare_n(&wide("ab"), &wide("ab"), usize::MAX), Ordering::Equal);
}

#[test]
fn compare_ignoring_case() {
    assert_eq!(compare_ignore_case(b"Hello\0", b"hELLO\0"), Ordering::Equal);
    assert_eq!(compare_ignore_case(b"abc\0", b"ABD\0"), Ordering::Less);
    assert_eq!(compare_ignore_case(&wide("ÉCOLE"), &wide("école")), Ordering::Equal);
    assert_eq!(compare_ignore_case_n(b"HELLO\0", b"help\0", 3), Ordering::Equal);
    assert_eq!(compare_ignore_case_n(b"HELLO\0", b"help\0", 4), Ordering::Less);
}

#[test]
fn copy_terminates_within_bounds() {
    let mut dst = [0xaau8; 8];
    assert_eq!(copy(&mut dst, b"hello\0"), 5);
    assert_eq!(&dst[..6], b"hello\0");
    assert_eq!(&dst[6..], [0xaa, 0xaa]);

    let mut small = [0xaau8; 4];
    assert_eq!(copy(&mut small, b"hello\0"), 3);
    assert_eq!(&small, b"hel\0");

    let mut empty: [u8; 0] = [];
    assert_eq!(copy(&mut empty, b"hello\0"), 0);

    let mut single = [0xaau8; 1];
    assert_eq!(copy(&mut single, b"hello\0"), 0);
    assert_eq!(single, [0]);
}

#[test]
fn copy_n_respects_count() {
    let mut dst = [0xffffu16; 16];
    let src = wide("window");
    assert_eq!(copy_n(&mut dst, &src, 3), 3);
    assert_eq!(&dst[..4], &wide("win")[..]);

    assert_eq!(copy_n(&mut dst, &src, 0), 0);
    assert_eq!(dst[0], 0);

    assert_eq!(copy_n(&mut dst, &src, 100), 6);
    assert_eq!(length(&dst), 6);
}

#[test]
fn find_substrings() {
    assert_eq!(find(b"hello world\0", b"world\0"), Some(6));
    assert_eq!(find(b"hello\0world\0", b"world\0"), None);
    assert_eq!(find(b"hello\0", b"\0"), Some(0));
    assert_eq!(find(b"\0", b"a\0"), None);
    assert_eq!(find(&wide("日本語のテキスト"), &wide("テキ")), Some(4));
}

#[test]
fn conversion_between_widths() {
    let mut to = [0xffffu16; 8];
    assert_eq!(convert_ansi_to_utf16(b"abc\0zz", &mut to), 3);
    assert_eq!(&to[..4], &wide("abc")[..]);

    let mut narrow = [0xffu8; 8];
    assert_eq!(convert_utf16_to_ansi(&wide("aé€"), &mut narrow), 3);
    assert_eq!(&narrow[..4], b"a\xe9?\0");

    // Without room for the terminator nothing past the last unit is touched.
    let mut tight = [0xffu8; 2];
    assert_eq!(convert_utf16_to_ansi(&wide("abc"), &mut tight), 2);
    assert_eq!(&tight, b"ab");
}
