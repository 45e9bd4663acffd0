use std::cmp::Ordering;

use crate::CharUnit;

/// Number of units before the first NUL, or the slice length if there is none.
pub fn length<C: CharUnit>(s: &[C]) -> usize {
    s.iter().position(|&c| c == C::NUL).unwrap_or(s.len())
}

/// Like [`length`], but a missing string counts as empty.
pub fn length_opt<C: CharUnit>(s: Option<&[C]>) -> usize {
    s.map_or(0, length)
}

#[inline]
fn terminated<C: CharUnit>(s: &[C]) -> &[C] {
    &s[..length(s)]
}

/// Lexicographic comparison of two terminated strings.
///
/// Units compare as unsigned numbers and the terminator sorts before any other unit, so a
/// string orders before every string it is a strict prefix of.
pub fn compare<C: CharUnit>(a: &[C], b: &[C]) -> Ordering {
    compare_by(a, b, usize::MAX, |c| c)
}

/// Compares at most `max_count` units. A zero bound always yields [`Ordering::Equal`].
pub fn compare_n<C: CharUnit>(a: &[C], b: &[C], max_count: usize) -> Ordering {
    compare_by(a, b, max_count, |c| c)
}

pub fn compare_ignore_case<C: CharUnit>(a: &[C], b: &[C]) -> Ordering {
    compare_by(a, b, usize::MAX, C::to_lower)
}

pub fn compare_ignore_case_n<C: CharUnit>(a: &[C], b: &[C], max_count: usize) -> Ordering {
    compare_by(a, b, max_count, C::to_lower)
}

fn compare_by<C: CharUnit>(a: &[C], b: &[C], max_count: usize, fold: fn(C) -> C) -> Ordering {
    let a = terminated(a).iter().take(max_count).map(|&c| fold(c));
    let b = terminated(b).iter().take(max_count).map(|&c| fold(c));
    a.cmp(b)
}

/// Copies the terminated string `src` into `dst` and terminates it.
///
/// The copy is truncated so the terminator always fits. Returns the number of units copied,
/// not counting the terminator. An empty `dst` receives nothing.
pub fn copy<C: CharUnit>(dst: &mut [C], src: &[C]) -> usize {
    copy_n(dst, src, usize::MAX)
}

/// Copies at most `count` units of `src` into `dst`, then writes a terminator after them.
///
/// Copying stops early at the terminator of `src`, and is additionally bounded by the room
/// left in `dst` once the terminator is accounted for.
pub fn copy_n<C: CharUnit>(dst: &mut [C], src: &[C], count: usize) -> usize {
    let Some(capacity) = dst.len().checked_sub(1) else {
        return 0;
    };

    let copied = length(src).min(count).min(capacity);
    dst[..copied].copy_from_slice(&src[..copied]);
    dst[copied] = C::NUL;
    copied
}

/// Index of the first occurrence of `needle` in `haystack`.
///
/// Both strings end at their terminator. An empty needle is found at index 0.
pub fn find<C: CharUnit>(haystack: &[C], needle: &[C]) -> Option<usize> {
    let haystack = terminated(haystack);
    let needle = terminated(needle);
    if needle.is_empty() {
        return Some(0);
    }

    haystack.windows(needle.len()).position(|window| window == needle)
}
