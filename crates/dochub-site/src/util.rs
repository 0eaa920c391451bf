//! Small string helpers shared by the content store.

use std::cmp::Ordering;

/// Convert a slug (kebab-case or `snake_case`) to title case.
///
/// `"day-0"` becomes `"Day 0"` and `"async_await"` becomes `"Async Await"`.
pub(crate) fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

/// Compare names so that digit runs order numerically (`day-2` < `day-10`).
pub(crate) fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_rest = a;
    let mut b_rest = b;

    loop {
        match (a_rest.is_empty(), b_rest.is_empty()) {
            (true, true) => return a.cmp(b),
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        let (a_chunk, a_tail) = split_chunk(a_rest);
        let (b_chunk, b_tail) = split_chunk(b_rest);

        let ordering = if is_digits(a_chunk) && is_digits(b_chunk) {
            cmp_numeric(a_chunk, b_chunk)
        } else {
            a_chunk.cmp(b_chunk)
        };
        if ordering != Ordering::Equal {
            return ordering;
        }

        a_rest = a_tail;
        b_rest = b_tail;
    }
}

/// Split off the leading run of digits or non-digits.
fn split_chunk(s: &str) -> (&str, &str) {
    let starts_digit = s.as_bytes().first().is_some_and(u8::is_ascii_digit);
    let end = s
        .bytes()
        .position(|b| b.is_ascii_digit() != starts_digit)
        .unwrap_or(s.len());
    s.split_at(end)
}

fn is_digits(s: &str) -> bool {
    s.bytes().next().is_some_and(|b| b.is_ascii_digit())
}

/// Compare two digit runs by value without parsing (no overflow).
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
