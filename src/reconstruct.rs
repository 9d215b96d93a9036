//! Rebuild address lines from whatever text the extractors did not claim

use crate::extract::{escaped_delimiters, title_case, Entities};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Unit identifier such as `B-98` at the very start of the residue
static UNIT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]-[0-9]{1,3})(?:[\s,;|]|$)").unwrap());

/// One or more fragment delimiters
static SPLIT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("[{}]+", escaped_delimiters())).unwrap());

/// Split the unclaimed part of `address` into up to three lines.
///
/// Every non-empty entity is removed from the text first (the first
/// case-insensitive occurrence of each, in [`Entities::removal_order`]).
/// A leading unit identifier then becomes line 1 verbatim; the rest is split
/// on delimiters and title-cased.
///
/// ```rust
/// use inaddr::extract::Entities;
/// use inaddr::reconstruct::reconstruct_lines;
///
/// let entities = Entities {
///     pincode: "834086".to_string(),
///     city: "Ranchi".to_string(),
///     ..Entities::default()
/// };
/// let lines = reconstruct_lines("8/4 ; Silver CHS ; Enclave 92 ; Ranchi ; 834086", &entities);
/// assert_eq!(lines, ["8/4", "Silver Chs", "Enclave 92"]);
/// ```
pub fn reconstruct_lines(address: &str, entities: &Entities) -> [String; 3] {
    let residue = strip_entities(address.trim(), entities);
    let (unit, rest) = split_unit(&residue);
    let fragments = split_fragments(rest);

    match unit {
        Some(unit) => [
            unit.to_string(),
            fragments.first().map(|f| title_case(f)).unwrap_or_default(),
            if fragments.len() > 1 {
                title_case(&fragments[1..].join(" "))
            } else {
                String::new()
            },
        ],
        None => match fragments.as_slice() {
            [] => Default::default(),
            [first] => [title_case(first), String::new(), String::new()],
            [first, second] => [title_case(first), title_case(second), String::new()],
            [first, second, rest @ ..] => [
                title_case(first),
                title_case(second),
                title_case(&rest.join(" ")),
            ],
        },
    }
}

/// Remove each non-empty entity once, trimming the working copy after each removal.
pub fn strip_entities(address: &str, entities: &Entities) -> String {
    let mut working = address.trim().to_string();
    for entity in entities.removal_order() {
        if entity.is_empty() {
            continue;
        }
        working = remove_first_ignore_case(&working, entity).trim().to_string();
    }
    working
}

/// Remove the first case-insensitive occurrence of `needle`.
///
/// ASCII needles (the common case) are located with a plain substring search
/// over an ASCII-lowercased copy, which keeps byte offsets intact. They only
/// match ASCII case variants, so the Kelvin sign does not stand in for `k`.
/// Other needles fall back to compiling a case-insensitive regex per call.
fn remove_first_ignore_case(haystack: &str, needle: &str) -> String {
    if needle.is_ascii() {
        let lowered = haystack.to_ascii_lowercase();
        return match lowered.find(&needle.to_ascii_lowercase()) {
            Some(start) => {
                let mut out = String::with_capacity(haystack.len() - needle.len());
                out.push_str(&haystack[..start]);
                out.push_str(&haystack[start + needle.len()..]);
                out
            }
            None => haystack.to_string(),
        };
    }

    match RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re.replacen(haystack, 1, "").into_owned(),
        Err(e) => {
            log::debug!("cannot build removal pattern for {:?}: {}", needle, e);
            haystack.to_string()
        }
    }
}

/// Detach a leading unit identifier, returning it and the trimmed remainder.
fn split_unit(residue: &str) -> (Option<&str>, &str) {
    match UNIT_PATTERN.captures(residue).and_then(|caps| caps.get(1)) {
        Some(m) => (Some(m.as_str()), residue[m.end()..].trim()),
        None => (None, residue),
    }
}

/// Delimiter-separated fragments, trimmed, with empty ones dropped.
fn split_fragments(text: &str) -> Vec<&str> {
    SPLIT_PATTERN
        .split(text)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}
