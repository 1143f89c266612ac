//! Pure per-field normalisation helpers for Zotero export values.
//!
//! Each function is total on its input: values that cannot be interpreted
//! come back as `None`, never as an error. Zotero leaves plenty of fields
//! half-filled and the import must carry on regardless.

use std::collections::HashSet;

use chrono::NaiveDate;
use once_cell::sync::Lazy;

/// Minor words that stay lowercase unless they open or close the title.
static SMALL_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "as", "at", "but", "by", "en", "for", "if", "in", "nor", "of", "on",
        "or", "the", "to", "v", "v.", "via", "vs", "vs.",
    ]
    .into_iter()
    .collect()
});

/// Apply standard English title casing.
///
/// Words that already carry a capital after their first letter (acronyms,
/// camel-cased names like "mRNA" or "MacKay") are left untouched.
pub fn title_case(s: &str) -> String {
    let words: Vec<&str> = s.split_whitespace().collect();
    let last = words.len().saturating_sub(1);
    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if word.chars().skip(1).any(char::is_uppercase) {
                return (*word).to_string();
            }
            let lower = word.to_lowercase();
            if i != 0 && i != last && SMALL_WORDS.contains(lower.as_str()) {
                return lower;
            }
            capitalize(&lower)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first alphabetic character, leaving leading punctuation
/// (quotes, parentheses) in place.
fn capitalize(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut done = false;
    for c in word.chars() {
        if !done && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            done = true;
        } else {
            out.push(c);
        }
    }
    out
}

/// Split a Zotero title on its first colon into title and subtitle.
///
/// Colons after the first stay inside the subtitle. Both parts are trimmed
/// and title-cased. A subtitle that is empty after trimming is reported as
/// absent, not as an empty string.
pub fn split_title_subtitle(title: &str) -> (String, Option<String>) {
    match title.split_once(':') {
        Some((head, tail)) => {
            let subtitle = tail.trim();
            (
                title_case(head.trim()),
                (!subtitle.is_empty()).then(|| title_case(subtitle)),
            )
        }
        None => (title_case(title.trim()), None),
    }
}

/// Reorder a Zotero name list into display form.
///
/// Input is "Last, First; Last, First; ..."; output entries read
/// "First Last". Entries without a comma pass through trimmed. Anything
/// after a second ", " in one entry (suffixes like "Jr") is dropped, as the
/// Zotero export never produces it.
pub fn split_name_list(names: &str) -> Vec<String> {
    if names.trim().is_empty() {
        return Vec::new();
    }
    names
        .split("; ")
        .map(|name| {
            let mut parts = name.splitn(3, ", ");
            match (parts.next(), parts.next()) {
                (Some(last), Some(first)) => format!("{} {}", first.trim(), last.trim()),
                _ => name.trim().to_string(),
            }
        })
        .collect()
}

/// Turn a partial Zotero date into UTC seconds since the epoch.
///
/// Accepts exactly `YYYY-MM-DD`, `YYYY-MM`, and `YYYY`; a missing month
/// defaults to January and a missing day to the 1st. Any other shape yields
/// `None`.
pub fn parse_partial_date(date: &str) -> Option<i64> {
    let day = match date.len() {
        10 => NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?,
        7 => {
            let (year, month) = date.split_once('-')?;
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?
        }
        4 => NaiveDate::from_ymd_opt(date.parse().ok()?, 1, 1)?,
        _ => return None,
    };
    Some(day.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}

/// Report how specific a partial Zotero date is, by the same length
/// discrimination as [`parse_partial_date`].
pub fn date_specificity(date: &str) -> Option<&'static str> {
    match date.len() {
        10 => Some("ymd"),
        7 => Some("ym"),
        4 => Some("y"),
        _ => None,
    }
}

/// Extract a value from Zotero's space-separated "Extra" blob.
///
/// The blob encodes "key1: value1 key2: value2 ...". Only single-token
/// values can be retrieved; a value containing spaces is cut at its first
/// token.
pub fn extract_kv<'a>(blob: &'a str, key: &str) -> Option<&'a str> {
    let needle = format!("{key}:");
    let words: Vec<&str> = blob.split(' ').collect();
    words
        .windows(2)
        .find(|pair| pair[0] == needle)
        .map(|pair| pair[1])
}
