//! Header row cleanup.

use std::collections::HashSet;

/// Trim a header cell, drop a stray byte-order mark and collapse inner runs of
/// whitespace to a single space.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}').trim();
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Normalize a header row and make every name unique.
///
/// Blank headers become `Unnamed: <index>`. A repeated name gets `.1`, `.2`,
/// ... appended in order of appearance, skipping suffixes that are already
/// taken by a literal header.
pub fn unique_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let normalized: Vec<String> = raw
        .into_iter()
        .enumerate()
        .map(|(idx, header)| {
            let name = normalize_header(header.as_ref());
            if name.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                name
            }
        })
        .collect();

    let literal: HashSet<&str> = normalized.iter().map(String::as_str).collect();
    let mut used: HashSet<String> = HashSet::with_capacity(normalized.len());
    let mut headers = Vec::with_capacity(normalized.len());
    for name in &normalized {
        if used.insert(name.clone()) {
            headers.push(name.clone());
            continue;
        }
        let mut suffix = 1usize;
        let renamed = loop {
            let candidate = format!("{name}.{suffix}");
            if !used.contains(&candidate) && !literal.contains(candidate.as_str()) {
                break candidate;
            }
            suffix += 1;
        };
        used.insert(renamed.clone());
        headers.push(renamed);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_whitespace_and_bom() {
        assert_eq!(normalize_header("\u{feff}区域 "), "区域");
        assert_eq!(normalize_header("  Driver   Name "), "Driver Name");
        assert_eq!(normalize_header("   "), "");
    }

    #[test]
    fn blank_headers_get_positional_names() {
        assert_eq!(
            unique_headers(["区域", "", "  "]),
            vec!["区域", "Unnamed: 1", "Unnamed: 2"]
        );
    }

    #[test]
    fn duplicates_are_numbered_in_order() {
        assert_eq!(
            unique_headers(["车牌", "车牌", "里程", "车牌"]),
            vec!["车牌", "车牌.1", "里程", "车牌.2"]
        );
    }

    #[test]
    fn numbering_skips_literal_headers() {
        assert_eq!(unique_headers(["a", "a", "a.1"]), vec!["a", "a.2", "a.1"]);
    }
}
