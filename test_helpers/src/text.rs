//! Inspection helpers for generated C# source.
//!
//! These are line- and brace-based scans tuned to the generator's own output
//! layout, not a general C# parser.

/// Number of non-overlapping occurrences of `needle` in `haystack`.
#[must_use]
pub fn occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// The `readonly partial struct` header line, without surrounding whitespace.
#[must_use]
pub fn struct_header(source: &str) -> Option<&str> {
    source
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("readonly partial struct "))
}

/// Interfaces listed in the struct header, in declaration order.
///
/// Commas nested inside generic arguments do not split entries.
#[must_use]
pub fn interfaces(source: &str) -> Vec<&str> {
    let Some((_, list)) = struct_header(source).and_then(|header| header.split_once(" : "))
    else {
        return Vec::new();
    };
    let mut entries = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;
    for (index, ch) in list.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.extend(list.get(start..index).map(str::trim));
                start = index + 1;
            }
            _ => {}
        }
    }
    entries.extend(list.get(start..).map(str::trim));
    entries
}

/// Text between the braces of the partial struct, excluding the braces.
#[must_use]
pub fn struct_body(source: &str) -> Option<&str> {
    let header_at = source.find("readonly partial struct ")?;
    let open = header_at + source.get(header_at..)?.find('{')?;
    let mut depth = 0_usize;
    for (offset, ch) in source.get(open..)?.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return source.get(open + 1..open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Names of top-level classes, in source order.
#[must_use]
pub fn top_level_classes(source: &str) -> Vec<&str> {
    source
        .lines()
        .filter_map(|line| line.strip_prefix("class "))
        .filter_map(|rest| rest.split_whitespace().next())
        .collect()
}

/// Attribute lines placed directly above the struct header.
#[must_use]
pub fn struct_attributes(source: &str) -> Vec<&str> {
    let lines: Vec<&str> = source.lines().collect();
    let Some(header) = lines
        .iter()
        .position(|line| line.starts_with("readonly partial struct "))
    else {
        return Vec::new();
    };
    let mut attributes: Vec<&str> = lines
        .iter()
        .take(header)
        .rev()
        .take_while(|line| line.starts_with('['))
        .copied()
        .collect();
    attributes.reverse();
    attributes
}
