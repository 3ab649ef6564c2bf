use crate::errors::TableError;
use crate::route::RouteParams;

/// A single segment of a compiled route pattern.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PatternSegment {
    /// Matches the exact text, case-sensitively. Escaped brackets are stored unescaped.
    Literal(String),
    /// Matches any single non-empty segment and captures it under the given key.
    Param(String),
}

/// Normalizes a path for matching: collapses consecutive slashes, removes the
/// trailing slash and guarantees a leading one. The root path stays `/`.
pub(crate) fn normalize_path(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if parts.is_empty() {
        return "/".to_string();
    }

    let mut result = parts.join("/");
    result.insert(0, '/');
    result
}

/// Parses a route pattern into segments. A segment written `[name]` captures a
/// parameter; brackets escaped with a backslash stay literal. A parameter must
/// span its whole segment, e.g. `/pay/preview/[prepay_id]`.
pub(crate) fn parse_pattern(pattern: &str) -> Result<Vec<PatternSegment>, TableError> {
    let mut segments = Vec::new();
    let mut seen_params: Vec<&str> = Vec::new();

    for raw in pattern.split('/').filter(|s| !s.is_empty()) {
        match first_unescaped(raw, '[') {
            None => {
                // A closing bracket with no opening one is just as unbalanced
                if first_unescaped(raw, ']').is_some() {
                    return Err(TableError::InvalidPattern {
                        pattern: pattern.to_string(),
                    });
                }

                segments.push(PatternSegment::Literal(unescape(raw)));
            }
            Some(pos) => {
                // A parameter segment is exactly `[name]`, nothing around it
                let key = raw
                    .strip_suffix(']')
                    .filter(|_| pos == 0)
                    .map(|rest| &rest[1..])
                    .filter(|key| {
                        !key.is_empty() && !key.contains(['[', ']', '\\'])
                    })
                    .ok_or_else(|| TableError::InvalidPattern {
                        pattern: pattern.to_string(),
                    })?;

                if seen_params.contains(&key) {
                    return Err(TableError::DuplicateParameter {
                        pattern: pattern.to_string(),
                        name: key.to_string(),
                    });
                }

                seen_params.push(key);
                segments.push(PatternSegment::Param(key.to_string()));
            }
        }
    }

    Ok(segments)
}

/// Matches a normalized path against compiled segments, capturing parameters.
/// Returns `None` if the path does not match.
pub(crate) fn match_pattern(segments: &[PatternSegment], path: &str) -> Option<RouteParams> {
    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if parts.len() != segments.len() {
        return None;
    }

    let mut params = RouteParams::default();

    for (segment, part) in segments.iter().zip(parts) {
        match segment {
            PatternSegment::Literal(expected) => {
                if expected != part {
                    return None;
                }
            }
            PatternSegment::Param(key) => {
                params.0.insert(key.clone(), part.to_string());
            }
        }
    }

    Some(params)
}

fn first_unescaped(segment: &str, bracket: char) -> Option<usize> {
    let mut start = 0;

    while let Some(bracket_pos) = segment[start..].find(bracket) {
        let abs_pos = start + bracket_pos;

        // Check if escaped by counting preceding backslashes
        let backslash_count = segment[..abs_pos]
            .chars()
            .rev()
            .take_while(|&c| c == '\\')
            .count();

        if backslash_count % 2 == 1 {
            start = abs_pos + 1;
            continue;
        }

        return Some(abs_pos);
    }

    None
}

fn unescape(segment: &str) -> String {
    let mut result = String::with_capacity(segment.len());
    let mut chars = segment.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => result.push(next),
                None => result.push(c),
            }
        } else {
            result.push(c);
        }
    }

    result
}
