//! Identifier construction and label escaping for DOT output

use std::collections::HashSet;

/// Sanitize a name for use inside a DOT identifier.
///
/// Every character other than an alphanumeric or `_` becomes `_`, which covers
/// `.` and path separators.
pub fn sanitize_id(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Join a parent identifier and a child name into a qualified identifier.
pub fn qualified_id(parent: Option<&str>, name: &str) -> String {
    match parent {
        Some(parent) => format!("{}_{}", parent, sanitize_id(name)),
        None => {
            let mut id = sanitize_id(name);
            // DOT identifiers must not start with a digit
            if id.is_empty() || id.starts_with(|c: char| c.is_ascii_digit()) {
                id.insert(0, 'n');
            }
            id
        }
    }
}

/// Escape a name for use inside a quoted DOT label.
///
/// Underscores are written as `\_`. Backslashes and double quotes are escaped
/// so the label stays a single quoted string.
pub fn escape_label(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        match c {
            '_' => out.push_str("\\_"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

/// Hands out identifiers and keeps them unique within one document.
///
/// Sanitizing can merge distinct names (`a.b` and `a_b`), so a clash gets a
/// numeric suffix.
#[derive(Debug, Default)]
pub struct IdRegistry {
    used: HashSet<String>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, candidate: String) -> String {
        if self.used.insert(candidate.clone()) {
            return candidate;
        }
        let mut n = 2;
        loop {
            let next = format!("{}_{}", candidate, n);
            if self.used.insert(next.clone()) {
                return next;
            }
            n += 1;
        }
    }
}
