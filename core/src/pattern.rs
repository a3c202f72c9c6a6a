//! Translation of `list` filters into SQL `LIKE` patterns.
//!
//! Both patterns are meant to be bound with `ESCAPE '\'` (see [`LIKE_ESCAPE`]).
//!
//! Known quirks kept for compatibility with existing stores:
//! - in a wildcard pattern a literal `.` also matches any single character;
//! - patterns are never anchored, so `f1` (or `*.txt`) matches anywhere in the path.

/// Escape character used by every pattern produced here.
pub const LIKE_ESCAPE: char = '\\';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeFilter {
    /// Starts-with pattern for the directory prefix.
    pub prefix: String,
    /// Unanchored pattern for the name filter.
    pub pattern: String,
}

impl LikeFilter {
    pub fn new(dir_prefix: &str, pattern: &str) -> Self {
        let mut prefix = String::with_capacity(dir_prefix.len() + 1);
        push_escaped(&mut prefix, dir_prefix);
        prefix.push('%');

        let mut like = String::with_capacity(pattern.len() + 2);
        like.push('%');
        if is_wildcard_pattern(pattern) {
            for ch in pattern.chars() {
                match ch {
                    '*' => like.push('%'),
                    '?' | '.' => like.push('_'),
                    other => push_escaped_char(&mut like, other),
                }
            }
        } else {
            push_escaped(&mut like, pattern);
        }
        like.push('%');

        Self {
            prefix,
            pattern: like,
        }
    }
}

/// Whether `pattern` is treated as a glob rather than a plain substring.
pub fn is_wildcard_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

fn push_escaped(out: &mut String, literal: &str) {
    for ch in literal.chars() {
        push_escaped_char(out, ch);
    }
}

fn push_escaped_char(out: &mut String, ch: char) {
    if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
        out.push(LIKE_ESCAPE);
    }
    out.push(ch);
}
